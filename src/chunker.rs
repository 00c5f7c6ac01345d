use crate::types::{AnalyzerError, Result, TweetRecord};
use tracing::debug;

/// Precondition gate for a batch: analysis needs at least one record.
/// Per-field shape is the upload layer's concern, not checked here.
pub fn validate_batch(records: &[TweetRecord]) -> Result<()> {
    if records.is_empty() {
        return Err(AnalyzerError::InvalidInput(
            "data must be a non-empty array of records".to_string(),
        ));
    }
    Ok(())
}

/// Split a batch into contiguous chunks of at most `chunk_size` records.
/// Chunks partition the batch exactly: order preserved, no overlap, no gaps,
/// and only the final chunk may run short.
pub fn chunk_records(records: &[TweetRecord], chunk_size: usize) -> Vec<&[TweetRecord]> {
    // slice::chunks panics on a zero size; treat that misconfiguration as
    // one record per chunk.
    let size = chunk_size.max(1);
    let chunks: Vec<&[TweetRecord]> = records.chunks(size).collect();

    debug!(
        "Split {} records into {} chunks of up to {}",
        records.len(),
        chunks.len(),
        size
    );

    chunks
}
