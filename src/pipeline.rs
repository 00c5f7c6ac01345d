use crate::chunker::{chunk_records, validate_batch};
use crate::llm_adapter::ChatModel;
use crate::parser::parse_generated_tweets;
use crate::prompt::SYSTEM_PROMPT;
use crate::types::{
    AnalysisContext, AnalysisReport, AnalyzerConfig, AnalyzerError, ChunkOutcome, Result,
    SkipReason, TweetRecord,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Payload sent as the user message for one chunk. Absent steering fields
/// are omitted from the JSON rather than serialized as null.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChunkPayload<'a> {
    data: &'a [TweetRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    keyword: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_tweet: Option<&'a str>,
}

/// Orchestrates one analysis run: validate the batch, partition it, query
/// the model chunk by chunk, and accumulate whatever each chunk produced.
///
/// The analyzer holds no per-run state, so one instance can serve concurrent
/// runs; each call owns its own accumulation.
pub struct TweetAnalyzer {
    model: Arc<dyn ChatModel>,
    config: AnalyzerConfig,
}

impl TweetAnalyzer {
    pub fn new(model: Arc<dyn ChatModel>, config: AnalyzerConfig) -> Self {
        Self { model, config }
    }

    /// Run the full pipeline over a batch of records.
    ///
    /// Per-chunk upstream and parse failures are contained: the chunk is
    /// skipped and the run continues. Only an empty batch or an unexpected
    /// internal fault fails the whole run.
    pub async fn analyze(
        &self,
        records: &[TweetRecord],
        context: &AnalysisContext,
    ) -> Result<AnalysisReport> {
        let run_id = Uuid::new_v4();

        validate_batch(records)?;

        let chunks = chunk_records(records, self.config.chunk_size);
        info!(
            "Run {}: {} records split into {} chunks (model: {})",
            run_id,
            records.len(),
            chunks.len(),
            self.model.model_name()
        );

        let mut generated_tweets = Vec::new();
        let mut chunks_processed = 0;
        let mut chunks_skipped = 0;

        for (index, chunk) in chunks.iter().enumerate() {
            info!(
                "Run {}: processing chunk {}/{} ({} records)",
                run_id,
                index + 1,
                chunks.len(),
                chunk.len()
            );

            match self.process_chunk(chunk, context).await? {
                ChunkOutcome::Generated(items) => {
                    info!(
                        "Run {}: chunk {} produced {} tweets",
                        run_id,
                        index + 1,
                        items.len()
                    );
                    generated_tweets.extend(items);
                    chunks_processed += 1;
                }
                ChunkOutcome::Skipped { reason } => {
                    warn!("Run {}: skipping chunk {}: {}", run_id, index + 1, reason);
                    chunks_skipped += 1;
                }
            }
        }

        info!(
            "Run {}: finished with {} tweets ({} chunks ok, {} skipped)",
            run_id,
            generated_tweets.len(),
            chunks_processed,
            chunks_skipped
        );

        Ok(AnalysisReport {
            run_id,
            generated_tweets,
            chunks_processed,
            chunks_skipped,
        })
    }

    /// Process a single chunk end to end. Upstream and parse failures fold
    /// into the outcome; anything else aborts the run.
    async fn process_chunk(
        &self,
        chunk: &[TweetRecord],
        context: &AnalysisContext,
    ) -> Result<ChunkOutcome> {
        let payload = serde_json::to_string(&ChunkPayload {
            data: chunk,
            keyword: context.keyword.as_deref(),
            reference_tweet: context.reference_tweet.as_deref(),
        })?;

        let raw = match self.model.complete(SYSTEM_PROMPT, &payload).await {
            Ok(raw) => raw,
            Err(e @ (AnalyzerError::Http(_) | AnalyzerError::Api { .. })) => {
                return Ok(ChunkOutcome::Skipped {
                    reason: SkipReason::Upstream(e.to_string()),
                });
            }
            Err(e) => return Err(e),
        };

        match parse_generated_tweets(&raw) {
            Ok(items) => Ok(ChunkOutcome::Generated(items)),
            Err(AnalyzerError::MalformedResponse(detail)) => Ok(ChunkOutcome::Skipped {
                reason: SkipReason::MalformedResponse(detail),
            }),
            Err(e) => Err(e),
        }
    }
}
