use tweet_analyzer::types::*;
use tweet_analyzer::{chunk_records, validate_batch};

fn make_records(count: usize) -> Vec<TweetRecord> {
    (0..count)
        .map(|i| TweetRecord {
            author_handle: format!("@user{}", i),
            posted_at: PostedAt::Text(format!("2025-01-{:02}", (i % 28) + 1)),
            text: format!("tweet number {}", i),
        })
        .collect()
}

#[test]
fn chunk_count_matches_ceiling_division() {
    for (n, k) in [(1, 100), (100, 100), (101, 100), (250, 100), (10, 3), (7, 7)] {
        let records = make_records(n);
        let chunks = chunk_records(&records, k);
        let expected = (n + k - 1) / k;
        assert_eq!(
            chunks.len(),
            expected,
            "{} records at chunk size {} should give {} chunks",
            n,
            k,
            expected
        );
    }
}

#[test]
fn chunks_concatenate_to_original_batch() {
    let records = make_records(250);
    let chunks = chunk_records(&records, 100);

    let rejoined: Vec<&str> = chunks
        .iter()
        .flat_map(|chunk| chunk.iter().map(|r| r.text.as_str()))
        .collect();
    let original: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();

    assert_eq!(rejoined, original, "Concatenated chunks must reproduce the batch in order");
}

#[test]
fn only_final_chunk_runs_short() {
    let records = make_records(250);
    let chunks = chunk_records(&records, 100);

    let sizes: Vec<usize> = chunks.iter().map(|chunk| chunk.len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
}

#[test]
fn exact_multiple_has_no_short_chunk() {
    let records = make_records(200);
    let chunks = chunk_records(&records, 100);

    assert!(chunks.iter().all(|chunk| chunk.len() == 100));
}

#[test]
fn zero_chunk_size_falls_back_to_one() {
    let records = make_records(5);
    let chunks = chunk_records(&records, 0);

    assert_eq!(chunks.len(), 5);
    assert!(chunks.iter().all(|chunk| chunk.len() == 1));
}

#[test]
fn empty_batch_is_rejected() {
    match validate_batch(&[]) {
        Err(AnalyzerError::InvalidInput(_)) => {}
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn non_empty_batch_passes_validation() {
    let records = make_records(1);
    assert!(validate_batch(&records).is_ok());
}
