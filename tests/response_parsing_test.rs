use tweet_analyzer::types::*;
use tweet_analyzer::{parse_generated_tweets, strip_code_fences};

#[test]
fn valid_json_object_round_trips() {
    let raw = r#"{"generatedTweets":[{"content":"A"}]}"#;
    let tweets = parse_generated_tweets(raw).expect("valid JSON should parse");

    assert_eq!(tweets.len(), 1);
    assert_eq!(tweets[0].content, "A");
}

#[test]
fn fenced_json_parses_identically_to_unwrapped() {
    let unwrapped = r#"{"generatedTweets":[{"content":"DeFi fees remain a top worry."}]}"#;
    let fenced = format!("```json\n{}\n```", unwrapped);

    let from_fenced = parse_generated_tweets(&fenced).expect("fenced JSON should parse");
    let from_plain = parse_generated_tweets(unwrapped).expect("plain JSON should parse");

    assert_eq!(from_fenced, from_plain);
}

#[test]
fn fence_without_language_tag_is_stripped() {
    let raw = "```\n{\"generatedTweets\":[{\"content\":\"B\"}]}\n```";
    let tweets = parse_generated_tweets(raw).expect("untagged fence should parse");

    assert_eq!(tweets.len(), 1);
    assert_eq!(tweets[0].content, "B");
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let raw = "  \n\n{\"generatedTweets\":[{\"content\":\"C\"}]}\n  ";
    let tweets = parse_generated_tweets(raw).expect("padded JSON should parse");

    assert_eq!(tweets.len(), 1);
}

#[test]
fn non_json_text_yields_malformed_response() {
    match parse_generated_tweets("not json") {
        Err(AnalyzerError::MalformedResponse(_)) => {}
        other => panic!("expected MalformedResponse, got {:?}", other),
    }
}

#[test]
fn missing_array_field_yields_malformed_response() {
    match parse_generated_tweets(r#"{"somethingElse": []}"#) {
        Err(AnalyzerError::MalformedResponse(_)) => {}
        other => panic!("expected MalformedResponse, got {:?}", other),
    }
}

#[test]
fn non_array_field_yields_malformed_response() {
    match parse_generated_tweets(r#"{"generatedTweets": "three tweets"}"#) {
        Err(AnalyzerError::MalformedResponse(_)) => {}
        other => panic!("expected MalformedResponse, got {:?}", other),
    }
}

#[test]
fn item_count_is_not_enforced() {
    // The prompt asks for exactly three items but the pipeline must accept
    // whatever count the model actually returned.
    let raw = r#"{"generatedTweets":[
        {"content":"one"},{"content":"two"},{"content":"three"},{"content":"four"}
    ]}"#;
    let tweets = parse_generated_tweets(raw).expect("four items should parse");

    assert_eq!(tweets.len(), 4);
}

#[test]
fn empty_array_yields_zero_tweets() {
    let tweets = parse_generated_tweets(r#"{"generatedTweets":[]}"#).expect("empty array is valid");
    assert!(tweets.is_empty());
}

#[test]
fn item_without_content_defaults_to_empty_string() {
    let raw = r#"{"generatedTweets":[{"content":"ok"},{"note":"no content here"}]}"#;
    let tweets = parse_generated_tweets(raw).expect("objects without content should still parse");

    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets[0].content, "ok");
    assert_eq!(tweets[1].content, "");
}

#[test]
fn non_object_array_entries_yield_malformed_response() {
    match parse_generated_tweets(r#"{"generatedTweets":[42, "plain string"]}"#) {
        Err(AnalyzerError::MalformedResponse(_)) => {}
        other => panic!("expected MalformedResponse, got {:?}", other),
    }
}

#[test]
fn strip_code_fences_leaves_plain_text_alone() {
    assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
}

#[test]
fn strip_code_fences_keeps_unterminated_fence() {
    // No closing fence: hand the text to the JSON parser as-is.
    let raw = "```json\n{\"a\": 1}";
    assert_eq!(strip_code_fences(raw), raw.trim());
}
