use crate::types::{AnalyzerError, GeneratedTweet, Result};
use tracing::debug;

/// Strip a wrapping markdown code fence, tolerating an optional language tag
/// on the opening line. The upstream model intermittently wraps its JSON in
/// such fencing.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        // Unterminated fence; leave the text for the JSON parser to reject.
        return trimmed;
    };

    // The opening fence may carry a language tag such as ```json.
    let body = match body.split_once('\n') {
        Some((tag, rest)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => rest,
        _ => body,
    };

    body.trim()
}

/// Parse raw model output into generated tweets.
///
/// The upstream text is never trusted: it may be fenced, may not be JSON at
/// all, and may not carry the requested shape. Any of those cases yields
/// `MalformedResponse` for the caller to contain at the chunk level. The
/// requested item count (three per chunk) is a prompt-level ask and is not
/// validated here.
pub fn parse_generated_tweets(raw: &str) -> Result<Vec<GeneratedTweet>> {
    let cleaned = strip_code_fences(raw);

    let value: serde_json::Value = serde_json::from_str(cleaned).map_err(|e| {
        AnalyzerError::MalformedResponse(format!("response is not valid JSON: {}", e))
    })?;

    let Some(items) = value.get("generatedTweets").and_then(|v| v.as_array()) else {
        return Err(AnalyzerError::MalformedResponse(
            "response carries no generatedTweets array".to_string(),
        ));
    };

    let tweets: Vec<GeneratedTweet> =
        serde_json::from_value(serde_json::Value::Array(items.clone())).map_err(|e| {
            AnalyzerError::MalformedResponse(format!(
                "generatedTweets entries did not deserialize: {}",
                e
            ))
        })?;

    debug!("Parsed {} generated tweets from model response", tweets.len());

    Ok(tweets)
}
