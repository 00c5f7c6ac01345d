use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// One tweet as submitted for analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetRecord {
    pub author_handle: String,
    pub posted_at: PostedAt,
    pub text: String,
}

/// Upload sources are loose about timestamps: some sheets carry RFC 3339
/// strings, others raw unix seconds or free-form dates. All variants pass
/// through to the model untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostedAt {
    Timestamp(DateTime<Utc>),
    UnixSeconds(i64),
    Text(String),
}

/// Optional steering parameters, constant across all chunks of one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContext {
    pub keyword: Option<String>,
    pub reference_tweet: Option<String>,
}

/// One generated summary tweet. The prompt asks for content within 280
/// characters but the pipeline does not enforce the limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTweet {
    #[serde(default)]
    pub content: String,
}

/// Result of processing one chunk. Skips carry their reason so partial
/// failure is a data shape the aggregation loop can count and log, not
/// implicit control flow.
#[derive(Debug, Clone)]
pub enum ChunkOutcome {
    Generated(Vec<GeneratedTweet>),
    Skipped { reason: SkipReason },
}

#[derive(Debug, Clone)]
pub enum SkipReason {
    Upstream(String),
    MalformedResponse(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Upstream(detail) => write!(f, "upstream call failed: {}", detail),
            SkipReason::MalformedResponse(detail) => {
                write!(f, "unusable model response: {}", detail)
            }
        }
    }
}

/// Final result of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub generated_tweets: Vec<GeneratedTweet>,
    pub chunks_processed: usize,
    pub chunks_skipped: usize,
}

/// Inbound shape of the analyze boundary: `{data, keyword?, referenceTweet?}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub data: Vec<TweetRecord>,
    pub keyword: Option<String>,
    pub reference_tweet: Option<String>,
}

/// Outbound shape of the analyze boundary: `{generatedTweets}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub generated_tweets: Vec<GeneratedTweet>,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_base: Url,
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse("https://api.deepseek.com/").expect("static URL is valid"),
            api_key: String::new(),
            model: "deepseek-chat".to_string(),
            timeout_seconds: 30,
            max_retries: 0,
            retry_delay_seconds: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub chunk_size: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { chunk_size: 100 }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream API error: HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("general error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
