pub mod chunker;
pub mod llm_adapter;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod types;

pub use chunker::{chunk_records, validate_batch};
pub use llm_adapter::{ChatApiModel, ChatModel, MockChatModel, MockReply};
pub use parser::{parse_generated_tweets, strip_code_fences};
pub use pipeline::TweetAnalyzer;
pub use types::*;
