use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tweet_analyzer::{
    AnalysisContext, AnalysisRequest, AnalysisResponse, AnalyzerConfig, ChatApiModel, LlmConfig,
    TweetAnalyzer,
};
use url::Url;

/// Analyze a batch of tweets and generate summary tweets of the top concerns.
#[derive(Parser, Debug)]
#[command(name = "tweet-analyzer", version, about)]
struct Args {
    /// Path to a JSON file holding {"data": [...], "keyword": ..., "referenceTweet": ...}
    input: PathBuf,

    /// Keyword to steer the analysis (overrides the one in the input file)
    #[arg(long)]
    keyword: Option<String>,

    /// Reference tweet to steer tone (overrides the one in the input file)
    #[arg(long)]
    reference_tweet: Option<String>,

    /// Records per inference call
    #[arg(long, default_value_t = 100)]
    chunk_size: usize,

    /// Chat-completion model identifier
    #[arg(long, default_value = "deepseek-chat")]
    model: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, default_value = "https://api.deepseek.com/")]
    api_base: Url,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let api_key = std::env::var("DEEPSEEK_API_KEY").context("DEEPSEEK_API_KEY must be set")?;

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let request: AnalysisRequest =
        serde_json::from_str(&raw).context("Input file is not a valid analysis request")?;

    info!(
        "Loaded {} records from {}",
        request.data.len(),
        args.input.display()
    );

    let llm_config = LlmConfig {
        api_base: args.api_base,
        api_key,
        model: args.model,
        ..LlmConfig::default()
    };

    let context = AnalysisContext {
        keyword: args.keyword.or(request.keyword),
        reference_tweet: args.reference_tweet.or(request.reference_tweet),
    };

    let analyzer = TweetAnalyzer::new(
        Arc::new(ChatApiModel::new(llm_config)),
        AnalyzerConfig {
            chunk_size: args.chunk_size,
        },
    );

    let report = analyzer.analyze(&request.data, &context).await?;

    info!(
        "Generated {} tweets ({} chunks ok, {} skipped)",
        report.generated_tweets.len(),
        report.chunks_processed,
        report.chunks_skipped
    );

    let response = AnalysisResponse {
        generated_tweets: report.generated_tweets,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
