//! Example: Generate a DJ script through the failover dispatcher
//!
//! This example demonstrates:
//! - Creating a completion client
//! - Dispatching one prompt over an ordered model list
//! - Reading the first non-empty answer
//!
//! Run with: OPENROUTER_API_KEY=sk-... cargo run --example generate_banter

use sfmbanter::{dispatch, ChatMessage, CompletionClient, SamplingParams};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("OPENROUTER_API_KEY")
        .map_err(|_| anyhow::anyhow!("set OPENROUTER_API_KEY to run this example"))?;

    println!("Static FM - Banter Generator");
    println!("============================\n");

    let client = CompletionClient::new(api_key)?;
    let models = vec![
        "google/gemini-2.0-flash-lite-preview-02-05:free".to_string(),
        "google/gemini-2.0-flash-exp:free".to_string(),
        "meta-llama/llama-3.3-70b-instruct:free".to_string(),
        "deepseek/deepseek-chat:free".to_string(),
    ];
    let messages = [
        ChatMessage::system(
            "You are the showrunner for 'The Graveyard Shift'. \
             Write a short, high-energy MONOLOGUE (1-2 sentences).",
        ),
        ChatMessage::user("Action!"),
    ];

    let script = dispatch(&client, &models, &messages, &SamplingParams::default()).await?;

    println!("{script}");
    Ok(())
}
