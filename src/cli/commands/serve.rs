//! Serve command - run the HTTP API server.

use crate::aggregator::Aggregator;
use crate::cli::Output;
use crate::config::Settings;
use crate::server;

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let aggregator = Aggregator::new(&settings);

    Output::header("Qrium API Server");
    println!();
    Output::success(&format!("Listening on http://{}:{}", host, port));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("LLM", "POST /api/llm");
    Output::kv("Video search", "POST /api/video");
    Output::kv("Web search", "POST /api/websearch");
    Output::kv("Fan-out", "POST /api/search");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    server::serve(host, port, aggregator).await
}
