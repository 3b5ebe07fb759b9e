//! Qrium - Multi-Source Answer Aggregation
//!
//! Fan one free-text query out to three unrelated upstream APIs — an LLM
//! chat-completion endpoint, YouTube video search, and Google web search —
//! concurrently, and collect each source's outcome independently.
//!
//! # Overview
//!
//! Qrium allows you to:
//! - Ask one question and see an AI answer, matching videos, and web results
//!   side by side
//! - Run the same fan-out behind an HTTP API for other frontends
//! - Keep going when one source fails: each panel succeeds or fails on its own
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `sources` - Upstream adapters (LLM, video search, web search)
//! - `aggregator` - Concurrent fan-out and per-source outcome collection
//! - `markup` - Line-oriented markup rendering for LLM answers
//! - `server` - HTTP API surface
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use qrium::aggregator::Aggregator;
//! use qrium::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let aggregator = Aggregator::new(&settings);
//!
//!     let result = aggregator.search("rust ownership").await?;
//!     if let Ok(answer) = &result.llm {
//!         println!("{}", answer);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod markup;
pub mod server;
pub mod sources;

pub use error::{QriumError, Result};
