//! CLI module for Qrium.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Qrium - Multi-Source Answer Aggregation
///
/// Ask one question, get three answers side by side: an LLM completion,
/// matching videos, and web search results.
#[derive(Parser, Debug)]
#[command(name = "qrium")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fan a query out to all sources and print each panel
    Query {
        /// The query to send to every source
        query: String,
    },

    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Check credential configuration
    Doctor,
}
