//! Upstream source adapters.
//!
//! Each adapter wraps one third-party HTTP API: it injects the server-held
//! credential, translates a free-text query into that API's request shape,
//! and normalizes the response into a small typed result. Failures never
//! escape an adapter as panics or crate-level errors; every path funnels
//! into a [`SourceFailure`] so siblings in the same fan-out are unaffected.

mod llm;
mod video;
mod websearch;

pub use llm::LlmSource;
pub use video::VideoSource;
pub use websearch::WebSearchSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Why a single source failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FailureKind {
    /// A required credential was missing; no outbound call was attempted.
    Config,
    /// The upstream API answered with a non-success status or a payload
    /// missing its expected structure.
    Upstream { status: Option<u16> },
    /// The upstream API could not be reached (connect failure, timeout).
    Transport,
}

/// Failure of one source for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct SourceFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl SourceFailure {
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Config,
            message: message.into(),
        }
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Upstream { status },
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            message: message.into(),
        }
    }

    /// Map a reqwest error into the failure taxonomy.
    ///
    /// Errors carrying an HTTP status become upstream failures; everything
    /// else (connect, timeout, decode before a status was seen) is transport.
    pub fn from_request(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::upstream(
                Some(status.as_u16()),
                format!("Upstream API error: {}", status),
            ),
            None if err.is_timeout() => Self::transport("Request timed out".to_string()),
            None => Self::transport(format!("Request failed: {}", err)),
        }
    }
}

/// Outcome of one source for one query: fully resolved or fully failed.
pub type SourceResult<T> = std::result::Result<T, SourceFailure>;

/// One video search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoHit {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub thumbnail: String,
    #[serde(rename = "videoId")]
    pub video_id: String,
}

/// One web search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// LLM completion source.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Answer a free-text query with a single completion.
    async fn complete(&self, query: &str) -> SourceResult<String>;
}

/// Video search source.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Search for videos matching a free-text query.
    async fn search(&self, query: &str) -> SourceResult<Vec<VideoHit>>;
}

/// Web search source.
#[async_trait]
pub trait WebProvider: Send + Sync {
    /// Search the web for a free-text query.
    async fn search(&self, query: &str) -> SourceResult<Vec<WebHit>>;
}

/// Create an HTTP client with the adapter's timeout.
pub(crate) fn build_client(timeout_seconds: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .expect("Failed to create HTTP client")
}

/// Replace a credential with a placeholder before a URL or message is logged.
pub(crate) fn redact_credential(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, "[REDACTED]")
}

/// Truncate an upstream body for diagnostic logging.
pub(crate) fn truncate_body(body: &str, max_len: usize) -> &str {
    match body.char_indices().nth(max_len) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_removes_secret_from_url() {
        let url = "https://api.example.com/search?key=sk-secret123&q=cats";
        let redacted = redact_credential(url, "sk-secret123");
        assert!(!redacted.contains("sk-secret123"));
        assert!(redacted.contains("[REDACTED]"));
        assert!(redacted.contains("q=cats"));
    }

    #[test]
    fn redaction_with_empty_secret_is_identity() {
        let url = "https://api.example.com/search?q=cats";
        assert_eq!(redact_credential(url, ""), url);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_body("hello world", 5), "hello");
        assert_eq!(truncate_body("hi", 5), "hi");
        // Multi-byte characters must not be split.
        assert_eq!(truncate_body("æøå12", 3), "æøå");
    }

    #[test]
    fn failure_constructors_set_kind() {
        assert_eq!(SourceFailure::config("x").kind, FailureKind::Config);
        assert_eq!(
            SourceFailure::upstream(Some(403), "x").kind,
            FailureKind::Upstream { status: Some(403) }
        );
        assert_eq!(SourceFailure::transport("x").kind, FailureKind::Transport);
    }

    #[test]
    fn failure_serializes_with_tagged_kind() {
        let failure = SourceFailure::upstream(Some(500), "boom");
        let json = serde_json::to_value(&failure.kind).unwrap();
        assert_eq!(json["kind"], "upstream");
        assert_eq!(json["status"], 500);
    }

    #[test]
    fn video_hit_uses_camel_case_video_id_on_the_wire() {
        let hit = VideoHit {
            id: "abc".to_string(),
            title: "Cats".to_string(),
            channel: "Cat TV".to_string(),
            thumbnail: "https://img.example.com/abc.jpg".to_string(),
            video_id: "abc".to_string(),
        };
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["videoId"], "abc");
        assert_eq!(json["channel"], "Cat TV");
    }
}
