//! Web search adapter for the Google Custom Search API.

use super::{
    build_client, redact_credential, truncate_body, SourceFailure, SourceResult, WebHit,
    WebProvider,
};
use crate::config::WebSearchSettings;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Fallback snippet when the upstream result has none.
const DEFAULT_SNIPPET: &str = "No description available";

/// Adapter for Google Custom Search keyword queries.
pub struct WebSearchSource {
    client: reqwest::Client,
    settings: WebSearchSettings,
}

impl WebSearchSource {
    pub fn new(settings: &WebSearchSettings) -> Self {
        Self {
            client: build_client(settings.timeout_seconds),
            settings: settings.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: String,
    snippet: Option<String>,
    link: String,
}

impl From<SearchItem> for WebHit {
    fn from(item: SearchItem) -> Self {
        WebHit {
            title: item.title,
            snippet: item.snippet.unwrap_or_else(|| DEFAULT_SNIPPET.to_string()),
            link: item.link,
        }
    }
}

#[async_trait]
impl WebProvider for WebSearchSource {
    async fn search(&self, query: &str) -> SourceResult<Vec<WebHit>> {
        let Some(api_key) = self.settings.api_key.as_deref() else {
            return Err(SourceFailure::config(
                "Web search API key not configured (set GOOGLE_API_KEY)",
            ));
        };
        let Some(engine_id) = self.settings.engine_id.as_deref() else {
            return Err(SourceFailure::config(
                "Web search engine id not configured (set GOOGLE_CX)",
            ));
        };

        let max_results = self.settings.max_results.to_string();
        let request = self
            .client
            .get(&self.settings.base_url)
            .query(&[
                ("key", api_key),
                ("cx", engine_id),
                ("q", query),
                ("num", max_results.as_str()),
            ])
            .build()
            .map_err(SourceFailure::from_request)?;

        debug!(
            url = %redact_credential(request.url().as_str(), api_key),
            "requesting web search"
        );

        let response = self
            .client
            .execute(request)
            .await
            .map_err(SourceFailure::from_request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                body = redact_credential(truncate_body(&body, 200), api_key),
                "web search API error"
            );
            return Err(SourceFailure::upstream(
                Some(status.as_u16()),
                format!("Web search API error: {}", status.as_u16()),
            ));
        }

        // An absent items field is a well-formed empty result set.
        let payload: SearchResponse = response.json().await.map_err(|e| {
            SourceFailure::upstream(None, format!("Malformed web search response: {}", e))
        })?;

        let hits: Vec<WebHit> = payload.items.into_iter().map(WebHit::from).collect();
        debug!(count = hits.len(), "web search returned results");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::FailureKind;

    #[tokio::test]
    async fn missing_key_fails_fast_with_config_error() {
        let source = WebSearchSource::new(&WebSearchSettings::default());
        let err = source.search("cats").await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Config);
        assert!(err.message.contains("GOOGLE_API_KEY"));
    }

    #[tokio::test]
    async fn missing_engine_id_fails_fast_with_config_error() {
        let settings = WebSearchSettings {
            api_key: Some("key".to_string()),
            engine_id: None,
            ..WebSearchSettings::default()
        };
        let source = WebSearchSource::new(&settings);
        let err = source.search("cats").await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Config);
        assert!(err.message.contains("GOOGLE_CX"));
    }

    #[test]
    fn items_normalize_with_default_snippet() {
        let raw = serde_json::json!({
            "items": [
                { "title": "Cats", "snippet": "All about cats", "link": "https://cats.example.com" },
                { "title": "More cats", "link": "https://more.example.com" }
            ]
        });
        let payload: SearchResponse = serde_json::from_value(raw).unwrap();
        let hits: Vec<WebHit> = payload.items.into_iter().map(WebHit::from).collect();

        assert_eq!(hits[0].snippet, "All about cats");
        assert_eq!(hits[1].snippet, DEFAULT_SNIPPET);
        assert_eq!(hits[1].link, "https://more.example.com");
    }

    #[test]
    fn missing_items_field_is_an_empty_success() {
        let payload: SearchResponse =
            serde_json::from_str(r#"{"searchInformation":{"totalResults":"0"}}"#).unwrap();
        assert!(payload.items.is_empty());
    }
}
