//! Video search adapter for the YouTube Data API v3.

use super::{build_client, truncate_body, SourceFailure, SourceResult, VideoHit, VideoProvider};
use crate::config::VideoSettings;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Adapter for YouTube keyword video search.
pub struct VideoSource {
    client: reqwest::Client,
    settings: VideoSettings,
}

impl VideoSource {
    pub fn new(settings: &VideoSettings) -> Self {
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
    id: ItemId,
    snippet: ItemSnippet,
}

#[derive(Debug, Deserialize)]
struct ItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemSnippet {
    title: String,
    #[serde(rename = "channelTitle")]
    channel_title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize, Default)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl SearchItem {
    /// Normalize one API item, skipping anything that is not a video.
    fn into_hit(self) -> Option<VideoHit> {
        let video_id = self.id.video_id?;
        let thumbnail = self
            .snippet
            .thumbnails
            .medium
            .or(self.snippet.thumbnails.default)
            .map(|t| t.url)
            .unwrap_or_default();
        Some(VideoHit {
            id: video_id.clone(),
            title: self.snippet.title,
            channel: self.snippet.channel_title,
            thumbnail,
            video_id,
        })
    }
}

#[async_trait]
impl VideoProvider for VideoSource {
    async fn search(&self, query: &str) -> SourceResult<Vec<VideoHit>> {
        let Some(api_key) = self.settings.api_key.as_deref() else {
            return Err(SourceFailure::config(
                "Video search API key not configured (set YOUTUBE_API_KEY)",
            ));
        };

        let max_results = self.settings.max_results.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.settings.base_url))
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(SourceFailure::from_request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                body = truncate_body(&body, 200),
                "video search API error"
            );
            return Err(SourceFailure::upstream(
                Some(status.as_u16()),
                format!("Video search API error: {}", status.as_u16()),
            ));
        }

        let payload: SearchResponse = response.json().await.map_err(|e| {
            SourceFailure::upstream(None, format!("Malformed video search response: {}", e))
        })?;

        let hits: Vec<VideoHit> = payload
            .items
            .into_iter()
            .filter_map(SearchItem::into_hit)
            .collect();
        debug!(count = hits.len(), "video search returned results");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::FailureKind;

    #[tokio::test]
    async fn missing_key_fails_fast_with_config_error() {
        let source = VideoSource::new(&VideoSettings::default());
        let err = source.search("cats").await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Config);
    }

    #[test]
    fn items_normalize_to_video_hits() {
        let raw = serde_json::json!({
            "items": [{
                "id": { "kind": "youtube#video", "videoId": "abc123" },
                "snippet": {
                    "title": "Cats compilation",
                    "channelTitle": "Cat TV",
                    "thumbnails": {
                        "default": { "url": "https://img.example.com/d.jpg" },
                        "medium": { "url": "https://img.example.com/m.jpg" }
                    }
                }
            }]
        });
        let payload: SearchResponse = serde_json::from_value(raw).unwrap();
        let hits: Vec<VideoHit> = payload
            .items
            .into_iter()
            .filter_map(SearchItem::into_hit)
            .collect();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].video_id, "abc123");
        assert_eq!(hits[0].id, "abc123");
        assert_eq!(hits[0].channel, "Cat TV");
        assert_eq!(hits[0].thumbnail, "https://img.example.com/m.jpg");
    }

    #[test]
    fn non_video_items_are_skipped() {
        let raw = serde_json::json!({
            "items": [
                {
                    "id": { "kind": "youtube#channel", "channelId": "ch1" },
                    "snippet": { "title": "A channel", "channelTitle": "A channel" }
                },
                {
                    "id": { "videoId": "vid1" },
                    "snippet": { "title": "A video", "channelTitle": "Someone" }
                }
            ]
        });
        let payload: SearchResponse = serde_json::from_value(raw).unwrap();
        let hits: Vec<VideoHit> = payload
            .items
            .into_iter()
            .filter_map(SearchItem::into_hit)
            .collect();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].video_id, "vid1");
    }

    #[test]
    fn thumbnail_falls_back_to_default_size() {
        let raw = serde_json::json!({
            "items": [{
                "id": { "videoId": "vid1" },
                "snippet": {
                    "title": "A video",
                    "channelTitle": "Someone",
                    "thumbnails": { "default": { "url": "https://img.example.com/d.jpg" } }
                }
            }]
        });
        let payload: SearchResponse = serde_json::from_value(raw).unwrap();
        let hit = payload.items.into_iter().next().unwrap().into_hit().unwrap();
        assert_eq!(hit.thumbnail, "https://img.example.com/d.jpg");
    }

    #[test]
    fn empty_items_is_success_with_zero_results() {
        let payload: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(payload.items.is_empty());
    }
}
