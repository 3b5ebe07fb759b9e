//! Concurrent fan-out across all sources with independent failure isolation.
//!
//! One query is dispatched to every source at once; the aggregator waits for
//! all of them to settle and records each outcome in its own slot. A failing
//! source never cancels, delays, or blanks the others.

use crate::config::Settings;
use crate::error::{QriumError, Result};
use crate::sources::{
    LlmProvider, LlmSource, SourceResult, VideoHit, VideoProvider, VideoSource, WebHit,
    WebProvider, WebSearchSource,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Composite outcome of one fan-out: exactly one of value or failure per
/// source. Lives only until the next query replaces it.
#[derive(Debug, Clone)]
pub struct AggregateResult {
    /// Fan-out generation this result belongs to; see
    /// [`Aggregator::is_current`].
    pub generation: u64,
    pub llm: SourceResult<String>,
    pub video: SourceResult<Vec<VideoHit>>,
    pub websearch: SourceResult<Vec<WebHit>>,
}

/// Coordinates the three source adapters for a single query.
pub struct Aggregator {
    llm: Arc<dyn LlmProvider>,
    video: Arc<dyn VideoProvider>,
    web: Arc<dyn WebProvider>,
    generation: AtomicU64,
}

impl Aggregator {
    /// Wire up the concrete adapters from settings.
    pub fn new(settings: &Settings) -> Self {
        Self::with_providers(
            Arc::new(LlmSource::new(&settings.llm)),
            Arc::new(VideoSource::new(&settings.video)),
            Arc::new(WebSearchSource::new(&settings.websearch)),
        )
    }

    /// Build an aggregator over arbitrary providers.
    pub fn with_providers(
        llm: Arc<dyn LlmProvider>,
        video: Arc<dyn VideoProvider>,
        web: Arc<dyn WebProvider>,
    ) -> Self {
        Self {
            llm,
            video,
            web,
            generation: AtomicU64::new(0),
        }
    }

    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.llm
    }

    pub fn video(&self) -> &Arc<dyn VideoProvider> {
        &self.video
    }

    pub fn web(&self) -> &Arc<dyn WebProvider> {
        &self.web
    }

    /// Fan one query out to all sources and wait for every outcome.
    ///
    /// The join settles independently: each source resolves or fails on its
    /// own, and the composite is returned once all three have settled. An
    /// empty or whitespace-only query is rejected before any adapter runs.
    pub async fn search(&self, query: &str) -> Result<AggregateResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(QriumError::InvalidInput(
                "query must not be empty".to_string(),
            ));
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, query, "dispatching fan-out");

        let (llm, video, websearch) = futures::join!(
            self.llm.complete(query),
            self.video.search(query),
            self.web.search(query),
        );

        for (source, failure) in [
            ("llm", llm.as_ref().err()),
            ("video", video.as_ref().err()),
            ("websearch", websearch.as_ref().err()),
        ] {
            if let Some(failure) = failure {
                warn!(source, error = %failure, "source failed");
            }
        }

        Ok(AggregateResult {
            generation,
            llm,
            video,
            websearch,
        })
    }

    /// Whether a result belongs to the most recently dispatched query.
    ///
    /// Callers holding a single result slot must discard results for which
    /// this returns false, so a slow stale fan-out cannot overwrite the
    /// newest query's outcome.
    pub fn is_current(&self, result: &AggregateResult) -> bool {
        result.generation == self.generation.load(Ordering::SeqCst)
    }
}
