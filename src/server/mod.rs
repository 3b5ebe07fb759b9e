//! HTTP API server exposing the source adapters and the fan-out.
//!
//! One POST endpoint per source plus a composite endpoint running the full
//! concurrent fan-out server-side. All endpoints take `{ "query": "..." }`
//! and answer JSON.

use crate::aggregator::{AggregateResult, Aggregator};
use crate::sources::{FailureKind, SourceFailure, SourceResult, VideoHit, WebHit};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    aggregator: Aggregator,
}

/// Build the API router over an aggregator.
pub fn router(aggregator: Aggregator) -> Router {
    let state = Arc::new(AppState { aggregator });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/llm", post(llm))
        .route("/api/video", post(video))
        .route("/api/websearch", post(websearch))
        .route("/api/search", post(search))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP API server.
pub async fn serve(host: &str, port: u16, aggregator: Aggregator) -> anyhow::Result<()> {
    let app = router(aggregator);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct QueryRequest {
    #[serde(default)]
    query: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct LlmResponse {
    response: String,
}

#[derive(Serialize)]
struct ItemsResponse<T> {
    items: Vec<T>,
}

/// One source's slot in the composite response.
#[derive(Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
enum PanelOutcome<T> {
    Ok {
        #[serde(flatten)]
        value: T,
    },
    Failed {
        error: String,
    },
}

impl<T> PanelOutcome<T> {
    fn from_result<U>(result: SourceResult<U>, wrap: impl FnOnce(U) -> T) -> Self {
        match result {
            Ok(value) => PanelOutcome::Ok { value: wrap(value) },
            Err(failure) => PanelOutcome::Failed {
                error: failure.message,
            },
        }
    }
}

#[derive(Serialize)]
struct SearchResponse {
    llm: PanelOutcome<LlmResponse>,
    video: PanelOutcome<ItemsResponse<VideoHit>>,
    websearch: PanelOutcome<ItemsResponse<WebHit>>,
}

impl From<AggregateResult> for SearchResponse {
    fn from(result: AggregateResult) -> Self {
        Self {
            llm: PanelOutcome::from_result(result.llm, |response| LlmResponse { response }),
            video: PanelOutcome::from_result(result.video, |items| ItemsResponse { items }),
            websearch: PanelOutcome::from_result(result.websearch, |items| ItemsResponse {
                items,
            }),
        }
    }
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn llm(State(state): State<Arc<AppState>>, Json(req): Json<QueryRequest>) -> Response {
    let Some(query) = validated(&req) else {
        return query_required();
    };
    match state.aggregator.llm().complete(query).await {
        Ok(answer) => Json(LlmResponse { response: answer }).into_response(),
        Err(failure) => failure_response(failure, false),
    }
}

async fn video(State(state): State<Arc<AppState>>, Json(req): Json<QueryRequest>) -> Response {
    let Some(query) = validated(&req) else {
        return query_required();
    };
    match state.aggregator.video().search(query).await {
        Ok(items) => Json(ItemsResponse { items }).into_response(),
        Err(failure) => failure_response(failure, false),
    }
}

async fn websearch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Response {
    let Some(query) = validated(&req) else {
        return query_required();
    };
    match state.aggregator.web().search(query).await {
        Ok(items) => Json(ItemsResponse { items }).into_response(),
        // Web search passes a known upstream status through to the caller.
        Err(failure) => failure_response(failure, true),
    }
}

async fn search(State(state): State<Arc<AppState>>, Json(req): Json<QueryRequest>) -> Response {
    match state.aggregator.search(&req.query).await {
        Ok(result) => Json(SearchResponse::from(result)).into_response(),
        Err(_) => query_required(),
    }
}

fn validated(req: &QueryRequest) -> Option<&str> {
    let query = req.query.trim();
    (!query.is_empty()).then_some(query)
}

fn query_required() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Query required".to_string(),
        }),
    )
        .into_response()
}

fn failure_response(failure: SourceFailure, passthrough_status: bool) -> Response {
    let status = match failure.kind {
        FailureKind::Upstream {
            status: Some(code),
        } if passthrough_status => {
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: failure.message,
        }),
    )
        .into_response()
}
