//! JSON HTTP server.
//!
//! Serves the catalog, keyword search, and search history over a small REST
//! API. All state lives in process memory: the catalog is loaded once at
//! startup and history is lost on restart.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`    | `/api/sources` | All catalog records |
//! | `POST`   | `/api/search` | Keyword search; non-blank queries are recorded |
//! | `GET`    | `/api/history` | Paginated history, newest first |
//! | `DELETE` | `/api/history/{id}` | Delete one history entry |
//! | `GET`    | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "page_size must be between 1 and 100" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so a browser frontend
//! served from another origin can call the API.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use space_search_core::search::search;
use space_search_core::seed::seed_demo_history;
use space_search_core::{Catalog, HistoryLedger, HistoryPage, SearchMatch, SourceRecord};

use crate::config::Config;
use crate::sources::load_catalog;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    /// Read-only after startup, so handlers share it without locking.
    catalog: Arc<Catalog>,
    history: Arc<HistoryLedger>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog, history: HistoryLedger) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            history: Arc::new(history),
        }
    }
}

/// Starts the Space Search HTTP API.
///
/// Loads the catalog from `[catalog].path`, optionally seeds demo history,
/// binds to `[server].bind`, and serves until Ctrl-C. A catalog that cannot
/// be read or parsed aborts startup; no partial catalog is ever served.
///
/// This is the entry point used by the `space-search serve` command.
///
/// # Arguments
///
/// - `config` — validated application configuration (catalog path, bind
///   address, search and history limits).
///
/// # Returns
///
/// Returns `Ok(())` after a graceful shutdown, or an error if the catalog
/// fails to load or the address cannot be bound.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let catalog = load_catalog(&config.catalog.path)?;
    tracing::info!(
        path = %config.catalog.path.display(),
        records = catalog.len(),
        "catalog loaded"
    );

    let history = HistoryLedger::new();
    if config.history.seed_demo {
        let seeded = seed_demo_history(&history, &catalog, chrono::Utc::now());
        tracing::info!(entries = seeded, "seeded demo search history");
    }

    let bind_addr = config.server.bind.clone();
    let state = AppState::new(config.clone(), catalog, history);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Builds the API router with CORS, request tracing, and panic recovery.
///
/// Exposed separately from [`run_server`] so a caller can mount the
/// routes on its own listener.
pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/api/sources", get(handle_sources))
        .route("/api/search", post(handle_search))
        .route("/api/history", get(handle_list_history))
        .route("/api/history/{id}", delete(handle_delete_history))
        .route("/health", get(handle_health))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`, `"not_found"`).
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

/// Turns a handler panic into a 500 with the standard error body.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown error".to_string()
    };
    tracing::error!("request handler panicked: {}", detail);
    internal(format!("Request failed: {}", detail)).into_response()
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /api/sources ============

async fn handle_sources(State(state): State<AppState>) -> Json<Vec<SourceRecord>> {
    Json(state.catalog.all().to_vec())
}

// ============ POST /api/search ============

#[derive(Deserialize)]
struct SearchBody {
    query: String,
}

#[derive(Serialize)]
struct SearchResponse {
    query: String,
    total_results: usize,
    results: Vec<SearchMatch>,
}

/// Handler for `POST /api/search`.
///
/// The query is trimmed first. A blank query browses the whole catalog and
/// is not recorded; anything else is recorded in history before responding.
async fn handle_search(
    State(state): State<AppState>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(body) = body.map_err(|e| bad_request(e.body_text()))?;

    let max = state.config.search.max_query_chars;
    if body.query.chars().count() > max {
        return Err(bad_request(format!(
            "query must be at most {} characters",
            max
        )));
    }

    let query = body.query.trim();
    let results = search(&state.catalog, query);

    if !query.is_empty() {
        let id = state.history.record(query, &results);
        tracing::debug!(%id, query, results = results.len(), "search recorded");
    }

    Ok(Json(SearchResponse {
        query: query.to_string(),
        total_results: results.len(),
        results,
    }))
}

// ============ GET /api/history ============

#[derive(Deserialize)]
struct HistoryParams {
    page: Option<i64>,
    page_size: Option<i64>,
}

/// Handler for `GET /api/history?page=&page_size=`.
async fn handle_list_history(
    State(state): State<AppState>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Json<HistoryPage>, AppError> {
    let Query(params) = params.map_err(|e| bad_request(e.body_text()))?;
    let limits = &state.config.history;

    let page = params.page.unwrap_or(1);
    if page < 1 {
        return Err(bad_request("page must be >= 1"));
    }

    let page_size = params
        .page_size
        .unwrap_or(limits.default_page_size as i64);
    if page_size < 1 || page_size > limits.max_page_size as i64 {
        return Err(bad_request(format!(
            "page_size must be between 1 and {}",
            limits.max_page_size
        )));
    }

    let page = usize::try_from(page).map_err(|_| bad_request("page is too large"))?;
    Ok(Json(state.history.list(page, page_size as usize)))
}

// ============ DELETE /api/history/{id} ============

async fn handle_delete_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.history.delete(&id) {
        tracing::info!(%id, "history entry deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(format!("history entry not found: {}", id)))
    }
}
