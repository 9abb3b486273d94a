// Axum server for the visa checker page
//
// Serves the rendered page, the HTMX search fragment, the JSON API over the
// catalog and the Markdown export. The dataset is immutable after startup.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use axum_htmx::HxRequest;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::catalog::search::{search, VisaQuery};
use crate::config::AppConfig;
use crate::data::VisaDataset;
use crate::render::{HtmlFormatter, PageGenerator, SearchResultsView};

const INDEX_CACHE_KEY: &str = "page:index";
const MARKDOWN_CACHE_KEY: &str = "export:markdown";

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<VisaDataset>,
    pub generator: PageGenerator,
    /// Rendered documents that do not depend on the request
    pub page_cache: Cache<String, String>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading visa catalog from {}...", config.data_dir.display());
        let dataset = VisaDataset::load(&config.data_dir)?;
        Ok(Self::from_dataset(dataset, config.page_cache_ttl))
    }

    pub fn from_dataset(dataset: VisaDataset, page_cache_ttl: Duration) -> Self {
        tracing::info!("Initializing Moka page cache (TTL {}s)...", page_cache_ttl.as_secs());
        let page_cache = Cache::builder()
            .max_capacity(64)
            .time_to_live(page_cache_ttl)
            .build();

        Self {
            dataset: Arc::new(dataset),
            generator: PageGenerator::new(),
            page_cache,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // HTML pages
        .route("/", get(index_page))
        .route("/search", get(search_page))

        // Catalog endpoints (JSON API)
        .route("/api/countries", get(list_countries))
        .route("/api/countries/:name", get(get_country))
        .route("/api/nomad-visas", get(list_nomad_visas))
        .route("/api/search", get(search_countries))

        // Export
        .route("/export/visa-guide.md", get(export_markdown))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    if let Some(cached) = state.page_cache.get(INDEX_CACHE_KEY).await {
        tracing::debug!("Cache hit for index page");
        return Ok(Html(cached));
    }

    let html = state
        .generator
        .render_html(&state.dataset, None)
        .map_err(|e| AppError::Render(format!("{:#}", e)))?;

    state.page_cache.insert(INDEX_CACHE_KEY.to_string(), html.clone()).await;

    Ok(Html(html))
}

/// Full page with results, or only the results fragment for HTMX requests.
async fn search_page(
    State(state): State<AppState>,
    HxRequest(is_htmx): HxRequest,
    query: Result<Query<VisaQuery>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let Query(query) = query?;
    let outcome = search(&state.dataset, &query).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let html = if is_htmx {
        let results = SearchResultsView::from_outcome(&outcome);
        HtmlFormatter::render_search_results(&results).map_err(|e| AppError::Render(e.to_string()))?
    } else {
        state
            .generator
            .render_html(&state.dataset, Some(&outcome))
            .map_err(|e| AppError::Render(format!("{:#}", e)))?
    };

    Ok(Html(html))
}

async fn list_countries(State(state): State<AppState>) -> Json<serde_json::Value> {
    let countries = state.dataset.countries();
    Json(serde_json::json!({
        "rows": countries.len(),
        "data": countries,
    }))
}

async fn get_country(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let record = state
        .dataset
        .country(&name)
        .ok_or_else(|| AppError::NotFound(format!("Country {} not found", name)))?;

    let value = serde_json::to_value(record).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(Json(value))
}

async fn list_nomad_visas(State(state): State<AppState>) -> Json<serde_json::Value> {
    let nomad_visas = state.dataset.nomad_visas();
    Json(serde_json::json!({
        "rows": nomad_visas.len(),
        "data": nomad_visas,
    }))
}

async fn search_countries(
    State(state): State<AppState>,
    query: Result<Query<VisaQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Query(query) = query?;
    let start = std::time::Instant::now();
    let outcome = search(&state.dataset, &query).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let elapsed = start.elapsed();

    Ok(Json(serde_json::json!({
        "rows": outcome.hits.len(),
        "destination": outcome.destination,
        "showsNomadNotice": outcome.shows_nomad_notice(),
        "data": outcome.hits,
        "query_time_us": elapsed.as_micros(),
    })))
}

async fn export_markdown(State(state): State<AppState>) -> impl IntoResponse {
    let markdown = match state.page_cache.get(MARKDOWN_CACHE_KEY).await {
        Some(cached) => {
            tracing::debug!("Cache hit for markdown export");
            cached
        }
        None => {
            let markdown = state.generator.render_markdown(&state.dataset, None);
            state
                .page_cache
                .insert(MARKDOWN_CACHE_KEY.to_string(), markdown.clone())
                .await;
            markdown
        }
    };

    (
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        markdown,
    )
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Render(String),
    Internal(String),
}

// Unknown filter values get the same JSON error body as every other 400
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Render(msg) => {
                tracing::error!("Render failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
