pub mod error;

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use crate::config::Config;
use crate::dataset::DatasetCache;
use crate::filter::{self, Category};
use error::ApiError;

/// Shared handler state: the dataset cache plus where sources live.
#[derive(Clone)]
pub struct AppState {
    cache: Arc<DatasetCache>,
    /// Static asset root; `path=` queries resolve under it.
    public_dir: PathBuf,
    /// Absolute path of the default CSV source.
    default_csv: PathBuf,
}

impl AppState {
    pub fn new(cache: Arc<DatasetCache>, public_dir: PathBuf, default_csv: PathBuf) -> Self {
        let default_csv = public_dir.join(default_csv);
        Self {
            cache,
            public_dir,
            default_csv,
        }
    }
}

/// Build the application router: the JSON API plus static UI assets.
pub fn router(state: AppState) -> Router {
    let index_file = state.public_dir.join("index.html");
    let static_service =
        ServeDir::new(&state.public_dir).not_found_service(ServeFile::new(index_file));

    Router::new()
        .route("/api/csv", get(csv))
        .route("/api/statcast", get(statcast))
        .route("/api/columns", get(columns))
        .fallback_service(static_service)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(config: Config) -> Result<()> {
    let state = AppState::new(
        Arc::new(DatasetCache::new()),
        config.public_dir.clone(),
        config.default_csv.clone(),
    );
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding `{}`", config.bind_addr))?;
    info!(
        addr = %config.bind_addr,
        public_dir = %config.public_dir.display(),
        "statboard listening"
    );
    axum::serve(listener, app).await.context("serving http")?;
    Ok(())
}

/// `GET /api/csv` — the default dataset, unfiltered.
/// `GET /api/csv?path=<relative>` — a specific CSV under the public root.
/// Query parameters without `path` mark a malformed file request → 400.
async fn csv(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let source = if params.is_empty() {
        state.default_csv.clone()
    } else {
        match params.get("path") {
            Some(rel) => resolve_public_path(&state.public_dir, rel)?,
            None => return Err(ApiError::MissingParam("path")),
        }
    };

    let dataset = state.cache.load(&source)?;
    let body = serde_json::to_value(&dataset.records).context("serializing records")?;
    Ok(Json(body))
}

/// `GET /api/statcast?type=all|at-bat|batted-ball` — the default dataset
/// run through the requested filter. Absent `type` means `all`; unknown
/// tokens are rejected.
async fn statcast(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let token = params.get("type").map(String::as_str).unwrap_or("all");
    let category = Category::parse(token)
        .ok_or_else(|| ApiError::InvalidParam(format!("unknown filter type `{token}`")))?;

    let dataset = state.cache.load(&state.default_csv)?;
    let kept = filter::apply(category, &dataset.records);
    info!(
        category = category.as_str(),
        total = dataset.len(),
        kept = kept.len(),
        "served statcast query"
    );
    let body = serde_json::to_value(&kept).context("serializing records")?;
    Ok(Json(body))
}

#[derive(serde::Serialize)]
struct Columns {
    headers: Vec<String>,
}

/// `GET /api/columns` — column names of the default dataset, in header
/// order. Record objects carry no ordering, so this is the only place a
/// consumer can recover it.
async fn columns(State(state): State<AppState>) -> Result<Json<Columns>, ApiError> {
    let dataset = state.cache.load(&state.default_csv)?;
    Ok(Json(Columns {
        headers: dataset.headers.clone(),
    }))
}

/// Resolve a client-supplied relative path under the public root,
/// rejecting anything that could escape it.
fn resolve_public_path(public_dir: &Path, rel: &str) -> Result<PathBuf, ApiError> {
    let rel_path = Path::new(rel);
    let escapes = rel_path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if rel.is_empty() || rel_path.is_absolute() || escapes {
        return Err(ApiError::InvalidParam(format!("invalid path `{rel}`")));
    }
    Ok(public_dir.join(rel_path))
}
