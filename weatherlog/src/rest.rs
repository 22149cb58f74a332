use crate::db::MySqlStore;
use crate::errors::Error;
use crate::metrics::{
    PAGE_FAILURES_TOTAL, PAGE_LATENCY_SECONDS, PAGE_REQUESTS_TOTAL, ROWS_RENDERED_TOTAL,
};
use crate::model::ReadingsPage;
use crate::page::load_page;
use crate::pagination::parse_page;
use crate::render::Renderer;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sqlx::MySqlPool;
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Clone)]
pub struct AppState {
    pool: MySqlPool,
    table: Arc<str>,
    page_size: i64,
    renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(pool: MySqlPool, table: &str, page_size: i64, renderer: Renderer) -> Self {
        Self {
            pool,
            table: Arc::from(table),
            page_size,
            renderer: Arc::new(renderer),
        }
    }
}

/// Raw query pairs. Extracting them untyped means a repeated or non-integer
/// `page` is normalized instead of rejected by the extractor.
pub type PageQuery = Vec<(String, String)>;

/// The last `page` value wins when the key is repeated.
pub fn requested_page(params: &[(String, String)]) -> Option<i64> {
    let raw = params
        .iter()
        .rev()
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.as_str());
    parse_page(raw)
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_readings_page))
        .route("/api/v1/readings", get(get_readings_json))
        .with_state(state)
}

async fn get_readings_page(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let page = load_requested_page(&state, &params).await?;
    let html = state.renderer.render(&page)?;
    Ok(Html(html))
}

async fn get_readings_json(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> Result<Json<ReadingsPage>, AppError> {
    let page = load_requested_page(&state, &params).await?;
    Ok(Json(page))
}

async fn load_requested_page(
    state: &AppState,
    params: &[(String, String)],
) -> Result<ReadingsPage, Error> {
    PAGE_REQUESTS_TOTAL.inc();
    let _timer = PAGE_LATENCY_SECONDS.start_timer();

    // The connection is released when `store` drops, on success or error
    let mut store = MySqlStore::acquire(&state.pool, &state.table).await?;
    let requested = requested_page(params);
    let page = load_page(&mut store, state.page_size, requested).await?;

    ROWS_RENDERED_TOTAL.inc_by(page.rows.len() as u64);
    Ok(page)
}

#[derive(Debug)]
pub struct AppError(Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let stage = self.0.stage();
        error!("Request failed at {} stage: {}", stage, self.0);
        PAGE_FAILURES_TOTAL.with_label_values(&[stage]).inc();

        let status = match self.0 {
            Error::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
