use crate::config::SearchConfig;
use crate::error::{RepositoryError, SearchError};
use crate::models::{ListingUpdate, NewListing, Property};
use crate::repository::PropertyRepository;
use crate::search::{search_repository, PropertySearchResult, SearchQuery};
use anyhow::Context;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Shared handler state; cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn PropertyRepository>,
    pub search: SearchConfig,
}

impl AppState {
    pub fn new(repository: Arc<dyn PropertyRepository>, search: SearchConfig) -> Self {
        Self { repository, search }
    }
}

/// Errors surfaced to HTTP clients as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(SearchError),
    InvalidQuery(QueryRejection),
    InvalidBody(JsonRejection),
    NotFound(u64),
    Repository(RepositoryError),
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        ApiError::BadRequest(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        ApiError::Repository(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::InvalidQuery(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            ApiError::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
            ApiError::NotFound(id) => (StatusCode::NOT_FOUND, format!("property {id} not found")),
            ApiError::Repository(err) => {
                let status = match &err {
                    RepositoryError::InvalidListing(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    RepositoryError::DuplicateId(_) | RepositoryError::IdsExhausted(_) => {
                        StatusCode::CONFLICT
                    }
                };
                (status, err.to_string())
            }
        };

        debug!("Request rejected with {}: {}", status, message);

        (status, Json(json!({ "error": message }))).into_response()
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "property-search",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn search_properties(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<PropertySearchResult>, ApiError> {
    let Query(query) = query?;
    let (filters, page) =
        query.into_request(state.search.default_page_size, state.search.max_page_size)?;
    let result = search_repository(state.repository.as_ref(), &filters, page).await?;
    Ok(Json(result))
}

async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Property>, ApiError> {
    state
        .repository
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

async fn create_property(
    State(state): State<AppState>,
    listing: Result<Json<NewListing>, JsonRejection>,
) -> Result<(StatusCode, Json<Property>), ApiError> {
    let Json(listing) = listing?;
    let property = state.repository.create(listing).await?;
    info!("🏠 New listing {}: {}", property.id, property.title);
    Ok((StatusCode::CREATED, Json(property)))
}

async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    update: Result<Json<ListingUpdate>, JsonRejection>,
) -> Result<Json<Property>, ApiError> {
    let Json(update) = update?;
    state
        .repository
        .update(id, update)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// Build the router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/properties", get(search_properties).post(create_property))
        .route("/properties/:id", get(get_property).patch(update_property))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve until the process is stopped
pub async fn start_server(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🚀 HTTP server running on http://{}", addr);
    info!("💚 Health check: http://{}/health", addr);
    info!("🔎 Search:       http://{}/properties", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
