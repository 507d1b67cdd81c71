use crate::error::{RepoListError, Result};
use crate::github::GitHubClient;
use crate::models::{RankedLanguage, Repository};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::net::SocketAddr;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub client: GitHubClient,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(client: GitHubClient) -> Self {
        Self {
            client,
            start_time: Instant::now(),
        }
    }
}

/// Listing wrapper shared by the repos and languages endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StarTotalResponse {
    pub star_total: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Handler failure rendered as a JSON error body.
#[derive(Debug)]
pub struct ApiError(RepoListError);

impl From<RepoListError> for ApiError {
    fn from(e: RepoListError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self.0 {
            RepoListError::InvalidUser(detail) => {
                warn!("Invalid user: {}", detail);
                (
                    StatusCode::NOT_FOUND,
                    "Invalid User",
                    "Requested user doesn't exist".to_string(),
                )
            }
            RepoListError::QuotaExceeded(detail) => {
                warn!("Quota exceeded: {}", detail);
                (
                    StatusCode::FORBIDDEN,
                    "User Quota Exceeded",
                    "User hourly request quota exceeded".to_string(),
                )
            }
            other => {
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    other.to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/user/:username/repos", get(list_repos))
        .route("/user/:username/stars", get(star_total))
        .route("/user/:username/languages", get(language_ranking))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until `shutdown` resolves
pub async fn start_server<F>(state: AppState, addr: SocketAddr, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

async fn list_repos(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> std::result::Result<Json<DataResponse<Repository>>, ApiError> {
    let data = state.client.collect_repositories(&username).await?;
    Ok(Json(DataResponse { data }))
}

async fn star_total(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> std::result::Result<Json<StarTotalResponse>, ApiError> {
    let star_total = state.client.total_stars(&username).await?;
    Ok(Json(StarTotalResponse { star_total }))
}

async fn language_ranking(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> std::result::Result<Json<DataResponse<RankedLanguage>>, ApiError> {
    let data = state.client.language_ranking(&username).await?;
    Ok(Json(DataResponse { data }))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.start_time.elapsed().as_secs(),
        }),
    )
}
