//! API routes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::core::{
    Exchange, ResumeArtifact, SessionError, SessionSnapshot, StartMode, Workspace,
};
use crate::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ResumeUpload {
    pub file_name: String,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub size: u64,
}

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub mode: StartMode,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct CodeUpdate {
    pub code: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Errors surfaced to API clients
#[derive(Debug)]
pub struct ApiError(SessionError);

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            SessionError::NotStarted
            | SessionError::AlreadyStarted
            | SessionError::ResumeRequired => StatusCode::CONFLICT,
            SessionError::Busy => StatusCode::TOO_MANY_REQUESTS,
            SessionError::EmptyMessage | SessionError::UnsupportedResume(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        };

        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn get_interview(State(AppState { session }): State<AppState>) -> Json<SessionSnapshot> {
    Json(session.snapshot().await)
}

async fn attach_resume(
    State(AppState { session }): State<AppState>,
    Json(upload): Json<ResumeUpload>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    let resume = ResumeArtifact::new(upload.file_name, upload.media_type, upload.size)?;
    session.attach_resume(resume).await?;
    Ok(Json(session.snapshot().await))
}

async fn start(
    State(AppState { session }): State<AppState>,
    Json(request): Json<StartRequest>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    session.begin(request.mode).await?;
    Ok(Json(session.snapshot().await))
}

async fn send_message(
    State(AppState { session }): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<Exchange>, ApiError> {
    let exchange = session.submit(&request.content).await?;
    Ok(Json(exchange))
}

async fn get_code(State(AppState { session }): State<AppState>) -> Json<Workspace> {
    Json(session.workspace().await)
}

async fn put_code(
    State(AppState { session }): State<AppState>,
    Json(update): Json<CodeUpdate>,
) -> Json<Workspace> {
    Json(session.set_code(update.code).await)
}

async fn reset_code(State(AppState { session }): State<AppState>) -> Json<Workspace> {
    Json(session.reset_code().await)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/interview", get(get_interview))
        .route("/v1/interview/resume", post(attach_resume))
        .route("/v1/interview/start", post(start))
        .route("/v1/interview/messages", post(send_message))
        .route("/v1/interview/code", get(get_code).put(put_code))
        .route("/v1/interview/code/reset", post(reset_code))
}
