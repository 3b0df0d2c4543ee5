//! Route handlers.
//!
//! Each handler turns its request into a [`Command`], runs it through the store
//! and renders the [`Reply`]. No course logic lives here.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use coursedb::prelude::{Command, Course, CourseId, Fields, Reply, StorageCodec};

use crate::{AppState, error::ApiError};

pub const WELCOME_MESSAGE: &str = "Bienvenido a la API";
pub const UPDATED_MESSAGE: &str = "Curso actualizado";
pub const DELETED_MESSAGE: &str = "El curso ha sido eliminado";
pub const NOT_FOUND_MESSAGE: &str = "El curso solicitado no existe";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub storage: String,
}

/// Body of update and delete confirmations.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfirmationResponse {
    pub message: String,
    pub course: Course,
}

/// HTTP rendering of a store [`Reply`].
pub struct ReplyResponse(pub Reply);

impl IntoResponse for ReplyResponse {
    fn into_response(self) -> Response {
        match self.0 {
            Reply::Courses(courses) => (StatusCode::OK, Json(courses)).into_response(),
            Reply::Course(course) => (StatusCode::OK, Json(course)).into_response(),
            Reply::Created(course) => (StatusCode::CREATED, Json(course)).into_response(),
            Reply::Updated(course) => confirmation(UPDATED_MESSAGE, course),
            Reply::Deleted(course) => confirmation(DELETED_MESSAGE, course),
            Reply::NotFound(id) => {
                ApiError::NotFound(format!("{NOT_FOUND_MESSAGE}: {id}")).into_response()
            }
        }
    }
}

fn confirmation(message: &str, course: Course) -> Response {
    let body = ConfirmationResponse {
        message: message.to_string(),
        course,
    };

    (StatusCode::OK, Json(body)).into_response()
}

async fn run(state: &AppState, command: Command) -> Result<ReplyResponse, ApiError> {
    Ok(ReplyResponse(state.store.execute(command).await?))
}

#[instrument]
pub(crate) async fn welcome_handler() -> &'static str {
    WELCOME_MESSAGE
}

#[instrument(skip(state))]
pub(crate) async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        storage: state.store.codec().describe(),
    })
}

#[instrument(skip(state))]
pub(crate) async fn list_courses_handler(
    State(state): State<AppState>,
) -> Result<ReplyResponse, ApiError> {
    run(&state, Command::ListAll).await
}

#[instrument(skip(state))]
pub(crate) async fn get_course_handler(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<ReplyResponse, ApiError> {
    run(&state, Command::GetById(id)).await
}

#[instrument(skip(state, fields))]
pub(crate) async fn create_course_handler(
    State(state): State<AppState>,
    Json(fields): Json<Fields>,
) -> Result<ReplyResponse, ApiError> {
    run(&state, Command::Insert(fields)).await
}

#[instrument(skip(state, fields))]
pub(crate) async fn update_course_handler(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
    Json(fields): Json<Fields>,
) -> Result<ReplyResponse, ApiError> {
    run(&state, Command::UpdateById(id, fields)).await
}

#[instrument(skip(state))]
pub(crate) async fn delete_course_handler(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<ReplyResponse, ApiError> {
    run(&state, Command::DeleteById(id)).await
}
