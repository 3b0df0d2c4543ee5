//! coursedb server
//!
//! HTTP adapter for the course store. Maps verbs and paths under `/cursos` to
//! store commands and store replies to HTTP responses.

use axum::{
    Router,
    routing::get,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use coursedb::{
    json::JsonFileCodec,
    memory::InMemoryCodec,
    prelude::{CourseStore, CourseStoreResult, StorageCodec, StorageCodecBuilder, StoreOptions},
};

pub mod config;
pub mod error;
pub mod routes;

pub use config::{BackendKind, Cli, ServerConfig};
pub use error::{ApiError, ServerError};

use routes::{
    create_course_handler, delete_course_handler, get_course_handler, health_handler,
    list_courses_handler, update_course_handler, welcome_handler,
};

/// The store type served over HTTP; the codec is picked at startup.
pub type SharedStore = Arc<CourseStore<Box<dyn StorageCodec>>>;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(store: CourseStore<Box<dyn StorageCodec>>) -> Self {
        Self {
            store: Arc::new(store),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Opens the codec selected by `config` and wraps it in a store.
pub async fn open_store(config: &ServerConfig) -> CourseStoreResult<CourseStore<Box<dyn StorageCodec>>> {
    let codec: Box<dyn StorageCodec> = match config.backend {
        BackendKind::Json => Box::new(
            JsonFileCodec::builder(&config.data_file)
                .pretty(config.pretty)
                .create_if_missing(config.create_if_missing)
                .build()
                .await?,
        ),
        BackendKind::Memory => Box::new(
            InMemoryCodec::builder()
                .pretty(config.pretty)
                .build()
                .await?,
        ),
    };

    let options = StoreOptions {
        id_policy: config.id_policy,
        id_protection: config.id_protection,
    };

    Ok(CourseStore::with_options(codec, options))
}

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome_handler))
        .route("/health", get(health_handler))
        .route(
            "/cursos",
            get(list_courses_handler).post(create_course_handler),
        )
        .route(
            "/cursos/{id}",
            get(get_course_handler)
                .put(update_course_handler)
                .delete(delete_course_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server and run until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let store = open_store(&config).await?;

    info!(
        storage = %store.codec().describe(),
        id_policy = ?config.id_policy,
        id_protection = ?config.id_protection,
        "opened course store"
    );

    let app = build_router(AppState::new(store));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use coursedb::{
        id::{IdPolicy, IdProtection},
        prelude::CourseDocument,
    };

    fn memory_app() -> Router {
        let store = CourseStore::new(Box::new(InMemoryCodec::new()) as Box<dyn StorageCodec>);
        build_router(AppState::new(store))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        };

        app.clone().oneshot(request.unwrap()).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_welcome_and_health_endpoints() {
        let app = memory_app();

        let response = send(&app, "GET", "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], routes::WELCOME_MESSAGE.as_bytes());

        let response = send(&app, "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let health = json_body(response).await;
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["storage"], "memory");
    }

    #[tokio::test]
    async fn test_create_returns_created_course() {
        let app = memory_app();

        let response = send(&app, "POST", "/cursos", Some(json!({ "id": 9, "name": "Algebra" }))).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await, json!({ "id": 1, "name": "Algebra" }));

        let response = send(&app, "GET", "/cursos", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([{ "id": 1, "name": "Algebra" }]));
    }

    #[tokio::test]
    async fn test_get_unknown_course_is_404() {
        let app = memory_app();

        let response = send(&app, "GET", "/cursos/5", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["code"], 404);
    }

    #[tokio::test]
    async fn test_negative_id_is_404_not_bad_request() {
        let app = memory_app();

        let response = send(&app, "GET", "/cursos/-1", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, "DELETE", "/cursos/-1", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_to_taken_id_is_400() {
        let store = CourseStore::builder(Box::new(InMemoryCodec::new()) as Box<dyn StorageCodec>)
            .id_protection(IdProtection::CallerMutable)
            .build();
        let app = build_router(AppState::new(store));
        send(&app, "POST", "/cursos", Some(json!({ "name": "Algebra" }))).await;
        send(&app, "POST", "/cursos", Some(json!({ "name": "Calculus" }))).await;

        let response = send(&app, "PUT", "/cursos/2", Some(json!({ "id": 1 }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, "GET", "/cursos", None).await;
        assert_eq!(
            json_body(response).await,
            json!([{ "id": 1, "name": "Algebra" }, { "id": 2, "name": "Calculus" }])
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_confirmations() {
        let app = memory_app();
        send(&app, "POST", "/cursos", Some(json!({ "name": "Algebra", "hours": 30 }))).await;

        let response = send(&app, "PUT", "/cursos/1", Some(json!({ "hours": 45 }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["message"], routes::UPDATED_MESSAGE);
        assert_eq!(body["course"], json!({ "id": 1, "name": "Algebra", "hours": 45 }));

        let response = send(&app, "DELETE", "/cursos/1", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["message"], routes::DELETED_MESSAGE);

        let response = send(&app, "GET", "/cursos/1", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_id_mutations_are_404() {
        let app = memory_app();

        let response = send(&app, "PUT", "/cursos/3", Some(json!({ "name": "X" }))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, "DELETE", "/cursos/3", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, "GET", "/cursos", None).await;
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_malformed_requests_are_rejected() {
        let app = memory_app();

        let response = send(&app, "GET", "/cursos/abc", None).await;
        assert!(response.status().is_client_error());

        let response = send(&app, "POST", "/cursos", Some(json!(["not", "an", "object"]))).await;
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let store = CourseStore::new(Box::new(InMemoryCodec::unseeded()) as Box<dyn StorageCodec>);
        let app = build_router(AppState::new(store));

        let response = send(&app, "GET", "/cursos", None).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["code"], 500);
    }

    #[tokio::test]
    async fn test_open_store_uses_configured_policy_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            data_file: dir.path().join("db.json"),
            id_policy: IdPolicy::SequenceLength,
            ..Default::default()
        };

        let store = open_store(&config).await.unwrap();
        assert_eq!(store.options().id_policy, IdPolicy::SequenceLength);

        let app = build_router(AppState::new(store));
        send(&app, "POST", "/cursos", Some(json!({ "name": "Algebra" }))).await;

        let stored = CourseDocument::decode(&std::fs::read(&config.data_file).unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
    }
}
