use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use events_server::config::Config;
use events_server::repository::EventRepository;
use events_server::routes::create_routes;
use events_server::state::AppState;

pub struct TestApp {
    pub router: Router,
    pub repo: EventRepository,
    pub pool: SqlitePool,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = Config::from_lookup(|key| match key {
            "DB_PATH" => Some(dir.path().join("events.db").display().to_string()),
            _ => None,
        })
        .unwrap();

        let options = SqliteConnectOptions::new()
            .filename(&config.database_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .expect("Failed to open test db");

        let repo = EventRepository::new(pool.clone());
        repo.init_schema().await.expect("Failed to create schema");

        let router = create_routes(AppState::new(repo.clone()), &config);

        Self {
            router,
            repo,
            pool,
            _dir: dir,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    pub async fn create(&self, payload: Value) -> Value {
        let (status, body) = self.request("POST", "/api/v1/events", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
        body
    }
}
