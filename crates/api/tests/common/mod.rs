#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use dungeon_api::auth::jwt::{generate_access_token, JwtConfig};
use dungeon_api::auth::password::hash_password;
use dungeon_api::config::ServerConfig;
use dungeon_api::router::build_app_router;
use dungeon_api::state::AppState;
use dungeon_core::catalog::CatalogKind;
use dungeon_core::roles::UserRole;
use dungeon_core::storage::LocalFileStore;
use dungeon_core::types::DbId;
use dungeon_db::models::user::{CreateUser, User};
use dungeon_db::repositories::{CatalogRepo, UserRepo};
use dungeon_db::store::PgStore;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults and the given storage dir.
pub fn test_config(storage: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 2 * 1024 * 1024,
        file_storage_path: storage.path().to_string_lossy().into_owned(),
        public_base_url: "http://localhost:3000".to_string(),
        jwt: test_jwt(),
        bootstrap_admin: None,
    }
}

pub fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        expiry_hours: 1,
    }
}

/// The app plus the temp directory its uploads land in. The directory lives
/// as long as this value.
pub struct TestApp {
    pub router: Router,
    pub storage: TempDir,
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Number of files currently stored.
    pub fn stored_files(&self) -> usize {
        std::fs::read_dir(self.storage.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Build the full application through the same builder `main.rs` uses.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let storage = tempfile::tempdir().expect("temp dir");
    let config = test_config(&storage);

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        store: Arc::new(PgStore::new(pool)),
        files: Arc::new(LocalFileStore::new(
            storage.path(),
            config.public_base_url.clone(),
        )),
    };

    TestApp {
        router: build_app_router(state, &config),
        storage,
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user directly and return it with a valid access token.
pub async fn create_user(pool: &PgPool, username: &str, role: UserRole) -> (User, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
            role,
        },
    )
    .await
    .expect("user creation should succeed");

    let token = generate_access_token(user.id, role.as_str(), &test_jwt()).expect("token");
    (user, token)
}

/// Id of a seeded catalog entry by name.
pub async fn seeded(pool: &PgPool, kind: CatalogKind, name: &str) -> DbId {
    CatalogRepo::list(pool, kind)
        .await
        .unwrap()
        .into_iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| panic!("seeded {kind} '{name}' missing"))
        .id
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request("POST", uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request("PUT", uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::delete(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a multipart form with one `field` part per `(file_name, bytes)`.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    field: &str,
    files: &[(&str, &[u8])],
) -> Response<Body> {
    const BOUNDARY: &str = "----dungeon-test-boundary";

    let mut body = Vec::new();
    for (name, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\n\
                 Content-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::post(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status, then return the parsed body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
