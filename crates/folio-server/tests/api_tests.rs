//! End-to-end tests against the full router with real collaborators.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use folio_server::{AppState, ServerConfig, SqliteStore, router};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Test Fixtures
// =============================================================================

struct TestServer {
    app: Router,
    dir: TempDir,
}

impl TestServer {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let site = dir.path().join("site");
        std::fs::create_dir_all(&site).unwrap();
        std::fs::write(site.join("index.html"), "<!doctype html><title>Folio</title>").unwrap();

        let config = ServerConfig {
            database_path: dir.path().join("folio.db"),
            uploads_directory: dir.path().join("uploads"),
            site_directory: Some(site),
            admin_email: "admin@example.com".to_string(),
            admin_password: "correct horse".to_string(),
            ..ServerConfig::default()
        };
        config.validate().unwrap();

        let store = Arc::new(SqliteStore::open(&config.database_path).unwrap());
        let state = AppState::from_config(&config, store);
        let app = router(
            state,
            &config.uploads_directory,
            config.site_directory.as_deref(),
        );
        Self { app, dir }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn login(&self) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/api/login",
                None,
                &json!({"email": "admin@example.com", "password": "correct horse"}),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        cookie.split(';').next().unwrap().to_string()
    }
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Public API
// =============================================================================

#[tokio::test]
async fn test_health() {
    let server = TestServer::new();
    let response = server.send(get("/api/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_empty_site() {
    let server = TestServer::new();
    assert_eq!(body_json(server.send(get("/api/profile")).await).await, Value::Null);
    assert_eq!(body_json(server.send(get("/api/projects")).await).await, json!([]));
}

#[tokio::test]
async fn test_unknown_project_is_404() {
    let server = TestServer::new();
    let response = server.send(get("/api/projects/nope")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Project not found: nope");
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn test_wrong_password_is_401() {
    let server = TestServer::new();
    let response = server
        .send(json_request(
            "POST",
            "/api/login",
            None,
            &json!({"email": "admin@example.com", "password": "nope"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_admin_routes_require_session() {
    let server = TestServer::new();
    let response = server
        .send(json_request(
            "POST",
            "/api/admin/projects",
            None,
            &json!({"title": "T", "description": "D"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Unauthorized");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let server = TestServer::new();
    let cookie = server.login().await;

    let status = |cookie: String| {
        Request::builder()
            .uri("/api/session")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    };
    let response = server.send(status(cookie.clone())).await;
    assert_eq!(body_json(response).await["authenticated"], true);

    let response = server
        .send(json_request("POST", "/api/logout", Some(&cookie), &json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = server.send(status(cookie)).await;
    assert_eq!(body_json(response).await["authenticated"], false);
}

// =============================================================================
// Admin content
// =============================================================================

#[tokio::test]
async fn test_profile_upsert() {
    let server = TestServer::new();
    let cookie = server.login().await;

    let response = server
        .send(json_request(
            "PUT",
            "/api/admin/profile",
            Some(&cookie),
            &json!({
                "name": "Linh Tran",
                "email": "linh@example.com",
                "age": "29",
                "backgroundMusic": "https://youtu.be/9bZkp7q19f0",
                "enableBackgroundMusic": true
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let profile = body_json(server.send(get("/api/profile")).await).await;
    assert_eq!(profile["name"], "Linh Tran");
    assert_eq!(profile["age"], 29);
    assert_eq!(profile["enableBackgroundMusic"], true);

    let response = server
        .send(json_request(
            "PUT",
            "/api/admin/profile",
            Some(&cookie),
            &json!({"name": "", "email": "linh@example.com"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Name is required");
}

#[tokio::test]
async fn test_project_lifecycle() {
    let server = TestServer::new();
    let cookie = server.login().await;

    let response = server
        .send(json_request(
            "POST",
            "/api/admin/projects",
            Some(&cookie),
            &json!({
                "title": "Folio",
                "description": "This site",
                "techStack": "Rust, Leptos",
                "featured": true
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = server
        .send(json_request(
            "PUT",
            &format!("/api/admin/projects/{id}"),
            Some(&cookie),
            &json!({"title": "Folio 2", "description": "This site", "featured": false}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(server.send(get(&format!("/api/projects/{id}"))).await).await;
    assert_eq!(fetched["title"], "Folio 2");
    assert_eq!(fetched["featured"], false);

    for _ in 0..2 {
        let response = server
            .send(json_request(
                "DELETE",
                &format!("/api/admin/projects/{id}"),
                Some(&cookie),
                &json!({}),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(body_json(server.send(get("/api/projects")).await).await, json!([]));
}

#[tokio::test]
async fn test_missing_description_is_400() {
    let server = TestServer::new();
    let cookie = server.login().await;

    let response = server
        .send(json_request(
            "POST",
            "/api/admin/projects",
            Some(&cookie),
            &json!({"title": "Only a title"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Description is required");
}

// =============================================================================
// Uploads and static files
// =============================================================================

#[tokio::test]
async fn test_upload_then_fetch() {
    let server = TestServer::new();
    let cookie = server.login().await;
    let boundary = "xyz-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"fileType\"\r\n\r\nlogo\r\n\
         --{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"brand.svg\"\r\n\
         Content-Type: image/svg+xml\r\n\r\n<svg xmlns=\"http://www.w3.org/2000/svg\"/>\r\n\
         --{boundary}--\r\n"
    );

    let response = server
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/upload")
                .header(header::COOKIE, &cookie)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let url = body_json(response).await["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/logo_"));
    assert!(url.ends_with(".svg"));

    let stored = server
        .dir
        .path()
        .join("uploads")
        .join(url.trim_start_matches("/uploads/"));
    assert!(stored.exists());

    let response = server.send(get(&url)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_spa_fallback() {
    let server = TestServer::new();
    let response = server.send(get("/some/client/route")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("<title>Folio</title>"));
}
