//! HTTP transport implementation.
//!
//! Serves the package API over axum. Each request runs as its own task on
//! the tokio runtime; handlers share only the read-only [`InstallerServer`].

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::{TransportError, TransportResult, config::HttpConfig, handlers};
use crate::core::InstallerServer;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The installer server instance.
    pub server: InstallerServer,
}

/// Build the API router for `server`.
pub fn build_router(server: InstallerServer) -> Router {
    let enable_cors = server.config().http.enable_cors;
    let state = AppState { server };

    let mut app = Router::new()
        .route("/", get(handlers::root_handler))
        .route("/ping", get(handlers::ping))
        .route("/health", get(handlers::health_check))
        .route("/api/upload", post(handlers::upload))
        .route("/api/list", get(handlers::list))
        .route("/api/download", get(handlers::download))
        .route("/api/delete", delete(handlers::delete))
        .route("/api/send", post(handlers::send))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // Add CORS if enabled
    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport.
    ///
    /// This method blocks until the server shuts down.
    pub async fn run(self, server: InstallerServer) -> TransportResult<()> {
        let addr = self.address();
        let app = build_router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Upload:   POST   /api/upload?name=");
        info!("  → List:     GET    /api/list?s=");
        info!("  → Download: GET    /api/download?name=");
        info!("  → Delete:   DELETE /api/delete?name=");
        info!("  → Send:     POST   /api/send");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::catalog::CatalogEntry;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use std::collections::HashSet;
    use std::fs;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_router(dir: &TempDir) -> Router {
        let mut config = Config::default();
        config.storage.data_dir = Some(dir.path().to_path_buf());
        build_router(InstallerServer::new(config).unwrap())
    }

    async fn call(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    fn upload_request(name: &str, body: &'static [u8]) -> Request<Body> {
        Request::post(format!("/api/upload?name={name}"))
            .body(Body::from(body))
            .unwrap()
    }

    async fn listed_names(router: &Router, filter: &str) -> HashSet<String> {
        let (status, body) = call(
            router,
            Request::get(format!("/api/list?s={filter}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let entries: Vec<CatalogEntry> = serde_json::from_slice(&body).unwrap();
        entries.into_iter().map(|e| e.name).collect()
    }

    fn message(body: &[u8]) -> String {
        let json: serde_json::Value = serde_json::from_slice(body).unwrap();
        json["message"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_ping() {
        let temp_dir = TempDir::new().unwrap();
        let router = test_router(&temp_dir);

        let (status, body) = call(&router, Request::get("/ping").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"pong");
    }

    #[tokio::test]
    async fn test_upload_writes_exact_bytes_and_replaces() {
        let temp_dir = TempDir::new().unwrap();
        let router = test_router(&temp_dir);

        let (status, body) = call(&router, upload_request("save.cia", b"0123456789")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(message(&body), "success to upload save.cia");
        assert_eq!(fs::read(temp_dir.path().join("save.cia")).unwrap().len(), 10);

        let (status, _) = call(&router, upload_request("save.cia", b"xyz")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fs::read(temp_dir.path().join("save.cia")).unwrap(), b"xyz");
    }

    #[tokio::test]
    async fn test_upload_accepts_legacy_filename_key() {
        let temp_dir = TempDir::new().unwrap();
        let router = test_router(&temp_dir);

        let request = Request::post("/api/upload?filename=app.3dsx")
            .body(Body::from("data"))
            .unwrap();
        let (status, _) = call(&router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(temp_dir.path().join("app.3dsx").is_file());
    }

    #[tokio::test]
    async fn test_upload_rejects_bad_extension() {
        let temp_dir = TempDir::new().unwrap();
        let router = test_router(&temp_dir);

        let (status, body) = call(&router, upload_request("malware.exe", b"MZ")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message(&body).contains(".cia"));
        assert!(!temp_dir.path().join("malware.exe").exists());
    }

    #[tokio::test]
    async fn test_upload_rejects_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        let mut config = Config::default();
        config.storage.data_dir = Some(data_dir);
        let router = build_router(InstallerServer::new(config).unwrap());

        let (status, body) = call(&router, upload_request("../escape.cia", b"x")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message(&body), "wrong filepath");
        assert!(!temp_dir.path().join("escape.cia").exists());
    }

    #[tokio::test]
    async fn test_list_filters_case_insensitively() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("Game.cia"), "g").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "n").unwrap();
        fs::write(temp_dir.path().join("Tool.CIA"), "t").unwrap();
        fs::create_dir(temp_dir.path().join("dir.cia")).unwrap();
        let router = test_router(&temp_dir);

        assert_eq!(
            listed_names(&router, "").await,
            HashSet::from(["Game.cia".into(), "notes.txt".into(), "Tool.CIA".into()])
        );
        assert_eq!(
            listed_names(&router, "CIA").await,
            HashSet::from(["Game.cia".into(), "Tool.CIA".into()])
        );
    }

    #[tokio::test]
    async fn test_download_streams_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("game.cia"), b"payload").unwrap();
        let router = test_router(&temp_dir);

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/download?name=game.cia")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "7");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"game.cia\""
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"payload");
    }

    #[tokio::test]
    async fn test_download_rejects_traversal_and_missing() {
        let temp_dir = TempDir::new().unwrap();
        let router = test_router(&temp_dir);

        let (status, _) = call(
            &router,
            Request::get("/api/download?name=../../etc/passwd")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            &router,
            Request::get("/api/download?name=ghost.cia")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("keep.cia"), "k").unwrap();
        let router = test_router(&temp_dir);

        let (status, _) = call(
            &router,
            Request::delete("/api/delete?name=ghost.cia")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(listed_names(&router, "").await, HashSet::from(["keep.cia".into()]));
    }

    #[tokio::test]
    async fn test_delete_removes_from_listing() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("old.cia"), "o").unwrap();
        let router = test_router(&temp_dir);

        let (status, _) = call(
            &router,
            Request::delete("/api/delete?name=old.cia")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(listed_names(&router, "").await.is_empty());
    }

    #[tokio::test]
    async fn test_send_returns_before_dial_completes() {
        let temp_dir = TempDir::new().unwrap();
        let router = test_router(&temp_dir);
        let request = Request::post("/api/send")
            .header(header::HOST, "10.0.0.2:8080")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"address": "192.0.2.1", "name": "x.cia"}"#))
            .unwrap();

        let started = Instant::now();
        let (status, _) = call(&router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_send_accepts_form_body() {
        let temp_dir = TempDir::new().unwrap();
        let router = test_router(&temp_dir);
        let request = Request::post("/api/send")
            .header(header::HOST, "10.0.0.2:8080")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("address=192.0.2.1&name=x.cia"))
            .unwrap();

        let (status, _) = call(&router, request).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_send_without_host_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let router = test_router(&temp_dir);
        let request = Request::post("/api/send")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"address": "192.0.2.1", "name": "x.cia"}"#))
            .unwrap();

        let (status, body) = call(&router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let reply: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(reply["message"], "missing Host header");
    }

    #[tokio::test]
    async fn test_send_rejects_malformed_body() {
        let temp_dir = TempDir::new().unwrap();
        let router = test_router(&temp_dir);

        for (content_type, body) in [
            ("application/json", r#"{"address": "192.0.2.1"}"#),
            ("application/json", "not json"),
            ("application/json", r#"{"address": "", "name": "x.cia"}"#),
            ("application/x-www-form-urlencoded", "name=x.cia"),
        ] {
            let request = Request::post("/api/send")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap();

            let (status, _) = call(&router, request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        }
    }
}
