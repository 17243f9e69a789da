//! HTTP request handlers.
//!
//! Thin orchestration over the catalog, storage and notify domains. Each
//! handler validates its input, calls one domain operation and maps the
//! outcome through [`Error`] or [`ApiMessage`].

use axum::{
    Json,
    body::Body,
    extract::{Query, State},
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE, HOST},
    },
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use tracing::{info, instrument, warn};

use super::extract::JsonOrForm;
use super::http::AppState;
use super::response::ApiMessage;
use crate::core::Error;
use crate::domains::catalog::CatalogEntry;
use crate::domains::notify::NotifyRequest;

/// Query carrying a file name.
#[derive(Debug, Deserialize)]
pub struct NameQuery {
    /// File name relative to the data directory.
    #[serde(default, alias = "filename")]
    pub name: String,
}

/// Query for the catalog listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring filter.
    #[serde(default)]
    pub s: String,
}

/// Root handler - provides API info.
pub async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "endpoints": {
            "upload": "POST /api/upload?name=<file>",
            "list": "GET /api/list?s=<filter>",
            "download": "GET /api/download?name=<file>",
            "delete": "DELETE /api/delete?name=<file>",
            "send": "POST /api/send {address, name}",
            "health": "GET /health"
        }
    }))
}

/// Liveness probe.
pub async fn ping() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/plain")], "pong")
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Store the request body as a package.
#[instrument(skip_all, fields(name = %query.name))]
pub async fn upload(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
    body: Body,
) -> Result<ApiMessage, Error> {
    let written = state
        .server
        .store()
        .upload(&query.name, body.into_data_stream())
        .await?;

    info!("Uploaded {} ({} bytes)", query.name, written);

    Ok(ApiMessage::ok(format!("success to upload {}", query.name)))
}

/// List the catalog, optionally filtered.
#[instrument(skip_all, fields(filter = %query.s))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<CatalogEntry>>, Error> {
    let entries = state.server.catalog().list(&query.s).await?;
    Ok(Json(entries))
}

/// Stream a stored package back to the caller.
#[instrument(skip_all, fields(name = %query.name))]
pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Response, Error> {
    let opened = state.server.store().open(&query.name).await?;

    let mut response = Body::from_stream(ReaderStream::new(opened.file)).into_response();
    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers.insert(CONTENT_LENGTH, HeaderValue::from(opened.len));

    let file_name = opened
        .path
        .file_name()
        .map(|n| n.to_string_lossy().replace('"', "'"));
    if let Some(value) =
        file_name.and_then(|n| HeaderValue::from_str(&format!("attachment; filename=\"{n}\"")).ok())
    {
        headers.insert(CONTENT_DISPOSITION, value);
    }

    info!("Serving {} ({} bytes)", opened.path.display(), opened.len);

    Ok(response)
}

/// Remove a stored package.
#[instrument(skip_all, fields(name = %query.name))]
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<ApiMessage, Error> {
    state.server.store().delete(&query.name).await?;
    Ok(ApiMessage::ok(format!("success to delete {}", query.name)))
}

/// Ask a device to download a package.
///
/// Responds as soon as the notification is scheduled; its outcome is only
/// visible in the logs.
#[instrument(skip_all)]
pub async fn send(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonOrForm(request): JsonOrForm<NotifyRequest>,
) -> Result<ApiMessage, Error> {
    request.validate()?;

    // The bind address is often 0.0.0.0, which no device can dial.
    let request_host = headers.get(HOST).and_then(|v| v.to_str().ok());
    let Some(base_url) = state.server.announce_base(request_host) else {
        warn!("No Host header and no public base URL; cannot build a download URL");
        return Err(Error::bad_request("missing Host header"));
    };
    let base_url = base_url.to_string();

    info!("Scheduling notification of {} for {}", request.name, request.address);
    state.server.notifier().dispatch(request, base_url);

    Ok(ApiMessage::status(StatusCode::OK))
}
