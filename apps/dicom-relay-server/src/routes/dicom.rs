//! DICOM upload route
//!
//! Endpoint:
//! - POST /api/dicom - Verify one uploaded file and relay it to the DICOM store
//!
//! The body is the raw file. `File-Name` carries the original filename and
//! `File-Hash` the lowercase hex SHA-256 of the body as computed by the sender.

use axum::{
    body::Body,
    extract::State,
    http::HeaderMap,
    routing::post,
    Router,
};

use crate::error::{RelayError, Result, SUCCESS_MESSAGE};
use crate::integrity;
use crate::state::AppState;

/// Header carrying the original filename
pub const FILE_NAME_HEADER: &str = "file-name";

/// Header carrying the sender's SHA-256 digest
pub const FILE_HASH_HEADER: &str = "file-hash";

/// Create the upload router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(upload_dicom))
}

/// POST /api/dicom
///
/// Buffers the whole body, checks it against `File-Hash`, then forwards the
/// bytes to the configured store. A digest mismatch is a 400; any other
/// failure collapses into a generic 500.
pub async fn upload_dicom(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<&'static str> {
    let limit = state.config().server.max_upload_bytes;
    let data = axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| RelayError::BodyRead(e.to_string()))?;

    let received = header_str(&headers, FILE_HASH_HEADER);
    let calculated = integrity::check_upload(&data, received)?;
    tracing::debug!(hash = %calculated, "Hash match");

    let file_name = header_str(&headers, FILE_NAME_HEADER);
    tracing::info!(
        file_name = file_name.unwrap_or("<unnamed>"),
        size = data.len(),
        "Received file"
    );

    let receipt = state.store().store_instances(file_name, data).await?;

    tracing::info!(
        file_name = file_name.unwrap_or("<unnamed>"),
        referenced = receipt.referenced,
        failed = receipt.failed,
        "DICOM file stored"
    );

    Ok(SUCCESS_MESSAGE)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
