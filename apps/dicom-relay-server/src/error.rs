//! Error types for the DICOM relay server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body returned when the supplied digest does not match the upload
pub const INTEGRITY_FAILURE_MESSAGE: &str = "File integrity check failed.";

/// Body returned for every other failure
pub const GENERIC_FAILURE_MESSAGE: &str = "Error uploading DICOM file.";

/// Body returned once the store has accepted the upload
pub const SUCCESS_MESSAGE: &str = "DICOM file uploaded successfully!";

/// Relay result type
pub type Result<T> = std::result::Result<T, RelayError>;

/// Relay error type
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Hash mismatch: received {received:?}, calculated {calculated}")]
    IntegrityMismatch {
        received: Option<String>,
        calculated: String,
    },

    #[error("Failed to read request body: {0}")]
    BodyRead(String),

    #[error("Failed to obtain credentials: {0}")]
    Credentials(String),

    #[error("Relay request failed: {0}")]
    Transport(String),

    #[error("DICOM store rejected upload with {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        RelayError::Transport(e.to_string())
    }
}

impl From<gcp_auth::Error> for RelayError {
    fn from(e: gcp_auth::Error) -> Self {
        RelayError::Credentials(e.to_string())
    }
}

impl RelayError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::IntegrityMismatch { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            RelayError::IntegrityMismatch { .. } => {
                tracing::error!("{}", self);
                INTEGRITY_FAILURE_MESSAGE
            }
            _ => {
                tracing::error!("Upload failed: {}", self);
                GENERIC_FAILURE_MESSAGE
            }
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_integrity_mismatch_is_client_error() {
        let mismatch = RelayError::IntegrityMismatch {
            received: Some("deadbeef".to_string()),
            calculated: "00".repeat(32),
        };
        assert_eq!(mismatch.status_code(), StatusCode::BAD_REQUEST);

        let others = [
            RelayError::BodyRead("connection reset".to_string()),
            RelayError::Credentials("no ADC".to_string()),
            RelayError::Transport("dns".to_string()),
            RelayError::Rejected {
                status: 403,
                body: "forbidden".to_string(),
            },
        ];
        for error in others {
            assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_rejection_detail_stays_out_of_response() {
        let response = RelayError::Rejected {
            status: 409,
            body: "instance already exists".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
