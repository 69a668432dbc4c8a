//! Client-side upload errors
//!
//! None of these reach the user; they are written to the browser console.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to read file: {0}")]
    Read(String),

    #[error("Failed to send upload: {0}")]
    Send(String),

    #[error("Browser API unavailable: {0}")]
    Browser(String),
}
