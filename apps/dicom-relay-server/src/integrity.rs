//! Upload integrity check
//!
//! The client sends a lowercase hex SHA-256 of the body in `File-Hash`;
//! the server recomputes it over the buffered bytes and compares the two
//! hex strings byte-for-byte.

use sha2::{Digest, Sha256};

use crate::error::{RelayError, Result};

/// Compute SHA-256 hash of data as lowercase hex
pub fn compute_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Check an upload against the digest its sender claimed.
///
/// A missing digest never matches. Returns the calculated digest on success.
pub fn check_upload(data: &[u8], received: Option<&str>) -> Result<String> {
    let calculated = compute_hash(data);

    match received {
        Some(received) if received == calculated => Ok(calculated),
        _ => Err(RelayError::IntegrityMismatch {
            received: received.map(str::to_string),
            calculated,
        }),
    }
}
