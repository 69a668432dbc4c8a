//! DICOM Relay Server Library
//!
//! Receives one DICOM file per request, checks it against the sender's
//! SHA-256 digest and forwards it to a Cloud Healthcare API DICOM store.
//! The main server binary is in main.rs.
//!
//! # Modules
//!
//! - `integrity`: digest computation and comparison
//! - `relay`: the `DicomStore` seam and the Cloud Healthcare client
//! - `routes`: upload endpoint, upload page, health check

pub mod config;
pub mod error;
pub mod integrity;
pub mod relay;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{RelayError, Result};
pub use state::AppState;
