//! Relay to a managed DICOM store
//!
//! Verified uploads are forwarded unmodified to a Cloud Healthcare API
//! DICOM store through the DICOMweb STOW-RS endpoint.

mod healthcare;
mod types;

pub use healthcare::{HealthcareClient, CLOUD_PLATFORM_SCOPE};
pub use types::*;
