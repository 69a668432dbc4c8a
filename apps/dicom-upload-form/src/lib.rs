//! DICOM Upload Form
//!
//! A WASM-based browser form for the DICOM relay server that provides:
//! - File or folder selection
//! - Client-side SHA-256 digests sent as `File-Hash`
//! - One concurrent upload request per `.dcm` file
//! - A progress bar counting dispatched uploads
//!
//! Everything outside `form` and `transport` is plain Rust and runs under
//! native tests.

use wasm_bindgen::prelude::*;

pub mod console;
pub mod digest;
pub mod dispatch;
pub mod error;
pub mod form;
pub mod progress;
pub mod selection;
pub mod transport;
pub mod view;

// Re-export common types
pub use dispatch::{dispatch_uploads, DispatchSummary, UploadRequest, UploadSource, UploadTransport};
pub use error::UploadError;
pub use form::UploadForm;
pub use progress::UploadProgress;
pub use selection::{is_dicom_file, SelectionMode};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in debug mode
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
