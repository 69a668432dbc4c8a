//! Upload page
//!
//! Serves the HTML shell that loads the `dicom-upload-form` wasm bundle from
//! `/pkg` and mounts it into the page.

use axum::{response::Html, routing::get, Router};

use crate::state::AppState;

/// Element the form mounts into
pub const MOUNT_ID: &str = "dicom-upload";

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Upload DICOM files</title>
  <style>
    body { font-family: system-ui, sans-serif; background: #f8fafc; margin: 0; }
    .card { max-width: 56rem; margin: 1rem auto; background: #fff; border: 1px solid #e2e8f0; border-radius: 0.5rem; padding: 1.5rem; }
    .card h2 { margin: 0 0 1.5rem; }
    .grid { display: grid; gap: 0.5rem; }
    .footer { display: flex; justify-content: space-between; align-items: center; margin-top: 1.5rem; }
    button { background: #0f172a; color: #fff; border: 0; border-radius: 0.375rem; padding: 0.5rem 1rem; cursor: pointer; }
    input[type=file] { cursor: pointer; }
    .progress { display: flex; align-items: center; gap: 0.5rem; }
    .progress-track { width: 6rem; height: 0.25rem; background: #e5e7eb; border-radius: 9999px; }
    .progress-fill { height: 100%; background: #3b82f6; border-radius: 9999px; }
    [hidden] { display: none !important; }
  </style>
</head>
<body>
  <div id="dicom-upload"></div>
  <script type="module">
    import init, { UploadForm } from "/pkg/dicom_upload_form.js";
    await init();
    window.dicomUploadForm = UploadForm.mount("dicom-upload", "/api/dicom");
  </script>
</body>
</html>
"#;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
