//! Browser-backed upload source and transport
//!
//! File bytes stay in the JS heap: hashing copies one slice at a time into
//! wasm memory and the request body is the `File` itself.

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, Headers, Request, RequestInit, Response};

use crate::digest::{chunk_ranges, ContentHasher, DIGEST_CHUNK_BYTES};
use crate::dispatch::{UploadRequest, UploadSource, UploadTransport};
use crate::error::UploadError;

/// A file from an `<input type="file">` selection
pub struct BrowserFile {
    file: File,
    chunk_bytes: u64,
}

impl BrowserFile {
    pub fn new(file: File) -> Self {
        Self::with_chunk_bytes(file, DIGEST_CHUNK_BYTES)
    }

    /// Hash in slices of `chunk_bytes`
    pub fn with_chunk_bytes(file: File, chunk_bytes: u64) -> Self {
        Self { file, chunk_bytes }
    }
}

#[async_trait(?Send)]
impl UploadSource for BrowserFile {
    type Body = File;

    fn name(&self) -> String {
        self.file.name()
    }

    async fn digest(&self) -> Result<String, UploadError> {
        let mut hasher = ContentHasher::new();
        for (start, end) in chunk_ranges(self.file.size() as u64, self.chunk_bytes) {
            let slice = self
                .file
                .slice_with_f64_and_f64(start as f64, end as f64)
                .map_err(|e| UploadError::Read(describe(&e)))?;
            let buffer = JsFuture::from(slice.array_buffer())
                .await
                .map_err(|e| UploadError::Read(describe(&e)))?;
            // Dropped before the next await
            let chunk = js_sys::Uint8Array::new(&buffer).to_vec();
            hasher.update(&chunk);
        }
        Ok(hasher.finish())
    }

    fn body(&self) -> File {
        self.file.clone()
    }
}

/// Sends uploads with `fetch`
pub struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }

    /// The `POST` sent for one upload
    pub fn request_for(&self, upload: &UploadRequest<File>) -> Result<Request, UploadError> {
        // Header values outside ISO-8859-1 make `set` throw
        let headers = Headers::new().map_err(|e| UploadError::Browser(describe(&e)))?;
        headers
            .set("Content-Type", "application/octet-stream")
            .and_then(|_| headers.set("File-Name", &upload.file_name))
            .and_then(|_| headers.set("File-Hash", &upload.file_hash))
            .map_err(|e| UploadError::Send(describe(&e)))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&upload.body);

        Request::new_with_str_and_init(&self.endpoint, &init)
            .map_err(|e| UploadError::Send(describe(&e)))
    }
}

#[async_trait(?Send)]
impl UploadTransport<File> for FetchTransport {
    async fn send(&self, upload: UploadRequest<File>) -> Result<u16, UploadError> {
        let window = web_sys::window()
            .ok_or_else(|| UploadError::Browser("no window".to_string()))?;

        let request = self.request_for(&upload)?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| UploadError::Send(describe(&e)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|e| UploadError::Browser(describe(&e)))?;

        Ok(response.status())
    }
}

/// Readable text for a thrown JS value
fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
