//! Content digest sent in the `File-Hash` header

use sha2::{Digest, Sha256};

/// Bytes read from a browser file per hashing step
pub const DIGEST_CHUNK_BYTES: u64 = 1024 * 1024;

/// SHA-256 of the full file content as lowercase hex
pub fn content_digest(data: &[u8]) -> String {
    let mut hasher = ContentHasher::new();
    hasher.update(data);
    hasher.finish()
}

/// Incremental [`content_digest`] for content read piece by piece
#[derive(Default)]
pub struct ContentHasher(Sha256);

impl ContentHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.0.update(chunk);
    }

    pub fn finish(self) -> String {
        hex::encode(self.0.finalize())
    }
}

/// Half-open `(start, end)` byte ranges covering `len` bytes in `chunk`-sized steps
pub fn chunk_ranges(len: u64, chunk: u64) -> impl Iterator<Item = (u64, u64)> {
    let chunk = chunk.max(1);
    (0..len)
        .step_by(chunk as usize)
        .map(move |start| (start, (start + chunk).min(len)))
}
