//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::relay::DicomStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: Arc<dyn DicomStore>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config, store: Arc<dyn DicomStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the DICOM store uploads are relayed to
    pub fn store(&self) -> &dyn DicomStore {
        self.inner.store.as_ref()
    }
}
