//! Configuration management for the DICOM relay server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Default upload ceiling: 512MB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

/// Public Cloud Healthcare API endpoint
pub const DEFAULT_HEALTHCARE_API_BASE: &str = "https://healthcare.googleapis.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub healthcare: HealthcareConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest request body buffered by the upload endpoint
    pub max_upload_bytes: usize,
    /// Directory holding the wasm-bindgen output of the upload form
    pub form_assets_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthcareConfig {
    pub api_base: String,
    pub region: String,
    pub project: String,
    pub dataset: String,
    pub dicom_store: String,
    /// Fixed bearer token; when unset, ambient credentials are used
    pub access_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
                form_assets_dir: PathBuf::from("apps/dicom-upload-form/pkg"),
            },
            healthcare: HealthcareConfig {
                api_base: DEFAULT_HEALTHCARE_API_BASE.to_string(),
                region: "asia-east2".to_string(),
                project: "dicom-project-399511".to_string(),
                dataset: "test".to_string(),
                dicom_store: "test123".to_string(),
                access_token: None,
            },
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT", defaults.server.port)?,
                max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", defaults.server.max_upload_bytes)?,
                form_assets_dir: env::var("FORM_ASSETS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.server.form_assets_dir),
            },
            healthcare: HealthcareConfig {
                api_base: env::var("HEALTHCARE_API_BASE").unwrap_or(defaults.healthcare.api_base),
                region: env::var("HEALTHCARE_REGION").unwrap_or(defaults.healthcare.region),
                project: env::var("HEALTHCARE_PROJECT").unwrap_or(defaults.healthcare.project),
                dataset: env::var("HEALTHCARE_DATASET").unwrap_or(defaults.healthcare.dataset),
                dicom_store: env::var("HEALTHCARE_DICOM_STORE")
                    .unwrap_or(defaults.healthcare.dicom_store),
                access_token: env::var("HEALTHCARE_ACCESS_TOKEN")
                    .ok()
                    .filter(|token| !token.is_empty()),
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_asia_east2_store() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.healthcare.region, "asia-east2");
        assert_eq!(config.healthcare.project, "dicom-project-399511");
        assert_eq!(config.healthcare.dataset, "test");
        assert_eq!(config.healthcare.dicom_store, "test123");
        assert!(config.healthcare.access_token.is_none());
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        // Variable names are unique to this test so parallel tests don't race on them
        env::set_var("DICOM_RELAY_TEST_PORT", "not-a-port");
        let result: Result<u16, _> = parse_var("DICOM_RELAY_TEST_PORT", 3000);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "DICOM_RELAY_TEST_PORT", .. })
        ));

        env::remove_var("DICOM_RELAY_TEST_UNSET");
        let result: Result<u16, _> = parse_var("DICOM_RELAY_TEST_UNSET", 3000);
        assert_eq!(result.unwrap(), 3000);
    }
}
