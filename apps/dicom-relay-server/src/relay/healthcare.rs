//! Cloud Healthcare API client
//!
//! Wraps `reqwest` for the DICOMweb `storeInstances` call. Credentials come
//! from the ambient environment (application default credentials, the
//! metadata server or gcloud) unless a fixed token is configured.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;
use gcp_auth::TokenProvider;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tokio::sync::OnceCell;

use crate::config::HealthcareConfig;
use crate::error::{RelayError, Result};

use super::types::{
    DicomStore, DicomStorePath, StoreReceipt, DICOM_CONTENT_TYPE, DICOM_JSON_CONTENT_TYPE,
};

/// OAuth scope requested for ambient credentials
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

enum Credentials {
    /// Fixed bearer token from configuration
    Static(String),
    /// Resolved on first use, then shared by every request
    Ambient(OnceCell<Arc<dyn TokenProvider>>),
}

/// Cloud Healthcare DICOM store client
pub struct HealthcareClient {
    http: reqwest::Client,
    store: DicomStorePath,
    url: String,
    credentials: Credentials,
}

impl HealthcareClient {
    /// Create a new client from configuration
    ///
    /// Ambient credentials are not looked up here; the first upload does it.
    pub fn new(config: &HealthcareConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("dicom-relay-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let store = DicomStorePath::from_config(config);
        let url = store.store_instances_url(&config.api_base);

        let credentials = match &config.access_token {
            Some(token) => Credentials::Static(token.clone()),
            None => Credentials::Ambient(OnceCell::new()),
        };

        Ok(Self {
            http,
            store,
            url,
            credentials,
        })
    }

    /// Get the target store
    pub fn store(&self) -> &DicomStorePath {
        &self.store
    }

    /// Get the STOW-RS URL uploads are sent to
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn bearer_token(&self) -> Result<String> {
        match &self.credentials {
            Credentials::Static(token) => Ok(token.clone()),
            Credentials::Ambient(provider) => {
                let provider = provider.get_or_try_init(gcp_auth::provider).await?;
                let token = provider.token(&[CLOUD_PLATFORM_SCOPE]).await?;
                Ok(token.as_str().to_string())
            }
        }
    }
}

#[async_trait]
impl DicomStore for HealthcareClient {
    async fn store_instances(&self, file_name: Option<&str>, data: Bytes) -> Result<StoreReceipt> {
        let token = self.bearer_token().await?;

        tracing::debug!(
            file_name = file_name.unwrap_or("<unnamed>"),
            size = data.len(),
            store = %self.store.parent(),
            "Uploading DICOM file..."
        );

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, DICOM_CONTENT_TYPE)
            .header(ACCEPT, DICOM_JSON_CONTENT_TYPE)
            .body(data)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let ack = response.bytes().await?;
        Ok(StoreReceipt::from_ack(&ack))
    }
}
