//! Relay types

use async_trait::async_trait;
use axum::body::Bytes;

use crate::config::HealthcareConfig;
use crate::error::Result;

/// Content type of the relayed payload
pub const DICOM_CONTENT_TYPE: &str = "application/dicom";

/// Content type expected in the store's acknowledgment
pub const DICOM_JSON_CONTENT_TYPE: &str = "application/dicom+json";

/// DICOMweb path appended to the store's resource name
pub const DICOM_WEB_PATH: &str = "studies";

/// A destination that ingests raw DICOM instances
#[async_trait]
pub trait DicomStore: Send + Sync {
    /// Store one DICOM instance. `file_name` is informational only.
    async fn store_instances(&self, file_name: Option<&str>, data: Bytes) -> Result<StoreReceipt>;
}

/// Fully qualified DICOM store resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DicomStorePath {
    pub project: String,
    pub region: String,
    pub dataset: String,
    pub store: String,
}

impl DicomStorePath {
    pub fn from_config(config: &HealthcareConfig) -> Self {
        Self {
            project: config.project.clone(),
            region: config.region.clone(),
            dataset: config.dataset.clone(),
            store: config.dicom_store.clone(),
        }
    }

    /// Resource name, e.g. `projects/p/locations/r/datasets/d/dicomStores/s`
    pub fn parent(&self) -> String {
        format!(
            "projects/{}/locations/{}/datasets/{}/dicomStores/{}",
            self.project, self.region, self.dataset, self.store
        )
    }

    /// STOW-RS URL for `dicomStores.storeInstances`
    pub fn store_instances_url(&self, api_base: &str) -> String {
        format!(
            "{}/v1/{}/dicomWeb/{}",
            api_base.trim_end_matches('/'),
            self.parent(),
            DICOM_WEB_PATH
        )
    }
}

/// Summary of the store's STOW-RS acknowledgment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreReceipt {
    /// Instances listed in ReferencedSOPSequence (0008,1199)
    pub referenced: usize,
    /// Instances listed in FailedSOPSequence (0008,1198)
    pub failed: usize,
}

impl StoreReceipt {
    /// Read the sequence counts out of a DICOM JSON acknowledgment.
    ///
    /// Anything unparseable yields an empty receipt.
    pub fn from_ack(body: &[u8]) -> Self {
        let Ok(ack) = serde_json::from_slice::<serde_json::Value>(body) else {
            return Self::default();
        };

        let count = |tag: &str| {
            ack.get(tag)
                .and_then(|element| element.get("Value"))
                .and_then(|value| value.as_array())
                .map_or(0, Vec::len)
        };

        Self {
            referenced: count("00081199"),
            failed: count("00081198"),
        }
    }
}
