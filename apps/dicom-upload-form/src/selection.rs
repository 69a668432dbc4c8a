//! File selection
//!
//! The form offers two pickers: a plain file picker and a folder picker.
//! Only entries ending in `.dcm` are uploaded.

use serde::Serialize;

/// Suffix that marks a DICOM file
pub const DICOM_SUFFIX: &str = ".dcm";

/// Whether a selected entry should be uploaded
pub fn is_dicom_file(name: &str) -> bool {
    name.ends_with(DICOM_SUFFIX)
}

/// Which picker is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Single or multiple files
    #[default]
    Files,
    /// A whole directory tree
    Folder,
}

impl SelectionMode {
    /// Switch to the other picker
    pub fn toggle(self) -> Self {
        match self {
            Self::Files => Self::Folder,
            Self::Folder => Self::Files,
        }
    }

    /// Caption of the button that switches away from this mode
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Files => "Switch to Folder Upload",
            Self::Folder => "Switch to File Upload",
        }
    }

    /// Caption above the picker
    pub fn picker_label(self) -> &'static str {
        match self {
            Self::Files => "Upload DICOM File",
            Self::Folder => "Select Folder",
        }
    }

    /// DOM id of the picker input
    pub fn input_id(self) -> &'static str {
        match self {
            Self::Files => "dicomFileUpload",
            Self::Folder => "dicomFolderUpload",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dicom_file() {
        assert!(is_dicom_file("image.dcm"));
        assert!(is_dicom_file("series/0001.dcm"));
        assert!(!is_dicom_file("image.DCM")); // suffix match is case-sensitive
        assert!(!is_dicom_file("image.dcm.bak"));
        assert!(!is_dicom_file("DICOMDIR"));
        assert!(!is_dicom_file(""));
    }

    #[test]
    fn test_toggle_round_trip() {
        let mode = SelectionMode::default();
        assert_eq!(mode, SelectionMode::Files);
        assert_eq!(mode.toggle(), SelectionMode::Folder);
        assert_eq!(mode.toggle().toggle(), SelectionMode::Files);
    }

    #[test]
    fn test_labels_follow_mode() {
        assert_eq!(SelectionMode::Files.toggle_label(), "Switch to Folder Upload");
        assert_eq!(SelectionMode::Folder.toggle_label(), "Switch to File Upload");
        assert_eq!(SelectionMode::Folder.picker_label(), "Select Folder");
    }
}
