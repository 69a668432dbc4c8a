//! Render model of the upload card
//!
//! Everything the DOM shows is derived here from the form state, so the
//! display rules can be checked without a browser.

use crate::progress::UploadProgress;
use crate::selection::SelectionMode;

pub const TITLE: &str = "Upload DICOM files";
pub const SUBMIT_LABEL: &str = "Submit";
pub const UPLOADING_LABEL: &str = "Uploading...";
pub const DONE_LABEL: &str = "All Uploads Initiated!";

/// Text shown after a selection of `count` entries
pub fn selection_summary(count: u32) -> String {
    format!("{} files selected", count)
}

/// What the card should currently display
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub toggle_label: &'static str,
    pub picker_label: &'static str,
    /// Id of the visible picker; the other one is hidden
    pub active_input: &'static str,
    pub selected_text: Option<String>,
    pub done_text: Option<&'static str>,
    pub show_progress: bool,
    /// CSS width of the progress bar fill
    pub progress_width: String,
}

impl FormView {
    pub fn build(mode: SelectionMode, selected: Option<&str>, progress: &UploadProgress) -> Self {
        Self {
            toggle_label: mode.toggle_label(),
            picker_label: mode.picker_label(),
            active_input: mode.input_id(),
            selected_text: selected.map(|summary| format!("Selected: {}", summary)),
            done_text: progress.done.then_some(DONE_LABEL),
            show_progress: progress.is_uploading(),
            progress_width: format!("{}%", progress.percent()),
        }
    }
}
