//! Upload progress
//!
//! A unit counts as complete once its request has been dispatched and the
//! browser returned a response, whatever the status. The denominator is every
//! selected entry, including the ones skipped for not being DICOM files.

use serde::Serialize;

/// Client-local progress of one submission
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadProgress {
    /// Entries in the active picker at submit time
    pub total: usize,
    /// Requests dispatched so far
    pub completed: usize,
    /// A submission has begun
    pub started: bool,
    /// Every dispatch has settled
    pub done: bool,
}

impl UploadProgress {
    /// Back to the idle state, as after a new selection
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Start a submission over `total` selected entries
    pub fn begin(&mut self, total: usize) {
        self.total = total;
        self.completed = 0;
        self.started = true;
        self.done = false;
    }

    /// Record one dispatched request
    pub fn mark_dispatched(&mut self) {
        self.completed += 1;
    }

    /// Record that all dispatches have settled
    pub fn finish(&mut self) {
        self.done = true;
    }

    /// Completion percentage, 0 to 100
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64) * 100.0
    }

    /// Whether the progress bar should be visible
    pub fn is_uploading(&self) -> bool {
        self.started && self.percent() < 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_counts_against_all_entries() {
        let mut progress = UploadProgress::default();
        progress.begin(4);
        assert!(progress.is_uploading());
        assert_eq!(progress.percent(), 0.0);

        progress.mark_dispatched();
        assert_eq!(progress.percent(), 25.0);

        progress.mark_dispatched();
        progress.finish();
        // Two non-DICOM entries keep the bar below 100 even when done
        assert_eq!(progress.percent(), 50.0);
        assert!(progress.is_uploading());
        assert!(progress.done);
    }

    #[test]
    fn test_full_progress_hides_bar() {
        let mut progress = UploadProgress::default();
        progress.begin(2);
        progress.mark_dispatched();
        progress.mark_dispatched();
        assert_eq!(progress.percent(), 100.0);
        assert!(!progress.is_uploading());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut progress = UploadProgress::default();
        progress.begin(3);
        progress.mark_dispatched();
        progress.finish();

        progress.reset();
        assert_eq!(progress, UploadProgress::default());
        assert!(!progress.is_uploading());
    }
}
