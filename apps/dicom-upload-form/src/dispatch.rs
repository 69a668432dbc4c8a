//! Upload dispatch
//!
//! Every DICOM entry of a selection is hashed and sent as its own request.
//! All units run concurrently with no cap; a failed unit is logged and
//! neither retried nor allowed to hold up the others. File contents stay
//! with the source: it hashes them in place and hands the transport a body
//! handle rather than a copy.

use std::cell::RefCell;

use async_trait::async_trait;
use futures::future::join_all;

use crate::console;
use crate::error::UploadError;
use crate::progress::UploadProgress;
use crate::selection::is_dicom_file;

/// A selected entry that can be hashed and sent
#[async_trait(?Send)]
pub trait UploadSource {
    /// Request body handed to the transport
    type Body;

    /// Entry name as reported by the picker
    fn name(&self) -> String;

    /// SHA-256 of the full contents as lowercase hex
    async fn digest(&self) -> Result<String, UploadError>;

    /// The contents, as the transport sends them
    fn body(&self) -> Self::Body;
}

/// Sends one upload request
#[async_trait(?Send)]
pub trait UploadTransport<B> {
    /// Send the request and return the HTTP status of the response
    async fn send(&self, request: UploadRequest<B>) -> Result<u16, UploadError>;
}

/// One upload unit as it goes over the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest<B> {
    /// Sent as `File-Name`
    pub file_name: String,
    /// Sent as `File-Hash`
    pub file_hash: String,
    /// File contents
    pub body: B,
}

/// Outcome counts of one submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Entries in the selection
    pub selected: usize,
    /// Entries ending in `.dcm`
    pub matched: usize,
    /// Requests that got a response
    pub dispatched: usize,
    /// Units that failed to read or send
    pub failed: usize,
}

/// Upload every DICOM entry in `sources`.
///
/// `progress` is started over the full selection, bumped once per dispatched
/// request and finished after every unit settles. `on_change` runs after
/// each of those updates.
pub async fn dispatch_uploads<S, T, F>(
    sources: Vec<S>,
    transport: &T,
    progress: &RefCell<UploadProgress>,
    on_change: F,
) -> DispatchSummary
where
    S: UploadSource,
    T: UploadTransport<S::Body>,
    F: Fn(&UploadProgress),
{
    let selected = sources.len();
    progress.borrow_mut().begin(selected);
    on_change(&progress.borrow());

    let units: Vec<S> = sources
        .into_iter()
        .filter(|source| is_dicom_file(&source.name()))
        .collect();
    let matched = units.len();

    let on_change = &on_change;
    let outcomes = join_all(units.iter().map(|source| async move {
        let name = source.name();
        match upload_one(source, transport).await {
            Ok(_status) => {
                progress.borrow_mut().mark_dispatched();
                on_change(&progress.borrow());
                console::log(&format!("Started upload for: {}", name));
                true
            }
            Err(e) => {
                console::error(&format!("Error starting upload for {}: {}", name, e));
                false
            }
        }
    }))
    .await;

    let dispatched = outcomes.iter().filter(|ok| **ok).count();

    progress.borrow_mut().finish();
    on_change(&progress.borrow());
    console::log("All files have been processed.");

    DispatchSummary {
        selected,
        matched,
        dispatched,
        failed: matched - dispatched,
    }
}

async fn upload_one<S, T>(source: &S, transport: &T) -> Result<u16, UploadError>
where
    S: UploadSource,
    T: UploadTransport<S::Body>,
{
    let file_hash = source.digest().await?;
    let request = UploadRequest {
        file_name: source.name(),
        file_hash,
        body: source.body(),
    };
    transport.send(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::content_digest;
    use futures::executor::block_on;

    struct MemoryFile {
        name: &'static str,
        data: &'static [u8],
        unreadable: bool,
    }

    fn file(name: &'static str, data: &'static [u8]) -> MemoryFile {
        MemoryFile {
            name,
            data,
            unreadable: false,
        }
    }

    #[async_trait(?Send)]
    impl UploadSource for MemoryFile {
        type Body = Vec<u8>;

        fn name(&self) -> String {
            self.name.to_string()
        }

        async fn digest(&self) -> Result<String, UploadError> {
            if self.unreadable {
                return Err(UploadError::Read("permission denied".to_string()));
            }
            Ok(content_digest(self.data))
        }

        fn body(&self) -> Vec<u8> {
            self.data.to_vec()
        }
    }

    /// Records requests; names listed in `refuse` fail to send
    #[derive(Default)]
    struct RecordingTransport {
        sent: RefCell<Vec<UploadRequest<Vec<u8>>>>,
        refuse: Vec<&'static str>,
        status: u16,
    }

    #[async_trait(?Send)]
    impl UploadTransport<Vec<u8>> for RecordingTransport {
        async fn send(&self, request: UploadRequest<Vec<u8>>) -> Result<u16, UploadError> {
            if self.refuse.contains(&request.file_name.as_str()) {
                return Err(UploadError::Send("network error".to_string()));
            }
            self.sent.borrow_mut().push(request);
            Ok(self.status)
        }
    }

    #[test]
    fn test_only_dicom_entries_are_sent() {
        let sources = vec![
            file("a.dcm", b"0123456789"),
            file("notes.txt", b"hello"),
            file("b.dcm", b"abc"),
            file("DICOMDIR", b""),
            file("c.dcm", b""),
        ];
        let transport = RecordingTransport {
            status: 200,
            ..Default::default()
        };
        let progress = RefCell::new(UploadProgress::default());

        let summary = block_on(dispatch_uploads(sources, &transport, &progress, |_| {}));

        assert_eq!(
            summary,
            DispatchSummary {
                selected: 5,
                matched: 3,
                dispatched: 3,
                failed: 0,
            }
        );

        let sent = transport.sent.borrow();
        let mut names: Vec<&str> = sent.iter().map(|r| r.file_name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["a.dcm", "b.dcm", "c.dcm"]);

        let progress = progress.borrow();
        assert_eq!(progress.total, 5);
        assert_eq!(progress.completed, 3);
        assert_eq!(progress.percent(), 60.0);
        assert!(progress.done);
    }

    #[test]
    fn test_request_carries_digest_of_body() {
        let transport = RecordingTransport {
            status: 200,
            ..Default::default()
        };
        let progress = RefCell::new(UploadProgress::default());

        block_on(dispatch_uploads(
            vec![file("scan.dcm", b"0123456789")],
            &transport,
            &progress,
            |_| {},
        ));

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, b"0123456789");
        assert_eq!(
            sent[0].file_hash,
            "84d89877f0d4041efb6bf91a16f0248f2fd573e6af05c19f96bedb9f882f7882"
        );
    }

    #[test]
    fn test_rejected_response_still_counts_as_dispatched() {
        // The server's verdict is not inspected
        let transport = RecordingTransport {
            status: 400,
            ..Default::default()
        };
        let progress = RefCell::new(UploadProgress::default());

        let summary = block_on(dispatch_uploads(
            vec![file("a.dcm", b"x"), file("b.dcm", b"y")],
            &transport,
            &progress,
            |_| {},
        ));

        assert_eq!(summary.dispatched, 2);
        assert_eq!(progress.borrow().percent(), 100.0);
    }

    #[test]
    fn test_failures_are_isolated() {
        let mut unreadable = file("broken.dcm", b"");
        unreadable.unreadable = true;

        let sources = vec![file("a.dcm", b"x"), unreadable, file("refused.dcm", b"z")];
        let transport = RecordingTransport {
            refuse: vec!["refused.dcm"],
            status: 200,
            ..Default::default()
        };
        let progress = RefCell::new(UploadProgress::default());

        let summary = block_on(dispatch_uploads(sources, &transport, &progress, |_| {}));

        assert_eq!(summary.matched, 3);
        assert_eq!(summary.dispatched, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(transport.sent.borrow().len(), 1);
        assert_eq!(progress.borrow().completed, 1);
        assert!(progress.borrow().done);
    }

    #[test]
    fn test_done_is_reached_when_everything_fails() {
        let transport = RecordingTransport {
            refuse: vec!["a.dcm", "b.dcm"],
            status: 200,
            ..Default::default()
        };
        let progress = RefCell::new(UploadProgress::default());

        let summary = block_on(dispatch_uploads(
            vec![file("a.dcm", b"x"), file("b.dcm", b"y")],
            &transport,
            &progress,
            |_| {},
        ));

        assert_eq!(summary.dispatched, 0);
        let progress = progress.borrow();
        assert_eq!(progress.completed, 0);
        assert!(progress.started);
        assert!(progress.done);
    }

    #[test]
    fn test_on_change_sees_each_step() {
        let transport = RecordingTransport {
            status: 200,
            ..Default::default()
        };
        let progress = RefCell::new(UploadProgress::default());
        let snapshots = RefCell::new(Vec::new());

        block_on(dispatch_uploads(
            vec![file("a.dcm", b"x"), file("skip.txt", b""), file("b.dcm", b"y")],
            &transport,
            &progress,
            |p| snapshots.borrow_mut().push(p.clone()),
        ));

        let snapshots = snapshots.into_inner();
        // begin, two dispatches, finish
        assert_eq!(snapshots.len(), 4);
        assert!(snapshots[0].started && snapshots[0].completed == 0);
        assert_eq!(snapshots[2].completed, 2);
        assert!(!snapshots[2].done);
        assert!(snapshots[3].done);
    }
}
