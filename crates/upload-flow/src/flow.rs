//! Submission orchestrator: one dataset upload from validation to outcome.
//!
//! A flow instance serves a single submission. It starts idle, walks
//! validate → resolve → transfer, and settles on exactly one terminal
//! outcome; no phase is ever re-entered. Re-submitting means constructing
//! a fresh flow, which also mints a fresh run id and presign exchange.
//! Concurrent submissions are independent instances with no shared state.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use calibra_protocol::PresignRequest;

use crate::error::UploadError;
use crate::transport::UploadTransport;
use crate::types::{RunId, SubmissionRequest, UploadEvent, UploadOutcome};
use crate::validation::validate;

/// Runs one dataset submission end to end.
pub struct UploadFlow {
    events_tx: mpsc::Sender<UploadEvent>,
    events_rx: Option<mpsc::Receiver<UploadEvent>>,
    cancel: CancellationToken,
}

impl Default for UploadFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadFlow {
    /// Creates a flow for a single submission.
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::channel(16);
        Self {
            events_tx,
            events_rx: Some(events_rx),
            cancel: CancellationToken::new(),
        }
    }

    /// Takes the event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<UploadEvent>> {
        self.events_rx.take()
    }

    /// Returns a cancellation token for this submission.
    ///
    /// A caller that is torn down mid-flight cancels the token; the flow
    /// then resolves to [`UploadOutcome::Cancelled`] instead of applying a
    /// stale success or failure.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Runs the submission against the given transport.
    ///
    /// Suspends only on the two network calls; both are raced against the
    /// cancellation token. Validation failures surface before any network
    /// traffic, and a resolver failure aborts before a transfer is ever
    /// attempted.
    pub async fn submit(
        &self,
        request: &SubmissionRequest,
        transport: &dyn UploadTransport,
    ) -> UploadOutcome {
        self.emit(UploadEvent::Validating).await;

        let file = match validate(request) {
            Ok(file) => file,
            Err(e) => return self.fail(e.into()).await,
        };

        let run_id = RunId::generate();
        let presign = PresignRequest {
            run_id: run_id.to_string(),
            dataset: request.dataset.clone(),
            file_name: file.name.clone(),
        };

        self.emit(UploadEvent::Resolving {
            run_id: run_id.to_string(),
        })
        .await;
        if self.cancel.is_cancelled() {
            return self.cancelled().await;
        }

        let target = tokio::select! {
            _ = self.cancel.cancelled() => return self.cancelled().await,
            res = transport.resolve(&presign) => match res {
                Ok(target) => target,
                Err(e) => return self.fail(e.into()).await,
            },
        };

        self.emit(UploadEvent::Transferring {
            file_name: file.name.clone(),
        })
        .await;
        if self.cancel.is_cancelled() {
            return self.cancelled().await;
        }

        let transferred = tokio::select! {
            _ = self.cancel.cancelled() => return self.cancelled().await,
            res = transport.transfer(&target, file) => res,
        };

        match transferred {
            Ok(()) => {
                info!(
                    run_id = %run_id,
                    dataset = %request.dataset,
                    file = %file.name,
                    "upload complete"
                );
                self.emit(UploadEvent::Completed {
                    file_name: file.name.clone(),
                })
                .await;
                UploadOutcome::Succeeded {
                    file_name: file.name.clone(),
                }
            }
            Err(e) => self.fail(e.into()).await,
        }
    }

    async fn fail(&self, error: UploadError) -> UploadOutcome {
        warn!(error = %error, "upload failed");
        self.emit(UploadEvent::Failed {
            error: error.to_string(),
        })
        .await;
        UploadOutcome::Failed(error)
    }

    async fn cancelled(&self) -> UploadOutcome {
        info!("upload cancelled");
        self.emit(UploadEvent::Cancelled).await;
        UploadOutcome::Cancelled
    }

    async fn emit(&self, event: UploadEvent) {
        // Receiver may already be gone (UI torn down); event delivery never
        // fails the flow.
        let _ = self.events_tx.send(event).await;
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::error::{ResolverError, TransferError, ValidationError};
    use crate::types::{SelectedFile, UploadTarget};

    struct MockTransport {
        resolve_results: Mutex<Vec<Result<UploadTarget, ResolverError>>>,
        transfer_results: Mutex<Vec<Result<(), TransferError>>>,
        seen_presigns: Mutex<Vec<PresignRequest>>,
        resolve_calls: AtomicUsize,
        transfer_calls: AtomicUsize,
        hang_resolve: bool,
    }

    impl MockTransport {
        fn new(
            resolve_results: Vec<Result<UploadTarget, ResolverError>>,
            transfer_results: Vec<Result<(), TransferError>>,
        ) -> Self {
            Self {
                resolve_results: Mutex::new(resolve_results),
                transfer_results: Mutex::new(transfer_results),
                seen_presigns: Mutex::new(Vec::new()),
                resolve_calls: AtomicUsize::new(0),
                transfer_calls: AtomicUsize::new(0),
                hang_resolve: false,
            }
        }

        fn hanging() -> Self {
            let mut mock = Self::new(vec![], vec![]);
            mock.hang_resolve = true;
            mock
        }
    }

    impl UploadTransport for MockTransport {
        fn resolve(
            &self,
            request: &PresignRequest,
        ) -> Pin<Box<dyn Future<Output = Result<UploadTarget, ResolverError>> + Send + '_>>
        {
            self.resolve_calls.fetch_add(1, Ordering::SeqCst);
            self.seen_presigns.lock().unwrap().push(request.clone());
            if self.hang_resolve {
                return Box::pin(std::future::pending());
            }
            Box::pin(async move {
                let mut results = self.resolve_results.lock().unwrap();
                if results.is_empty() {
                    Err(ResolverError::Network("no scripted response".into()))
                } else {
                    results.remove(0)
                }
            })
        }

        fn transfer(
            &self,
            _target: &UploadTarget,
            _file: &SelectedFile,
        ) -> Pin<Box<dyn Future<Output = Result<(), TransferError>> + Send + '_>> {
            self.transfer_calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                let mut results = self.transfer_results.lock().unwrap();
                if results.is_empty() {
                    Err(TransferError::Network("no scripted response".into()))
                } else {
                    results.remove(0)
                }
            })
        }
    }

    fn target() -> UploadTarget {
        UploadTarget {
            presigned_url: "https://bucket.example.com/put?sig=x".into(),
        }
    }

    fn archive_request() -> SubmissionRequest {
        SubmissionRequest::single(
            "steepest descent",
            SelectedFile::new("images.tar.gz", "application/x-gzip", vec![0x1f, 0x8b, 0x00]),
        )
    }

    async fn drain(mut rx: mpsc::Receiver<UploadEvent>) -> Vec<UploadEvent> {
        let mut events = Vec::new();
        while let Some(e) = rx.recv().await {
            events.push(e);
        }
        events
    }

    #[tokio::test]
    async fn successful_submission_names_the_file() {
        let mock = MockTransport::new(vec![Ok(target())], vec![Ok(())]);
        let mut flow = UploadFlow::new();
        let events_rx = flow.take_events().unwrap();

        let outcome = flow.submit(&archive_request(), &mock).await;

        assert!(matches!(
            outcome,
            UploadOutcome::Succeeded { ref file_name } if file_name == "images.tar.gz"
        ));

        // The presign request carries the exact triple.
        let presigns = mock.seen_presigns.lock().unwrap();
        assert_eq!(presigns.len(), 1);
        assert_eq!(presigns[0].dataset, "steepest descent");
        assert_eq!(presigns[0].file_name, "images.tar.gz");
        assert!(uuid::Uuid::parse_str(&presigns[0].run_id).is_ok());
        drop(presigns);

        drop(flow);
        let events = drain(events_rx).await;
        assert!(events
            .iter()
            .any(|e| matches!(e, UploadEvent::Completed { file_name } if file_name == "images.tar.gz")));
    }

    #[tokio::test]
    async fn unsupported_type_never_reaches_the_network() {
        let mock = MockTransport::new(vec![Ok(target())], vec![Ok(())]);
        let flow = UploadFlow::new();
        let request = SubmissionRequest::single(
            "ds",
            SelectedFile::new("images.zip", "application/zip", vec![1]),
        );

        let outcome = flow.submit(&request, &mock).await;

        assert!(matches!(
            outcome,
            UploadOutcome::Failed(UploadError::Validation(ValidationError::UnsupportedType))
        ));
        assert_eq!(mock.resolve_calls.load(Ordering::SeqCst), 0);
        assert_eq!(mock.transfer_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_selection_fails_validation() {
        let mock = MockTransport::new(vec![], vec![]);
        let flow = UploadFlow::new();
        let request = SubmissionRequest {
            dataset: "ds".into(),
            files: vec![],
        };

        let outcome = flow.submit(&request, &mock).await;

        assert!(matches!(
            outcome,
            UploadOutcome::Failed(UploadError::Validation(ValidationError::MissingFile))
        ));
        assert_eq!(mock.resolve_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn multi_selection_is_rejected_not_truncated() {
        let mock = MockTransport::new(vec![], vec![]);
        let flow = UploadFlow::new();
        let request = SubmissionRequest {
            dataset: "ds".into(),
            files: vec![
                SelectedFile::new("a.tar.gz", "application/gzip", vec![1]),
                SelectedFile::new("b.tar.gz", "application/gzip", vec![2]),
            ],
        };

        let outcome = flow.submit(&request, &mock).await;

        assert!(matches!(
            outcome,
            UploadOutcome::Failed(UploadError::Validation(ValidationError::MultipleFiles))
        ));
        assert_eq!(mock.resolve_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn resolver_http_error_aborts_before_transfer() {
        let mock = MockTransport::new(vec![Err(ResolverError::Http(500))], vec![Ok(())]);
        let flow = UploadFlow::new();

        let outcome = flow.submit(&archive_request(), &mock).await;

        assert!(matches!(
            outcome,
            UploadOutcome::Failed(UploadError::Resolver(ResolverError::Http(500)))
        ));
        assert_eq!(mock.resolve_calls.load(Ordering::SeqCst), 1);
        assert_eq!(mock.transfer_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_resolver_response_fails_the_submission() {
        let mock = MockTransport::new(vec![Err(ResolverError::MalformedResponse)], vec![]);
        let flow = UploadFlow::new();

        let outcome = flow.submit(&archive_request(), &mock).await;

        assert!(matches!(
            outcome,
            UploadOutcome::Failed(UploadError::Resolver(ResolverError::MalformedResponse))
        ));
        assert_eq!(mock.transfer_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejected_transfer_is_a_single_attempt() {
        let mock = MockTransport::new(vec![Ok(target())], vec![Err(TransferError::Http(403))]);
        let mut flow = UploadFlow::new();
        let events_rx = flow.take_events().unwrap();

        let outcome = flow.submit(&archive_request(), &mock).await;

        assert!(matches!(
            outcome,
            UploadOutcome::Failed(UploadError::Transfer(TransferError::Http(403)))
        ));
        // No automatic retry of either exchange.
        assert_eq!(mock.resolve_calls.load(Ordering::SeqCst), 1);
        assert_eq!(mock.transfer_calls.load(Ordering::SeqCst), 1);

        drop(flow);
        let events = drain(events_rx).await;
        assert!(events.iter().any(|e| matches!(e, UploadEvent::Failed { .. })));
    }

    #[tokio::test]
    async fn concurrent_submissions_use_distinct_run_ids() {
        let mock = MockTransport::new(vec![Ok(target()), Ok(target())], vec![Ok(()), Ok(())]);
        let flow_a = UploadFlow::new();
        let flow_b = UploadFlow::new();

        let req_a = archive_request();
        let req_b = archive_request();
        let (a, b) = tokio::join!(
            flow_a.submit(&req_a, &mock),
            flow_b.submit(&req_b, &mock),
        );

        assert!(a.is_success());
        assert!(b.is_success());

        let presigns = mock.seen_presigns.lock().unwrap();
        assert_eq!(presigns.len(), 2);
        assert_ne!(presigns[0].run_id, presigns[1].run_id);
    }

    #[tokio::test]
    async fn pre_cancelled_flow_never_transfers() {
        let mock = MockTransport::new(vec![Ok(target())], vec![Ok(())]);
        let flow = UploadFlow::new();
        flow.cancel_token().cancel();

        let outcome = flow.submit(&archive_request(), &mock).await;

        assert!(matches!(outcome, UploadOutcome::Cancelled));
        assert_eq!(mock.transfer_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_during_resolve_yields_cancelled() {
        let mock = MockTransport::hanging();
        let mut flow = UploadFlow::new();
        let events_rx = flow.take_events().unwrap();
        let cancel = flow.cancel_token();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            cancel.cancel();
        });

        let outcome = flow.submit(&archive_request(), &mock).await;

        assert!(matches!(outcome, UploadOutcome::Cancelled));
        assert_eq!(mock.transfer_calls.load(Ordering::SeqCst), 0);

        drop(flow);
        let events = drain(events_rx).await;
        assert!(events.iter().any(|e| matches!(e, UploadEvent::Cancelled)));
        // A cancelled flow never reports success or failure.
        assert!(!events.iter().any(|e| {
            matches!(e, UploadEvent::Completed { .. } | UploadEvent::Failed { .. })
        }));
    }
}
