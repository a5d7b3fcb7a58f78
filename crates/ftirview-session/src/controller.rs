//! The workflow state controller.
//!
//! [`Session`] is the single authority over [`SessionState`]
//! transitions. It sequences the remote interaction (upload → atomic
//! parse → image fetch) and guarantees:
//!
//! - at most one submission in flight (the `Submitting` variant blocks
//!   re-entry);
//! - responses from superseded submissions are discarded via a
//!   monotonically increasing request generation;
//! - the outgoing image handle is released before it is replaced or
//!   dropped;
//! - no partial result is ever observable.
//!
//! The network and the browser's object-URL machinery sit behind the
//! [`AnalysisClient`] and [`ImageStore`] seams, so the whole state
//! machine runs in host tests with plain doubles.

use crate::error::SessionError;
use crate::feature::{DetectionResult, UploadResponse};
use crate::report::ReportRequest;
use crate::state::{CsvFile, SessionState};

/// The three remote interactions with the analysis service.
///
/// Implemented over the browser fetch API in `ftirview-io`; tests use
/// a recording stub.
// WASM is single-threaded; Send bounds on the returned futures are not needed.
#[allow(async_fn_in_trait)]
pub trait AnalysisClient {
    /// POST the CSV as multipart form data and return the raw response
    /// body.
    ///
    /// # Errors
    ///
    /// [`SessionError::UploadFailed`] on transport failure,
    /// [`SessionError::ServiceRejected`] when the body is not the
    /// expected JSON shape.
    async fn upload(&self, file: &CsvFile) -> Result<UploadResponse, SessionError>;

    /// GET the rendered spectrum image by its server-assigned filename.
    ///
    /// # Errors
    ///
    /// [`SessionError::ImageUnavailable`] on a non-success status or a
    /// body read failure.
    async fn fetch_image(&self, filename: &str) -> Result<Vec<u8>, SessionError>;

    /// Open the PDF report in a new browsing context.
    ///
    /// Fire-and-forget: the service streams a document at the
    /// constructed URL and no response is observable, so failures past
    /// this point cannot be reported.
    fn open_report(&self, request: &ReportRequest);
}

/// Owner of the displayable image handle.
///
/// Exactly one handle is live per session; [`release`](Self::release)
/// must be idempotent so a double release is a no-op rather than an
/// error.
pub trait ImageStore {
    /// Displayable handle for fetched image bytes (a blob URL in the
    /// browser).
    type Handle: Clone;

    /// Wrap image bytes in a new live handle.
    ///
    /// # Errors
    ///
    /// [`SessionError::ImageUnavailable`] if the handle cannot be
    /// created.
    fn acquire(&mut self, bytes: &[u8]) -> Result<Self::Handle, SessionError>;

    /// Release a handle. Releasing an already-released handle is a
    /// no-op.
    fn release(&mut self, handle: &Self::Handle);
}

/// Token for one in-flight submission: the file being uploaded plus
/// the generation it belongs to.
#[derive(Debug)]
pub struct Submission {
    generation: u64,
    file: CsvFile,
}

impl Submission {
    /// The file moved out of the session for upload.
    #[must_use]
    pub const fn file(&self) -> &CsvFile {
        &self.file
    }

    /// The request generation this submission belongs to.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// The analysis session controller.
pub struct Session<S: ImageStore> {
    state: SessionState<S::Handle>,
    images: S,
    generation: u64,
}

impl<S: ImageStore> Session<S> {
    /// Create an idle session over the given image store.
    pub const fn new(images: S) -> Self {
        Self {
            state: SessionState::Idle,
            images,
            generation: 0,
        }
    }

    /// Current session state.
    pub const fn state(&self) -> &SessionState<S::Handle> {
        &self.state
    }

    /// The image store, for inspection.
    pub const fn images(&self) -> &S {
        &self.images
    }

    /// Select a file for analysis. Callable from every state.
    ///
    /// Supersedes any in-flight submission (its response will be
    /// discarded on arrival), releases the current image handle, and
    /// validates the MIME type.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidFileType`] when the file is not a CSV;
    /// the session transitions to `Failed` with the same error, the
    /// filename riding along for the retry message.
    pub fn select_file(&mut self, file: CsvFile) -> Result<(), SessionError> {
        self.generation += 1;
        self.release_current_image();
        if file.is_csv() {
            self.state = SessionState::FileSelected(file);
            Ok(())
        } else {
            let error = SessionError::InvalidFileType { name: file.name };
            self.state = SessionState::Failed(error.clone());
            Err(error)
        }
    }

    /// Start a submission, transitioning to `Submitting`.
    ///
    /// Returns the [`Submission`] token the caller feeds to
    /// [`run_analysis`] and [`finish_submit`](Self::finish_submit).
    ///
    /// # Errors
    ///
    /// - `Submitting` or `Loaded`: [`SessionError::InvalidState`], with
    ///   no transition — a second submit must never clobber an
    ///   in-flight or loaded session.
    /// - `Idle` or `Failed`: [`SessionError::NoFileSelected`], stored
    ///   in `Failed` for display.
    pub fn begin_submit(&mut self) -> Result<Submission, SessionError> {
        if self.state.is_submitting() {
            return Err(SessionError::InvalidState(
                "a submission is already in flight",
            ));
        }
        if self.state.is_loaded() {
            return Err(SessionError::InvalidState(
                "select a new file before resubmitting",
            ));
        }
        match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::FileSelected(file) => {
                self.generation += 1;
                self.state = SessionState::Submitting;
                Ok(Submission {
                    generation: self.generation,
                    file,
                })
            }
            _ => {
                self.state = SessionState::Failed(SessionError::NoFileSelected);
                Err(SessionError::NoFileSelected)
            }
        }
    }

    /// Apply the outcome of a submission.
    ///
    /// The outcome is applied only when `generation` is still current
    /// and the session is still `Submitting`; anything else is a stale
    /// response from a superseded submission and is silently discarded.
    /// Returns `true` when the outcome was applied.
    pub fn finish_submit(
        &mut self,
        generation: u64,
        outcome: Result<(DetectionResult, Vec<u8>), SessionError>,
    ) -> bool {
        if generation != self.generation || !self.state.is_submitting() {
            return false;
        }
        self.state = match outcome {
            Ok((result, image_bytes)) => match self.images.acquire(&image_bytes) {
                Ok(image) => SessionState::Loaded { result, image },
                Err(error) => SessionState::Failed(error),
            },
            Err(error) => SessionState::Failed(error),
        };
        true
    }

    /// Run a full submission: begin, perform the remote sequence,
    /// apply the outcome.
    ///
    /// # Errors
    ///
    /// Propagates the error that the session also records in `Failed`
    /// (or, for guard failures, returns without any transition — see
    /// [`begin_submit`](Self::begin_submit)).
    pub async fn submit<C: AnalysisClient>(&mut self, client: &C) -> Result<(), SessionError> {
        let submission = self.begin_submit()?;
        let outcome = run_analysis(client, submission.file()).await;
        let error = outcome.as_ref().err().cloned();
        self.finish_submit(submission.generation(), outcome);
        error.map_or(Ok(()), Err)
    }

    /// Request the PDF report for the loaded result.
    ///
    /// Valid only from `Loaded` with both feature sequences non-empty.
    /// Never mutates session state: success opens a new browsing
    /// context, failure is reported to the caller for an immediate
    /// notice.
    ///
    /// # Errors
    ///
    /// [`SessionError::ReportPreconditionUnmet`] when no result is
    /// loaded or either sequence is empty; no network call is made.
    pub fn request_report<C: AnalysisClient>(&self, client: &C) -> Result<(), SessionError> {
        let Some(result) = self.state.result() else {
            return Err(SessionError::ReportPreconditionUnmet);
        };
        let request = ReportRequest::from_result(result)?;
        client.open_report(&request);
        Ok(())
    }

    /// Return to `Idle`, superseding any in-flight submission and
    /// releasing the current image handle.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.release_current_image();
        self.state = SessionState::Idle;
    }

    /// Release the held image handle, if any, before a transition that
    /// would drop it.
    fn release_current_image(&mut self) {
        if let SessionState::Loaded { image, .. } =
            std::mem::replace(&mut self.state, SessionState::Idle)
        {
            self.images.release(&image);
        }
    }
}

/// The remote sequence for one submission: upload the CSV, validate
/// the response atomically, fetch the spectrum image for the filename
/// that same response assigned.
///
/// # Errors
///
/// Propagates [`SessionError::UploadFailed`],
/// [`SessionError::ServiceRejected`], or
/// [`SessionError::ImageUnavailable`] from the corresponding step.
pub async fn run_analysis<C: AnalysisClient>(
    client: &C,
    file: &CsvFile,
) -> Result<(DetectionResult, Vec<u8>), SessionError> {
    let response = client.upload(file).await?;
    let result = DetectionResult::from_response(response)?;
    let image = client.fetch_image(&result.image_filename).await?;
    Ok((result, image))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::cell::{Cell, RefCell};

    use futures::executor::block_on;

    use super::*;
    use crate::feature::SpectralFeature;

    /// Image store double that hands out sequential ids and records
    /// every release.
    #[derive(Default)]
    struct CountingStore {
        next: u32,
        released: Vec<u32>,
        fail_acquire: bool,
    }

    impl ImageStore for CountingStore {
        type Handle = u32;

        fn acquire(&mut self, _bytes: &[u8]) -> Result<u32, SessionError> {
            if self.fail_acquire {
                return Err(SessionError::ImageUnavailable("acquire failed".into()));
            }
            self.next += 1;
            Ok(self.next)
        }

        fn release(&mut self, handle: &u32) {
            self.released.push(*handle);
        }
    }

    /// Client double with scripted responses and call counters.
    struct StubClient {
        upload_response: Result<UploadResponse, SessionError>,
        image: Result<Vec<u8>, SessionError>,
        uploads: Cell<usize>,
        reports: RefCell<Vec<ReportRequest>>,
    }

    impl StubClient {
        fn ok() -> Self {
            Self::with_response(Ok(complete_response()))
        }

        fn with_response(upload_response: Result<UploadResponse, SessionError>) -> Self {
            Self {
                upload_response,
                image: Ok(vec![0x89, b'P', b'N', b'G']),
                uploads: Cell::new(0),
                reports: RefCell::new(Vec::new()),
            }
        }
    }

    impl AnalysisClient for StubClient {
        async fn upload(&self, _file: &CsvFile) -> Result<UploadResponse, SessionError> {
            self.uploads.set(self.uploads.get() + 1);
            self.upload_response.clone()
        }

        async fn fetch_image(&self, _filename: &str) -> Result<Vec<u8>, SessionError> {
            self.image.clone()
        }

        fn open_report(&self, request: &ReportRequest) {
            self.reports.borrow_mut().push(request.clone());
        }
    }

    fn peak() -> SpectralFeature {
        SpectralFeature {
            wavenumber: Some(1650.0),
            absorbance: Some(0.82),
            functional_group: Some("C=O".into()),
            kind: Some("peak".into()),
        }
    }

    fn complete_response() -> UploadResponse {
        UploadResponse {
            detected_maxima: Some(vec![peak()]),
            detected_minima: Some(vec![]),
            image_filename: Some("spec_1.png".into()),
            error: None,
        }
    }

    fn csv() -> CsvFile {
        CsvFile::new("sample.csv", "text/csv", b"wavenumber,absorbance\n".to_vec())
    }

    fn loaded_session() -> Session<CountingStore> {
        let mut session = Session::new(CountingStore::default());
        session.select_file(csv()).unwrap();
        block_on(session.submit(&StubClient::ok())).unwrap();
        assert!(session.state().is_loaded());
        session
    }

    #[test]
    fn valid_select_transitions_to_file_selected() {
        let mut session = Session::new(CountingStore::default());
        session.select_file(csv()).unwrap();
        assert!(matches!(session.state(), SessionState::FileSelected(_)));
    }

    #[test]
    fn invalid_mime_fails_and_names_the_file() {
        let mut session = Session::new(CountingStore::default());
        let err = session
            .select_file(CsvFile::new("notes.txt", "text/plain", vec![]))
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidFileType {
                name: "notes.txt".into()
            }
        );
        assert_eq!(session.state().error(), Some(&err));
    }

    #[test]
    fn submit_without_file_fails_visibly() {
        let mut session = Session::new(CountingStore::default());
        assert_eq!(
            session.begin_submit().unwrap_err(),
            SessionError::NoFileSelected
        );
        assert_eq!(
            session.state().error(),
            Some(&SessionError::NoFileSelected)
        );
    }

    #[test]
    fn successful_submit_reaches_loaded() {
        let mut session = Session::new(CountingStore::default());
        session.select_file(csv()).unwrap();
        let client = StubClient::ok();
        block_on(session.submit(&client)).unwrap();

        let SessionState::Loaded { result, image } = session.state() else {
            panic!("expected Loaded, got {:?}", session.state());
        };
        assert_eq!(result.maxima.len(), 1);
        assert!(result.minima.is_empty());
        assert_eq!(result.image_filename, "spec_1.png");
        assert_eq!(*image, 1);
        assert_eq!(client.uploads.get(), 1);
    }

    #[test]
    fn second_submit_while_in_flight_is_rejected_without_transition() {
        let mut session = Session::new(CountingStore::default());
        session.select_file(csv()).unwrap();
        let first = session.begin_submit().unwrap();

        // The trigger fires again before the first submission settles.
        let err = session.begin_submit().unwrap_err();
        assert!(matches!(err, SessionError::InvalidState(_)));
        assert!(session.state().is_submitting());

        // The original submission still applies cleanly.
        let client = StubClient::ok();
        let outcome = block_on(run_analysis(&client, first.file()));
        assert!(session.finish_submit(first.generation(), outcome));
        assert!(session.state().is_loaded());
        assert_eq!(client.uploads.get(), 1);
    }

    #[test]
    fn transport_failure_reaches_failed_not_submitting() {
        let mut session = Session::new(CountingStore::default());
        session.select_file(csv()).unwrap();
        let client =
            StubClient::with_response(Err(SessionError::UploadFailed("timed out".into())));
        let err = block_on(session.submit(&client)).unwrap_err();
        assert_eq!(err, SessionError::UploadFailed("timed out".into()));
        assert!(!session.state().is_submitting());
        assert_eq!(session.state().error(), Some(&err));
    }

    #[test]
    fn missing_minima_discards_parsed_maxima() {
        let mut session = Session::new(CountingStore::default());
        session.select_file(csv()).unwrap();
        let client = StubClient::with_response(Ok(UploadResponse {
            detected_minima: None,
            ..complete_response()
        }));
        let err = block_on(session.submit(&client)).unwrap_err();
        assert!(matches!(err, SessionError::ServiceRejected(_)));
        assert!(session.state().result().is_none());
    }

    #[test]
    fn image_fetch_failure_yields_image_unavailable_not_loaded() {
        let mut session = Session::new(CountingStore::default());
        session.select_file(csv()).unwrap();
        let mut client = StubClient::ok();
        client.image = Err(SessionError::ImageUnavailable("HTTP 404".into()));
        let err = block_on(session.submit(&client)).unwrap_err();
        assert_eq!(err, SessionError::ImageUnavailable("HTTP 404".into()));
        assert!(!session.state().is_loaded());
    }

    #[test]
    fn acquire_failure_fails_the_submission() {
        let mut session = Session::new(CountingStore {
            fail_acquire: true,
            ..CountingStore::default()
        });
        session.select_file(csv()).unwrap();
        let err = block_on(session.submit(&StubClient::ok())).unwrap_err();
        assert!(matches!(err, SessionError::ImageUnavailable(_)));
    }

    #[test]
    fn reselect_from_loaded_releases_handle_exactly_once() {
        let mut session = loaded_session();
        session.select_file(csv()).unwrap();
        assert_eq!(session.images.released, vec![1]);

        // Re-selecting again must not double-release the old handle.
        session.select_file(csv()).unwrap();
        assert_eq!(session.images.released, vec![1]);
    }

    #[test]
    fn reset_releases_handle_and_returns_to_idle() {
        let mut session = loaded_session();
        session.reset();
        assert!(matches!(session.state(), SessionState::Idle));
        assert_eq!(session.images.released, vec![1]);
    }

    #[test]
    fn stale_outcome_is_discarded_after_reselect() {
        let mut session = Session::new(CountingStore::default());
        session.select_file(csv()).unwrap();
        let submission = session.begin_submit().unwrap();

        // User picks a new file while the first submission is in flight.
        session.select_file(csv()).unwrap();

        let outcome = block_on(run_analysis(&StubClient::ok(), submission.file()));
        assert!(!session.finish_submit(submission.generation(), outcome));
        // The late result neither loads nor acquires an image handle.
        assert!(matches!(session.state(), SessionState::FileSelected(_)));
        assert_eq!(session.images.next, 0);
    }

    #[test]
    fn report_requires_both_extrema() {
        // Loaded result has one maxima row and zero minima.
        let session = loaded_session();
        let client = StubClient::ok();
        assert_eq!(
            session.request_report(&client).unwrap_err(),
            SessionError::ReportPreconditionUnmet
        );
        assert!(client.reports.borrow().is_empty());
        // No state transition either.
        assert!(session.state().is_loaded());
    }

    #[test]
    fn report_serializes_the_held_result() {
        let mut session = Session::new(CountingStore::default());
        session.select_file(csv()).unwrap();
        let client = StubClient::with_response(Ok(UploadResponse {
            detected_minima: Some(vec![SpectralFeature {
                kind: Some("minimum".into()),
                functional_group: None,
                ..peak()
            }]),
            ..complete_response()
        }));
        block_on(session.submit(&client)).unwrap();

        session.request_report(&client).unwrap();
        let reports = client.reports.borrow();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].image_filename, "spec_1.png");
        assert!(reports[0].maxima_json.contains("\"type\":\"peak\""));
        assert!(reports[0].minima_json.contains("\"type\":\"minimum\""));
    }

    #[test]
    fn report_from_non_loaded_state_is_refused() {
        let session: Session<CountingStore> = Session::new(CountingStore::default());
        let client = StubClient::ok();
        assert_eq!(
            session.request_report(&client).unwrap_err(),
            SessionError::ReportPreconditionUnmet
        );
        assert!(client.reports.borrow().is_empty());
    }
}
