//! Error taxonomy for the analysis session.
//!
//! Every failure a session can surface is one of these variants.
//! Most of them end up stored in [`SessionState::Failed`] and rendered
//! as a single user-visible message; the exceptions are noted per
//! variant.
//!
//! [`SessionState::Failed`]: crate::state::SessionState::Failed

/// Errors produced by the session controller and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Submission was requested with no file selected.
    #[error("no file selected")]
    NoFileSelected,

    /// The selected file is not a CSV.
    ///
    /// Carries the offending filename so the retry message can name it.
    #[error("not a CSV file: {name}")]
    InvalidFileType {
        /// Name of the rejected file.
        name: String,
    },

    /// The upload did not complete at the transport level
    /// (network failure, timeout).
    #[error("upload failed: {0}")]
    UploadFailed(String),

    /// The service returned an error payload or an incomplete result
    /// (e.g. a response missing one of the feature sequences).
    #[error("analysis rejected: {0}")]
    ServiceRejected(String),

    /// The spectrum image could not be fetched or displayed.
    #[error("spectrum image unavailable: {0}")]
    ImageUnavailable(String),

    /// A report was requested without a loaded result or with an empty
    /// feature sequence. Surfaced as an immediate notice, never stored
    /// in session state.
    #[error("no data to generate a report from")]
    ReportPreconditionUnmet,

    /// An operation was called in a state that does not permit it
    /// (e.g. submit while a submission is already in flight).
    /// Returned to the caller, never stored in session state; the UI
    /// prevents it by disabling the trigger.
    #[error("operation not valid in the current state: {0}")]
    InvalidState(&'static str),
}
