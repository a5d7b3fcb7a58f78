//! Session state as a single tagged variant.
//!
//! The original UI for this workflow kept half a dozen independent
//! flags (`loading`, `showResults`, `error`, ...) that could disagree
//! with each other. Here the whole session is one [`SessionState`]
//! value; every UI flag is derived by pattern-matching on it, so
//! inconsistent combinations are unrepresentable.

use crate::error::SessionError;

/// The CSV file selected for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFile {
    /// Original filename, used in messages and the multipart form.
    pub name: String,
    /// MIME type as reported (or inferred) by the file picker.
    pub mime: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// MIME type required for submission.
pub const CSV_MIME: &str = "text/csv";

impl CsvFile {
    /// Create a file from picker output.
    #[must_use]
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// `true` when the MIME type is CSV.
    #[must_use]
    pub fn is_csv(&self) -> bool {
        self.mime == CSV_MIME
    }
}

/// The one source of truth for an analysis session.
///
/// Generic over the display-image handle type `H` so the state machine
/// can be exercised on the host with a plain handle and in the browser
/// with a blob URL.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState<H> {
    /// No file selected yet; nothing submitted.
    Idle,
    /// A valid CSV is selected and ready to submit.
    FileSelected(CsvFile),
    /// An upload (and subsequent image fetch) is in flight.
    Submitting,
    /// A complete result with its displayable spectrum image.
    Loaded {
        /// The atomic detection result from the last submission.
        result: crate::feature::DetectionResult,
        /// Live handle to the fetched spectrum image.
        image: H,
    },
    /// The last operation failed; the message is user-visible.
    Failed(SessionError),
}

impl<H> SessionState<H> {
    /// `true` while a submission is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// `true` when results (and the spectrum image) should be shown.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// The loaded result, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&crate::feature::DetectionResult> {
        match self {
            Self::Loaded { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The current user-visible error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&SessionError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_mime_check() {
        let csv = CsvFile::new("run.csv", "text/csv", vec![1, 2, 3]);
        assert!(csv.is_csv());

        let xlsx = CsvFile::new(
            "run.xlsx",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            vec![],
        );
        assert!(!xlsx.is_csv());
    }

    #[test]
    fn derived_flags_follow_the_variant() {
        let state: SessionState<String> = SessionState::Idle;
        assert!(!state.is_submitting());
        assert!(!state.is_loaded());
        assert!(state.result().is_none());
        assert!(state.error().is_none());

        let state: SessionState<String> =
            SessionState::Failed(SessionError::NoFileSelected);
        assert_eq!(state.error(), Some(&SessionError::NoFileSelected));
        assert!(!state.is_loaded());
    }
}
