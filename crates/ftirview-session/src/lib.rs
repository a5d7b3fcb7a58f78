//! ftirview-session: Analysis session state machine (sans-IO).
//!
//! Coordinates the multi-step remote interaction of an FTIR analysis
//! run — upload a CSV, validate the detection payload atomically,
//! fetch the rendered spectrum image, enable the PDF report — while
//! keeping the whole session in one tagged [`SessionState`] value.
//!
//! This crate has **no browser or network dependencies**: the remote
//! service and the object-URL machinery sit behind the
//! [`AnalysisClient`] and [`ImageStore`] traits, implemented in
//! `ftirview-io`. Everything here runs in host tests.

pub mod controller;
pub mod display;
pub mod error;
pub mod feature;
pub mod report;
pub mod state;

pub use controller::{AnalysisClient, ImageStore, Session, Submission, run_analysis};
pub use display::{FeatureRow, FeatureTable, NOT_AVAILABLE, feature_table};
pub use error::SessionError;
pub use feature::{DetectionResult, SpectralFeature, UploadResponse};
pub use report::ReportRequest;
pub use state::{CSV_MIME, CsvFile, SessionState};
