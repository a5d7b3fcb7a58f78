//! ftirview-io: Browser I/O and Dioxus component library.
//!
//! Implements the session crate's seams against the browser — the
//! fetch-backed analysis client and the blob-URL image store — and
//! provides the UI components for the ftirview web application.

pub mod components;
pub mod image_url;
pub mod remote;

pub use components::{CsvUpload, FeatureTableView, ReportButton, SpectrumImage};
pub use image_url::BlobUrlStore;
pub use remote::{DEFAULT_BASE_URL, RemoteClient};
