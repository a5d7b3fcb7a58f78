//! Dioxus UI components for ftirview.
//!
//! Provides the CSV upload zone, the detected-feature tables, the
//! annotated spectrum image, and the PDF report button.

mod report;
mod results;
mod spectrum;
mod upload;

pub use report::ReportButton;
pub use results::FeatureTableView;
pub use spectrum::SpectrumImage;
pub use upload::CsvUpload;
