//! PDF report request serialization.
//!
//! The report endpoint takes the image filename and both feature
//! sequences as query parameters, the sequences serialized as JSON
//! text. The service streams back a document into a new browsing
//! context; no response is consumed by the client.

use crate::error::SessionError;
use crate::feature::DetectionResult;

/// Query parameters for `GET /download_pdf/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    /// The `image_filename` handle from the loaded result.
    pub image_filename: String,
    /// `maxima` parameter: the maxima sequence as JSON text.
    pub maxima_json: String,
    /// `minima` parameter: the minima sequence as JSON text.
    pub minima_json: String,
}

impl ReportRequest {
    /// Serialize a loaded result into report query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ReportPreconditionUnmet`] if either
    /// feature sequence is empty — a report requires at least one of
    /// each detected extremum (documented policy). Serialization of the
    /// plain data types cannot fail in practice; a serde error is
    /// folded into the same variant.
    pub fn from_result(result: &DetectionResult) -> Result<Self, SessionError> {
        if !result.has_both_extrema() {
            return Err(SessionError::ReportPreconditionUnmet);
        }
        let maxima_json = serde_json::to_string(&result.maxima)
            .map_err(|_| SessionError::ReportPreconditionUnmet)?;
        let minima_json = serde_json::to_string(&result.minima)
            .map_err(|_| SessionError::ReportPreconditionUnmet)?;
        Ok(Self {
            image_filename: result.image_filename.clone(),
            maxima_json,
            minima_json,
        })
    }
}
