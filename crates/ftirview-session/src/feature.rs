//! Wire types for the analysis service and the detection result model.
//!
//! The service replies to an upload with a JSON body whose fields are
//! all optional from the client's point of view. [`UploadResponse`] is
//! the permissive serde mirror of that body; [`DetectionResult`] is the
//! validated, atomic form the rest of the session works with. The
//! conversion between them is the only place partial responses are
//! rejected, so a result can never exist with one of its two feature
//! sequences missing.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// One detected extremum in the spectrum.
///
/// All fields are optional on the wire: the service omits
/// `functional_group` for minima, and older service builds omit other
/// fields as well. Display code substitutes a placeholder for anything
/// absent; the report serializer omits absent fields so the objects
/// round-trip exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralFeature {
    /// Spectral x-axis coordinate (inverse wavelength, cm⁻¹).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wavenumber: Option<f64>,

    /// Spectral y-axis intensity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absorbance: Option<f64>,

    /// Chemical functional group label (e.g. `"C=O"`). Less reliable
    /// for minima; often absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functional_group: Option<String>,

    /// Feature tag as sent by the service, e.g. `"peak"` or `"minimum"`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Raw JSON body of a successful `POST /upload_ftir/` response.
///
/// Every field is optional here; validation happens in
/// [`DetectionResult::from_response`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadResponse {
    /// Detected absorbance maxima, in service order.
    pub detected_maxima: Option<Vec<SpectralFeature>>,
    /// Detected absorbance minima, in service order.
    pub detected_minima: Option<Vec<SpectralFeature>>,
    /// Server-assigned handle for fetching the rendered spectrum image.
    pub image_filename: Option<String>,
    /// Error message from the service, if the analysis failed.
    pub error: Option<String>,
}

/// A complete analysis result: both feature sequences plus the image
/// filename handle, constructed atomically from one upload response.
///
/// Feature order is the service's insertion order and is preserved for
/// display; the client never re-sorts.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    /// Detected absorbance maxima (peaks). May be empty.
    pub maxima: Vec<SpectralFeature>,
    /// Detected absorbance minima. May be empty.
    pub minima: Vec<SpectralFeature>,
    /// Non-empty handle for `GET /get_spectrum_image/{filename}`.
    pub image_filename: String,
}

impl DetectionResult {
    /// Validate an upload response into an atomic result.
    ///
    /// A response carrying an `error` field, or missing either feature
    /// sequence or the image filename, is rejected whole — any
    /// already-parsed features are discarded so partial success cannot
    /// be observed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ServiceRejected`] with the service's own
    /// message when present, otherwise a message naming the missing field.
    pub fn from_response(response: UploadResponse) -> Result<Self, SessionError> {
        if let Some(message) = response.error {
            return Err(SessionError::ServiceRejected(message));
        }
        let Some(maxima) = response.detected_maxima else {
            return Err(SessionError::ServiceRejected(
                "response missing detected_maxima".into(),
            ));
        };
        let Some(minima) = response.detected_minima else {
            return Err(SessionError::ServiceRejected(
                "response missing detected_minima".into(),
            ));
        };
        let image_filename = response.image_filename.unwrap_or_default();
        if image_filename.is_empty() {
            return Err(SessionError::ServiceRejected(
                "response missing image_filename".into(),
            ));
        }
        Ok(Self {
            maxima,
            minima,
            image_filename,
        })
    }

    /// `true` when both feature sequences are non-empty — the
    /// precondition for requesting a report.
    #[must_use]
    pub fn has_both_extrema(&self) -> bool {
        !self.maxima.is_empty() && !self.minima.is_empty()
    }
}
