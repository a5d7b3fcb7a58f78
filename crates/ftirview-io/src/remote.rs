//! HTTP client for the analysis service, over the browser fetch API.
//!
//! Implements the [`AnalysisClient`] seam with `gloo-net`: a multipart
//! CSV upload, a binary image fetch, and a report request that opens a
//! new browsing context. All functions require a browser environment
//! (`wasm32-unknown-unknown` target).

use ftirview_session::{AnalysisClient, CsvFile, ReportRequest, SessionError, UploadResponse};
use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Service address the original deployment runs on.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Fetch-backed client for the three analysis endpoints.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
}

impl Default for RemoteClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl RemoteClient {
    /// Create a client for a service at `base_url` (scheme + host, no
    /// trailing slash required).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Join an endpoint path onto the base URL.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl AnalysisClient for RemoteClient {
    async fn upload(&self, file: &CsvFile) -> Result<UploadResponse, SessionError> {
        let form = multipart_csv(file).map_err(SessionError::UploadFailed)?;
        let response = Request::post(&self.endpoint("upload_ftir/"))
            .body(form)
            .map_err(|e| SessionError::UploadFailed(e.to_string()))?
            .send()
            .await
            .map_err(|e| SessionError::UploadFailed(e.to_string()))?;

        // The service reports analysis failures inside the JSON body
        // (an `error` field), sometimes with a non-2xx status, so the
        // body is parsed regardless of status.
        response
            .json::<UploadResponse>()
            .await
            .map_err(|e| SessionError::ServiceRejected(format!("unexpected response body: {e}")))
    }

    async fn fetch_image(&self, filename: &str) -> Result<Vec<u8>, SessionError> {
        let url = self.endpoint(&format!("get_spectrum_image/{filename}"));
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| SessionError::ImageUnavailable(e.to_string()))?;
        if !response.ok() {
            return Err(SessionError::ImageUnavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }
        response
            .binary()
            .await
            .map_err(|e| SessionError::ImageUnavailable(e.to_string()))
    }

    fn open_report(&self, request: &ReportRequest) {
        // Best-effort: the service streams the document into the new
        // context and no response is observable from here. Failures
        // (no window, popup blocked) are silently dropped, matching
        // the fire-and-forget contract.
        let Ok(url) = web_sys::Url::new(&self.endpoint("download_pdf/")) else {
            return;
        };
        let params = url.search_params();
        params.append("image_filename", &request.image_filename);
        params.append("maxima", &request.maxima_json);
        params.append("minima", &request.minima_json);

        let Some(window) = web_sys::window() else {
            return;
        };
        let _ = window.open_with_url_and_target(&url.href(), "_blank");
    }
}

/// Build the multipart form: one `file` field carrying the CSV blob
/// under its original filename.
fn multipart_csv(file: &CsvFile) -> Result<web_sys::FormData, String> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes);

    let opts = BlobPropertyBag::new();
    opts.set_type(&file.mime);

    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
        .map_err(js_error)?;

    let form = web_sys::FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("file", &blob, &file.name)
        .map_err(js_error)?;
    Ok(form)
}

fn js_error(value: JsValue) -> String {
    format!("browser API error: {value:?}")
}
