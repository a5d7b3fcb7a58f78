//! Blob URL lifecycle for the spectrum image.
//!
//! Wraps downloaded PNG bytes in a `Blob`, hands out the object URL as
//! the session's display-image handle, and guarantees the URL is
//! revoked exactly once — on replacement, on release, or when the
//! store is dropped. Requires a browser environment.

use ftirview_session::{ImageStore, SessionError};
use web_sys::BlobPropertyBag;

/// Image store backed by `URL.createObjectURL` / `URL.revokeObjectURL`.
///
/// At most one URL is live at a time; acquiring a new one revokes the
/// previous, and [`release`](ImageStore::release) of anything but the
/// live URL is a no-op, so double releases cannot happen.
#[derive(Debug, Default)]
pub struct BlobUrlStore {
    live: Option<String>,
}

impl BlobUrlStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { live: None }
    }

    /// The currently live object URL, if any.
    #[must_use]
    pub fn live_url(&self) -> Option<&str> {
        self.live.as_deref()
    }
}

impl ImageStore for BlobUrlStore {
    type Handle = String;

    fn acquire(&mut self, bytes: &[u8]) -> Result<String, SessionError> {
        // Superseding revokes the outgoing URL first.
        if let Some(previous) = self.live.take() {
            revoke(&previous);
        }

        let array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::new();
        parts.push(&array);

        let opts = BlobPropertyBag::new();
        opts.set_type("image/png");

        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|e| SessionError::ImageUnavailable(format!("blob creation failed: {e:?}")))?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|e| SessionError::ImageUnavailable(format!("object URL failed: {e:?}")))?;

        self.live = Some(url.clone());
        Ok(url)
    }

    fn release(&mut self, handle: &String) {
        if self.live.as_deref() == Some(handle.as_str()) {
            self.live = None;
            revoke(handle);
        }
    }
}

impl Drop for BlobUrlStore {
    fn drop(&mut self) {
        if let Some(url) = self.live.take() {
            revoke(&url);
        }
    }
}

/// Revoke an object URL. Best-effort: the URL may already be gone.
fn revoke(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}
