//! Browser implementations of the core storage and transport seams.

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::callback::Timeout;
use greenayu_core::{
    ImageUpload, Payload, RawResponse, SessionStorage, StorageError, Transport, TransportError,
};
use js_sys::{Array, Uint8Array};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Blob, BlobPropertyBag, File, FormData};

/// Backend base URL, baked in at build time.
pub fn default_base_url() -> &'static str {
    option_env!("GREENAYU_BASE_URL").unwrap_or("http://127.0.0.1:8000")
}

/// Request timeout for feature submissions.
pub const REQUEST_TIMEOUT_MS: u32 = 30_000;

/// `window.localStorage`, storing raw strings so the session stays readable
/// by other tabs and by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// `fetch`-based transport against the inference backend.
#[derive(Debug, Clone)]
pub struct BrowserTransport {
    base_url: String,
    timeout_ms: u32,
}

impl BrowserTransport {
    pub fn new(base_url: &str, timeout_ms: u32) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout_ms,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, path: &str, payload: Payload) -> Result<RawResponse, TransportError> {
        let url = format!("{}{}", self.base_url, path);

        let controller = AbortController::new()
            .map_err(|e| TransportError::Unreachable(format!("{:?}", e)))?;
        let signal = controller.signal();
        let timed_out = Rc::new(Cell::new(false));
        let _timer = {
            let timed_out = timed_out.clone();
            Timeout::new(self.timeout_ms, move || {
                timed_out.set(true);
                controller.abort();
            })
        };

        let builder = Request::post(&url)
            .header("Accept", "application/json")
            .abort_signal(Some(&signal));
        let request = match payload {
            Payload::Json(body) => builder.json(&body),
            Payload::Multipart { field, upload } => {
                let form = multipart(field, &upload)
                    .map_err(|e| TransportError::Unreachable(format!("{:?}", e)))?;
                builder.body(form)
            }
        }
        .map_err(|e| TransportError::Unreachable(e.to_string()))?;

        let fail = |e: gloo_net::Error| {
            if timed_out.get() {
                TransportError::Timeout(u64::from(self.timeout_ms / 1000))
            } else {
                TransportError::Unreachable(e.to_string())
            }
        };

        let response = request.send().await.map_err(fail)?;
        let status = response.status();
        let body = response.text().await.map_err(fail)?;

        tracing::debug!(%url, status, "Backend replied");
        Ok(RawResponse::new(status, body))
    }
}

fn multipart(field: &str, upload: &ImageUpload) -> Result<FormData, wasm_bindgen::JsValue> {
    let parts = Array::of1(&Uint8Array::from(upload.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(&upload.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename(field, &blob, &upload.file_name)?;
    Ok(form)
}

/// Reads a picked file into an [`ImageUpload`].
pub async fn read_file(file: &File) -> Result<ImageUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Could not read {}: {:?}", file.name(), e))?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(ImageUpload::new(file.name(), file.type_(), bytes))
}

/// Object URL for previewing a picked file.
pub fn preview_url(file: &File) -> Option<String> {
    web_sys::Url::create_object_url_with_blob(file).ok()
}
