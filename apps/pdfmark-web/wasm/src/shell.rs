//! Document shell: file selection, object URL lifecycle, export
//!
//! Wraps [`pdfmark_core::DocumentShellState`] with the browser pieces:
//! blob object URLs for user-selected files and the synthetic anchor
//! click that drives the save-as download.

use js_sys::Uint8Array;
use pdfmark_core::DocumentShellState;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Owns the currently loaded document reference and renders either the
/// upload prompt or the viewer (decided by `showsUploadPrompt`).
#[wasm_bindgen]
pub struct DocumentShell {
    state: DocumentShellState,
}

impl Default for DocumentShell {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl DocumentShell {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            state: DocumentShellState::new(),
        }
    }

    /// Load a user-selected file. Creates an ephemeral object URL for
    /// the render surface and revokes the previous one, if any, so
    /// repeated uploads in one session do not accumulate blob URLs.
    /// Returns the new URL.
    #[wasm_bindgen(js_name = selectLocalFile)]
    pub fn select_local_file(&mut self, filename: &str, bytes: &[u8]) -> Result<String, JsValue> {
        let array = Uint8Array::new_with_length(bytes.len() as u32);
        array.copy_from(bytes);

        let parts = js_sys::Array::of1(&array);
        let options = BlobPropertyBag::new();
        options.set_type("application/pdf");
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

        let object_url = Url::create_object_url_with_blob(&blob)?;
        let stale = self
            .state
            .select_local_file(filename.to_string(), object_url.clone());
        revoke_if_present(stale);

        Ok(object_url)
    }

    /// Load the fixed, publicly reachable sample document. Clears any
    /// local-file reference. Returns the sample URL.
    #[wasm_bindgen(js_name = selectSample)]
    pub fn select_sample(&mut self) -> String {
        let stale = self.state.select_sample();
        revoke_if_present(stale);
        pdfmark_core::SAMPLE_DOCUMENT_URL.to_string()
    }

    /// Whether the upload prompt is shown instead of the viewer.
    #[wasm_bindgen(getter, js_name = showsUploadPrompt)]
    pub fn shows_upload_prompt(&self) -> bool {
        self.state.shows_upload_prompt()
    }

    /// URL for the render surface, if a document is loaded.
    #[wasm_bindgen(getter, js_name = fileUrl)]
    pub fn file_url(&self) -> Option<String> {
        self.state.file_url().map(str::to_string)
    }

    /// Filename the export will use, if a document is loaded.
    #[wasm_bindgen(getter, js_name = exportFilename)]
    pub fn export_filename(&self) -> Option<String> {
        self.state.export_filename().map(str::to_string)
    }

    /// Download the currently loaded document under its original
    /// filename (or `signed-document.pdf`).
    ///
    /// This is a passthrough export: the bytes are the unmodified
    /// source, with no annotations baked in. Returns `false` as a
    /// no-op when nothing is loaded.
    #[wasm_bindgen(js_name = exportCurrent)]
    pub fn export_current(&self) -> Result<bool, JsValue> {
        let (url, filename) = match (self.state.file_url(), self.state.export_filename()) {
            (Some(url), Some(filename)) => (url, filename),
            _ => return Ok(false),
        };

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("No document body"))?;

        let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
        anchor.set_href(url);
        anchor.set_download(filename);
        body.append_child(&anchor)?;
        anchor.click();
        body.remove_child(&anchor)?;

        Ok(true)
    }

    /// Tear down the shell, releasing any local object URL.
    pub fn dispose(&mut self) {
        revoke_if_present(self.state.clear());
    }
}

fn revoke_if_present(object_url: Option<String>) {
    if let Some(url) = object_url {
        // Revocation failure only means the URL was already gone.
        let _ = Url::revoke_object_url(&url);
    }
}
