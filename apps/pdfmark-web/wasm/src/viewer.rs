//! Render surface: pdf.js integration, highlight overlay, decode errors
//!
//! The actual page rendering lives in pdf.js behind
//! `www/js/viewer-bridge.js`; this module owns the mount lifecycle, the
//! surface chrome that is still Rust's responsibility (inline decode
//! errors, the highlight overlay, the selection popup), and the
//! navigation calls forwarded to the bridge.

use pdfmark_core::ViewerError;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, HtmlElement};

/// Worker script pdf.js loads when the host page does not override it.
pub const DEFAULT_WORKER_URL: &str =
    "https://unpkg.com/pdfjs-dist@3.11.174/build/pdf.worker.min.js";

// External JavaScript functions from viewer-bridge.js
#[wasm_bindgen(module = "/www/js/viewer-bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = mountViewer)]
    async fn mount_viewer_internal(
        container: &Element,
        url: &str,
        options: JsValue,
        on_error: &js_sys::Function,
    ) -> JsValue;

    #[wasm_bindgen(js_name = destroyViewer)]
    fn destroy_viewer_internal(handle: &JsValue);

    #[wasm_bindgen(js_name = jumpToPage)]
    fn jump_to_page_internal(handle: &JsValue, page: u32);

    #[wasm_bindgen(js_name = searchDocument)]
    fn search_document_internal(handle: &JsValue, query: &str);

    #[wasm_bindgen(js_name = setZoom)]
    fn set_zoom_internal(handle: &JsValue, zoom: f64);
}

/// Capabilities requested from the embedded viewer. Everything defaults
/// to on; hosts opt out per feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerOptions {
    pub navigation: bool,
    pub search: bool,
    pub zoom: bool,
    pub toolbar: bool,
    pub highlight_overlay: bool,
    pub worker_url: String,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            navigation: true,
            search: true,
            zoom: true,
            toolbar: true,
            highlight_overlay: true,
            worker_url: DEFAULT_WORKER_URL.to_string(),
        }
    }
}

/// One stored highlight, positioned in percentages of the surface so it
/// survives zoom and resize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRect {
    pub id: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Hosts the pdf.js viewer inside a container element and owns the
/// highlight overlay stacked above it.
#[wasm_bindgen]
pub struct RenderSurface {
    container: Element,
    overlay: Option<Element>,
    handle: Option<JsValue>,
    // Kept alive for as long as the bridge may call it.
    _on_error: Option<Closure<dyn Fn(String)>>,
}

#[wasm_bindgen]
impl RenderSurface {
    #[wasm_bindgen(constructor)]
    pub fn new(container: Element) -> Self {
        Self {
            container,
            overlay: None,
            handle: None,
            _on_error: None,
        }
    }

    /// Options with every capability enabled, as a plain JS object.
    #[wasm_bindgen(js_name = defaultOptions)]
    pub fn default_options() -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&ViewerOptions::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Mount the viewer for `url` inside the container. Replaces any
    /// previously mounted document. Decode failures surface as an
    /// inline error message, not an exception.
    pub async fn mount(&mut self, url: &str, options: JsValue) -> Result<(), JsValue> {
        let options: ViewerOptions = if options.is_undefined() || options.is_null() {
            ViewerOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&e.to_string()))?
        };

        self.destroy();

        let container = self.container.clone();
        let on_error = Closure::<dyn Fn(String)>::new(move |message: String| {
            if let Err(err) = render_decode_error(&container, &message) {
                console::error_2(&"Failed to render decode error:".into(), &err);
            }
        });

        let options_js = serde_wasm_bindgen::to_value(&options)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let handle = mount_viewer_internal(
            &self.container,
            url,
            options_js,
            on_error.as_ref().unchecked_ref(),
        )
        .await;

        if handle.is_undefined() || handle.is_null() {
            return Err(JsValue::from_str("Failed to mount viewer"));
        }

        if options.highlight_overlay {
            self.overlay = Some(self.create_overlay()?);
        }
        self.handle = Some(handle);
        self._on_error = Some(on_error);
        Ok(())
    }

    /// Whether a document is currently mounted.
    #[wasm_bindgen(getter, js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.handle.is_some()
    }

    /// Scroll the viewer to a page (1-indexed).
    #[wasm_bindgen(js_name = jumpToPage)]
    pub fn jump_to_page(&self, page: u32) -> Result<(), JsValue> {
        let handle = self.require_handle()?;
        jump_to_page_internal(handle, page);
        Ok(())
    }

    /// Run the viewer's text search.
    pub fn search(&self, query: &str) -> Result<(), JsValue> {
        let handle = self.require_handle()?;
        search_document_internal(handle, query);
        Ok(())
    }

    /// Set the zoom factor (1.0 = 100%).
    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&self, zoom: f64) -> Result<(), JsValue> {
        let handle = self.require_handle()?;
        set_zoom_internal(handle, zoom);
        Ok(())
    }

    /// Repaint the highlight overlay from an array of
    /// `{id, left, top, width, height}` rects (percentages). Malformed
    /// input degrades to an empty overlay with a console warning rather
    /// than failing the render. Returns the number of highlights drawn.
    ///
    /// No tool produces highlights yet, so callers today always paint
    /// an empty overlay; this is the extension point for when they do.
    #[wasm_bindgen(js_name = renderHighlights)]
    pub fn render_highlights(&self, rects: JsValue) -> Result<u32, JsValue> {
        let overlay = match &self.overlay {
            Some(overlay) => overlay,
            None => return Ok(0),
        };
        overlay.set_inner_html("");

        let rects: Vec<HighlightRect> = match serde_wasm_bindgen::from_value(rects) {
            Ok(rects) => rects,
            Err(err) => {
                console::warn_2(
                    &"Ignoring malformed highlight data:".into(),
                    &JsValue::from_str(&err.to_string()),
                );
                return Ok(0);
            }
        };

        let document = owner_document(&self.container)?;
        for rect in &rects {
            let div = create_highlight_element(&document, rect)?;
            overlay.append_child(&div)?;
        }
        Ok(rects.len() as u32)
    }

    /// Show a selection popup near selected text, echoing the selection
    /// inside a small yellow box.
    #[wasm_bindgen(js_name = showSelectionPopup)]
    pub fn show_selection_popup(
        &self,
        selected_text: &str,
        left: f64,
        top: f64,
    ) -> Result<Element, JsValue> {
        let document = owner_document(&self.container)?;
        let popup = create_selection_popup(&document, selected_text, left, top)?;
        self.container.append_child(&popup)?;
        Ok(popup)
    }

    /// Tear down the mounted viewer and overlay. Idempotent.
    pub fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            destroy_viewer_internal(&handle);
        }
        if let Some(overlay) = self.overlay.take() {
            overlay.remove();
        }
        self._on_error = None;
    }

    fn require_handle(&self) -> Result<&JsValue, JsValue> {
        self.handle
            .as_ref()
            .ok_or_else(|| JsValue::from_str(&ViewerError::NoDocumentLoaded.to_string()))
    }

    fn create_overlay(&self) -> Result<Element, JsValue> {
        let document = owner_document(&self.container)?;
        let overlay = document.create_element("div")?;
        overlay.set_class_name("highlight-overlay");

        if let Some(html_element) = overlay.dyn_ref::<HtmlElement>() {
            let style = html_element.style();
            style.set_property("position", "absolute")?;
            style.set_property("top", "0")?;
            style.set_property("left", "0")?;
            style.set_property("width", "100%")?;
            style.set_property("height", "100%")?;
            style.set_property("pointer-events", "none")?;
        }

        self.container.append_child(&overlay)?;
        Ok(overlay)
    }
}

/// Replace the container contents with a centered decode-error message.
pub(crate) fn render_decode_error(container: &Element, message: &str) -> Result<(), JsValue> {
    let document = owner_document(container)?;
    container.set_inner_html("");

    let wrapper = document.create_element("div")?;
    wrapper.set_class_name("viewer-error");
    if let Some(html_element) = wrapper.dyn_ref::<HtmlElement>() {
        let style = html_element.style();
        style.set_property("display", "flex")?;
        style.set_property("align-items", "center")?;
        style.set_property("justify-content", "center")?;
        style.set_property("height", "100%")?;
        style.set_property("color", "#d32f2f")?;
    }

    let error = ViewerError::DecodeError(message.to_string());
    wrapper.set_text_content(Some(&error.to_string()));
    container.append_child(&wrapper)?;
    Ok(())
}

fn create_highlight_element(document: &Document, rect: &HighlightRect) -> Result<Element, JsValue> {
    let div = document.create_element("div")?;
    div.set_class_name("highlight-rect");
    div.set_id(&format!("highlight-{}", rect.id));

    if let Some(html_element) = div.dyn_ref::<HtmlElement>() {
        let style = html_element.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", &format!("{}%", rect.left))?;
        style.set_property("top", &format!("{}%", rect.top))?;
        style.set_property("width", &format!("{}%", rect.width))?;
        style.set_property("height", &format!("{}%", rect.height))?;
        style.set_property("background-color", "rgba(255, 255, 0, 0.4)")?;
        style.set_property("mix-blend-mode", "multiply")?;
        style.set_property("pointer-events", "none")?;
    }

    Ok(div)
}

fn create_selection_popup(
    document: &Document,
    selected_text: &str,
    left: f64,
    top: f64,
) -> Result<Element, JsValue> {
    let popup = document.create_element("div")?;
    popup.set_class_name("selection-popup");

    if let Some(html_element) = popup.dyn_ref::<HtmlElement>() {
        let style = html_element.style();
        style.set_property("position", "absolute")?;
        style.set_property("left", &format!("{left}px"))?;
        style.set_property("top", &format!("{top}px"))?;
        style.set_property("background-color", "#ffeb3b")?;
        style.set_property("padding", "4px")?;
        style.set_property("border-radius", "4px")?;
    }

    popup.set_text_content(Some(selected_text));
    Ok(popup)
}

fn owner_document(element: &Element) -> Result<Document, JsValue> {
    element
        .owner_document()
        .ok_or_else(|| JsValue::from_str("Element is not attached to a document"))
}
