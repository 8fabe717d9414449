//! Annotation session bindings
//!
//! Thin wrapper over [`pdfmark_core::AnnotationState`]: translates DOM
//! events into reducer events and delivers the resulting effects to the
//! annotation sink. Without a sink callback, committed annotations and
//! signature samples are logged to the console, which is the complete
//! observed behavior today.

use pdfmark_core::{
    AnnotationEvent, AnnotationState, AnnotationTool, SessionEffect, SessionEvent, SurfacePoint,
    ViewerError,
};
use wasm_bindgen::prelude::*;
use web_sys::{console, Element, MouseEvent};

/// Owns tool selection and the two dialogs; mediates between the tool
/// palette, the dialogs, and pointer events on the render surface.
#[wasm_bindgen]
pub struct AnnotationSession {
    state: AnnotationState,
    sink: Option<js_sys::Function>,
}

impl Default for AnnotationSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl AnnotationSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            state: AnnotationState::new(),
            sink: None,
        }
    }

    /// Install the annotation sink. The callback receives
    /// `{kind: "text", text, anchor: {x, y}}` and `{kind: "signature"}`
    /// objects; this is the integration point a real persistence layer
    /// would implement.
    #[wasm_bindgen(js_name = setAnnotationSink)]
    pub fn set_annotation_sink(&mut self, callback: js_sys::Function) {
        self.sink = Some(callback);
    }

    /// Internal tool selection (testable without JsValue)
    fn select_tool_internal(&mut self, id: &str) -> Result<(), ViewerError> {
        let tool = AnnotationTool::from_id(id)?;
        // SelectTool transitions never produce effects; opening the
        // signature dialog is state, not an effect.
        self.state.apply(SessionEvent::SelectTool(tool));
        Ok(())
    }

    /// Toolbar click. Selecting the armed tool disarms it; arming the
    /// signature tool opens the signature dialog.
    #[wasm_bindgen(js_name = selectTool)]
    pub fn select_tool(&mut self, tool: &str) -> Result<(), JsValue> {
        self.select_tool_internal(tool)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The armed tool id, for highlighting the active toolbar button.
    #[wasm_bindgen(getter, js_name = activeTool)]
    pub fn active_tool(&self) -> Option<String> {
        self.state.active_tool().map(|tool| tool.id().to_string())
    }

    /// Pointer click on the render surface. The anchor is the click
    /// position relative to the surface's bounding box.
    #[wasm_bindgen(js_name = surfaceClicked)]
    pub fn surface_clicked(&mut self, event: &MouseEvent, surface: &Element) {
        let rect = surface.get_bounding_client_rect();
        self.surface_clicked_at(
            f64::from(event.client_x()) - rect.left(),
            f64::from(event.client_y()) - rect.top(),
        );
    }

    /// Surface click with a precomputed surface-relative position.
    #[wasm_bindgen(js_name = surfaceClickedAt)]
    pub fn surface_clicked_at(&mut self, x: f64, y: f64) {
        self.state
            .apply(SessionEvent::SurfaceClicked(SurfacePoint::new(x, y)));
    }

    /// Text dialog input changed.
    #[wasm_bindgen(js_name = textChanged)]
    pub fn text_changed(&mut self, text: &str) {
        self.state
            .apply(SessionEvent::TextChanged(text.to_string()));
    }

    /// Submit the text dialog. A no-op while the text is empty or no
    /// anchor is set.
    #[wasm_bindgen(js_name = commitText)]
    pub fn commit_text(&mut self) -> Result<(), JsValue> {
        let effect = self.state.apply(SessionEvent::CommitText);
        self.deliver(effect)
    }

    /// Cancel the text dialog, discarding the pending annotation. The
    /// text tool stays armed.
    #[wasm_bindgen(js_name = cancelText)]
    pub fn cancel_text(&mut self) {
        self.state.apply(SessionEvent::CancelText);
    }

    /// Pointer movement inside the signature capture area.
    #[wasm_bindgen(js_name = signaturePointerMoved)]
    pub fn signature_pointer_moved(&mut self, event: &MouseEvent) -> Result<(), JsValue> {
        self.signature_pointer_moved_at(f64::from(event.client_x()), f64::from(event.client_y()))
    }

    /// Signature pointer sample with precomputed coordinates.
    #[wasm_bindgen(js_name = signaturePointerMovedAt)]
    pub fn signature_pointer_moved_at(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        let effect = self
            .state
            .apply(SessionEvent::SignaturePointerMoved(SurfacePoint::new(x, y)));
        self.deliver(effect)
    }

    /// Close the signature dialog without applying; the tool stays
    /// armed.
    #[wasm_bindgen(js_name = cancelSignature)]
    pub fn cancel_signature(&mut self) {
        self.state.apply(SessionEvent::CancelSignature);
    }

    /// Apply the signature: closes the dialog, disarms the tool, and
    /// forwards the (currently empty) signature artifact to the sink.
    #[wasm_bindgen(js_name = applySignature)]
    pub fn apply_signature(&mut self) -> Result<(), JsValue> {
        let effect = self.state.apply(SessionEvent::ApplySignature);
        self.deliver(effect)
    }

    #[wasm_bindgen(getter, js_name = isTextDialogOpen)]
    pub fn is_text_dialog_open(&self) -> bool {
        self.state.text_dialog.visible
    }

    #[wasm_bindgen(getter, js_name = isSignatureDialogOpen)]
    pub fn is_signature_dialog_open(&self) -> bool {
        self.state.signature_dialog.visible
    }

    /// Current text dialog contents.
    #[wasm_bindgen(getter, js_name = pendingText)]
    pub fn pending_text(&self) -> String {
        self.state.text_dialog.text.clone()
    }

    /// Anchor of the pending text annotation as `{x, y}`, or undefined.
    #[wasm_bindgen(getter, js_name = textAnchor)]
    pub fn text_anchor(&self) -> Result<JsValue, JsValue> {
        match self.state.text_dialog.anchor {
            Some(anchor) => serde_wasm_bindgen::to_value(&anchor)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    fn deliver(&self, effect: Option<SessionEffect>) -> Result<(), JsValue> {
        match effect {
            Some(SessionEffect::Annotation(event)) => self.deliver_annotation(event),
            Some(SessionEffect::SignatureSample(point)) => {
                // Raw samples are recorded, not drawn: no stroke is
                // accumulated in the current behavior.
                console::log_3(
                    &"Drawing signature at:".into(),
                    &point.x.into(),
                    &point.y.into(),
                );
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn deliver_annotation(&self, event: AnnotationEvent) -> Result<(), JsValue> {
        let payload =
            serde_wasm_bindgen::to_value(&event).map_err(|e| JsValue::from_str(&e.to_string()))?;

        match &self.sink {
            Some(callback) => {
                callback.call1(&JsValue::NULL, &payload)?;
            }
            None => {
                console::log_2(&"Annotation:".into(), &payload);
            }
        }
        Ok(())
    }
}
