//! Annotation session state machine
//!
//! All toolbar clicks, dialog buttons, and pointer events on the render
//! surface are represented as [`SessionEvent`]s applied through
//! [`AnnotationState::apply`], which returns at most one
//! [`SessionEffect`] for the caller to deliver. Keeping the transitions
//! here, away from the DOM, is what makes the state machine testable in
//! isolation from rendering.

use serde::{Deserialize, Serialize};

use crate::tool::AnnotationTool;

/// A point in render-surface-local coordinates (client coordinates
/// minus the surface's top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

impl SurfacePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An in-progress text note. Visibility and anchor are set together by
/// a surface click while the text tool is armed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDialog {
    pub visible: bool,
    pub text: String,
    pub anchor: Option<SurfacePoint>,
}

impl TextDialog {
    fn closed() -> Self {
        Self {
            visible: false,
            text: String::new(),
            anchor: None,
        }
    }
}

/// The signature capture dialog. Opened solely by arming the signature
/// tool; no ink is accumulated while it is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureDialog {
    pub visible: bool,
}

/// Events that drive the annotation session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A toolbar button was clicked. Selecting the armed tool disarms it.
    SelectTool(AnnotationTool),
    /// Pointer click on the render surface (not on a dialog).
    SurfaceClicked(SurfacePoint),
    /// Text dialog input changed.
    TextChanged(String),
    /// Text dialog submitted.
    CommitText,
    /// Text dialog cancelled.
    CancelText,
    /// Pointer moved inside the signature capture area.
    SignaturePointerMoved(SurfacePoint),
    /// Signature dialog cancelled.
    CancelSignature,
    /// Signature dialog applied.
    ApplySignature,
}

/// A committed annotation, as delivered to the annotation sink.
///
/// Serializes to `{"kind":"text","text":...,"anchor":{"x":..,"y":..}}`
/// and `{"kind":"signature"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnnotationEvent {
    Text { text: String, anchor: SurfacePoint },
    Signature,
}

/// Side effects a transition asks the caller to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// Forward a committed annotation to the annotation sink.
    Annotation(AnnotationEvent),
    /// Forward a raw signature pointer sample. No stroke is built from
    /// these; the current behavior only records them.
    SignatureSample(SurfacePoint),
}

/// State owned by the annotation session component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationState {
    active_tool: Option<AnnotationTool>,
    pub text_dialog: TextDialog,
    pub signature_dialog: SignatureDialog,
}

impl Default for AnnotationState {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationState {
    /// Session state at mount: no tool armed, both dialogs closed.
    pub fn new() -> Self {
        Self {
            active_tool: None,
            text_dialog: TextDialog::closed(),
            signature_dialog: SignatureDialog { visible: false },
        }
    }

    /// The currently armed tool, if any.
    pub fn active_tool(&self) -> Option<AnnotationTool> {
        self.active_tool
    }

    /// Apply one event and return the effect the caller must deliver,
    /// if the transition produced one.
    pub fn apply(&mut self, event: SessionEvent) -> Option<SessionEffect> {
        match event {
            SessionEvent::SelectTool(tool) => {
                if self.active_tool == Some(tool) {
                    self.active_tool = None;
                } else {
                    self.active_tool = Some(tool);
                    // Arming the signature tool is the only
                    // side-effecting selection: it opens the capture
                    // dialog.
                    if tool == AnnotationTool::Signature {
                        self.signature_dialog.visible = true;
                    }
                }
                None
            }
            SessionEvent::SurfaceClicked(point) => {
                let dialog_open = self.text_dialog.visible || self.signature_dialog.visible;
                if self.active_tool == Some(AnnotationTool::Text) && !dialog_open {
                    self.text_dialog = TextDialog {
                        visible: true,
                        text: String::new(),
                        anchor: Some(point),
                    };
                }
                None
            }
            SessionEvent::TextChanged(text) => {
                if self.text_dialog.visible {
                    self.text_dialog.text = text;
                }
                None
            }
            SessionEvent::CommitText => {
                if self.text_dialog.text.is_empty() {
                    return None;
                }
                let anchor = self.text_dialog.anchor?;
                let text = std::mem::take(&mut self.text_dialog.text);
                self.text_dialog = TextDialog::closed();
                self.active_tool = None;
                Some(SessionEffect::Annotation(AnnotationEvent::Text {
                    text,
                    anchor,
                }))
            }
            SessionEvent::CancelText => {
                // The pending annotation is discarded but the text tool
                // stays armed, matching the observed behavior.
                self.text_dialog = TextDialog::closed();
                None
            }
            SessionEvent::SignaturePointerMoved(point) => {
                if self.signature_dialog.visible {
                    Some(SessionEffect::SignatureSample(point))
                } else {
                    None
                }
            }
            SessionEvent::CancelSignature => {
                self.signature_dialog.visible = false;
                None
            }
            SessionEvent::ApplySignature => {
                self.signature_dialog.visible = false;
                self.active_tool = None;
                Some(SessionEffect::Annotation(AnnotationEvent::Signature))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn armed(state: &AnnotationState) -> Option<AnnotationTool> {
        state.active_tool()
    }

    #[test]
    fn test_selecting_a_tool_arms_it() {
        let mut state = AnnotationState::new();
        state.apply(SessionEvent::SelectTool(AnnotationTool::Highlight));
        assert_eq!(armed(&state), Some(AnnotationTool::Highlight));
    }

    #[test]
    fn test_selecting_the_armed_tool_disarms_it() {
        let mut state = AnnotationState::new();
        state.apply(SessionEvent::SelectTool(AnnotationTool::Draw));
        state.apply(SessionEvent::SelectTool(AnnotationTool::Draw));
        assert_eq!(armed(&state), None);
    }

    #[test]
    fn test_selecting_a_different_tool_switches() {
        let mut state = AnnotationState::new();
        state.apply(SessionEvent::SelectTool(AnnotationTool::Draw));
        state.apply(SessionEvent::SelectTool(AnnotationTool::Stamp));
        assert_eq!(armed(&state), Some(AnnotationTool::Stamp));
    }

    #[test]
    fn test_arming_signature_opens_dialog_once() {
        let mut state = AnnotationState::new();
        state.apply(SessionEvent::SelectTool(AnnotationTool::Signature));
        assert!(state.signature_dialog.visible);

        // Cancelling hides the dialog but leaves the tool armed.
        state.apply(SessionEvent::CancelSignature);
        assert!(!state.signature_dialog.visible);
        assert_eq!(armed(&state), Some(AnnotationTool::Signature));

        // Selecting signature again toggles the tool off and must not
        // reopen the dialog.
        state.apply(SessionEvent::SelectTool(AnnotationTool::Signature));
        assert!(!state.signature_dialog.visible);
        assert_eq!(armed(&state), None);
    }

    #[test]
    fn test_apply_signature_disarms_and_emits() {
        let mut state = AnnotationState::new();
        state.apply(SessionEvent::SelectTool(AnnotationTool::Signature));
        let effect = state.apply(SessionEvent::ApplySignature);
        assert_eq!(
            effect,
            Some(SessionEffect::Annotation(AnnotationEvent::Signature))
        );
        assert!(!state.signature_dialog.visible);
        assert_eq!(armed(&state), None);
    }

    #[test]
    fn test_signature_samples_forward_only_while_open() {
        let mut state = AnnotationState::new();
        let sample = SurfacePoint::new(10.0, 20.0);

        assert_eq!(
            state.apply(SessionEvent::SignaturePointerMoved(sample)),
            None
        );

        state.apply(SessionEvent::SelectTool(AnnotationTool::Signature));
        assert_eq!(
            state.apply(SessionEvent::SignaturePointerMoved(sample)),
            Some(SessionEffect::SignatureSample(sample))
        );
    }

    #[test]
    fn test_click_opens_text_dialog_only_when_text_armed() {
        let mut state = AnnotationState::new();
        let click = SurfacePoint::new(120.0, 40.0);

        state.apply(SessionEvent::SurfaceClicked(click));
        assert!(!state.text_dialog.visible);

        state.apply(SessionEvent::SelectTool(AnnotationTool::Text));
        state.apply(SessionEvent::SurfaceClicked(click));
        assert!(state.text_dialog.visible);
        assert_eq!(state.text_dialog.anchor, Some(click));
        assert_eq!(state.text_dialog.text, "");
    }

    #[test]
    fn test_click_while_dialog_open_does_not_move_anchor() {
        let mut state = AnnotationState::new();
        state.apply(SessionEvent::SelectTool(AnnotationTool::Text));
        state.apply(SessionEvent::SurfaceClicked(SurfacePoint::new(1.0, 2.0)));
        state.apply(SessionEvent::SurfaceClicked(SurfacePoint::new(9.0, 9.0)));
        assert_eq!(state.text_dialog.anchor, Some(SurfacePoint::new(1.0, 2.0)));
    }

    #[test]
    fn test_commit_text_flow() {
        let mut state = AnnotationState::new();
        state.apply(SessionEvent::SelectTool(AnnotationTool::Text));
        state.apply(SessionEvent::SurfaceClicked(SurfacePoint::new(120.0, 40.0)));
        state.apply(SessionEvent::TextChanged("Approved".to_string()));

        let effect = state.apply(SessionEvent::CommitText);
        assert_eq!(
            effect,
            Some(SessionEffect::Annotation(AnnotationEvent::Text {
                text: "Approved".to_string(),
                anchor: SurfacePoint::new(120.0, 40.0),
            }))
        );

        // Dialog resets to defaults and the tool disarms.
        assert_eq!(state.text_dialog, TextDialog::closed());
        assert_eq!(armed(&state), None);
    }

    #[test]
    fn test_commit_with_empty_text_is_a_no_op() {
        let mut state = AnnotationState::new();
        state.apply(SessionEvent::SelectTool(AnnotationTool::Text));
        state.apply(SessionEvent::SurfaceClicked(SurfacePoint::new(5.0, 5.0)));

        let before = state.clone();
        let effect = state.apply(SessionEvent::CommitText);
        assert_eq!(effect, None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_commit_without_anchor_is_a_no_op() {
        let mut state = AnnotationState::new();
        state.apply(SessionEvent::SelectTool(AnnotationTool::Text));
        // Type into a dialog that was never opened by a click.
        state.text_dialog.visible = true;
        state.apply(SessionEvent::TextChanged("orphan".to_string()));

        let effect = state.apply(SessionEvent::CommitText);
        assert_eq!(effect, None);
    }

    #[test]
    fn test_cancel_text_keeps_tool_armed() {
        let mut state = AnnotationState::new();
        state.apply(SessionEvent::SelectTool(AnnotationTool::Text));
        state.apply(SessionEvent::SurfaceClicked(SurfacePoint::new(3.0, 4.0)));
        state.apply(SessionEvent::TextChanged("draft".to_string()));

        let effect = state.apply(SessionEvent::CancelText);
        assert_eq!(effect, None);
        assert_eq!(state.text_dialog, TextDialog::closed());
        assert_eq!(armed(&state), Some(AnnotationTool::Text));
    }

    #[test]
    fn test_text_changed_ignored_while_dialog_closed() {
        let mut state = AnnotationState::new();
        state.apply(SessionEvent::TextChanged("ghost".to_string()));
        assert_eq!(state.text_dialog.text, "");
    }

    #[test]
    fn test_annotation_event_wire_format() {
        let event = AnnotationEvent::Text {
            text: "Approved".to_string(),
            anchor: SurfacePoint::new(120.0, 40.0),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "text",
                "text": "Approved",
                "anchor": { "x": 120.0, "y": 40.0 },
            })
        );

        let json = serde_json::to_value(AnnotationEvent::Signature).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "signature" }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_tool() -> impl Strategy<Value = AnnotationTool> {
        prop::sample::select(AnnotationTool::ALL.to_vec())
    }

    proptest! {
        /// Property: after any sequence of tool selections, the armed
        /// tool is the last selection that did not hit an already-armed
        /// tool; selecting the armed tool always disarms.
        #[test]
        fn tool_toggle_law(tools in prop::collection::vec(any_tool(), 0..32)) {
            let mut state = AnnotationState::new();
            let mut expected: Option<AnnotationTool> = None;

            for tool in tools {
                if expected == Some(tool) {
                    expected = None;
                } else {
                    expected = Some(tool);
                }
                state.apply(SessionEvent::SelectTool(tool));
                prop_assert_eq!(state.active_tool(), expected);
            }
        }

        /// Property: the signature dialog is visible iff the most
        /// recent transition into ToolArmed(signature) has not been
        /// closed since.
        #[test]
        fn signature_dialog_tracks_arming(tools in prop::collection::vec(any_tool(), 0..32)) {
            let mut state = AnnotationState::new();
            let mut armed: Option<AnnotationTool> = None;
            let mut dialog = false;

            for tool in tools {
                if armed == Some(tool) {
                    armed = None;
                } else {
                    armed = Some(tool);
                    if tool == AnnotationTool::Signature {
                        dialog = true;
                    }
                }
                state.apply(SessionEvent::SelectTool(tool));
                prop_assert_eq!(state.signature_dialog.visible, dialog);
            }
        }

        /// Property: a surface click while the text tool is armed (and
        /// no dialog is open) anchors the dialog exactly at the click.
        #[test]
        fn click_anchor_equals_click_position(
            x in 0.0f64..4000.0,
            y in 0.0f64..4000.0,
        ) {
            let mut state = AnnotationState::new();
            state.apply(SessionEvent::SelectTool(AnnotationTool::Text));
            state.apply(SessionEvent::SurfaceClicked(SurfacePoint::new(x, y)));

            prop_assert!(state.text_dialog.visible);
            prop_assert_eq!(state.text_dialog.anchor, Some(SurfacePoint::new(x, y)));
        }

        /// Property: committing non-empty text always emits exactly the
        /// typed text and the click anchor, then resets the session.
        #[test]
        fn commit_forwards_text_and_anchor(
            text in "[a-zA-Z0-9 ]{1,40}",
            x in 0.0f64..2000.0,
            y in 0.0f64..2000.0,
        ) {
            let mut state = AnnotationState::new();
            state.apply(SessionEvent::SelectTool(AnnotationTool::Text));
            state.apply(SessionEvent::SurfaceClicked(SurfacePoint::new(x, y)));
            state.apply(SessionEvent::TextChanged(text.clone()));

            let effect = state.apply(SessionEvent::CommitText);
            prop_assert_eq!(
                effect,
                Some(SessionEffect::Annotation(AnnotationEvent::Text {
                    text,
                    anchor: SurfacePoint::new(x, y),
                }))
            );
            prop_assert_eq!(state.active_tool(), None);
            prop_assert!(!state.text_dialog.visible);
            prop_assert_eq!(&state.text_dialog.text, "");
        }

        /// Property: non-text, non-signature tools never produce
        /// effects or open dialogs, no matter where the user clicks.
        #[test]
        fn passive_tools_only_toggle(
            tool in prop::sample::select(vec![
                AnnotationTool::Highlight,
                AnnotationTool::Underline,
                AnnotationTool::Draw,
                AnnotationTool::Rectangle,
                AnnotationTool::Circle,
                AnnotationTool::Stamp,
            ]),
            x in 0.0f64..2000.0,
            y in 0.0f64..2000.0,
        ) {
            let mut state = AnnotationState::new();
            let armed = state.apply(SessionEvent::SelectTool(tool));
            let clicked = state.apply(SessionEvent::SurfaceClicked(SurfacePoint::new(x, y)));

            prop_assert_eq!(armed, None);
            prop_assert_eq!(clicked, None);
            prop_assert_eq!(state.active_tool(), Some(tool));
            prop_assert!(!state.text_dialog.visible);
            prop_assert!(!state.signature_dialog.visible);
        }
    }
}
