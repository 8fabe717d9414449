//! The closed set of annotation tools shown in the toolbar

use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// An annotation tool that can be armed from the toolbar.
///
/// Only `Text` and `Signature` carry behavior beyond toggling which
/// button is active; the rest are visual state until a real annotation
/// backend exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationTool {
    Highlight,
    Underline,
    Draw,
    Text,
    Rectangle,
    Circle,
    Signature,
    Stamp,
}

impl AnnotationTool {
    /// All tools, in toolbar order.
    pub const ALL: [AnnotationTool; 8] = [
        AnnotationTool::Highlight,
        AnnotationTool::Underline,
        AnnotationTool::Draw,
        AnnotationTool::Text,
        AnnotationTool::Rectangle,
        AnnotationTool::Circle,
        AnnotationTool::Signature,
        AnnotationTool::Stamp,
    ];

    /// Stable string identifier used across the JS boundary.
    pub fn id(&self) -> &'static str {
        match self {
            AnnotationTool::Highlight => "highlight",
            AnnotationTool::Underline => "underline",
            AnnotationTool::Draw => "draw",
            AnnotationTool::Text => "text",
            AnnotationTool::Rectangle => "rectangle",
            AnnotationTool::Circle => "circle",
            AnnotationTool::Signature => "signature",
            AnnotationTool::Stamp => "stamp",
        }
    }

    /// Human-readable label for the toolbar button.
    pub fn label(&self) -> &'static str {
        match self {
            AnnotationTool::Highlight => "Highlight",
            AnnotationTool::Underline => "Underline",
            AnnotationTool::Draw => "Draw",
            AnnotationTool::Text => "Add Text",
            AnnotationTool::Rectangle => "Rectangle",
            AnnotationTool::Circle => "Circle",
            AnnotationTool::Signature => "Signature",
            AnnotationTool::Stamp => "Stamp",
        }
    }

    /// Parse a string identifier coming from the toolbar.
    pub fn from_id(id: &str) -> Result<AnnotationTool, ViewerError> {
        Self::ALL
            .iter()
            .copied()
            .find(|tool| tool.id() == id)
            .ok_or_else(|| ViewerError::UnknownTool(id.to_string()))
    }
}
