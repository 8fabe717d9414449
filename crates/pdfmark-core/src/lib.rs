//! Annotation UI core for PDFMark
//!
//! Pure state machines for the document shell and the annotation
//! session. Nothing in this crate touches the DOM; the browser app in
//! `apps/pdfmark-web` drives these types from pointer and input events
//! and handles object URLs, dialogs, and the pdf.js render surface.

pub mod document;
pub mod error;
pub mod session;
pub mod tool;

pub use document::{
    DocumentShellState, DocumentSource, DEFAULT_EXPORT_FILENAME, SAMPLE_DOCUMENT_URL,
};
pub use error::ViewerError;
pub use session::{
    AnnotationEvent, AnnotationState, SessionEffect, SessionEvent, SurfacePoint,
};
pub use tool::AnnotationTool;
