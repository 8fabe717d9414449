//! WASM bindings for the PDFMark annotation UI
//!
//! This module provides a stateful API for the browser frontend. All UI
//! state is held in Rust; JavaScript only routes DOM events and hosts
//! the pdf.js render surface behind `www/js/viewer-bridge.js`.
//!
//! ## Architecture
//!
//! - `DocumentShell`: which document is loaded, object URL lifecycle,
//!   passthrough export
//! - `AnnotationSession`: tool palette, text and signature dialogs,
//!   annotation sink delivery
//! - `RenderSurface`: mounts pdf.js through the JS bridge, shows decode
//!   errors inline, renders the highlight overlay
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { DocumentShell, AnnotationSession, RenderSurface } from './pkg/pdfmark_wasm.js';
//!
//! await init();
//!
//! const shell = new DocumentShell();
//! const url = shell.selectLocalFile(file.name, bytes);
//!
//! const surface = new RenderSurface(container);
//! await surface.mount(url, RenderSurface.defaultOptions());
//!
//! const session = new AnnotationSession();
//! session.setAnnotationSink((event) => console.log(event));
//! session.selectTool("text");
//! container.onclick = (e) => session.surfaceClicked(e, container);
//! ```

pub mod session;
pub mod shell;
pub mod viewer;

use wasm_bindgen::prelude::*;

// Re-export main types for JavaScript
pub use session::AnnotationSession;
pub use shell::DocumentShell;
pub use viewer::{RenderSurface, ViewerOptions};

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
