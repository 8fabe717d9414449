use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    /// The render surface failed to decode the document. Displayed
    /// inline in place of the page content; the session survives.
    #[error("Error loading PDF: {0}")]
    DecodeError(String),

    /// Export or tool actions with no document are no-ops, but callers
    /// that need a hard failure can surface this instead.
    #[error("No document loaded")]
    NoDocumentLoaded,

    /// A tool identifier from the JS boundary did not match the closed
    /// tool set.
    #[error("Unknown annotation tool: {0}")]
    UnknownTool(String),
}
