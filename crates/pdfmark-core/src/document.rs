//! Document shell state: which document is loaded and how to export it
//!
//! The shell never reads or mutates document bytes. Local files are
//! represented by an ephemeral object URL created by the browser layer;
//! this module tracks which URL is live so it gets revoked exactly once
//! when superseded or disposed.

use serde::{Deserialize, Serialize};

/// Sample document offered on the upload prompt.
pub const SAMPLE_DOCUMENT_URL: &str =
    "https://mozilla.github.io/pdf.js/web/compressed.tracemonkey-pldi-09.pdf";

/// Export filename used when the original name is unknown.
pub const DEFAULT_EXPORT_FILENAME: &str = "signed-document.pdf";

/// The currently loaded document source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DocumentSource {
    /// A user-selected file, reachable through an ephemeral object URL.
    LocalFile { filename: String, object_url: String },
    /// A remote document fetched by the render surface.
    RemoteUrl { url: String },
}

/// State owned by the document shell. At most one source is active; no
/// source means the upload prompt is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentShellState {
    source: Option<DocumentSource>,
}

impl DocumentShellState {
    /// Shell state before any selection: upload prompt visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current source with a user-selected file. Returns
    /// the object URL of the superseded local file, if any, which the
    /// caller must revoke.
    #[must_use = "the superseded object URL must be revoked"]
    pub fn select_local_file(&mut self, filename: String, object_url: String) -> Option<String> {
        let stale = self.take_object_url();
        self.source = Some(DocumentSource::LocalFile {
            filename,
            object_url,
        });
        stale
    }

    /// Replace the current source with the fixed sample document.
    /// Returns the object URL of the superseded local file, if any.
    #[must_use = "the superseded object URL must be revoked"]
    pub fn select_sample(&mut self) -> Option<String> {
        let stale = self.take_object_url();
        self.source = Some(DocumentSource::RemoteUrl {
            url: SAMPLE_DOCUMENT_URL.to_string(),
        });
        stale
    }

    /// Drop the current source on teardown. Returns the object URL to
    /// revoke, if a local file was loaded.
    #[must_use = "the released object URL must be revoked"]
    pub fn clear(&mut self) -> Option<String> {
        let stale = self.take_object_url();
        self.source = None;
        stale
    }

    /// Whether the upload prompt is shown instead of the viewer.
    pub fn shows_upload_prompt(&self) -> bool {
        self.source.is_none()
    }

    pub fn source(&self) -> Option<&DocumentSource> {
        self.source.as_ref()
    }

    /// The URL the render surface should load, if a document is active.
    pub fn file_url(&self) -> Option<&str> {
        match &self.source {
            Some(DocumentSource::LocalFile { object_url, .. }) => Some(object_url),
            Some(DocumentSource::RemoteUrl { url }) => Some(url),
            None => None,
        }
    }

    /// Filename for the passthrough export: the original name when
    /// known, the default otherwise. `None` when there is nothing to
    /// export (the export action is then a no-op).
    pub fn export_filename(&self) -> Option<&str> {
        match &self.source {
            Some(DocumentSource::LocalFile { filename, .. }) if !filename.is_empty() => {
                Some(filename)
            }
            Some(_) => Some(DEFAULT_EXPORT_FILENAME),
            None => None,
        }
    }

    fn take_object_url(&mut self) -> Option<String> {
        match self.source.take() {
            Some(DocumentSource::LocalFile { object_url, .. }) => Some(object_url),
            _ => None,
        }
    }
}
