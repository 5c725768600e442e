//! Editor plugin trait and clipboard data.
//!
//! Plugins override a fixed set of editor behaviours. The editor asks its
//! plugins in registration order; the first one with an opinion (or that
//! reports [`PluginAction::Handled`]) wins, otherwise the default runs.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::Editor;
use crate::detect;
use crate::error::Result;
use crate::model::Element;

/// Result of a plugin hook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PluginAction {
    /// Let the next plugin, or the default behaviour, run.
    #[default]
    Continue,

    /// The plugin performed (or deliberately swallowed) the operation.
    Handled,
}

impl PluginAction {
    /// Check if the operation was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, PluginAction::Handled)
    }
}

/// Behaviour overrides for an [`Editor`].
///
/// Every method has a default that expresses no opinion, so a plugin only
/// implements the hooks it cares about.
pub trait EditorPlugin: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether an element flows inline with text.
    fn is_inline(&self, element: &Element) -> Option<bool> {
        let _ = element;
        None
    }

    /// Whether an element's content is opaque to editing.
    fn is_void(&self, element: &Element) -> Option<bool> {
        let _ = element;
        None
    }

    /// Whether a void element still carries text marks.
    fn is_markable_void(&self, element: &Element) -> Option<bool> {
        let _ = element;
        None
    }

    /// Called for pasted or dropped data.
    fn insert_data(&self, editor: &mut Editor, data: &DataTransfer) -> Result<PluginAction> {
        let _ = (editor, data);
        Ok(PluginAction::Continue)
    }

    /// Called on backspace.
    fn delete_backward(&self, editor: &mut Editor) -> Result<PluginAction> {
        let _ = editor;
        Ok(PluginAction::Continue)
    }

    /// Called on forward delete.
    fn delete_forward(&self, editor: &mut Editor) -> Result<PluginAction> {
        let _ = editor;
        Ok(PluginAction::Continue)
    }

    /// Called on enter.
    fn insert_break(&self, editor: &mut Editor) -> Result<PluginAction> {
        let _ = editor;
        Ok(PluginAction::Continue)
    }
}

/// Data pasted or dropped into the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    /// `text/html` payload
    pub html: Option<String>,

    /// `text/plain` payload
    pub text: Option<String>,

    /// Dropped files
    pub files: Vec<DroppedFile>,
}

impl DataTransfer {
    /// Create empty data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain text only.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new().with_text(text)
    }

    /// HTML only.
    pub fn from_html(html: impl Into<String>) -> Self {
        Self::new().with_html(html)
    }

    /// Files only.
    pub fn from_files(files: Vec<DroppedFile>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    /// Set the HTML payload.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Set the plain text payload.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add a file.
    pub fn with_file(mut self, file: DroppedFile) -> Self {
        self.files.push(file);
        self
    }
}

/// A file dropped or pasted into the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    /// File name
    pub name: String,

    /// MIME type, e.g. `image/png`
    pub mime: String,

    /// File contents
    pub data: Vec<u8>,
}

impl DroppedFile {
    /// Create a file from memory.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            data,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            mime: detect::guess_mime(path),
            data,
        })
    }

    /// Check if the file is an image.
    pub fn is_image(&self) -> bool {
        detect::is_image_mime(&self.mime)
    }

    /// Contents as a `data:` URL.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.data))
    }
}
