//! Editor core facade
//!
//! The toolkit-agnostic layer a frontend drives: view mode, display
//! content, grid state, change observers, and file operations. Wraps a
//! `DocumentManager` and stays free of any GUI types, so desktop and
//! embedded hosts share the same behavior.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::xml::validate_xml;
use crate::document::{DocumentError, DocumentManager};

/// How the document is presented
///
/// Styled hides segment markers and shows evaluated dynamic content;
/// Source shows the raw text, markers and all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    Styled,
    Source,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Styled
    }
}

type ModeCallback = Box<dyn Fn(ViewMode)>;
type GridCallback = Box<dyn Fn(bool)>;

/// Facade over one open document plus presentation state
pub struct EditorCore {
    document: DocumentManager,
    view_mode: ViewMode,
    grid_visible: bool,
    mode_callbacks: Vec<ModeCallback>,
    grid_callbacks: Vec<GridCallback>,
}

impl EditorCore {
    pub fn new() -> Self {
        Self {
            document: DocumentManager::new(),
            view_mode: ViewMode::Styled,
            grid_visible: false,
            mode_callbacks: Vec::new(),
            grid_callbacks: Vec::new(),
        }
    }

    pub fn document(&self) -> &DocumentManager {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut DocumentManager {
        &mut self.document
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switch the view mode, notifying observers on an actual change
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if mode == self.view_mode {
            return;
        }
        self.view_mode = mode;
        for callback in &self.mode_callbacks {
            callback(mode);
        }
    }

    /// Whether the buffer may be shown styled: blank or well-formed XML
    pub fn can_switch_to_styled(&self) -> (bool, Option<String>) {
        let (ok, err) = validate_xml(self.document.content());
        if ok {
            (true, None)
        } else {
            (false, err.map(|e| format!("Invalid XML: {}", e)))
        }
    }

    /// Text to render for the current view mode
    ///
    /// Source mode is the raw buffer. Styled mode concatenates each
    /// segment's displayable content: markers disappear and dynamic
    /// segments show their evaluated value (or an error placeholder).
    pub fn display_content(&self) -> String {
        match self.view_mode {
            ViewMode::Source => self.document.content().to_string(),
            ViewMode::Styled => {
                let mut out = String::new();
                for segment in self.document.segments() {
                    out.push_str(&self.document.evaluate_dynamic_segment(segment));
                }
                out
            }
        }
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    /// Flip the grid overlay, returning the new state
    pub fn toggle_grid(&mut self) -> bool {
        self.grid_visible = !self.grid_visible;
        for callback in &self.grid_callbacks {
            callback(self.grid_visible);
        }
        self.grid_visible
    }

    /// Observe view mode changes
    pub fn on_mode_change(&mut self, callback: impl Fn(ViewMode) + 'static) {
        self.mode_callbacks.push(Box::new(callback));
    }

    /// Observe grid visibility changes
    pub fn on_grid_change(&mut self, callback: impl Fn(bool) + 'static) {
        self.grid_callbacks.push(Box::new(callback));
    }

    /// Blank document; registered dynamic functions survive
    pub fn new_document(&mut self) {
        self.document.reset();
    }

    pub fn open_file(&mut self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        self.document.load_from_file(path)
    }

    pub fn save_file(&mut self) -> Result<(), DocumentError> {
        self.document.save_to_file()
    }

    pub fn save_file_as(&mut self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        self.document.save_to_file_as(path)
    }

    /// Segment projection serialized for non-Rust hosts
    pub fn segments_info_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.document.segments_info())
    }
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EditorCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorCore")
            .field("document", &self.document)
            .field("view_mode", &self.view_mode)
            .field("grid_visible", &self.grid_visible)
            .field("mode_callbacks", &self.mode_callbacks.len())
            .field("grid_callbacks", &self.grid_callbacks.len())
            .finish()
    }
}
