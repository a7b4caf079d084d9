//! Document orchestration
//!
//! `DocumentManager` owns the authoritative document text and everything
//! derived from it: the segment model (rebuilt by a full re-parse on every
//! mutation), the dynamic function registry, the file path, and the
//! modified flag. All positions are character offsets.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::dynamics::{evaluate, FunctionRegistry};
use crate::editing::guard;
use crate::models::{SegmentInfo, SegmentMetadata, SegmentModel, TextSegment};
use crate::parse::parse_document;
use crate::utils::{char_len, char_to_byte};

/// File handling failure
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to load {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to save {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no file path set")]
    NoFilePath,
}

/// Owner of one document and its derived state
#[derive(Debug)]
pub struct DocumentManager {
    content: String,
    model: SegmentModel,
    registry: FunctionRegistry,
    file_path: Option<PathBuf>,
    modified: bool,
}

impl DocumentManager {
    /// Empty document with the built-in dynamic functions registered
    pub fn new() -> Self {
        Self::with_registry(FunctionRegistry::with_builtins())
    }

    /// Empty document with a caller-provided registry
    pub fn with_registry(registry: FunctionRegistry) -> Self {
        Self {
            content: String::new(),
            model: SegmentModel::empty(),
            registry,
            file_path: None,
            modified: false,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the document text and re-parse
    ///
    /// Setting the identical text is a no-op: no re-parse, no modified flag.
    pub fn set_content(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.content {
            return;
        }
        self.content = text;
        self.modified = true;
        self.reparse();
    }

    /// Rebuild the model from the current text
    ///
    /// The scanner cannot actually produce a coverage failure; if one ever
    /// appears it is logged and the document degrades to a single implicit
    /// segment rather than poisoning the manager.
    fn reparse(&mut self) {
        self.model = match parse_document(&self.content) {
            Ok(model) => model,
            Err(e) => {
                log::error!("segment parse failed, falling back to flat model: {}", e);
                let total = char_len(&self.content);
                SegmentModel::new(
                    vec![TextSegment::new(
                        self.content.clone(),
                        SegmentMetadata::default(),
                        0,
                        total,
                    )],
                    total,
                )
            }
        };
    }

    pub fn model(&self) -> &SegmentModel {
        &self.model
    }

    pub fn segments(&self) -> &[TextSegment] {
        self.model.segments()
    }

    pub fn segments_info(&self) -> Vec<SegmentInfo> {
        self.model.segments_info()
    }

    pub fn segment_at(&self, position: usize) -> Option<&TextSegment> {
        self.model.segment_at(position)
    }

    pub fn segment_by_id(&self, id: &str) -> Option<&TextSegment> {
        self.model.segment_by_id(id)
    }

    /// Document length in characters
    pub fn document_len(&self) -> usize {
        self.model.document_len()
    }

    pub fn is_position_locked(&self, position: usize) -> bool {
        guard::is_position_locked(&self.model, position)
    }

    pub fn can_edit_at(&self, position: usize) -> bool {
        guard::can_edit_at(&self.model, position)
    }

    pub fn can_insert_at(&self, position: usize) -> bool {
        guard::can_insert_at(&self.model, position)
    }

    pub fn can_delete_range(&self, start: usize, end: usize) -> bool {
        guard::can_delete_range(&self.model, start, end)
    }

    /// Replace one segment's content by id
    ///
    /// Splices over the content span only, leaving the marker (and with it
    /// the metadata) in place, then re-parses. Returns false without
    /// touching the document when the id is unknown or the segment is
    /// locked.
    pub fn update_segment_content(&mut self, id: &str, new_content: &str) -> bool {
        let segment = match self.model.segment_by_id(id) {
            Some(segment) => segment,
            None => {
                log::warn!("update denied: no segment with id {:?}", id);
                return false;
            }
        };
        if segment.metadata.is_locked() {
            log::warn!("update denied: segment {:?} is locked", id);
            return false;
        }

        let byte_start = char_to_byte(&self.content, segment.content_start());
        let byte_end = char_to_byte(&self.content, segment.end_pos);
        self.content.replace_range(byte_start..byte_end, new_content);
        self.modified = true;
        self.reparse();
        true
    }

    /// Displayable content of a segment, never failing
    ///
    /// Dynamic segments evaluate through the registry; other segments pass
    /// their stored content through. Evaluation failures come back as an
    /// `[ERROR: ...]` placeholder so a frontend always has something to
    /// show. The document itself is never modified.
    pub fn evaluate_dynamic_segment(&self, segment: &TextSegment) -> String {
        match evaluate(segment, &self.model, &self.registry) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("dynamic evaluation failed: {}", e);
                format!("[ERROR: {}]", e)
            }
        }
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.registry
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Read a UTF-8 file into the document
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DocumentError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        self.set_content(text);
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        log::info!("loaded {} chars from {:?}", self.document_len(), path);
        Ok(())
    }

    /// Write the document to its recorded file path
    pub fn save_to_file(&mut self) -> Result<(), DocumentError> {
        match self.file_path.clone() {
            Some(path) => self.write_to(&path),
            None => Err(DocumentError::NoFilePath),
        }
    }

    /// Write the document to a new path and record it
    pub fn save_to_file_as(&mut self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        self.write_to(path.as_ref())
    }

    fn write_to(&mut self, path: &Path) -> Result<(), DocumentError> {
        fs::write(path, &self.content).map_err(|source| DocumentError::Save {
            path: path.to_path_buf(),
            source,
        })?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        log::info!("saved {:?}", path);
        Ok(())
    }

    /// Back to a blank document; registered functions survive
    pub fn reset(&mut self) {
        self.content.clear();
        self.model = SegmentModel::empty();
        self.file_path = None;
        self.modified = false;
    }
}

impl Default for DocumentManager {
    fn default() -> Self {
        Self::new()
    }
}
