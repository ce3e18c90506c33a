//! # Source Buffer
//!
//! The text of the document being rearranged, held in a `yrs` text type so
//! that positions can be tracked as sticky indices. A sticky index is bound
//! to a character rather than an offset, so it keeps pointing at the same
//! place while text before it is removed or inserted.
//!
//! Offsets are UTF-8 byte offsets throughout, matching the parser's spans.
//! The `yrs` document counts in UTF-16 units, the unit its sticky indices
//! are anchored in, so every offset is converted at the `yrs` boundary.
//!
//! ## Lifecycle
//!
//! ```text
//! load/from_source → track → remove/insert → resolve → release → save
//! ```

use crate::host::{Bias, Marker, PositionTracker, TextEdit};
use crate::EditorError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use yrs::{
    Assoc, Doc, GetString, IndexedSequence, OffsetKind, Options, StickyIndex, Text, TextRef,
    Transact,
};

/// Editable document text with position tracking
pub struct SourceBuffer {
    doc: Doc,
    text: TextRef,

    /// Live markers by id
    markers: HashMap<u64, StickyIndex>,
    next_marker: u64,

    /// Source file, if the buffer is file-backed
    path: Option<PathBuf>,

    /// Increments on every edit
    version: u64,
    dirty: bool,
}

impl SourceBuffer {
    /// Create an in-memory buffer
    pub fn from_source(source: &str) -> Self {
        let doc = Doc::with_options(Options {
            offset_kind: OffsetKind::Utf16,
            ..Options::default()
        });
        let text = doc.get_or_insert_text("content");
        if !source.is_empty() {
            let mut txn = doc.transact_mut();
            text.insert(&mut txn, 0, source);
        }

        Self {
            doc,
            text,
            markers: HashMap::new(),
            next_marker: 0,
            path: None,
            version: 0,
            dirty: false,
        }
    }

    /// Load a file-backed buffer
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, EditorError> {
        let path = path.into();
        let source = std::fs::read_to_string(&path)?;
        let mut buffer = Self::from_source(&source);
        buffer.path = Some(path);
        Ok(buffer)
    }

    /// Write the buffer back to its file
    pub fn save(&mut self) -> Result<(), EditorError> {
        let path = self.path.as_ref().ok_or(EditorError::NotFileBacked)?;
        std::fs::write(path, self.get_text())?;
        self.dirty = false;
        Ok(())
    }

    /// Write the buffer to `path` and make it the buffer's file
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), EditorError> {
        self.path = Some(path.into());
        self.save()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current text
    pub fn get_text(&self) -> String {
        let txn = self.doc.transact();
        self.text.get_string(&txn)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether there are edits not yet saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of markers tracked and not yet released
    pub fn live_markers(&self) -> usize {
        self.markers.len()
    }

    fn check_offset(text: &str, offset: usize) -> Result<(), EditorError> {
        if offset > text.len() || !text.is_char_boundary(offset) {
            return Err(EditorError::InvalidOffset {
                offset,
                len: text.len(),
            });
        }
        Ok(())
    }

    fn check_range(text: &str, start: usize, end: usize) -> Result<(), EditorError> {
        Self::check_offset(text, start)?;
        Self::check_offset(text, end)?;
        if start > end {
            return Err(EditorError::InvalidOffset {
                offset: start,
                len: text.len(),
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.version += 1;
        self.dirty = true;
    }
}

/// UTF-16 index of a byte offset that lies on a char boundary
fn utf16_index(text: &str, offset: usize) -> u32 {
    text[..offset].encode_utf16().count() as u32
}

/// Byte offset of a UTF-16 index, or `None` past the end or inside a
/// surrogate pair
fn byte_offset(text: &str, index: u32) -> Option<usize> {
    let index = index as usize;
    let mut units = 0;
    for (offset, ch) in text.char_indices() {
        if units == index {
            return Some(offset);
        }
        if units > index {
            return None;
        }
        units += ch.len_utf16();
    }
    (units == index).then_some(text.len())
}

impl PositionTracker for SourceBuffer {
    fn track(&mut self, offset: usize, bias: Bias) -> Result<Marker, EditorError> {
        let current = self.get_text();
        Self::check_offset(&current, offset)?;

        let assoc = match bias {
            Bias::Before => Assoc::Before,
            Bias::After => Assoc::After,
        };
        let index = utf16_index(&current, offset);
        let sticky = self
            .text
            .sticky_index(&mut self.doc.transact_mut(), index, assoc)
            .ok_or(EditorError::InvalidOffset {
                offset,
                len: current.len(),
            })?;

        let id = self.next_marker;
        self.next_marker += 1;
        self.markers.insert(id, sticky);
        Ok(Marker::new(id))
    }

    fn resolve(&self, marker: &Marker) -> Option<usize> {
        let sticky = self.markers.get(&marker.id())?;
        let txn = self.doc.transact();
        let index = sticky.get_offset(&txn)?.index;
        byte_offset(&self.text.get_string(&txn), index)
    }

    fn release(&mut self, marker: Marker) {
        self.markers.remove(&marker.id());
    }
}

impl TextEdit for SourceBuffer {
    fn len(&self) -> usize {
        self.get_text().len()
    }

    fn slice(&self, start: usize, end: usize) -> Result<String, EditorError> {
        let current = self.get_text();
        Self::check_range(&current, start, end)?;
        Ok(current[start..end].to_string())
    }

    fn remove_range(&mut self, start: usize, end: usize) -> Result<(), EditorError> {
        let current = self.get_text();
        Self::check_range(&current, start, end)?;
        if start == end {
            return Ok(());
        }
        {
            let index = utf16_index(&current, start);
            let len = current[start..end].encode_utf16().count() as u32;
            let mut txn = self.doc.transact_mut();
            self.text.remove_range(&mut txn, index, len);
        }
        self.touch();
        Ok(())
    }

    fn insert(&mut self, offset: usize, text: &str) -> Result<(), EditorError> {
        let current = self.get_text();
        Self::check_offset(&current, offset)?;
        if text.is_empty() {
            return Ok(());
        }
        {
            let index = utf16_index(&current, offset);
            let mut txn = self.doc.transact_mut();
            self.text.insert(&mut txn, index, text);
        }
        self.touch();
        Ok(())
    }
}

impl std::fmt::Debug for SourceBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceBuffer")
            .field("path", &self.path)
            .field("version", &self.version)
            .field("dirty", &self.dirty)
            .field("live_markers", &self.markers.len())
            .finish()
    }
}
