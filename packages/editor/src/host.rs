//! # Host Capabilities
//!
//! The seams between the rearrange engine and the document it edits:
//!
//! - [`PositionTracker`]: edit-surviving positions ([`Marker`]s)
//! - [`TextEdit`]: raw text reads, removals and insertions
//! - [`CandidateNode`]: the parts of a tree node the engine reads
//!
//! [`crate::SourceBuffer`] implements the first two; the parser's
//! `Element` implements the third.

use crate::EditorError;
use rearrange_parser::ast::Element;

/// Handle to a tracked document position.
///
/// Markers are minted by a [`PositionTracker`] and handed back to it through
/// [`PositionTracker::release`], which consumes them. They cannot be cloned,
/// so a marker is released at most once.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "markers must be released through their PositionTracker"]
pub struct Marker(u64);

impl Marker {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Which neighbouring character a marker sticks to when text is inserted
/// exactly at its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    /// Stick to the character before the position (end of a span)
    Before,
    /// Stick to the character after the position (start of a span)
    After,
}

/// Positions that stay valid across edits until released
pub trait PositionTracker {
    /// Start tracking byte offset `offset`
    fn track(&mut self, offset: usize, bias: Bias) -> Result<Marker, EditorError>;

    /// Current byte offset of a marker, or `None` if it can no longer be resolved
    fn resolve(&self, marker: &Marker) -> Option<usize>;

    /// Stop tracking a marker
    fn release(&mut self, marker: Marker);
}

/// Raw text access by byte offsets
pub trait TextEdit {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text in `start..end`
    fn slice(&self, start: usize, end: usize) -> Result<String, EditorError>;

    fn remove_range(&mut self, start: usize, end: usize) -> Result<(), EditorError>;

    fn insert(&mut self, offset: usize, text: &str) -> Result<(), EditorError>;
}

/// A document that can both edit text and track positions
pub trait HostDocument: PositionTracker + TextEdit {}

impl<T: PositionTracker + TextEdit> HostDocument for T {}

/// Tree node as seen by candidate extraction
pub trait CandidateNode {
    fn element_type(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;

    /// Byte range `(start, end)` of the node's source text
    fn text_span(&self) -> (usize, usize);
}

impl CandidateNode for Element {
    fn element_type(&self) -> &str {
        &self.name
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        Element::attribute(self, name)
    }

    fn text_span(&self) -> (usize, usize) {
        (self.span.start, self.span.end)
    }
}
