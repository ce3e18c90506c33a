//! Records of candidate nodes as they move through extract, cut and paste.

use crate::host::{Marker, PositionTracker};

/// Tracked start and end of a node's source text
#[derive(Debug)]
pub struct NodePosition {
    pub start: Marker,
    pub end: Marker,
}

impl NodePosition {
    pub fn release<T: PositionTracker + ?Sized>(self, tracker: &mut T) {
        tracker.release(self.start);
        tracker.release(self.end);
    }
}

/// A named candidate node.
///
/// `position` is set from extraction until the node is cut or released;
/// `text` is filled in when the node is cut.
#[derive(Debug)]
pub struct NodeRecord {
    pub name: String,
    pub position: Option<NodePosition>,
    pub text: Option<String>,
}

impl NodeRecord {
    pub fn new(name: impl Into<String>, position: NodePosition) -> Self {
        Self {
            name: name.into(),
            position: Some(position),
            text: None,
        }
    }

    /// Record holding captured text and no position
    pub fn captured(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
            text: Some(text.into()),
        }
    }

    /// Release the record's markers, if it still has them
    pub fn release<T: PositionTracker + ?Sized>(&mut self, tracker: &mut T) {
        if let Some(position) = self.position.take() {
            position.release(tracker);
        }
    }
}
