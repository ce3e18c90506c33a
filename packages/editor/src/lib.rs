//! # Rearrange Editor
//!
//! Cut, reorder and paste named sibling elements of a markup document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: markup text → element tree          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor                                      │
//! │  - name properties (doctype → element →     │
//! │    attribute, a PathConfig)                 │
//! │  - extract / arrange / cut / paste engine   │
//! │  - source buffer with sticky positions      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rearrange_editor::{EditSession, FixedAttribute, KeepNames, NameProperties};
//!
//! let mut session = EditSession::load("glossary.sgml", NameProperties::new())?;
//!
//! // Entries are named by their `term` attribute
//! session.set_name_property(entry_offset, &mut FixedAttribute::new("term"))?;
//!
//! // Cut two entries from the list, then paste them elsewhere
//! session.cut_at_cursor(list_offset, &mut KeepNames::new(["beta", "alpha"]))?;
//! session.paste_at_cursor(target_offset)?;
//!
//! session.save()?;
//! ```

mod buffer;
mod cut_stack;
mod engine;
mod errors;
mod host;
mod names;
mod path_config;
mod prompt;
mod record;
mod session;

pub use buffer::SourceBuffer;
pub use cut_stack::{CutBatch, CutStack};
pub use engine::{Arrangement, PasteReport, RearrangeEngine, DEFAULT_SEPARATOR};
pub use errors::EditorError;
pub use host::{Bias, CandidateNode, HostDocument, Marker, PositionTracker, TextEdit};
pub use names::NameProperties;
pub use path_config::{Entries, PathConfig};
pub use prompt::{
    AttributeChooser, FirstAttribute, FixedAttribute, KeepAll, KeepNames, NameArranger, Reverse,
};
pub use record::{NodePosition, NodeRecord};
pub use session::EditSession;

// Re-export common types for convenience
pub use rearrange_parser::ast::{Document as MarkupDocument, Element};
