//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Nothing to paste: the cut history is empty")]
    EmptyHistory,

    #[error("Parse error: {0}")]
    Parse(#[from] rearrange_parser::ParseError),

    #[error("No element encloses offset {0}")]
    NoEnclosingElement(usize),

    #[error("Cannot determine the document type")]
    NoDocumentType,

    #[error("Offset {offset} is not a valid position in a {len}-byte document")]
    InvalidOffset { offset: usize, len: usize },

    #[error("Position of node '{0}' was lost")]
    PositionLost(String),

    #[error("Paste target {0} lies inside a node being cut")]
    TargetInsideCut(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Document is not file-backed")]
    NotFileBacked,
}
