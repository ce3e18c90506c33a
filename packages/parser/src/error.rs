use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unrecognized markup at {pos}")]
    LexerError { pos: usize },

    #[error("Malformed tag at {pos}: {message}")]
    MalformedTag { pos: usize, message: String },

    #[error("End tag </{name}> at {pos} has no matching start tag")]
    UnmatchedEndTag { pos: usize, name: String },
}

impl ParseError {
    pub fn lexer_error(pos: usize) -> Self {
        Self::LexerError { pos }
    }

    pub fn malformed_tag(pos: usize, message: impl Into<String>) -> Self {
        Self::MalformedTag {
            pos,
            message: message.into(),
        }
    }

    pub fn unmatched_end_tag(pos: usize, name: impl Into<String>) -> Self {
        Self::UnmatchedEndTag {
            pos,
            name: name.into(),
        }
    }

    /// Byte offset the error refers to
    pub fn pos(&self) -> usize {
        match self {
            Self::LexerError { pos }
            | Self::MalformedTag { pos, .. }
            | Self::UnmatchedEndTag { pos, .. } => *pos,
        }
    }
}
