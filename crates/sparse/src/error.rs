use core::fmt;

use thiserror::Error;

/// Position of a byte within the logical input stream.
///
/// Offsets count bytes from the start of the first chunk. Lines and columns
/// are 1-based; a `\n` advances the line and resets the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub struct Position {
    /// Byte offset from the start of the stream.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in bytes.
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Position {
    pub(crate) fn advance(&mut self, byte: u8) {
        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The kinds of failure the tokenizer can report.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub enum ErrorKind {
    /// The scratch buffer could not grow.
    #[error("could not allocate memory for the scratch buffer")]
    OutOfMemory,
    /// A structural byte appeared where the grammar forbids it.
    #[error("invalid character {}", fmt_byte(.0))]
    InvalidCharacter(u8),
    /// Input ended while nodes were still open.
    #[error("document is incomplete: {depth} unclosed node(s), innermost opened at {opened_at}")]
    IncompleteDocument {
        /// Nesting depth at end of input.
        depth: usize,
        /// Where the innermost unclosed `{` sits.
        opened_at: Position,
    },
    /// `finish` was called twice, or `feed` was called after `finish`.
    #[error("parser already finished")]
    AlreadyFinished,
    /// The parser reported a fatal error earlier and cannot continue.
    #[error("parser failed earlier and cannot be reused")]
    Poisoned,
}

impl ErrorKind {
    /// Fixed diagnostic text for kinds that have no input span.
    pub(crate) fn message(self) -> &'static str {
        match self {
            ErrorKind::OutOfMemory => "Could not allocate memory for sparse buffer.",
            ErrorKind::IncompleteDocument { .. } => "Document is incomplete.",
            ErrorKind::InvalidCharacter(_) => "Invalid character encountered.",
            ErrorKind::AlreadyFinished => "Parser already finished.",
            ErrorKind::Poisoned => "Parser already failed.",
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn fmt_byte(byte: &u8) -> impl fmt::Display {
    struct Escaped(u8);
    impl fmt::Display for Escaped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "'{}'", self.0.escape_ascii())
        }
    }
    Escaped(*byte)
}

/// A tokenizer failure together with the position it was detected at.
///
/// For [`ErrorKind::InvalidCharacter`] the position is that of the offending
/// byte; for [`ErrorKind::IncompleteDocument`] it is the end of input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at {position}")]
pub struct ParserError {
    kind: ErrorKind,
    position: Position,
}

impl ParserError {
    pub(crate) fn new(kind: ErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Where it went wrong.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Byte offset from the start of the stream.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    /// 1-based line number.
    #[must_use]
    pub fn line(&self) -> usize {
        self.position.line
    }

    /// 1-based column.
    #[must_use]
    pub fn column(&self) -> usize {
        self.position.column
    }
}
