//! Tag events emitted by the tokenizer.

use std::fmt;

/// A 1-based location in the source markup.
///
/// `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A structural event in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Open { name: String, position: Position },
    Close { name: String, position: Position },
}

impl TagEvent {
    pub fn name(&self) -> &str {
        match self {
            TagEvent::Open { name, .. } | TagEvent::Close { name, .. } => name,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            TagEvent::Open { position, .. } | TagEvent::Close { position, .. } => *position,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, TagEvent::Open { .. })
    }
}
