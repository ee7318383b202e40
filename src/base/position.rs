/// Position tracking for model entities
///
/// Stores the source location (line/column) of parsed values for diagnostics
/// and editor features like hover and go-to-definition.
use super::FileId;

/// A span representing a range in source code (0-indexed for LSP compatibility)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create an empty span at a single position
    pub fn at(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        if position.line < self.start.line || position.line > self.end.line {
            return false;
        }
        if position.line == self.start.line && position.column < self.start.column {
            return false;
        }
        if position.line == self.end.line && position.column > self.end.column {
            return false;
        }
        true
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A span inside a specific model file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: FileId,
    pub span: Span,
}

impl Location {
    pub fn new(file: FileId, span: Span) -> Self {
        Self { file, span }
    }

    /// A zero-width location at the given line/column.
    pub fn point(file: FileId, line: usize, column: usize) -> Self {
        Self {
            file,
            span: Span::at(Position::new(line, column)),
        }
    }

    pub fn start(&self) -> Position {
        self.span.start
    }

    /// Check if a position in the same file falls within this location
    pub fn contains(&self, file: FileId, position: Position) -> bool {
        self.file == file && self.span.contains(position)
    }
}
