use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in a source document.
///
/// `line` is 1-origin and `column` is 0-origin, counted in characters.
/// Ordering is by line, then column.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema,
)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Build a position from 0-origin line/character coordinates (editor protocol style).
    pub fn from_zero_based(line: u32, character: u32) -> Self {
        Self {
            line: line + 1,
            column: character,
        }
    }

    /// The 0-origin line of this position, as editor protocols expect it.
    pub fn zero_based_line(&self) -> u32 {
        self.line.saturating_sub(1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open span `[begin, end)` in a source document.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub struct Range {
    pub begin: Position,
    pub end: Position,
}

impl Range {
    pub fn new(begin: Position, end: Position) -> Self {
        Self { begin, end }
    }

    /// True if `other` lies entirely within this range.
    pub fn contains(&self, other: &Range) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// True if `point` lies within this range. The end position itself is excluded.
    pub fn includes(&self, point: Position) -> bool {
        self.begin <= point && point < self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.begin, self.end)
    }
}

/// Where a definition was declared.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct Location {
    pub range: Range,
    pub uri: String,
}

impl Location {
    pub fn new(uri: impl Into<String>, range: Range) -> Self {
        Self {
            range,
            uri: uri.into(),
        }
    }
}
