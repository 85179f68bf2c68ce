use rubyscope_api::models::{Position, Range};

/// Converts tree-sitter byte offsets into 1-origin lines and character columns.
pub struct LineIndex<'s> {
    source: &'s str,
    line_starts: Vec<usize>,
}

impl<'s> LineIndex<'s> {
    pub fn new(source: &'s str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    pub fn position(&self, row: usize, byte: usize) -> Position {
        let line_start = self.line_starts.get(row).copied().unwrap_or(0);
        let column = self
            .source
            .get(line_start..byte)
            .map(|prefix| prefix.chars().count())
            .unwrap_or_else(|| byte.saturating_sub(line_start));
        Position::from_zero_based(row as u32, column as u32)
    }

    pub fn range(&self, node: &tree_sitter::Node<'_>) -> Range {
        Range::new(
            self.position(node.start_position().row, node.start_byte()),
            self.position(node.end_position().row, node.end_byte()),
        )
    }

    /// True if only whitespace precedes `byte` on its line.
    pub fn starts_line(&self, row: usize, byte: usize) -> bool {
        let line_start = self.line_starts.get(row).copied().unwrap_or(0);
        self.source
            .get(line_start..byte)
            .is_some_and(|prefix| prefix.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_count_characters() {
        let index = LineIndex::new("a = 1\né = \"ü\"\n");
        let umlaut = "a = 1\né = \"".len();
        assert_eq!(index.position(1, umlaut), Position::new(2, 5));
        assert_eq!(index.position(0, 4), Position::new(1, 4));
    }

    #[test]
    fn test_starts_line() {
        let index = LineIndex::new("x = 1 # trailing\n  # own line\n");
        assert!(!index.starts_line(0, 6));
        assert!(index.starts_line(1, "x = 1 # trailing\n  ".len()));
    }
}
