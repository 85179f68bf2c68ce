mod comments;
mod lower;
mod position;
mod scope;

use lower::Lowering;
use position::LineIndex;
use rubyscope_core::error::{Result, RubyscopeError};
use rubyscope_core::plugin::{ParseResult, SourceParser};
use tracing::{debug, warn};
use tree_sitter::Parser;

/// Parses Ruby with tree-sitter and lowers the result into a core syntax tree.
#[derive(Clone)]
pub struct RubyParser {
    language: tree_sitter::Language,
}

impl RubyParser {
    pub fn new() -> Result<Self> {
        let language: tree_sitter::Language = tree_sitter_ruby::LANGUAGE.into();
        Parser::new()
            .set_language(&language)
            .map_err(|e| RubyscopeError::Parsing(e.to_string()))?;
        Ok(Self { language })
    }
}

impl SourceParser for RubyParser {
    fn parse(&self, text: &str, uri: &str) -> ParseResult {
        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&self.language) {
            warn!(%uri, "cannot load Ruby grammar: {}", e);
            return ParseResult::failure();
        }
        let Some(tree) = parser.parse(text, None) else {
            return ParseResult::failure();
        };
        let root = tree.root_node();
        if root.has_error() {
            debug!(%uri, "syntax errors in document");
            return ParseResult::failure();
        }

        let lines = LineIndex::new(text);
        let (syntax_tree, documentable) = Lowering::new(text, &lines).lower_program(root);
        let comment_lines = comments::comment_lines(root, text, &lines);
        let comments = comments::associate(&documentable, &comment_lines);
        ParseResult::success(syntax_tree, comments)
    }
}
