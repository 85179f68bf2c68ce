//! Interfaces to the language-specific collaborators: the parser that builds
//! a [`SyntaxTree`] and the extractor that turns nodes into definitions.

use crate::ast::{Node, NodeId, SyntaxTree};
use rubyscope_api::models::Definition;
use std::collections::HashMap;
use std::sync::Arc;

/// Documentation comments attached by the parser, keyed by the node they precede.
pub type CommentAssociations = HashMap<NodeId, String>;

/// Output of a parse. A failed parse is a value, never an error.
#[derive(Debug)]
pub struct ParseResult {
    /// Absent whenever `failed` is set.
    pub tree: Option<SyntaxTree>,
    pub failed: bool,
    pub comments: CommentAssociations,
}

impl ParseResult {
    pub fn success(tree: SyntaxTree, comments: CommentAssociations) -> Self {
        Self {
            tree: Some(tree),
            failed: false,
            comments,
        }
    }

    pub fn failure() -> Self {
        Self {
            tree: None,
            failed: true,
            comments: CommentAssociations::new(),
        }
    }
}

pub trait SourceParser: Send + Sync {
    /// Must not panic on invalid input; report it through [`ParseResult::failed`].
    fn parse(&self, text: &str, uri: &str) -> ParseResult;
}

/// State threaded through one extraction walk.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionContext<'a> {
    /// URI recorded in the location of every extracted definition.
    pub uri: &'a str,
}

pub trait DefinitionExtractor: Send + Sync {
    /// Definitions declared by `node` alone (not its descendants).
    ///
    /// Unrecognized nodes yield nothing. Constant references are reported as
    /// unqualified names; resolving them is the store's job.
    fn extract(
        &self,
        node: Node<'_>,
        doc_comment: Option<&str>,
        ctx: &ExtractionContext<'_>,
    ) -> Vec<Definition>;
}

pub trait LanguagePlugin: Send + Sync {
    fn name(&self) -> &str;

    fn supported_extensions(&self) -> &[&str];

    fn parser(&self) -> Arc<dyn SourceParser>;

    fn extractor(&self) -> Arc<dyn DefinitionExtractor>;

    fn supports_path(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.supported_extensions().contains(&ext))
    }
}
