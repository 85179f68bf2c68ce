use crate::ast::Node;
use crate::plugin::{ExtractionContext, LanguagePlugin, ParseResult};
use rubyscope_api::models::{Definition, Position};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// One source document: its identity, its text, and a lazily parsed tree.
pub struct Document {
    uri: String,
    text: String,
    plugin: Arc<dyn LanguagePlugin>,
    parsed: OnceLock<ParseResult>,
    definitions: OnceLock<Vec<Definition>>,
}

impl Document {
    pub fn new(uri: impl Into<String>, text: impl Into<String>, plugin: Arc<dyn LanguagePlugin>) -> Self {
        Self {
            uri: uri.into(),
            text: text.into(),
            plugin,
            parsed: OnceLock::new(),
            definitions: OnceLock::new(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// A new version of this document. Nothing is shared with the old tree.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self::new(self.uri.clone(), text, self.plugin.clone())
    }

    fn parse_result(&self) -> &ParseResult {
        self.parsed.get_or_init(|| {
            let result = self.plugin.parser().parse(&self.text, &self.uri);
            if result.failed {
                warn!(uri = %self.uri, "failed to parse document");
            }
            result
        })
    }

    pub fn failed_to_parse(&self) -> bool {
        self.parse_result().failed
    }

    pub fn root_node(&self) -> Option<Node<'_>> {
        self.parse_result().tree.as_ref().map(|tree| tree.root())
    }

    /// The innermost node whose range includes `position`.
    pub fn node_at(&self, position: Position) -> Option<Node<'_>> {
        self.parse_result()
            .tree
            .as_ref()
            .and_then(|tree| tree.node_at(position))
    }

    /// Definitions declared in this document; empty if it failed to parse.
    pub fn definitions(&self) -> &[Definition] {
        self.definitions.get_or_init(|| self.extract_definitions())
    }

    fn extract_definitions(&self) -> Vec<Definition> {
        let result = self.parse_result();
        let Some(tree) = result.tree.as_ref() else {
            return Vec::new();
        };

        let extractor = self.plugin.extractor();
        let ctx = ExtractionContext { uri: &self.uri };
        let root = tree.root();
        let definitions: Vec<Definition> = std::iter::once(root)
            .chain(root.each_descendant(&[]))
            .flat_map(|node| {
                let comment = result.comments.get(&node.id()).map(String::as_str);
                extractor.extract(node, comment, &ctx)
            })
            .collect();

        debug!(uri = %self.uri, count = definitions.len(), "extracted definitions");
        definitions
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("uri", &self.uri)
            .field("language", &self.plugin.name())
            .field("len", &self.text.len())
            .finish()
    }
}
