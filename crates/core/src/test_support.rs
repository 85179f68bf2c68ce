//! A scripted language plugin for unit tests.
//!
//! The "parser" keeps the whole text as a string leaf on a single `begin`
//! node, and the "extractor" answers with whatever definitions were scripted
//! for that exact text. Definitions without a location are stamped with the
//! document URI, the way a real extractor would.

use crate::ast::{Leaf, Node, NodeKind, TreeBuilder};
use crate::plugin::{
    CommentAssociations, DefinitionExtractor, ExtractionContext, LanguagePlugin, ParseResult,
    SourceParser,
};
use rubyscope_api::models::{Definition, Location, Position, Range};
use std::collections::HashMap;
use std::sync::Arc;

pub const BROKEN_SOURCE: &str = "<<broken>>";

#[derive(Default)]
pub struct ScriptedPlugin {
    scripts: HashMap<String, Vec<Definition>>,
}

impl ScriptedPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, text: &str, definitions: Vec<Definition>) -> Self {
        self.scripts.insert(text.to_string(), definitions);
        self
    }

    pub fn into_arc(self) -> Arc<dyn LanguagePlugin> {
        Arc::new(ScriptedLanguage {
            extractor: Arc::new(ScriptedExtractor {
                scripts: self.scripts,
            }),
        })
    }
}

struct ScriptedLanguage {
    extractor: Arc<ScriptedExtractor>,
}

impl LanguagePlugin for ScriptedLanguage {
    fn name(&self) -> &str {
        "scripted"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["rb"]
    }

    fn parser(&self) -> Arc<dyn SourceParser> {
        Arc::new(ScriptedParser)
    }

    fn extractor(&self) -> Arc<dyn DefinitionExtractor> {
        self.extractor.clone()
    }
}

struct ScriptedParser;

impl SourceParser for ScriptedParser {
    fn parse(&self, text: &str, _uri: &str) -> ParseResult {
        if text == BROKEN_SOURCE {
            return ParseResult::failure();
        }
        let mut builder = TreeBuilder::new();
        let range = Range::new(Position::new(1, 0), Position::new(1, text.chars().count() as u32));
        let root = builder.node(
            NodeKind::Begin,
            vec![Leaf::Str(text.to_string()).into()],
            Some(range),
        );
        ParseResult::success(builder.finish(root), CommentAssociations::new())
    }
}

struct ScriptedExtractor {
    scripts: HashMap<String, Vec<Definition>>,
}

impl DefinitionExtractor for ScriptedExtractor {
    fn extract(
        &self,
        node: Node<'_>,
        _doc_comment: Option<&str>,
        ctx: &ExtractionContext<'_>,
    ) -> Vec<Definition> {
        let Some(text) = node.leaf(0).and_then(Leaf::as_str) else {
            return Vec::new();
        };
        let range = node
            .location()
            .unwrap_or(Range::new(Position::new(1, 0), Position::new(1, 0)));
        let location = Location::new(ctx.uri, range);
        self.scripts
            .get(text)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|definition| stamp(definition, &location))
            .collect()
    }
}

fn stamp(mut definition: Definition, location: &Location) -> Definition {
    match &mut definition {
        Definition::Method(m) if m.location.is_none() => m.location = Some(location.clone()),
        Definition::Method(_) => {}
        Definition::Constant(c) => {
            c.location.get_or_insert_with(|| location.clone());
        }
        Definition::Module(m) => {
            m.constant.location.get_or_insert_with(|| location.clone());
        }
        Definition::Class(c) => {
            c.module.constant.location.get_or_insert_with(|| location.clone());
        }
    }
    definition
}
