pub mod extract;
pub mod parser;

use rubyscope_core::error::Result;
use rubyscope_core::plugin::{DefinitionExtractor, LanguagePlugin, SourceParser};
use std::sync::Arc;

pub use extract::RubyExtractor;
pub use parser::RubyParser;

pub struct RubyPlugin {
    parser: Arc<RubyParser>,
    extractor: Arc<RubyExtractor>,
}

impl RubyPlugin {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: Arc::new(RubyParser::new()?),
            extractor: Arc::new(RubyExtractor::new()),
        })
    }
}

impl LanguagePlugin for RubyPlugin {
    fn name(&self) -> &str {
        "ruby"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["rb", "rake", "gemspec", "ru"]
    }

    fn parser(&self) -> Arc<dyn SourceParser> {
        self.parser.clone()
    }

    fn extractor(&self) -> Arc<dyn DefinitionExtractor> {
        self.extractor.clone()
    }
}
