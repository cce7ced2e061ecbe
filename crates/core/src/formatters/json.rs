use crate::Result;
use crate::block::Block;
use crate::richtext::project_document;
use serde::Serialize;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// Serialize any output value (draft, blocks, document, title layout)
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    if pretty { Ok(serde_json::to_string_pretty(value)?) } else { Ok(serde_json::to_string(value)?) }
}

/// Project blocks and serialize the resulting rich-text document
pub fn richtext_to_json(blocks: &[Block], pretty: bool) -> Result<String> {
    to_json(&project_document(blocks), pretty)
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn format<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        to_json(value, self.config.pretty)
    }

    pub fn richtext(&self, blocks: &[Block]) -> Result<String> {
        richtext_to_json(blocks, self.config.pretty)
    }
}
