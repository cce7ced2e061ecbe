pub mod json;
pub mod text;

pub use json::{JsonConfig, JsonFormatter, richtext_to_json, to_json};
pub use text::{TextConfig, TextFormatter, convert_to_text};
