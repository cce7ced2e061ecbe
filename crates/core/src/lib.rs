pub mod block;
pub mod category;
pub mod config;
pub mod draft;
pub mod error;
pub mod extract;
pub mod formatters;
pub mod input;
pub mod parse;
pub mod richtext;
pub mod segment;
pub mod tagger;
pub mod typography;
pub mod validate;

pub use block::{Block, BlockKind, Link, Segment};
pub use category::{Category, CategoryProfile, CategoryTable, CtaType};
pub use config::{ConfigLoader, ConfigLoaderBuilder};
pub use draft::{AssembledDraft, ArticleDraft, DraftMeta, ReviewGuidance};
pub use draft::{build_draft, clean_title, read_blocks, temp_slug};
pub use error::{BlockportError, Result};
pub use extract::{BodySource, ExtractConfig, ExtractedBody, LinkCardSignal};
pub use extract::{classify_blocks, extract_body, extract_fragment, link_card_signal, placeholder_blocks};
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter};
pub use formatters::{convert_to_text, richtext_to_json, to_json};
pub use input::{parse_source_url, read_file, read_input, read_stdin};
pub use parse::Document;
pub use richtext::{InlineNode, RichTextDocument, TextNode, TopLevelNode, project_document};
pub use segment::extract_segments;
pub use tagger::{MAX_SUGGESTED_TAGS, suggest_tags};
pub use typography::{FontSize, TitleLayout, format_title, layout_title};
pub use validate::{Severity, ValidationIssue, has_errors, validate_draft, validate_file};
