//! Keyword-based tag suggestions.

use crate::block::Block;
use crate::category::{Category, CategoryTable};

/// Maximum number of suggested tags.
pub const MAX_SUGGESTED_TAGS: usize = 5;

/// Suggest up to [`MAX_SUGGESTED_TAGS`] tags for `blocks`.
///
/// The blocks' texts are joined with single spaces into one buffer; every
/// keyword of `category` is tested for exact, case-sensitive substring
/// containment. Matches keep keyword-list order. An empty result is valid;
/// callers substitute the category's default tags.
///
/// # Example
///
/// ```rust
/// use blockport_core::{Block, Category, CategoryTable, suggest_tags};
///
/// let blocks = vec![Block::heading2("転職の準備"), Block::paragraph("スキルの棚卸し")];
/// let tags = suggest_tags(&blocks, Category::Career, &CategoryTable::default());
/// assert_eq!(tags, vec!["転職", "スキル"]);
/// ```
pub fn suggest_tags(blocks: &[Block], category: Category, table: &CategoryTable) -> Vec<String> {
    match_keywords(&scan_buffer(blocks), table.keywords(category))
}

/// Tags for a draft: suggestions, or the category defaults when none match.
pub fn tags_or_defaults(blocks: &[Block], category: Category, table: &CategoryTable) -> Vec<String> {
    let tags = suggest_tags(blocks, category, table);
    if tags.is_empty() { table.default_tags(category).to_vec() } else { tags }
}

fn scan_buffer(blocks: &[Block]) -> String {
    blocks.iter().map(Block::text).collect::<Vec<_>>().join(" ")
}

fn match_keywords(buffer: &str, keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|keyword| buffer.contains(keyword.as_str()))
        .take(MAX_SUGGESTED_TAGS)
        .cloned()
        .collect()
}
