//! Article draft assembly.
//!
//! Wraps the extracted body with the metadata a reviewer completes before
//! publishing: title, temporary slug, marked excerpt and description, default
//! call-to-action and suggested tags. Fields that need human attention are
//! prefixed with [`REVIEW_MARKER`] and listed in `_meta.needsReview`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;
use url::Url;

use crate::block::{Block, BlockKind};
use crate::category::{Category, CategoryTable, CtaType};
use crate::extract::{BodySource, ExtractConfig, extract_body};
use crate::parse::Document;
use crate::tagger::tags_or_defaults;
use crate::{BlockportError, Result};

/// Title used when the page exposes none.
pub const UNTITLED: &str = "無題の記事";

/// Prefix of generated values a reviewer must rewrite.
pub const REVIEW_MARKER: &str = "[要設定] ";

/// Prefix of slugs that still need a real value.
pub const SLUG_REVIEW_PREFIX: &str = "NEEDS-REVIEW-";

pub const EXCERPT_SOURCE_CHARS: usize = 200;
pub const DESCRIPTION_SOURCE_CHARS: usize = 120;
pub const OGP_TEXT_CHARS: usize = 80;

/// Origin recorded in `_meta.source`.
pub const DRAFT_SOURCE: &str = "note";

/// Draft fields a reviewer has to rewrite.
pub const NEEDS_REVIEW: [&str; 4] = ["slug", "excerpt", "metaDescription", "tags"];

static SITE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[｜|].+$").unwrap());

static EMOJI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{1F300}-\x{1F9FF}\x{2600}-\x{26FF}\x{2700}-\x{27BF}]").unwrap());

static NOTE_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/n/([a-zA-Z0-9]+)").unwrap());

/// A reviewable article draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    pub title: String,
    pub slug: String,
    pub category: Category,
    pub excerpt: String,
    pub body: Vec<Block>,
    pub meta_description: String,
    pub ogp_text: String,
    pub cta_type: CtaType,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(rename = "_meta")]
    pub meta: DraftMeta,
}

/// A draft together with where its body came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledDraft {
    pub draft: ArticleDraft,
    /// Which container produced the body, or the placeholder
    pub body_source: BodySource,
}

/// Provenance and review notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftMeta {
    /// RFC 3339 timestamp of extraction
    pub fetched_at: String,
    pub source: String,
    pub needs_review: Vec<String>,
    pub review_guidance: ReviewGuidance,
}

/// What a reviewer should put in each generated field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewGuidance {
    pub slug: String,
    pub excerpt: String,
    pub meta_description: String,
    pub tags: String,
}

impl Default for ReviewGuidance {
    fn default() -> Self {
        Self {
            slug: "記事内容を表す英語スラッグを設定（例: brighty-logo-design-concept）".to_string(),
            excerpt: "読者の興味を引く200文字以内の要約。ベネフィットを明示".to_string(),
            meta_description: "検索キーワードを含む160文字以内のSEO説明文".to_string(),
            tags: "検索されやすいキーワード3-6個".to_string(),
        }
    }
}

/// Strip the site-name suffix and emoji from a page title.
///
/// Everything from the first `｜` or `|` that is followed by more text is
/// dropped, then emoji in the pictograph, symbol and dingbat ranges are
/// removed and the result is trimmed.
///
/// ```rust
/// use blockport_core::draft::clean_title;
///
/// assert_eq!(clean_title("✨ 習慣化のコツ｜Brighty"), "習慣化のコツ");
/// ```
pub fn clean_title(raw: &str) -> String {
    let without_suffix = SITE_SUFFIX_RE.replace(raw, "");
    EMOJI_RE.replace_all(without_suffix.trim(), "").trim().to_string()
}

/// The page title: `og:title`, else the first `h1`, else [`UNTITLED`], cleaned.
pub fn source_title(doc: &Document) -> Result<String> {
    let raw = match doc.meta_content("og:title") {
        Some(title) => title,
        None => doc
            .select_first("h1")?
            .map(|h1| h1.trimmed_text())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string()),
    };
    Ok(clean_title(&raw))
}

/// Placeholder slug derived from the source post id, or the timestamp when
/// the URL carries none.
pub fn temp_slug(source_url: Option<&Url>, now: OffsetDateTime) -> String {
    let id = source_url
        .and_then(|url| NOTE_ID_RE.captures(url.path()))
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .unwrap_or_else(|| (now.unix_timestamp_nanos() / 1_000_000).to_string());
    format!("{SLUG_REVIEW_PREFIX}{id}")
}

/// Assemble a draft from a parsed page
///
/// # Errors
///
/// Fails only on an invalid configured selector or if `fetched_at` cannot be
/// rendered as RFC 3339.
pub fn build_draft(
    doc: &Document, source_url: Option<&Url>, category: Category, categories: &CategoryTable,
    config: &ExtractConfig, fetched_at: OffsetDateTime,
) -> Result<AssembledDraft> {
    let title = source_title(doc)?;
    let extracted = extract_body(doc, config)?;
    let body = extracted.blocks;

    let first_paragraph = body.iter().find(|block| block.kind() == BlockKind::Paragraph);
    let excerpt_source = first_paragraph.map(|block| take_chars(block.text(), EXCERPT_SOURCE_CHARS));

    let description = doc
        .meta_content("og:description")
        .or_else(|| doc.meta_content("description"))
        .unwrap_or_default();

    let cta_type = categories.get(category).map_or(CtaType::FindCoach, |profile| profile.default_cta);
    let tags = tags_or_defaults(&body, category, categories);

    let ogp_text = take_chars(&title, OGP_TEXT_CHARS);

    let draft = ArticleDraft {
        title,
        slug: temp_slug(source_url, fetched_at),
        category,
        excerpt: format!("{REVIEW_MARKER}{}", excerpt_source.unwrap_or_default()),
        body,
        meta_description: format!("{REVIEW_MARKER}{}", take_chars(&description, DESCRIPTION_SOURCE_CHARS)),
        ogp_text,
        cta_type,
        tags,
        source_url: source_url.map(Url::to_string),
        meta: DraftMeta {
            fetched_at: fetched_at.format(&Rfc3339)?,
            source: DRAFT_SOURCE.to_string(),
            needs_review: NEEDS_REVIEW.iter().map(|s| s.to_string()).collect(),
            review_guidance: ReviewGuidance::default(),
        },
    };

    info!(
        title = %draft.title,
        category = %category,
        blocks = draft.body.len(),
        body_source = ?extracted.source,
        tags = draft.tags.len(),
        "assembled draft"
    );

    Ok(AssembledDraft { draft, body_source: extracted.source })
}

/// Read a block sequence from JSON: either a draft object's `body` or a bare array.
///
/// Every block is checked against the block model invariants.
pub fn read_blocks(json: &str) -> Result<Vec<Block>> {
    let value: Value = serde_json::from_str(json)?;
    blocks_from_value(value)
}

/// Like [`read_blocks`], for an already parsed JSON value.
pub fn blocks_from_value(value: Value) -> Result<Vec<Block>> {
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(mut map) => match map.remove("body") {
            Some(body) => Ok(serde_json::from_value(body)?),
            None => Err(BlockportError::InvalidBlock("draft has no body".to_string())),
        },
        _ => Err(BlockportError::InvalidBlock("expected a draft object or a block array".to_string())),
    }
}

fn take_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}
