//! Draft validation.
//!
//! Works on raw JSON so that drafts edited by hand (possibly with missing or
//! mistyped fields) can still be checked and every problem reported at once.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::block::Block;
use crate::category::{Category, CategoryTable, CtaType};
use crate::draft::REVIEW_MARKER;
use crate::{BlockportError, Result};

pub const TITLE_MAX_CHARS: usize = 100;
pub const EXCERPT_MAX_CHARS: usize = 200;
pub const META_DESCRIPTION_MAX_CHARS: usize = 160;

/// Fields every draft must carry.
pub const REQUIRED_FIELDS: [&str; 6] = ["title", "slug", "category", "excerpt", "body", "metaDescription"];

const BLOCK_TYPES: [&str; 3] = ["h2", "h3", "p"];

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One problem found in a draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Field path, e.g. `title` or `body[2].text`
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into(), severity: Severity::Error }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into(), severity: Severity::Warning }
    }
}

/// Whether any issue is an error.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|issue| issue.severity == Severity::Error)
}

/// Validate a draft given as JSON.
///
/// `null` counts as missing. Issues are reported in field order.
///
/// # Example
///
/// ```rust
/// use blockport_core::{CategoryTable, validate_draft, has_errors};
///
/// let draft = serde_json::json!({
///     "title": "Title",
///     "slug": "my-article",
///     "category": "tips",
///     "excerpt": "Summary",
///     "body": [{ "type": "h2", "text": "Intro" }],
///     "metaDescription": "Description"
/// });
/// let issues = validate_draft(&draft, &CategoryTable::default());
/// assert!(!has_errors(&issues));
/// ```
pub fn validate_draft(draft: &Value, categories: &CategoryTable) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let Some(fields) = draft.as_object() else {
        issues.push(ValidationIssue::error("(root)", "draft must be a JSON object"));
        return issues;
    };

    for field in REQUIRED_FIELDS {
        if fields.get(field).is_none_or(Value::is_null) {
            issues.push(ValidationIssue::error(field, "required field is missing"));
        }
    }

    if let Some(title) = string_field(draft, "title", &mut issues) {
        let len = title.chars().count();
        if title.is_empty() {
            issues.push(ValidationIssue::error("title", "title is empty"));
        } else if len > TITLE_MAX_CHARS {
            issues.push(ValidationIssue::error(
                "title",
                format!("title exceeds {TITLE_MAX_CHARS} characters ({len})"),
            ));
        }
    }

    if let Some(slug) = string_field(draft, "slug", &mut issues)
        && !SLUG_RE.is_match(slug)
    {
        issues.push(ValidationIssue::error(
            "slug",
            "slug may only contain lowercase letters, digits and hyphens",
        ));
    }

    if let Some(category) = string_field(draft, "category", &mut issues) {
        let known = category.parse::<Category>().ok().is_some_and(|c| categories.get(c).is_some());
        if !known {
            let valid: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
            issues.push(ValidationIssue::error(
                "category",
                format!("unknown category {category:?}, expected one of: {}", valid.join(", ")),
            ));
        }
    }

    if let Some(excerpt) = string_field(draft, "excerpt", &mut issues) {
        check_text_length(&mut issues, "excerpt", excerpt, EXCERPT_MAX_CHARS);
    }

    if let Some(body) = draft.get("body").filter(|v| !v.is_null()) {
        validate_body(body, &mut issues);
    }

    if let Some(description) = string_field(draft, "metaDescription", &mut issues) {
        check_text_length(&mut issues, "metaDescription", description, META_DESCRIPTION_MAX_CHARS);
    }

    if let Some(cta) = string_field(draft, "ctaType", &mut issues)
        && !CtaType::ALL.iter().any(|t| t.as_str() == cta)
    {
        let valid: Vec<&str> = CtaType::ALL.iter().map(|t| t.as_str()).collect();
        issues.push(ValidationIssue::error(
            "ctaType",
            format!("unknown ctaType {cta:?}, expected one of: {}", valid.join(", ")),
        ));
    }

    if let Some(url) = string_field(draft, "youtubeUrl", &mut issues)
        && !url.is_empty()
        && !url.contains("youtube.com")
        && !url.contains("youtu.be")
    {
        issues.push(ValidationIssue::warning("youtubeUrl", "not a YouTube URL"));
    }

    issues
}

/// Read and validate a draft file.
pub fn validate_file(path: &Path, categories: &CategoryTable) -> Result<Vec<ValidationIssue>> {
    if !path.exists() {
        return Err(BlockportError::FileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let draft: Value = serde_json::from_str(&content)?;
    Ok(validate_draft(&draft, categories))
}

/// A present, non-null string field. Other types are reported as errors.
fn string_field<'a>(draft: &'a Value, field: &str, issues: &mut Vec<ValidationIssue>) -> Option<&'a str> {
    match draft.get(field)? {
        Value::Null => None,
        Value::String(s) => Some(s.as_str()),
        _ => {
            issues.push(ValidationIssue::error(field, "must be a string"));
            None
        }
    }
}

fn check_text_length(issues: &mut Vec<ValidationIssue>, field: &str, text: &str, max: usize) {
    let len = text.chars().count();
    if text.is_empty() {
        issues.push(ValidationIssue::error(field, format!("{field} is empty")));
    } else if len > max {
        issues.push(ValidationIssue::warning(field, format!("{field} exceeds {max} characters ({len})")));
    }
    if text.starts_with(REVIEW_MARKER) {
        issues.push(ValidationIssue::warning(field, "still carries the review marker"));
    }
}

fn validate_body(body: &Value, issues: &mut Vec<ValidationIssue>) {
    let Some(blocks) = body.as_array() else {
        issues.push(ValidationIssue::error("body", "body must be an array"));
        return;
    };
    if blocks.is_empty() {
        issues.push(ValidationIssue::error("body", "body is empty"));
        return;
    }

    if blocks[0].get("type").and_then(Value::as_str) != Some("h2") {
        issues.push(ValidationIssue::warning("body", "body should start with an h2 heading"));
    }

    for (index, block) in blocks.iter().enumerate() {
        let block_type = block.get("type").and_then(Value::as_str);
        let type_ok = block_type.is_some_and(|t| BLOCK_TYPES.contains(&t));
        if !type_ok {
            issues.push(ValidationIssue::error(
                format!("body[{index}].type"),
                format!("invalid block type: {}", block_type.unwrap_or("(none)")),
            ));
        }

        let text = block.get("text").and_then(Value::as_str);
        if text.is_none_or(|t| t.trim().is_empty()) {
            issues.push(ValidationIssue::warning(format!("body[{index}].text"), "text is empty"));
        }

        if type_ok
            && text.is_some()
            && let Err(err) = serde_json::from_value::<Block>(block.clone())
        {
            issues.push(ValidationIssue::error(format!("body[{index}].segments"), err.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_draft() -> Value {
        json!({
            "title": "習慣化のコツ",
            "slug": "habit-tips",
            "category": "tips",
            "excerpt": "毎日の習慣を続けるコツ。",
            "body": [
                { "type": "h2", "text": "はじめに" },
                { "type": "p", "text": "See docs", "segments": [
                    { "text": "See " },
                    { "text": "docs", "link": { "url": "https://example.com" } }
                ] }
            ],
            "metaDescription": "習慣を続けるための具体的なコツを紹介します。",
            "ctaType": "find-coach",
            "tags": ["習慣"],
            "youtubeUrl": "https://youtu.be/abc"
        })
    }

    fn validate(draft: &Value) -> Vec<ValidationIssue> {
        validate_draft(draft, &CategoryTable::default())
    }

    fn fields(issues: &[ValidationIssue]) -> Vec<(&str, Severity)> {
        issues.iter().map(|i| (i.field.as_str(), i.severity)).collect()
    }

    #[test]
    fn test_valid_draft_has_no_issues() {
        assert!(validate(&valid_draft()).is_empty());
    }

    #[test]
    fn test_missing_required_fields() {
        let issues = validate(&json!({ "title": "t", "slug": null }));
        let missing: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();

        assert_eq!(missing, vec!["slug", "category", "excerpt", "body", "metaDescription"]);
        assert!(has_errors(&issues));
    }

    #[test]
    fn test_non_object_root() {
        assert_eq!(fields(&validate(&json!([1, 2]))), vec![("(root)", Severity::Error)]);
    }

    #[test]
    fn test_title_limits() {
        let mut draft = valid_draft();
        draft["title"] = json!("a".repeat(TITLE_MAX_CHARS));
        assert!(validate(&draft).is_empty());

        draft["title"] = json!("a".repeat(TITLE_MAX_CHARS + 1));
        assert_eq!(fields(&validate(&draft)), vec![("title", Severity::Error)]);

        draft["title"] = json!("");
        assert_eq!(fields(&validate(&draft)), vec![("title", Severity::Error)]);
    }

    #[test]
    fn test_temporary_slug_is_rejected() {
        let mut draft = valid_draft();
        draft["slug"] = json!("NEEDS-REVIEW-n1234");
        assert_eq!(fields(&validate(&draft)), vec![("slug", Severity::Error)]);
    }

    #[test]
    fn test_unknown_category_and_cta() {
        let mut draft = valid_draft();
        draft["category"] = json!("news");
        draft["ctaType"] = json!("subscribe");

        let issues = validate(&draft);
        assert_eq!(fields(&issues), vec![("category", Severity::Error), ("ctaType", Severity::Error)]);
        assert!(issues[0].message.contains("coaching-story"));
    }

    #[test]
    fn test_length_warnings() {
        let mut draft = valid_draft();
        draft["excerpt"] = json!("あ".repeat(EXCERPT_MAX_CHARS + 1));
        draft["metaDescription"] = json!("あ".repeat(META_DESCRIPTION_MAX_CHARS + 1));

        let issues = validate(&draft);
        assert_eq!(fields(&issues), vec![("excerpt", Severity::Warning), ("metaDescription", Severity::Warning)]);
        assert!(!has_errors(&issues));
    }

    #[test]
    fn test_review_marker_warning() {
        let mut draft = valid_draft();
        draft["excerpt"] = json!("[要設定] 要約");
        assert_eq!(fields(&validate(&draft)), vec![("excerpt", Severity::Warning)]);
    }

    #[test]
    fn test_body_rules() {
        let mut draft = valid_draft();
        draft["body"] = json!([
            { "type": "p", "text": "starts with a paragraph" },
            { "type": "h4", "text": "bad type" },
            { "type": "p", "text": "  " }
        ]);

        assert_eq!(
            fields(&validate(&draft)),
            vec![("body", Severity::Warning), ("body[1].type", Severity::Error), ("body[2].text", Severity::Warning)]
        );
    }

    #[test]
    fn test_body_shape_errors() {
        let mut draft = valid_draft();
        draft["body"] = json!([]);
        assert_eq!(fields(&validate(&draft)), vec![("body", Severity::Error)]);

        draft["body"] = json!("text");
        assert_eq!(fields(&validate(&draft)), vec![("body", Severity::Error)]);
    }

    #[test]
    fn test_heading_with_segments_is_error() {
        let mut draft = valid_draft();
        draft["body"] = json!([
            { "type": "h2", "text": "Linked", "segments": [{ "text": "Linked", "link": { "url": "https://x.test" } }] }
        ]);
        assert_eq!(fields(&validate(&draft)), vec![("body[0].segments", Severity::Error)]);
    }

    #[test]
    fn test_youtube_url_warning() {
        let mut draft = valid_draft();
        draft["youtubeUrl"] = json!("https://vimeo.com/1");
        assert_eq!(fields(&validate(&draft)), vec![("youtubeUrl", Severity::Warning)]);

        draft["youtubeUrl"] = json!("");
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn test_wrong_field_type() {
        let mut draft = valid_draft();
        draft["title"] = json!(42);
        assert_eq!(fields(&validate(&draft)), vec![("title", Severity::Error)]);
    }

    #[test]
    fn test_validate_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("draft.json");
        fs::write(&path, valid_draft().to_string()).unwrap();

        assert!(validate_file(&path, &CategoryTable::default()).unwrap().is_empty());
        assert!(matches!(
            validate_file(&dir.path().join("missing.json"), &CategoryTable::default()),
            Err(BlockportError::FileNotFound(_))
        ));
    }
}
