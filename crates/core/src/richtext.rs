//! Projection of blocks into the CMS rich-text tree.
//!
//! The output mirrors the CMS node schema: every node carries a `nodeType`
//! tag and a `data` object, which is empty everywhere except on hyperlinks.
//!
//! ```json
//! { "nodeType": "document", "data": {}, "content": [
//!     { "nodeType": "paragraph", "data": {}, "content": [
//!         { "nodeType": "text", "value": "See ", "marks": [], "data": {} },
//!         { "nodeType": "hyperlink", "data": { "uri": "https://example.com" }, "content": [
//!             { "nodeType": "text", "value": "docs", "marks": [], "data": {} }
//!         ] }
//!     ] }
//! ] }
//! ```

use serde::Serialize;

use crate::block::{Block, BlockKind, Segment};

/// Auxiliary data object carried by every non-hyperlink node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmptyData {}

/// Text formatting mark. None are produced, so `marks` is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Mark {}

/// Root of the rich-text tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "nodeType", rename = "document")]
pub struct RichTextDocument {
    pub data: EmptyData,
    pub content: Vec<TopLevelNode>,
}

/// A heading or paragraph directly under the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "nodeType")]
pub enum TopLevelNode {
    #[serde(rename = "heading-2")]
    Heading2 { data: EmptyData, content: [TextNode; 1] },
    #[serde(rename = "heading-3")]
    Heading3 { data: EmptyData, content: [TextNode; 1] },
    #[serde(rename = "paragraph")]
    Paragraph { data: EmptyData, content: Vec<InlineNode> },
}

/// Paragraph content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InlineNode {
    Text(TextNode),
    Hyperlink(HyperlinkNode),
}

/// A leaf holding a plain string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "nodeType", rename = "text")]
pub struct TextNode {
    pub value: String,
    pub marks: Vec<Mark>,
    pub data: EmptyData,
}

impl TextNode {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), marks: Vec::new(), data: EmptyData::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HyperlinkData {
    pub uri: String,
}

/// A hyperlink wrapping exactly one text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "nodeType", rename = "hyperlink")]
pub struct HyperlinkNode {
    pub data: HyperlinkData,
    pub content: [TextNode; 1],
}

impl InlineNode {
    /// The text this node renders.
    pub fn plain_text(&self) -> &str {
        match self {
            Self::Text(text) => &text.value,
            Self::Hyperlink(link) => &link.content[0].value,
        }
    }
}

impl TopLevelNode {
    /// Concatenated text of the node's content.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Heading2 { content, .. } | Self::Heading3 { content, .. } => content[0].value.clone(),
            Self::Paragraph { content, .. } => content.iter().map(InlineNode::plain_text).collect(),
        }
    }
}

/// Project an ordered block sequence into a rich-text document.
///
/// The mapping is total and deterministic: the same blocks always produce the
/// same tree. Link titles are not represented in the output.
///
/// # Example
///
/// ```rust
/// use blockport_core::{Block, project_document};
///
/// let doc = project_document(&[Block::heading2("Intro"), Block::paragraph("Hello")]);
/// let json = serde_json::to_value(&doc).unwrap();
///
/// assert_eq!(json["nodeType"], "document");
/// assert_eq!(json["content"][0]["nodeType"], "heading-2");
/// assert_eq!(json["content"][1]["content"][0]["value"], "Hello");
/// ```
pub fn project_document(blocks: &[Block]) -> RichTextDocument {
    RichTextDocument { data: EmptyData::default(), content: blocks.iter().map(project_block).collect() }
}

fn project_block(block: &Block) -> TopLevelNode {
    let data = EmptyData::default();
    match block.kind() {
        BlockKind::Heading2 => TopLevelNode::Heading2 { data, content: [TextNode::new(block.text())] },
        BlockKind::Heading3 => TopLevelNode::Heading3 { data, content: [TextNode::new(block.text())] },
        BlockKind::Paragraph => {
            let content = match block.segments() {
                Some(segments) => segments.iter().map(project_segment).collect(),
                None => vec![InlineNode::Text(TextNode::new(block.text()))],
            };
            TopLevelNode::Paragraph { data, content }
        }
    }
}

fn project_segment(segment: &Segment) -> InlineNode {
    match segment.link() {
        Some(link) => InlineNode::Hyperlink(HyperlinkNode {
            data: HyperlinkData { uri: link.url().to_string() },
            content: [TextNode::new(segment.text())],
        }),
        None => InlineNode::Text(TextNode::new(segment.text())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Link;
    use serde_json::json;

    fn sample_blocks() -> Vec<Block> {
        vec![
            Block::heading2("Intro"),
            Block::heading3("Details"),
            Block::paragraph("Plain text."),
            Block::paragraph_with_segments(
                "See docs now",
                vec![
                    Segment::plain("See "),
                    Segment::linked("docs", Link::new("https://example.com", Some("Docs".to_string())).unwrap()),
                    Segment::plain(" now"),
                ],
            ),
        ]
    }

    #[test]
    fn test_projection_is_idempotent() {
        let blocks = sample_blocks();
        assert_eq!(project_document(&blocks), project_document(&blocks));
    }

    #[test]
    fn test_order_preserved() {
        let doc = project_document(&sample_blocks());
        let texts: Vec<String> = doc.content.iter().map(TopLevelNode::plain_text).collect();
        assert_eq!(texts, vec!["Intro", "Details", "Plain text.", "See docs now"]);
    }

    #[test]
    fn test_plain_paragraph_has_single_text_node() {
        let doc = project_document(&[Block::paragraph("Plain text.")]);
        match &doc.content[0] {
            TopLevelNode::Paragraph { content, .. } => {
                assert_eq!(content, &vec![InlineNode::Text(TextNode::new("Plain text."))]);
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_links_preserved() {
        let doc = project_document(&sample_blocks());
        let TopLevelNode::Paragraph { content, .. } = &doc.content[3] else {
            panic!("expected paragraph");
        };

        assert_eq!(content.len(), 3);
        match &content[1] {
            InlineNode::Hyperlink(link) => {
                assert_eq!(link.data.uri, "https://example.com");
                assert_eq!(link.content[0].value, "docs");
            }
            other => panic!("expected hyperlink, got {other:?}"),
        }
    }

    #[test]
    fn test_bullet_segment_kept_as_text_node() {
        let block = Block::paragraph_with_segments(
            "・item",
            vec![Segment::plain("・"), Segment::linked("item", Link::new("/item", None).unwrap())],
        );
        let doc = project_document(&[block]);
        assert_eq!(doc.content[0].plain_text(), "・item");
    }

    #[test]
    fn test_json_schema() {
        let doc = project_document(&sample_blocks());
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(
            value["content"][0],
            json!({
                "nodeType": "heading-2",
                "data": {},
                "content": [{ "nodeType": "text", "value": "Intro", "marks": [], "data": {} }]
            })
        );
        assert_eq!(value["content"][1]["nodeType"], "heading-3");
        assert_eq!(
            value["content"][3]["content"][1],
            json!({
                "nodeType": "hyperlink",
                "data": { "uri": "https://example.com" },
                "content": [{ "nodeType": "text", "value": "docs", "marks": [], "data": {} }]
            })
        );
        assert_eq!(value["nodeType"], "document");
        assert_eq!(value["data"], json!({}));
    }

    #[test]
    fn test_empty_sequence() {
        let value = serde_json::to_value(project_document(&[])).unwrap();
        assert_eq!(value, json!({ "nodeType": "document", "data": {}, "content": [] }));
    }
}
