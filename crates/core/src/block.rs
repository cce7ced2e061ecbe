//! The portable block model.
//!
//! A [`Block`] is one semantic content unit (heading or paragraph) in reading
//! order. Paragraphs that contain at least one hyperlink additionally carry
//! their [`Segment`] runs so links survive plain-text flattening.
//!
//! Blocks serialize as plain records, the format drafts are reviewed in:
//!
//! ```json
//! { "type": "p", "text": "See docs", "segments": [
//!     { "text": "See " },
//!     { "text": "docs", "link": { "url": "https://example.com" } }
//! ] }
//! ```
//!
//! Deserialization re-checks the model invariants, so a `Block` value can
//! never be a heading with segments or hold a link with an empty url.

use serde::{Deserialize, Serialize};

use crate::{BlockportError, Result};

/// A hyperlink annotation on a [`Segment`].
///
/// The url is never empty; both [`Link::new`] and deserialization reject one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLink")]
pub struct Link {
    url: String,
    /// Optional `title` attribute of the source anchor.
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

impl Link {
    /// # Errors
    ///
    /// Returns [`BlockportError::InvalidBlock`] if `url` is empty.
    pub fn new(url: impl Into<String>, title: Option<String>) -> Result<Self> {
        let url = url.into();
        if url.is_empty() {
            return Err(BlockportError::InvalidBlock("link has an empty url".to_string()));
        }
        Ok(Self { url, title })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Unchecked wire form of a [`Link`].
#[derive(Deserialize)]
struct RawLink {
    url: String,
    #[serde(default)]
    title: Option<String>,
}

impl TryFrom<RawLink> for Link {
    type Error = BlockportError;

    fn try_from(raw: RawLink) -> Result<Self> {
        Link::new(raw.url, raw.title)
    }
}

/// A contiguous text run within a paragraph, optionally carrying one hyperlink.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<Link>,
}

impl Segment {
    /// A run without link annotation.
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), link: None }
    }

    /// A run annotated with a hyperlink.
    pub fn linked(text: impl Into<String>, link: Link) -> Self {
        Self { text: text.into(), link: Some(link) }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    pub fn is_link(&self) -> bool {
        self.link.is_some()
    }
}

/// Whether any segment carries a hyperlink.
pub fn has_links(segments: &[Segment]) -> bool {
    segments.iter().any(Segment::is_link)
}

/// The kind of a [`Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    #[serde(rename = "h2")]
    Heading2,
    #[serde(rename = "h3")]
    Heading3,
    #[serde(rename = "p")]
    Paragraph,
}

impl BlockKind {
    pub fn is_heading(self) -> bool {
        matches!(self, Self::Heading2 | Self::Heading3)
    }

    /// The short tag used in serialized drafts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heading2 => "h2",
            Self::Heading3 => "h3",
            Self::Paragraph => "p",
        }
    }
}

/// One semantic content unit.
///
/// `text` is always present and is what indexing and keyword matching read.
/// `segments` is set only on paragraphs that contain at least one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock")]
pub struct Block {
    #[serde(rename = "type")]
    kind: BlockKind,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    segments: Option<Vec<Segment>>,
}

impl Block {
    pub fn heading2(text: impl Into<String>) -> Self {
        Self { kind: BlockKind::Heading2, text: text.into(), segments: None }
    }

    pub fn heading3(text: impl Into<String>) -> Self {
        Self { kind: BlockKind::Heading3, text: text.into(), segments: None }
    }

    /// A paragraph rendered as a single plain run.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self { kind: BlockKind::Paragraph, text: text.into(), segments: None }
    }

    /// A paragraph that keeps `segments` only if at least one of them is a link.
    ///
    /// Every [`Link`] already carries a non-empty url, so the result always
    /// satisfies the block invariants.
    pub fn paragraph_with_segments(text: impl Into<String>, segments: Vec<Segment>) -> Self {
        let segments = if has_links(&segments) { Some(segments) } else { None };
        Self { kind: BlockKind::Paragraph, text: text.into(), segments }
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> Option<&[Segment]> {
        self.segments.as_deref()
    }
}

/// Unchecked wire form of a [`Block`].
#[derive(Deserialize)]
struct RawBlock {
    #[serde(rename = "type")]
    kind: BlockKind,
    text: String,
    #[serde(default)]
    segments: Option<Vec<Segment>>,
}

impl TryFrom<RawBlock> for Block {
    type Error = BlockportError;

    fn try_from(raw: RawBlock) -> Result<Self> {
        let segments = raw.segments.filter(|segments| !segments.is_empty());

        if let Some(segments) = &segments {
            if raw.kind.is_heading() {
                return Err(BlockportError::InvalidBlock(format!(
                    "{} block \"{}\" must not carry segments",
                    raw.kind.as_str(),
                    raw.text
                )));
            }
            if !has_links(segments) {
                return Err(BlockportError::InvalidBlock(format!(
                    "paragraph \"{}\" carries segments without any link",
                    raw.text
                )));
            }
        }

        Ok(Self { kind: raw.kind, text: raw.text, segments })
    }
}
