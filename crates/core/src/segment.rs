//! Segment extraction.
//!
//! Flattens an element's descendant text into ordered [`Segment`] runs while
//! keeping hyperlink boundaries. Inline wrappers (`span`, `strong`, `em`, ...)
//! are walked transparently; an anchor always collapses into one flat run.

use crate::block::{Link, Segment};
use crate::parse::{Element, Node};

/// Extract the ordered segments covering `element`'s descendant text.
///
/// - Whitespace-only text nodes are dropped; other text nodes are kept verbatim.
/// - An `<a>` with non-empty trimmed text and a non-empty `href` becomes one
///   linked run of its trimmed text. Anchors failing either test contribute
///   nothing and are not recursed into.
/// - Every other element is recursed into.
///
/// An element without textual descendants yields an empty vector.
///
/// # Example
///
/// ```rust
/// use blockport_core::parse::Document;
/// use blockport_core::segment::extract_segments;
///
/// let doc = Document::parse(r#"<p>Hello <a href="https://x.test">world</a>!</p>"#);
/// let p = doc.select_first("p").unwrap().unwrap();
/// let segments = extract_segments(&p);
///
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[1].link().unwrap().url(), "https://x.test");
/// ```
pub fn extract_segments(element: &Element<'_>) -> Vec<Segment> {
    let mut segments = Vec::new();
    collect_segments(element, &mut segments);
    segments
}

fn collect_segments(element: &Element<'_>, out: &mut Vec<Segment>) {
    for child in element.children() {
        match child {
            Node::Text(text) => {
                if !text.trim().is_empty() {
                    out.push(Segment::plain(text));
                }
            }
            Node::Element(el) if el.tag_name() == "a" => {
                if let Some(segment) = anchor_segment(&el) {
                    out.push(segment);
                }
            }
            Node::Element(el) => collect_segments(&el, out),
        }
    }
}

fn anchor_segment(anchor: &Element<'_>) -> Option<Segment> {
    let text = anchor.trimmed_text();
    if text.is_empty() {
        return None;
    }
    let link = Link::new(anchor.attr("href")?, anchor.attr("title").map(str::to_string)).ok()?;
    Some(Segment::linked(text, link))
}
