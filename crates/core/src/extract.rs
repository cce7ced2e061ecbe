//! Block classification.
//!
//! Turns a container element's direct children into an ordered [`Block`]
//! sequence, dispatching on a closed set of recognized tags. Anything else is
//! skipped together with its subtree. Classification never fails: content that
//! cannot be recognized simply produces no block.
//!
//! [`extract_body`] layers the recovery policy on top: primary container,
//! then a broader fallback container, then a fixed placeholder pair.

use tracing::{debug, warn};

use crate::block::{Block, Link, Segment, has_links};
use crate::parse::{Document, Element};
use crate::segment::extract_segments;
use crate::{BlockportError, Result};

/// Prefix marking a flattened list item.
pub const LIST_BULLET: &str = "・";

/// Decoration wrapped around figure captions.
pub const CAPTION_OPEN: &str = "（";
pub const CAPTION_CLOSE: &str = "）";

/// Configuration for body extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// CSS selector of the article body container
    pub primary_selector: String,
    /// Broader container tried when the primary one yields nothing
    pub fallback_selector: String,
    /// Class name marking embedded link previews
    pub embed_class: String,
    /// Heading of the placeholder pair used when nothing is extracted
    pub placeholder_heading: String,
    /// Paragraph of the placeholder pair used when nothing is extracted
    pub placeholder_paragraph: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            primary_selector: ".note-common-styles__textnote-body".to_string(),
            fallback_selector: "article".to_string(),
            embed_class: "note-embed".to_string(),
            placeholder_heading: "記事の内容".to_string(),
            placeholder_paragraph: "（本文の自動取得ができませんでした。手動で入力してください）".to_string(),
        }
    }
}

/// Where the extracted blocks came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySource {
    Primary,
    Fallback,
    Placeholder,
}

/// The result of body extraction
#[derive(Debug, Clone)]
pub struct ExtractedBody {
    /// Ordered blocks, never empty
    pub blocks: Vec<Block>,
    /// Which container produced them
    pub source: BodySource,
}

/// Tags the classifier recognizes among a container's direct children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockTag {
    Heading2,
    Heading3,
    Paragraph,
    Division,
    List,
    Figure,
    Other,
}

impl BlockTag {
    fn of(element: &Element<'_>) -> Self {
        match element.tag_name().as_str() {
            "h2" => Self::Heading2,
            "h3" => Self::Heading3,
            "p" => Self::Paragraph,
            "div" => Self::Division,
            "ul" | "ol" => Self::List,
            "figure" => Self::Figure,
            _ => Self::Other,
        }
    }
}

/// Why a division was treated as a link card.
///
/// Variants are listed in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkCardSignal {
    /// The division itself carries the embed class.
    EmbedClass,
    /// Some descendant carries the embed class.
    EmbedDescendant,
    /// The division contains an `<iframe>`.
    EmbeddedFrame,
    /// Exactly one child element, a link somewhere inside, and no
    /// heading or paragraph descendants.
    SoleLinkChild,
}

/// Check the link-card predicates in priority order.
pub fn link_card_signal(division: &Element<'_>, embed_class: &str) -> Option<LinkCardSignal> {
    if division.has_class(embed_class) {
        return Some(LinkCardSignal::EmbedClass);
    }
    if division.has_descendant_with_class(embed_class) {
        return Some(LinkCardSignal::EmbedDescendant);
    }
    if division.find_first_by_tag("iframe").is_some() {
        return Some(LinkCardSignal::EmbeddedFrame);
    }
    if division.child_elements().len() == 1
        && first_link(division).is_some()
        && division.find_by_tags(&["p", "h2", "h3"]).is_empty()
    {
        return Some(LinkCardSignal::SoleLinkChild);
    }
    None
}

/// First descendant anchor carrying an `href` attribute (possibly empty).
fn first_link<'a>(element: &Element<'a>) -> Option<Element<'a>> {
    element
        .descendant_elements()
        .find(|el| el.tag_name() == "a" && el.attr("href").is_some())
}

/// Classify the direct children of `container` into ordered blocks.
///
/// # Example
///
/// ```rust
/// use blockport_core::parse::Document;
/// use blockport_core::{ExtractConfig, classify_blocks};
///
/// let doc = Document::parse("<div id='body'><h2>Intro</h2><p>Hello</p><table><tr><td>x</td></tr></table></div>");
/// let body = doc.select_first("#body").unwrap().unwrap();
/// let blocks = classify_blocks(&body, &ExtractConfig::default());
///
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].text(), "Intro");
/// ```
pub fn classify_blocks(container: &Element<'_>, config: &ExtractConfig) -> Vec<Block> {
    let mut blocks = Vec::new();

    for child in container.child_elements() {
        match BlockTag::of(&child) {
            BlockTag::Heading2 | BlockTag::Heading3 | BlockTag::Paragraph => {
                blocks.extend(text_block(&child));
            }
            BlockTag::Division => classify_division(&child, config, &mut blocks),
            BlockTag::List => classify_list(&child, &mut blocks),
            BlockTag::Figure => blocks.extend(caption_block(&child)),
            BlockTag::Other => {}
        }
    }

    debug!(
        container = %container.tag_name(),
        blocks = blocks.len(),
        "classified container"
    );

    blocks
}

/// Heading or paragraph block for an `h2`, `h3` or `p` element with text.
fn text_block(element: &Element<'_>) -> Option<Block> {
    let text = element.trimmed_text();
    if text.is_empty() {
        return None;
    }

    match BlockTag::of(element) {
        BlockTag::Heading2 => Some(Block::heading2(text)),
        BlockTag::Heading3 => Some(Block::heading3(text)),
        BlockTag::Paragraph => Some(Block::paragraph_with_segments(text, extract_segments(element))),
        _ => None,
    }
}

fn classify_division(division: &Element<'_>, config: &ExtractConfig, blocks: &mut Vec<Block>) {
    let signal = link_card_signal(division, &config.embed_class);

    if let Some(signal) = signal
        && let Some(anchor) = first_link(division)
    {
        debug!(?signal, "division classified as link card");
        blocks.extend(link_card_block(&anchor));
        return;
    }

    for inner in division.find_by_tags(&["p", "h2", "h3"]) {
        blocks.extend(text_block(&inner));
    }
}

fn link_card_block(anchor: &Element<'_>) -> Option<Block> {
    let link = Link::new(anchor.attr("href")?, anchor.attr("title").map(str::to_string)).ok()?;
    let text = match anchor.trimmed_text() {
        text if text.is_empty() => link.url().to_string(),
        text => text,
    };
    let segment = Segment::linked(text.clone(), link);

    Some(Block::paragraph_with_segments(text, vec![segment]))
}

// The plain branch prepends the bullet to `text`; the linked branch keeps it
// as its own leading segment. Both shapes are relied upon downstream.
fn classify_list(list: &Element<'_>, blocks: &mut Vec<Block>) {
    for item in list.find_by_tags(&["li"]) {
        let item_text = item.trimmed_text();
        if item_text.is_empty() {
            continue;
        }

        let text = format!("{LIST_BULLET}{item_text}");
        let segments = extract_segments(&item);

        if has_links(&segments) {
            let mut with_bullet = Vec::with_capacity(segments.len() + 1);
            with_bullet.push(Segment::plain(LIST_BULLET));
            with_bullet.extend(segments);
            blocks.push(Block::paragraph_with_segments(text, with_bullet));
        } else {
            blocks.push(Block::paragraph(text));
        }
    }
}

fn caption_block(figure: &Element<'_>) -> Option<Block> {
    let caption: String = figure.find_by_tags(&["figcaption"]).iter().map(Element::text).collect();
    let caption = caption.trim();
    if caption.is_empty() {
        return None;
    }
    Some(Block::paragraph(format!("{CAPTION_OPEN}{caption}{CAPTION_CLOSE}")))
}

/// The fixed two-block placeholder used when nothing could be extracted.
pub fn placeholder_blocks(config: &ExtractConfig) -> Vec<Block> {
    vec![
        Block::heading2(config.placeholder_heading.clone()),
        Block::paragraph(config.placeholder_paragraph.clone()),
    ]
}

/// Extract the article body from a document
///
/// 1. Classifies the primary container
/// 2. Retries on the fallback container if that yields zero blocks
/// 3. Substitutes the placeholder pair if both yield nothing
///
/// # Errors
///
/// Returns [`BlockportError::HtmlParseError`] only when a configured selector is invalid.
pub fn extract_body(doc: &Document, config: &ExtractConfig) -> Result<ExtractedBody> {
    let primary = doc.select_first(&config.primary_selector)?;
    if primary.is_none() {
        warn!(selector = %config.primary_selector, "primary body container not found");
    }

    let blocks = primary.map(|el| classify_blocks(&el, config)).unwrap_or_default();
    if !blocks.is_empty() {
        return Ok(ExtractedBody { blocks, source: BodySource::Primary });
    }

    warn!(selector = %config.fallback_selector, "no blocks in primary container, trying fallback");
    let blocks = doc
        .select_first(&config.fallback_selector)?
        .map(|el| classify_blocks(&el, config))
        .unwrap_or_default();
    if !blocks.is_empty() {
        return Ok(ExtractedBody { blocks, source: BodySource::Fallback });
    }

    warn!("no blocks extracted, substituting placeholder");
    Ok(ExtractedBody { blocks: placeholder_blocks(config), source: BodySource::Placeholder })
}

/// Extract blocks from an HTML fragment or document, classifying the children of `<body>`.
///
/// Useful when the caller already isolated the article container.
pub fn extract_fragment(html: &str, config: &ExtractConfig) -> Result<Vec<Block>> {
    let doc = Document::parse(html);
    let body = doc.select_first("body")?.ok_or(BlockportError::NoContent)?;
    Ok(classify_blocks(&body, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;
    use rstest::rstest;

    fn classify(html: &str) -> Vec<Block> {
        extract_fragment(html, &ExtractConfig::default()).unwrap()
    }

    #[test]
    fn test_extract_config_default() {
        let config = ExtractConfig::default();
        assert_eq!(config.primary_selector, ".note-common-styles__textnote-body");
        assert_eq!(config.fallback_selector, "article");
        assert_eq!(config.embed_class, "note-embed");
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let blocks = classify("<h2> Title </h2><h3>Sub</h3><p>Body <b>text</b></p><h2>   </h2><p></p>");

        assert_eq!(blocks, vec![Block::heading2("Title"), Block::heading3("Sub"), Block::paragraph("Body text")]);
    }

    #[test]
    fn test_paragraph_with_link_keeps_segments() {
        let blocks = classify(r#"<p>Hello <a href="https://x.test">world</a>!</p>"#);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "Hello world!");
        let segments = blocks[0].segments().unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].link().unwrap().url(), "https://x.test");
    }

    #[test]
    fn test_unrecognized_tags_skipped_with_subtree() {
        let blocks = classify("<section><p>hidden</p></section><blockquote><p>quoted</p></blockquote><p>seen</p>");
        assert_eq!(blocks, vec![Block::paragraph("seen")]);
    }

    #[test]
    fn test_list_flattening() {
        let blocks = classify(r#"<ul><li>first</li><li>see <a href="https://x.test">this</a></li><li> </li></ul>"#);

        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| b.kind() == BlockKind::Paragraph));

        assert_eq!(blocks[0].text(), "・first");
        assert!(blocks[0].segments().is_none());

        assert_eq!(blocks[1].text(), "・see this");
        let segments = blocks[1].segments().unwrap();
        assert_eq!(segments[0], Segment::plain("・"));
        assert_eq!(segments[1], Segment::plain("see "));
        assert_eq!(segments[2].text(), "this");
    }

    #[test]
    fn test_ordered_list_flattened_too() {
        let blocks = classify("<ol><li>one</li><li>two</li></ol>");
        assert_eq!(blocks, vec![Block::paragraph("・one"), Block::paragraph("・two")]);
    }

    #[test]
    fn test_figure_caption() {
        let blocks = classify("<figure><img src='a.png'><figcaption> 写真 </figcaption></figure><figure><img></figure>");
        assert_eq!(blocks, vec![Block::paragraph("（写真）")]);
    }

    #[test]
    fn test_link_card_sole_child_deeply_nested() {
        let blocks = classify(
            r#"<div><div><span><span><a href="https://card.test" title="Card">Card title</a></span></span></div></div>"#,
        );

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "Card title");
        let segments = blocks[0].segments().unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0], Segment::linked("Card title", Link::new("https://card.test", Some("Card".to_string())).unwrap()));
    }

    #[test]
    fn test_link_card_text_falls_back_to_href() {
        let blocks = classify(r#"<div class="note-embed"><a href="https://card.test"><img src="x.png"></a></div>"#);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "https://card.test");
        assert_eq!(blocks[0].segments().unwrap()[0].text(), "https://card.test");
    }

    #[test]
    fn test_link_card_takes_first_link_only() {
        let blocks = classify(
            r#"<div><iframe src="x"></iframe><a href="https://one.test">One</a><a href="https://two.test">Two</a></div>"#,
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "One");
    }

    #[test]
    fn test_link_card_with_empty_href_emits_nothing() {
        let blocks = classify(r#"<div class="note-embed"><a href="">Broken</a><p>after</p></div>"#);
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_embed_without_link_falls_back_to_structure() {
        let blocks = classify(r#"<div class="note-embed"><p>No link here</p></div>"#);
        assert_eq!(blocks, vec![Block::paragraph("No link here")]);
    }

    #[test]
    fn test_division_structural_recursion() {
        let blocks = classify(
            r#"<div><section><h2>A</h2><div><p>B <a href="/b">link</a></p></div></section><h3>C</h3><p> </p></div>"#,
        );

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], Block::heading2("A"));
        assert_eq!(blocks[1].text(), "B link");
        assert!(blocks[1].segments().is_some());
        assert_eq!(blocks[2], Block::heading3("C"));
    }

    #[test]
    fn test_division_with_link_and_paragraph_is_not_a_card() {
        let blocks = classify(r#"<div><div><p>Intro <a href="/x">x</a></p></div></div>"#);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "Intro x");
    }

    fn division(html: &str) -> Option<LinkCardSignal> {
        let doc = Document::parse(html);
        let div = doc.select_first("#card").unwrap().unwrap();
        link_card_signal(&div, "note-embed")
    }

    #[rstest]
    #[case::embed_class(r#"<div id="card" class="note-embed"><p>x</p></div>"#, Some(LinkCardSignal::EmbedClass))]
    #[case::embed_descendant(r#"<div id="card"><div class="note-embed"></div><p>x</p></div>"#, Some(LinkCardSignal::EmbedDescendant))]
    #[case::iframe(r#"<div id="card"><p>x</p><iframe src="y"></iframe></div>"#, Some(LinkCardSignal::EmbeddedFrame))]
    #[case::sole_link_child(r#"<div id="card"><span><a href="/x">x</a></span></div>"#, Some(LinkCardSignal::SoleLinkChild))]
    #[case::two_children(r#"<div id="card"><span><a href="/x">x</a></span><span>y</span></div>"#, None)]
    #[case::sole_child_without_link(r#"<div id="card"><span>x</span></div>"#, None)]
    #[case::sole_child_with_paragraph(r#"<div id="card"><div><p><a href="/x">x</a></p></div></div>"#, None)]
    #[case::anchor_without_href(r#"<div id="card"><span><a>x</a></span></div>"#, None)]
    fn test_link_card_predicates(#[case] html: &str, #[case] expected: Option<LinkCardSignal>) {
        assert_eq!(division(html), expected);
    }

    #[test]
    fn test_predicate_priority() {
        let signal = division(r#"<div id="card" class="note-embed"><iframe></iframe><a href="/x">x</a></div>"#);
        assert_eq!(signal, Some(LinkCardSignal::EmbedClass));
    }

    #[test]
    fn test_extract_body_primary() {
        let doc = Document::parse(
            r#"<body><div class="note-common-styles__textnote-body"><h2>T</h2></div><article><p>alt</p></article></body>"#,
        );
        let body = extract_body(&doc, &ExtractConfig::default()).unwrap();

        assert_eq!(body.source, BodySource::Primary);
        assert_eq!(body.blocks, vec![Block::heading2("T")]);
    }

    #[test]
    fn test_extract_body_fallback_when_primary_empty() {
        let doc = Document::parse(
            r#"<body><div class="note-common-styles__textnote-body"><span>x</span></div><article><p>alt</p></article></body>"#,
        );
        let body = extract_body(&doc, &ExtractConfig::default()).unwrap();

        assert_eq!(body.source, BodySource::Fallback);
        assert_eq!(body.blocks, vec![Block::paragraph("alt")]);
    }

    #[test]
    fn test_extract_body_placeholder() {
        let doc = Document::parse("<body><main><p>unreachable</p></main></body>");
        let config = ExtractConfig::default();
        let body = extract_body(&doc, &config).unwrap();

        assert_eq!(body.source, BodySource::Placeholder);
        assert_eq!(body.blocks, placeholder_blocks(&config));
        assert_eq!(body.blocks[0].kind(), BlockKind::Heading2);
    }

    #[test]
    fn test_extract_body_invalid_selector() {
        let doc = Document::parse("<p>x</p>");
        let config = ExtractConfig { primary_selector: "[[bad".to_string(), ..Default::default() };
        assert!(matches!(extract_body(&doc, &config), Err(BlockportError::HtmlParseError(_))));
    }
}
