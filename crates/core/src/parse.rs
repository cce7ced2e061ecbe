//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] wrappers over
//! `scraper`, plus the [`Node`] union the extractors walk. Extraction code only
//! ever sees text runs and elements; comments, doctypes and processing
//! instructions never reach it.
//!
//! # Example
//!
//! ```rust
//! use blockport_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let paragraphs = doc.select("p.content").unwrap();
//! assert_eq!(paragraphs.len(), 1);
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{BlockportError, Result};

/// Represents a parsed HTML document.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors and reading page-level metadata.
///
/// # Example
///
/// ```rust
/// use blockport_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html);
/// assert_eq!(doc.title(), Some("Test".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// html5ever recovers from any malformed input, so parsing itself cannot fail.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`BlockportError::HtmlParseError`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use blockport_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html);
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(Element::new).collect())
    }

    /// Selects the first element matching a CSS selector, if any.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).next().map(Element::new))
    }

    /// Gets the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    /// Gets the `content` attribute of a `<meta>` tag keyed by `property` or `name`.
    ///
    /// Blank values are treated as absent.
    pub fn meta_content(&self, key: &str) -> Option<String> {
        let selector = format!(r#"meta[property="{key}"], meta[name="{key}"]"#);
        let sel = Selector::parse(&selector).ok()?;
        self.html
            .select(&sel)
            .filter_map(|el| el.value().attr("content"))
            .map(str::trim)
            .find(|content| !content.is_empty())
            .map(str::to_string)
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| BlockportError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// A child node as seen by the extractors.
#[derive(Clone, Debug)]
pub enum Node<'a> {
    /// A text run, verbatim (untrimmed).
    Text(&'a str),
    /// A nested element.
    Element(Element<'a>),
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use blockport_core::parse::Document;
///
/// let html = r#"<a href="https://example.com" title="Example">Link text</a>"#;
/// let doc = Document::parse(html);
/// let link = &doc.select("a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://example.com"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// Gets the concatenation of all descendant text nodes.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text content with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name (e.g., "div", "a", "span").
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Checks whether the element's `class` attribute lists `class_name`.
    pub fn has_class(&self, class_name: &str) -> bool {
        self.element.value().classes().any(|c| c == class_name)
    }

    /// Gets the direct children in document order.
    pub fn children(&self) -> Vec<Node<'a>> {
        self.element
            .children()
            .filter_map(|child| match child.value() {
                scraper::Node::Text(text) => Some(Node::Text(&**text)),
                scraper::Node::Element(_) => ElementRef::wrap(child).map(|el| Node::Element(Element::new(el))),
                _ => None,
            })
            .collect()
    }

    /// Gets the direct element children, skipping text runs.
    pub fn child_elements(&self) -> Vec<Element<'a>> {
        self.element.children().filter_map(ElementRef::wrap).map(Element::new).collect()
    }

    /// Iterates all descendant elements in document order, excluding `self`.
    pub fn descendant_elements(&self) -> impl Iterator<Item = Element<'a>> + use<'a> {
        self.element
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .map(Element::new)
    }

    /// Finds descendants whose tag name is one of `tags`, in document order.
    pub fn find_by_tags(&self, tags: &[&str]) -> Vec<Element<'a>> {
        self.descendant_elements()
            .filter(|el| tags.contains(&el.tag_name().as_str()))
            .collect()
    }

    /// Finds the first descendant with the given tag name.
    pub fn find_first_by_tag(&self, tag: &str) -> Option<Element<'a>> {
        self.descendant_elements().find(|el| el.tag_name() == tag)
    }

    /// Checks whether any descendant carries `class_name`.
    pub fn has_descendant_with_class(&self, class_name: &str) -> bool {
        self.descendant_elements().any(|el| el.has_class(class_name))
    }
}
