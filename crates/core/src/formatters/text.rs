use crate::block::{Block, BlockKind};

/// Configuration for plain text preview
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Wrap lines at specified width in characters (0 = no wrapping)
    pub line_width: usize,

    /// Print link targets after linked text
    pub show_links: bool,
}

/// Plain text formatter for reviewing a block sequence in a terminal
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, blocks: &[Block], title: Option<&str>) -> String {
        convert_to_text(blocks, title, &self.config)
    }
}

/// Render blocks as plain text
///
/// Headings are underlined (`=` for h2, `-` for h3), blocks are separated by
/// blank lines. The optional title is printed first as a boxed header.
pub fn convert_to_text(blocks: &[Block], title: Option<&str>, config: &TextConfig) -> String {
    let mut sections = Vec::new();

    if let Some(title) = title {
        sections.push(generate_header(title));
    }

    for block in blocks {
        let text = if config.show_links { linked_text(block) } else { block.text().to_string() };
        let text = if config.line_width > 0 { wrap_text(&text, config.line_width) } else { text };

        let rendered = match block.kind() {
            BlockKind::Heading2 => underline(&text, '='),
            BlockKind::Heading3 => underline(&text, '-'),
            BlockKind::Paragraph => text,
        };
        sections.push(rendered);
    }

    sections.join("\n\n")
}

fn generate_header(title: &str) -> String {
    let rule = "#".repeat(title.chars().count() + 4);
    format!("{rule}\n# {title} #\n{rule}")
}

fn underline(text: &str, marker: char) -> String {
    let width = text.lines().map(|line| line.chars().count()).max().unwrap_or(0);
    format!("{text}\n{}", marker.to_string().repeat(width))
}

/// Block text with `<url>` after each linked run
fn linked_text(block: &Block) -> String {
    match block.segments() {
        Some(segments) => segments
            .iter()
            .map(|segment| match segment.link() {
                Some(link) => format!("{} <{}>", segment.text(), link.url()),
                None => segment.text().to_string(),
            })
            .collect(),
        None => block.text().to_string(),
    }
}

/// Wrap text to the given width in characters
///
/// Breaks at whitespace where possible; runs without whitespace (such as
/// Japanese prose) are split at the width.
fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        for chunk in split_chars(word, width) {
            let chunk_len = chunk.chars().count();
            if current_len == 0 {
                current.push_str(&chunk);
                current_len = chunk_len;
            } else if current_len + 1 + chunk_len <= width {
                current.push(' ');
                current.push_str(&chunk);
                current_len += 1 + chunk_len;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(&chunk);
                current_len = chunk_len;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

fn split_chars(word: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
}
