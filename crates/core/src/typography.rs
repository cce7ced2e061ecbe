//! Title line wrapping and font-size selection for thumbnail overlays.
//!
//! All lengths are counted in characters (Unicode scalar values).

use serde::Serialize;

use crate::category::Category;

/// Titles longer than this are truncated.
pub const MAX_TITLE_CHARS: usize = 24;

/// Titles longer than this are broken into two lines.
pub const LINE_BREAK_AT: usize = 12;

/// How far before [`LINE_BREAK_AT`] a natural break is searched for.
pub const BREAK_SEARCH_WINDOW: usize = 5;

/// Appended to truncated titles.
pub const ELLIPSIS: &str = "...";

/// Punctuation and particles a line may end after.
pub const BREAK_CHARS: [char; 11] = ['、', '。', '！', '？', 'の', 'を', 'に', 'で', 'が', 'は', 'と'];

/// Discrete font size classes, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u32")]
pub enum FontSize {
    Large,
    Medium,
    Small,
    ExtraSmall,
}

impl FontSize {
    /// Pick the size class for the longest line of a layout.
    pub fn for_line_length(chars: usize) -> Self {
        match chars {
            0..=8 => Self::Large,
            9..=10 => Self::Medium,
            11..=12 => Self::Small,
            _ => Self::ExtraSmall,
        }
    }

    pub fn px(self) -> u32 {
        match self {
            Self::Large => 100,
            Self::Medium => 90,
            Self::Small => 80,
            Self::ExtraSmall => 70,
        }
    }
}

impl From<FontSize> for u32 {
    fn from(size: FontSize) -> Self {
        size.px()
    }
}

/// Layout of a title overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleLayout {
    /// Display text, with at most one embedded `\n`
    pub display_text: String,
    pub font_size: FontSize,
    /// Passed through for the thumbnail theme; does not affect the layout
    pub category: Category,
}

/// Lay out `title` for a thumbnail of `category`.
///
/// # Example
///
/// ```rust
/// use blockport_core::{Category, FontSize, layout_title};
///
/// let layout = layout_title("コーチングで人生が変わった話", Category::CoachingStory);
/// assert_eq!(layout.display_text, "コーチングで人生が\n変わった話");
/// assert_eq!(layout.font_size, FontSize::Medium);
/// ```
pub fn layout_title(title: &str, category: Category) -> TitleLayout {
    let display_text = format_title(title);
    let font_size = font_size_for(&display_text);
    TitleLayout { display_text, font_size, category }
}

/// Truncate and wrap a title.
pub fn format_title(title: &str) -> String {
    let chars: Vec<char> = title.chars().collect();

    let mut formatted: Vec<char> = if chars.len() > MAX_TITLE_CHARS {
        chars[..MAX_TITLE_CHARS - ELLIPSIS.chars().count()].iter().copied().chain(ELLIPSIS.chars()).collect()
    } else {
        chars
    };

    if let Some(at) = find_break_point(&formatted) {
        formatted.insert(at, '\n');
    }

    formatted.into_iter().collect()
}

/// Index to insert the line break at, if the text needs one.
///
/// When the character at [`LINE_BREAK_AT`] is itself a break character the
/// break lands after it, which leaves an empty second line for a text of
/// exactly `LINE_BREAK_AT + 1` characters.
fn find_break_point(chars: &[char]) -> Option<usize> {
    if chars.len() <= LINE_BREAK_AT {
        return None;
    }

    let lowest = LINE_BREAK_AT.saturating_sub(BREAK_SEARCH_WINDOW).max(1);
    let natural = (lowest..=LINE_BREAK_AT).rev().find(|&i| BREAK_CHARS.contains(&chars[i]));

    Some(natural.map_or(LINE_BREAK_AT, |i| i + 1))
}

/// Font size class for a (possibly wrapped) display text.
pub fn font_size_for(display_text: &str) -> FontSize {
    let longest = display_text.split('\n').map(|line| line.chars().count()).max().unwrap_or(0);
    FontSize::for_line_length(longest)
}
