//! Utility functions and constants shared by the HTML walkers.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "center", "dd", "dir", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "isindex", "li", "main", "menu",
    "nav", "noframes", "noscript", "ol", "output", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Elements that never have content or an end tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose whole subtree is dropped by default
pub const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Elements whose text is emitted unescaped
pub const CODE_ELEMENTS: &[&str] = &["code", "kbd", "samp"];

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\n\r\f]+").unwrap());

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,31});").unwrap()
});

/// Heading, quote, bullet, thematic break and setext underline starts
static BLOCK_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)(#|>|\+(?:\s|$)|-+(?:\s|$)|=+)").unwrap());

static ORDERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*\d+)([.)])(\s|$)").unwrap());

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

/// Check if a tag can never be closed by an end tag
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

/// Collapse every run of HTML whitespace into a single space
pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    WHITESPACE.replace_all(text, " ")
}

/// Decode character references left in raw text.
///
/// Numeric references and the common named ones are decoded; anything else is
/// kept as written.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    ENTITY.replace_all(text, |caps: &Captures<'_>| match decode_entity(&caps[1]) {
        Some(c) => c.to_string(),
        None => caps[0].to_string(),
    })
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(|c| c == 'x' || c == 'X') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code).filter(|&c| c != '\0');
    }
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "hellip" => '\u{2026}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "middot" => '\u{b7}',
        "bull" => '\u{2022}',
        "deg" => '\u{b0}',
        "times" => '\u{d7}',
        "euro" => '\u{20ac}',
        _ => return None,
    };
    Some(c)
}

/// Escape Markdown syntax in text.
///
/// Inline markers and `<` are always escaped. Block markers (`#`, `>`, `+`,
/// runs of `-` or `=`, `1.`, `1)`) only matter at the start of a line, so
/// they are escaped only when `line_start` is set.
pub fn escape_markdown(text: &str, line_start: bool) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    if !line_start {
        return result;
    }
    let escaped = BLOCK_MARKER.replace(&result, r"${1}\${2}");
    let escaped = ORDERED_MARKER.replace(&escaped, r"${1}\${2}${3}");
    escaped.into_owned()
}

/// Tags whose subtree the walkers drop entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipList {
    tags: Vec<String>,
}

impl SkipList {
    /// A list that skips nothing
    pub fn empty() -> Self {
        Self { tags: Vec::new() }
    }

    pub fn insert(&mut self, tag: &str) {
        let tag = tag.to_ascii_lowercase();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl Default for SkipList {
    fn default() -> Self {
        Self {
            tags: SKIPPED_ELEMENTS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Whitespace and escaping state of a walker's text nodes.
///
/// Text inside `pre` is passed through untouched. Elsewhere whitespace is
/// collapsed and held back until more inline content follows, so a block
/// boundary swallows the spaces on both of its sides.
#[derive(Debug)]
pub struct TextState {
    preformatted: usize,
    code: usize,
    /// No inline content since the last block boundary or line break
    at_boundary: bool,
    /// Collapsed whitespace seen but not emitted yet
    pending_space: bool,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            preformatted: 0,
            code: 0,
            at_boundary: true,
            pending_space: false,
        }
    }
}

impl TextState {
    /// Track an opening tag.
    ///
    /// Returns the held-back space when an inline element opens after text,
    /// which the walker emits ahead of the element's own markup.
    pub fn enter(&mut self, tag: &str) -> Option<&'static str> {
        let space = if self.pending_space && !breaks_line(tag) {
            self.pending_space = false;
            Some(" ")
        } else {
            None
        };
        self.track(tag, true);
        space
    }

    pub fn leave(&mut self, tag: &str) {
        self.track(tag, false);
    }

    fn track(&mut self, tag: &str, entering: bool) {
        let counter = if tag.eq_ignore_ascii_case("pre") {
            Some(&mut self.preformatted)
        } else if CODE_ELEMENTS.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            Some(&mut self.code)
        } else {
            None
        };
        if let Some(counter) = counter {
            *counter = if entering {
                *counter + 1
            } else {
                counter.saturating_sub(1)
            };
        }
        if breaks_line(tag) {
            self.at_boundary = true;
            self.pending_space = false;
        }
    }

    pub fn in_pre(&self) -> bool {
        self.preformatted > 0
    }

    /// Turn a raw text node into the text handed to the converter.
    ///
    /// `line_start` tells whether the text lands at the start of a line.
    /// Returns `None` when nothing is left to emit.
    pub fn prepare(&mut self, raw: &str, line_start: bool) -> Option<String> {
        if raw.is_empty() {
            return None;
        }
        if self.in_pre() {
            self.at_boundary = false;
            self.pending_space = false;
            return Some(raw.to_string());
        }

        let collapsed = collapse_whitespace(raw);
        if collapsed.starts_with(' ') && !self.at_boundary {
            self.pending_space = true;
        }
        let body = collapsed.trim_matches(' ');
        if body.is_empty() {
            return None;
        }

        let mut text = String::with_capacity(body.len() + 1);
        let spaced = self.pending_space;
        if spaced {
            text.push(' ');
        }
        if self.code > 0 {
            text.push_str(body);
        } else {
            text.push_str(&escape_markdown(body, line_start && !spaced));
        }
        self.at_boundary = false;
        self.pending_space = collapsed.ends_with(' ');
        Some(text)
    }
}

fn breaks_line(tag: &str) -> bool {
    is_block(tag) || tag.eq_ignore_ascii_case("br")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("*test*", false), "\\*test\\*");
        assert_eq!(escape_markdown("_test_", false), "\\_test\\_");
        assert_eq!(escape_markdown("[link]", false), "\\[link\\]");
        assert_eq!(escape_markdown("normal", false), "normal");
    }

    #[test]
    fn test_escape_block_markers_at_line_start() {
        assert_eq!(escape_markdown("# not a heading", true), "\\# not a heading");
        assert_eq!(escape_markdown("> not a quote", true), "\\> not a quote");
        assert_eq!(escape_markdown("- item", true), "\\- item");
        assert_eq!(escape_markdown("1. first", true), "1\\. first");
        assert_eq!(escape_markdown("-5 degrees", true), "-5 degrees");
        assert_eq!(escape_markdown("a # b", true), "a # b");
        assert_eq!(escape_markdown("# mid line", false), "# mid line");
    }

    #[test]
    fn test_escape_breaks_and_underlines() {
        assert_eq!(escape_markdown("---", true), "\\---");
        assert_eq!(escape_markdown("-- ", true), "\\-- ");
        assert_eq!(escape_markdown("===", true), "\\===");
        assert_eq!(escape_markdown("--flag", true), "--flag");
        assert_eq!(escape_markdown("a --- b", true), "a --- b");
        assert_eq!(escape_markdown("---", false), "---");
    }

    #[test]
    fn test_escape_parenthesis_ordered_marker() {
        assert_eq!(escape_markdown("1) item", true), "1\\) item");
        assert_eq!(escape_markdown("12)", true), "12\\)");
        assert_eq!(escape_markdown("1)x", true), "1)x");
        assert_eq!(escape_markdown("1) item", false), "1) item");
    }

    #[test]
    fn test_escape_angle_bracket() {
        assert_eq!(escape_markdown("a < b", false), "a \\< b");
        assert_eq!(escape_markdown("<div>", true), "\\<div>");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a \n\t b"), "a b");
        assert_eq!(collapse_whitespace("  "), " ");
        assert!(matches!(collapse_whitespace("ab"), Cow::Borrowed("ab")));
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;p&gt;"), "<p>");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("&unknown; &"), "&unknown; &");
        assert_eq!(decode_entities("&nbsp;"), "\u{a0}");
    }

    #[test]
    fn test_is_block() {
        assert!(is_block("div"));
        assert!(is_block("p"));
        assert!(is_block("DIV"));
        assert!(!is_block("span"));
        assert!(!is_block("a"));
    }

    #[test]
    fn test_is_void() {
        assert!(is_void("br"));
        assert!(is_void("img"));
        assert!(is_void("HR"));
        assert!(is_void("wbr"));
        assert!(!is_void("div"));
        assert!(!is_void("p"));
    }

    #[test]
    fn test_skip_list() {
        let mut skip = SkipList::default();
        assert!(skip.contains("SCRIPT"));
        assert!(!skip.contains("nav"));
        skip.insert("NAV");
        skip.insert("nav");
        assert!(skip.contains("nav"));
        assert_eq!(skip.iter().filter(|t| *t == "nav").count(), 1);
        assert!(!SkipList::empty().contains("script"));
    }

    #[test]
    fn test_text_state_whitespace() {
        let mut state = TextState::default();
        assert_eq!(state.prepare("  \n ", true), None);
        assert_eq!(state.prepare("  hello  world ", true).as_deref(), Some("hello world"));
        assert_eq!(state.prepare(" again", false).as_deref(), Some(" again"));

        assert_eq!(state.enter("p"), None);
        assert_eq!(state.prepare(" inside", true).as_deref(), Some("inside"));
    }

    #[test]
    fn test_text_state_holds_trailing_space() {
        let mut state = TextState::default();
        assert_eq!(state.prepare("first \n ", true).as_deref(), Some("first"));
        assert_eq!(state.enter("em"), Some(" "));
        assert_eq!(state.prepare("x ", false).as_deref(), Some("x"));
        state.leave("em");
        assert_eq!(state.prepare("\n", false), None);

        assert_eq!(state.enter("p"), None);
        assert_eq!(state.prepare("second", true).as_deref(), Some("second"));
        assert_eq!(state.prepare(" ", false), None);
        state.leave("p");
        assert_eq!(state.prepare("third", true).as_deref(), Some("third"));
    }

    #[test]
    fn test_text_state_pre_and_code() {
        let mut state = TextState::default();
        assert_eq!(state.enter("pre"), None);
        assert_eq!(state.prepare("  a *b*\n", true).as_deref(), Some("  a *b*\n"));
        state.leave("pre");

        assert_eq!(state.enter("code"), None);
        assert_eq!(state.prepare("x  *y*", false).as_deref(), Some("x *y*"));
        state.leave("code");
        assert_eq!(state.prepare("*z*", false).as_deref(), Some("\\*z\\*"));
    }
}
