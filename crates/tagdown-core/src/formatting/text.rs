//! Inline and line-level Markdown fragments.

use crate::options::{HeadingStyle, Options};

/// Hard line break
pub fn line_break() -> &'static str {
    "  \n"
}

/// Separator emitted when a paragraph opens
pub fn paragraph() -> &'static str {
    "\n\n"
}

/// Thematic break using the configured rule string
pub fn horizontal_rule(options: &Options) -> String {
    format!("\n\n{}\n\n", options.hr)
}

/// Heading block for `level` (1-6).
///
/// Multi-line content is joined into a single line since neither heading
/// style can span lines. Blank content renders nothing.
pub fn header(text: &str, level: u8, options: &Options) -> String {
    let content = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if content.is_empty() {
        return String::new();
    }

    let level = level.clamp(1, 6);
    match options.heading_style {
        HeadingStyle::Setext if level <= 2 => {
            let underline = if level == 1 { "=" } else { "-" };
            format!(
                "\n\n{}\n{}\n\n",
                content,
                underline.repeat(content.chars().count())
            )
        }
        _ => format!("\n\n{} {}\n\n", "#".repeat(level as usize), content),
    }
}

pub fn emphasis(text: &str, options: &Options) -> String {
    let mut buf = [0u8; 4];
    wrap_flanked(text, options.em_delimiter.encode_utf8(&mut buf))
}

pub fn bold(text: &str, options: &Options) -> String {
    wrap_flanked(text, &options.strong_delimiter)
}

pub fn quote(text: &str) -> String {
    format!("\"{}\"", text)
}

/// Inline code span.
///
/// The backtick run is one longer than the longest run inside `text`, and
/// content touching a backtick is padded so the delimiters stay unambiguous.
pub fn code(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let max_consecutive_backticks = text
        .chars()
        .fold((0, 0), |(max, current), c| {
            if c == '`' {
                (max.max(current + 1), current + 1)
            } else {
                (max, 0)
            }
        })
        .0;

    let backticks = "`".repeat(max_consecutive_backticks + 1);

    if text.starts_with('`') || text.ends_with('`') {
        format!("{} {} {}", backticks, text, backticks)
    } else {
        format!("{}{}{}", backticks, text, backticks)
    }
}

/// Wrap `text` in `delimiter`, keeping flanking whitespace outside the
/// delimiters. Markdown does not recognize `_ x _` as emphasis.
fn wrap_flanked(text: &str, delimiter: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];
    format!("{leading}{delimiter}{trimmed}{delimiter}{trailing}")
}
