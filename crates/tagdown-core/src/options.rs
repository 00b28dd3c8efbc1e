//! Configuration options for the Markdown fragments the engine emits

use std::str::FromStr;

/// Heading style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingStyle {
    /// Use ATX-style headings (prefixed with #)
    #[default]
    Atx,
    /// Use setext-style headings (underlined with = or -)
    /// Only works for h1 and h2, falls back to ATX for h3-h6
    Setext,
}

/// Code block style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeBlockStyle {
    /// Use indented code blocks (4 spaces)
    #[default]
    Indented,
    /// Use fenced code blocks (```)
    Fenced,
}

/// Link style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    /// Use reference links [text][ref], definitions collected at the end
    #[default]
    Referenced,
    /// Use inline links [text](url)
    Inlined,
}

/// Reference style for referenced links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkReferenceStyle {
    /// Full reference: [text][label]
    #[default]
    Full,
    /// Collapsed reference: [text][]
    Collapsed,
    /// Shortcut reference: [text]
    Shortcut,
}

/// Options for Markdown fragment generation
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Heading style (atx or setext)
    pub heading_style: HeadingStyle,

    /// Horizontal rule string
    pub hr: String,

    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Code block style
    pub code_block_style: CodeBlockStyle,

    /// Fence string for fenced code blocks
    pub fence: String,

    /// Emphasis delimiter
    pub em_delimiter: char,

    /// Strong delimiter
    pub strong_delimiter: String,

    /// Link style
    pub link_style: LinkStyle,

    /// Reference style for referenced links
    pub link_reference_style: LinkReferenceStyle,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::Atx,
            hr: "* * *".to_string(),
            bullet_list_marker: '*',
            code_block_style: CodeBlockStyle::Indented,
            fence: "```".to_string(),
            em_delimiter: '_',
            strong_delimiter: "**".to_string(),
            link_style: LinkStyle::Referenced,
            link_reference_style: LinkReferenceStyle::Full,
        }
    }
}

/// Error returned when an option value cannot be parsed from a string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {option} value {value:?}, expected one of: {expected}")]
pub struct ParseOptionError {
    option: &'static str,
    value: String,
    expected: &'static str,
}

impl ParseOptionError {
    fn new(option: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            option,
            value: value.to_string(),
            expected,
        }
    }
}

impl FromStr for HeadingStyle {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "atx" => Ok(HeadingStyle::Atx),
            "setext" => Ok(HeadingStyle::Setext),
            _ => Err(ParseOptionError::new("heading style", s, "atx, setext")),
        }
    }
}

impl FromStr for CodeBlockStyle {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "indented" => Ok(CodeBlockStyle::Indented),
            "fenced" => Ok(CodeBlockStyle::Fenced),
            _ => Err(ParseOptionError::new("code block style", s, "indented, fenced")),
        }
    }
}

impl FromStr for LinkStyle {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "referenced" => Ok(LinkStyle::Referenced),
            "inlined" => Ok(LinkStyle::Inlined),
            _ => Err(ParseOptionError::new("link style", s, "referenced, inlined")),
        }
    }
}

impl FromStr for LinkReferenceStyle {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LinkReferenceStyle::Full),
            "collapsed" => Ok(LinkReferenceStyle::Collapsed),
            "shortcut" => Ok(LinkReferenceStyle::Shortcut),
            _ => Err(ParseOptionError::new(
                "link reference style",
                s,
                "full, collapsed, shortcut",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.heading_style, HeadingStyle::Atx);
        assert_eq!(options.link_style, LinkStyle::Referenced);
        assert_eq!(options.bullet_list_marker, '*');
        assert_eq!(options.strong_delimiter, "**");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("SETEXT".parse::<HeadingStyle>(), Ok(HeadingStyle::Setext));
        assert_eq!("Fenced".parse::<CodeBlockStyle>(), Ok(CodeBlockStyle::Fenced));
        assert_eq!("inlined".parse::<LinkStyle>(), Ok(LinkStyle::Inlined));
        assert_eq!(
            "shortcut".parse::<LinkReferenceStyle>(),
            Ok(LinkReferenceStyle::Shortcut)
        );
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        let err = "underlined".parse::<HeadingStyle>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid heading style value \"underlined\", expected one of: atx, setext"
        );
    }
}
