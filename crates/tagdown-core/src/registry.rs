//! Tag conversion registry.
//!
//! A [`TagRule`] is a record of up to three plain functions. The providers a
//! rule formats with are passed in on every call, so rules carry no state and
//! the standard table is built once and shared.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::accumulator::Frame;
use crate::event::Attributes;
use crate::formatting::{block, text, Formatters, ReferenceTarget};

/// Result of a rule's open action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opened {
    Nothing,
    /// Fragment appended to the accumulator right away
    Fragment(String),
    /// Target handed to the paired text action on close
    Target(ReferenceTarget),
}

/// Called with the tag's attributes when it opens
pub type OpenFn = fn(&mut Formatters, &Attributes) -> Opened;
/// Called with the captured inner text when the tag closes
pub type TextFn = fn(&mut Formatters, &str, &Scope<'_>) -> String;
/// Called after the text action when the tag closes
pub type CloseFn = fn(&mut Formatters) -> Option<String>;

/// What a text action can see besides the captured text.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    enclosing: &'a [Frame],
    target: Option<&'a ReferenceTarget>,
}

impl<'a> Scope<'a> {
    pub fn new(enclosing: &'a [Frame], target: Option<&'a ReferenceTarget>) -> Self {
        Self { enclosing, target }
    }

    /// Target captured by this tag's open action
    pub fn target(&self) -> Option<&'a ReferenceTarget> {
        self.target
    }

    /// Frames of the capturing tags around this one, outermost first
    pub fn enclosing(&self) -> &'a [Frame] {
        self.enclosing
    }

    /// Whether a capturing `tag` encloses this one
    pub fn is_within(&self, tag: &str) -> bool {
        self.enclosing
            .iter()
            .any(|frame| frame.tag().eq_ignore_ascii_case(tag))
    }
}

#[derive(Clone, Copy, Default)]
pub struct TagRule {
    pub open: Option<OpenFn>,
    pub text: Option<TextFn>,
    pub close: Option<CloseFn>,
}

impl TagRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_open(mut self, open: OpenFn) -> Self {
        self.open = Some(open);
        self
    }

    pub fn on_text(mut self, text: TextFn) -> Self {
        self.text = Some(text);
        self
    }

    pub fn on_close(mut self, close: CloseFn) -> Self {
        self.close = Some(close);
        self
    }

    /// Whether this rule captures and wraps its inner text
    pub fn wraps_text(&self) -> bool {
        self.text.is_some()
    }
}

impl fmt::Debug for TagRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagRule")
            .field("open", &self.open.is_some())
            .field("text", &self.text.is_some())
            .field("close", &self.close.is_some())
            .finish()
    }
}

static STANDARD: Lazy<Arc<TagRegistry>> = Lazy::new(|| Arc::new(TagRegistry::build_standard()));

/// Mapping from uppercase tag name to its conversion rule.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    rules: IndexMap<String, TagRule>,
}

impl TagRegistry {
    /// An empty registry; every tag passes through
    pub fn empty() -> Self {
        Self::default()
    }

    /// The shared table covering the supported HTML vocabulary
    pub fn standard() -> Arc<TagRegistry> {
        Arc::clone(&STANDARD)
    }

    /// Add or replace the rule for `tag`
    pub fn insert(&mut self, tag: &str, rule: TagRule) {
        self.rules.insert(tag.to_ascii_uppercase(), rule);
    }

    /// Remove the rule for `tag` so it passes through
    pub fn remove(&mut self, tag: &str) -> Option<TagRule> {
        self.rules.shift_remove(tag.to_ascii_uppercase().as_str())
    }

    pub fn with_rule(mut self, tag: &str, rule: TagRule) -> Self {
        self.insert(tag, rule);
        self
    }

    pub fn without(mut self, tag: &str) -> Self {
        self.remove(tag);
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Look up a rule, ignoring ASCII case
    pub fn get(&self, tag: &str) -> Option<&TagRule> {
        if tag.bytes().any(|b| b.is_ascii_lowercase()) {
            self.rules.get(tag.to_ascii_uppercase().as_str())
        } else {
            self.rules.get(tag)
        }
    }

    /// Registered tag names in registration order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn build_standard() -> Self {
        let emphasis = TagRule::new().on_text(|f, t, _| text::emphasis(t, &f.options));
        let bold = TagRule::new().on_text(|f, t, _| text::bold(t, &f.options));
        let code = TagRule::new().on_text(|_, t, scope| {
            if scope.is_within("PRE") {
                t.to_string()
            } else {
                text::code(t)
            }
        });
        let block_quote = TagRule::new().on_text(|_, t, _| block::prefix_with_block_quote(t));
        let list_close: CloseFn = |f| Some(f.lists.list_close().to_string());

        Self::empty()
            .with_rule("H1", TagRule::new().on_text(|f, t, _| text::header(t, 1, &f.options)))
            .with_rule("H2", TagRule::new().on_text(|f, t, _| text::header(t, 2, &f.options)))
            .with_rule("H3", TagRule::new().on_text(|f, t, _| text::header(t, 3, &f.options)))
            .with_rule("H4", TagRule::new().on_text(|f, t, _| text::header(t, 4, &f.options)))
            .with_rule("H5", TagRule::new().on_text(|f, t, _| text::header(t, 5, &f.options)))
            .with_rule("H6", TagRule::new().on_text(|f, t, _| text::header(t, 6, &f.options)))
            .with_rule(
                "BR",
                TagRule::new().on_open(|_, _| Opened::Fragment(text::line_break().to_string())),
            )
            .with_rule(
                "HR",
                TagRule::new().on_open(|f, _| Opened::Fragment(text::horizontal_rule(&f.options))),
            )
            .with_rule("CITE", emphasis)
            .with_rule("DFN", emphasis)
            .with_rule("EM", emphasis)
            .with_rule("I", emphasis)
            .with_rule("U", emphasis)
            .with_rule("VAR", emphasis)
            .with_rule("B", bold)
            .with_rule("STRONG", bold)
            .with_rule("Q", TagRule::new().on_text(|_, t, _| text::quote(t)))
            .with_rule(
                "PRE",
                TagRule::new().on_text(|f, t, _| block::prefix_with_block_code(t, &f.options)),
            )
            .with_rule("CODE", code)
            .with_rule("KBD", code)
            .with_rule("SAMP", code)
            .with_rule("BLOCKQUOTE", block_quote)
            .with_rule("DD", block_quote)
            .with_rule(
                "P",
                TagRule::new().on_open(|_, _| Opened::Fragment(text::paragraph().to_string())),
            )
            .with_rule(
                "LI",
                TagRule::new().on_text(|f, t, _| f.lists.list_item(t, &f.options)),
            )
            .with_rule(
                "OL",
                TagRule::new()
                    .on_open(|f, attrs| {
                        let start = attrs
                            .get("start")
                            .and_then(|s| s.trim().parse().ok())
                            .unwrap_or(1);
                        Opened::Fragment(f.lists.ordered_list(start).to_string())
                    })
                    .on_close(list_close),
            )
            .with_rule(
                "UL",
                TagRule::new()
                    .on_open(|f, _| Opened::Fragment(f.lists.unordered_list().to_string()))
                    .on_close(list_close),
            )
            .with_rule(
                "A",
                TagRule::new()
                    .on_open(|_, attrs| Opened::Target(ReferenceTarget::from_link(attrs)))
                    .on_text(|f, t, scope| f.links.link(t, scope.target(), &f.options)),
            )
            .with_rule(
                "IMG",
                TagRule::new()
                    .on_open(|_, attrs| Opened::Target(ReferenceTarget::from_image(attrs)))
                    .on_text(|f, _, scope| f.images.image(scope.target(), &f.options)),
            )
    }
}
