//! DOM walker over scraper.
//!
//! Parses the input into an html5ever tree first, then walks it in document
//! order and reports every element boundary to the [`Converter`]. Each open
//! and close is followed by the number of elements still open, so a depth of
//! zero means a top-level element has just closed.

use scraper::{ElementRef, Html, Node};
use tagdown_core::{Attributes, Converter, MarkdownSink};
use tracing::trace;

use crate::utilities::{SkipList, TextState};
use crate::Result;

/// Walk an HTML string and feed its tag events into `converter`.
///
/// The converter is not finished; call [`Converter::done`] afterwards.
///
/// # Example
///
/// ```rust
/// use tagdown::{walk_html, SkipList};
/// use tagdown_core::{Converter, Options, StringSink};
///
/// let mut converter = Converter::new(StringSink::new(), Options::default());
/// walk_html("<h1>Hello <em>World</em></h1>", &mut converter, &SkipList::default()).unwrap();
///
/// let markdown = converter.done().unwrap().into_string();
/// assert_eq!(markdown, "# Hello _World_");
/// ```
pub fn walk_html<S: MarkdownSink>(
    html: &str,
    converter: &mut Converter<S>,
    skip: &SkipList,
) -> Result<()> {
    let document = Html::parse_fragment(html);
    let mut walker = DomWalker {
        converter,
        skip,
        text: TextState::default(),
    };
    walker.children(document.root_element(), 0)
}

struct DomWalker<'a, S> {
    converter: &'a mut Converter<S>,
    skip: &'a SkipList,
    text: TextState,
}

impl<S: MarkdownSink> DomWalker<'_, S> {
    fn children(&mut self, element: ElementRef<'_>, depth: usize) -> Result<()> {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.text(&text.text),
                Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        self.element(child_element, depth)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn element(&mut self, element: ElementRef<'_>, depth: usize) -> Result<()> {
        let name = element.value().name();
        if self.skip.contains(name) {
            trace!(target: "tagdown::html", tag = name, "skipping subtree");
            return Ok(());
        }

        let tag = name.to_ascii_uppercase();
        let attrs: Attributes = element.value().attrs().collect();

        if let Some(space) = self.text.enter(name) {
            self.converter.convert_text(space);
        }
        self.converter.convert_open_tag(&tag, &attrs);
        self.converter.on_tag_depth(depth + 1)?;

        self.children(element, depth + 1)?;

        self.converter.convert_close_tag(&tag);
        self.text.leave(name);
        self.converter.on_tag_depth(depth)?;
        Ok(())
    }

    fn text(&mut self, raw: &str) {
        let accumulated = self.converter.accumulated();
        let line_start = accumulated.is_empty() || accumulated.ends_with('\n');
        if let Some(text) = self.text.prepare(raw, line_start) {
            self.converter.convert_text(&text);
        }
    }
}
