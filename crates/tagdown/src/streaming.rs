//! Streaming walker over lol_html.
//!
//! Uses Cloudflare's lol_html to see the input as a flat run of start tags,
//! text chunks and end tags, without building a DOM tree. Element handlers
//! report opens; an end-tag handler registered per element closes it along
//! with anything still open inside it; void elements are closed right away.
//!
//! End tags HTML lets authors omit are implied the way a parser would: a new
//! `li` closes the open item of the same list, `dd`/`dt` close their
//! siblings, and a block closes an open `p`. Elements still open at the end
//! of the input are closed innermost first.

use std::cell::RefCell;
use std::rc::Rc;

use lol_html::html_content::EndTag;
use lol_html::{doc_text, element, rewrite_str, EndTagHandler, RewriteStrSettings};
use tagdown_core::{Attributes, Converter, MarkdownSink};
use tracing::{trace, warn};

use crate::utilities::{decode_entities, is_block, is_void, SkipList, TextState};
use crate::{Result, TagdownError};

/// Elements an implied end tag never reaches across
const SCOPE_BOUNDARIES: &[&str] = &[
    "applet", "button", "caption", "html", "marquee", "object", "table", "td", "template", "th",
];

/// An element whose end has not been seen yet
#[derive(Debug)]
struct OpenElement {
    id: usize,
    name: String,
}

/// Shared state of one streaming pass
struct StreamState<S> {
    converter: Converter<S>,
    open: Vec<OpenElement>,
    next_id: usize,
    /// Depth inside skipped subtrees
    skipping: usize,
    text: TextState,
    /// First sink failure; later events are ignored
    error: Option<tagdown_core::Error>,
}

impl<S: MarkdownSink> StreamState<S> {
    fn new(converter: Converter<S>) -> Self {
        Self {
            converter,
            open: Vec::new(),
            next_id: 0,
            skipping: 0,
            text: TextState::default(),
            error: None,
        }
    }

    /// Open `name` after closing whatever it implicitly ends; returns its id.
    fn open_element(&mut self, name: &str, attrs: &Attributes) -> usize {
        self.imply_end_tags(name);

        let tag = name.to_ascii_uppercase();
        if let Some(space) = self.text.enter(name) {
            self.converter.convert_text(space);
        }
        self.converter.convert_open_tag(&tag, attrs);

        let id = self.next_id;
        self.next_id += 1;
        self.open.push(OpenElement {
            id,
            name: name.to_string(),
        });
        self.report_depth();
        id
    }

    fn imply_end_tags(&mut self, name: &str) {
        let mut implied = Vec::new();
        match name {
            "li" => implied.extend(self.find_open(&["li"], &["ol", "ul"])),
            "dd" | "dt" => implied.extend(self.find_open(&["dd", "dt"], &["dl"])),
            _ => {}
        }
        if is_block(name) {
            implied.extend(self.find_open(&["p"], &[]));
        }
        for id in implied {
            trace!(target: "tagdown::streaming", tag = name, "implying end tag");
            self.close_through(id);
        }
    }

    /// Nearest open element named in `targets`, unless a boundary comes first.
    fn find_open(&self, targets: &[&str], boundaries: &[&str]) -> Option<usize> {
        for element in self.open.iter().rev() {
            let name = element.name.as_str();
            if targets.contains(&name) {
                return Some(element.id);
            }
            if boundaries.contains(&name) || SCOPE_BOUNDARIES.contains(&name) {
                return None;
            }
        }
        None
    }

    /// Close the element `id` and everything opened inside it, innermost
    /// first. Does nothing when `id` was already closed.
    fn close_through(&mut self, id: usize) {
        let Some(position) = self.open.iter().rposition(|element| element.id == id) else {
            return;
        };
        while self.open.len() > position {
            self.close_element();
        }
    }

    fn close_element(&mut self) {
        let Some(element) = self.open.pop() else {
            return;
        };
        self.converter.convert_close_tag(&element.name.to_ascii_uppercase());
        self.text.leave(&element.name);
        self.report_depth();
    }

    fn text(&mut self, raw: &str) {
        if self.skipping > 0 || raw.is_empty() {
            return;
        }
        let decoded = decode_entities(raw);
        let accumulated = self.converter.accumulated();
        let line_start = accumulated.is_empty() || accumulated.ends_with('\n');
        if let Some(text) = self.text.prepare(&decoded, line_start) {
            self.converter.convert_text(&text);
        }
    }

    fn report_depth(&mut self) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.converter.on_tag_depth(self.open.len()) {
            self.error = Some(err);
        }
    }
}

/// Stream an HTML string through lol_html and feed its tag events into
/// `converter`, returning the converter once the input is exhausted.
///
/// The converter is not finished; call [`Converter::done`] on the result.
pub fn stream_html<S: MarkdownSink + 'static>(
    html: &str,
    converter: Converter<S>,
    skip: &SkipList,
) -> Result<Converter<S>> {
    let state = Rc::new(RefCell::new(StreamState::new(converter)));

    let state_for_element = Rc::clone(&state);
    let state_for_text = Rc::clone(&state);

    let result = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("*", |el| {
                let name = el.tag_name().to_ascii_lowercase();
                let skipped = skip.contains(&name);

                let opened = {
                    let mut state = state_for_element.borrow_mut();
                    if state.skipping > 0 {
                        return Ok(());
                    }
                    if skipped {
                        trace!(target: "tagdown::streaming", tag = name.as_str(), "skipping subtree");
                        None
                    } else {
                        let attrs: Attributes = el
                            .attributes()
                            .iter()
                            .map(|attr| (attr.name(), decode_entities(&attr.value()).into_owned()))
                            .collect();
                        Some(state.open_element(&name, &attrs))
                    }
                };

                if is_void(&name) {
                    if let Some(id) = opened {
                        state_for_element.borrow_mut().close_through(id);
                    }
                    return Ok(());
                }

                let state_for_end = Rc::clone(&state_for_element);
                match el.end_tag_handlers() {
                    Some(handlers) => {
                        if opened.is_none() {
                            state_for_element.borrow_mut().skipping += 1;
                        }
                        let handler: EndTagHandler<'static> =
                            Box::new(move |_end: &mut EndTag<'_>| {
                                let mut state = state_for_end.borrow_mut();
                                match opened {
                                    Some(id) => state.close_through(id),
                                    None => state.skipping = state.skipping.saturating_sub(1),
                                }
                                Ok(())
                            });
                        handlers.push(handler);
                    }
                    None => {
                        if let Some(id) = opened {
                            state_for_element.borrow_mut().close_through(id);
                        }
                    }
                }

                Ok(())
            })],
            document_content_handlers: vec![doc_text!(|chunk| {
                state_for_text.borrow_mut().text(chunk.as_str());
                Ok(())
            })],
            ..Default::default()
        },
    );

    drop(state_for_element);
    drop(state_for_text);
    if let Err(err) = result {
        return Err(TagdownError::Parse(err.to_string()));
    }

    let Ok(cell) = Rc::try_unwrap(state) else {
        return Err(TagdownError::Parse(
            "streaming state still shared after rewriting".to_string(),
        ));
    };
    let mut state = cell.into_inner();

    if !state.open.is_empty() {
        warn!(
            target: "tagdown::streaming",
            open = state.open.len(),
            "input ended with open elements"
        );
        while !state.open.is_empty() {
            state.close_element();
        }
    }

    match state.error {
        Some(err) => Err(err.into()),
        None => Ok(state.converter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tagdown_core::{ChunkSink, Options, StringSink};

    fn convert(html: &str) -> String {
        let converter = Converter::new(StringSink::new(), Options::default());
        let converter = stream_html(html, converter, &SkipList::default()).unwrap();
        converter.done().unwrap().into_string()
    }

    #[test]
    fn test_streaming_paragraph() {
        assert_eq!(convert("<p>Hello <strong>World</strong></p>"), "Hello **World**");
    }

    #[test]
    fn test_streaming_flushes_top_level_blocks() {
        let converter = Converter::new(ChunkSink::new(), Options::default());
        let converter =
            stream_html("<h2>Title</h2><p>Body</p>", converter, &SkipList::default()).unwrap();
        assert_eq!(converter.sink().chunks(), ["\n\n## Title", "\n\n\n\nBody"]);
    }

    #[test]
    fn test_streaming_void_elements() {
        assert_eq!(convert("<p>a<br>b</p><hr><p>c</p>"), "a  \nb\n\n* * *\n\nc");
    }

    #[test]
    fn test_streaming_skips_script() {
        assert_eq!(convert("<p>a</p><script>if (a < b) {}</script><p>b</p>"), "a\n\nb");
    }

    #[test]
    fn test_streaming_decodes_entities() {
        assert_eq!(convert("<p>Fish &amp; Chips</p>"), "Fish & Chips");
    }

    #[test]
    fn test_streaming_closes_unterminated_elements() {
        assert_eq!(convert("<p>open <em>end"), "open _end_");
    }

    #[test]
    fn test_streaming_implies_omitted_end_tags() {
        assert_eq!(convert("<ul><li>a<li>b</ul><p>c</p>"), "*   a\n*   b\n\nc");
        assert_eq!(convert("<p>one<p>two"), "one\n\ntwo");
        assert_eq!(convert("<p>intro<ul><li>x</li></ul>"), "intro\n\n*   x");
    }

    #[test]
    fn test_streaming_end_tag_closes_inner_elements() {
        assert_eq!(
            convert("<ol><li>a<ul><li>b</ol><p>c</p>"),
            "1.  a\n    *   b\n\nc"
        );
    }
}
