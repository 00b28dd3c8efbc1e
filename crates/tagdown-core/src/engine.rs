//! The conversion engine.
//!
//! [`Converter`] receives tag events in document order and drives the
//! accumulator and stash against the [`TagRegistry`]. Whenever the walker
//! reports depth 0 a top-level block has closed, and everything up to the
//! trailing newlines is flushed to the sink.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::accumulator::{Accumulator, Frame};
use crate::event::{Attributes, TagEvent};
use crate::formatting::Formatters;
use crate::options::Options;
use crate::registry::{Opened, Scope, TagRegistry};
use crate::sink::MarkdownSink;
use crate::Result;

pub struct Converter<S> {
    registry: Arc<TagRegistry>,
    formatters: Formatters,
    buffer: Accumulator,
    sink: S,
}

impl<S: MarkdownSink> Converter<S> {
    /// Create a converter using the standard tag vocabulary
    pub fn new(sink: S, options: Options) -> Self {
        Self::with_registry(TagRegistry::standard(), sink, options)
    }

    pub fn with_registry(registry: Arc<TagRegistry>, sink: S, options: Options) -> Self {
        Self {
            registry,
            formatters: Formatters::new(options),
            buffer: Accumulator::new(),
            sink,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.registry.has_tag(tag)
    }

    pub fn options(&self) -> &Options {
        &self.formatters.options
    }

    /// Text accumulated in the current nesting context
    pub fn accumulated(&self) -> &str {
        self.buffer.data()
    }

    /// Number of open capture scopes
    pub fn stash_depth(&self) -> usize {
        self.buffer.stash_depth()
    }

    pub fn frames(&self) -> &[Frame] {
        self.buffer.frames()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn convert_open_tag(&mut self, tag: &str, attrs: &Attributes) {
        let Some(rule) = self.registry.get(tag).copied() else {
            return;
        };
        trace!(target: "tagdown::engine", tag, depth = self.buffer.stash_depth(), "open");

        let mut target = None;
        if let Some(open) = rule.open {
            match open(&mut self.formatters, attrs) {
                Opened::Nothing => {}
                Opened::Fragment(fragment) => self.buffer.append(&fragment),
                Opened::Target(captured) => target = Some(captured),
            }
        }

        if rule.wraps_text() {
            self.buffer.save(tag, target);
        }
    }

    /// Append walker-produced text to the current context
    pub fn convert_text(&mut self, text: &str) {
        self.buffer.append(text);
    }

    pub fn convert_close_tag(&mut self, tag: &str) {
        let Some(rule) = self.registry.get(tag).copied() else {
            return;
        };
        trace!(target: "tagdown::engine", tag, depth = self.buffer.stash_depth(), "close");

        if let Some(text) = rule.text {
            let Some(captured) = self.buffer.restore() else {
                warn!(target: "tagdown::engine", tag, "close without a matching open, ignored");
                return;
            };
            if !captured.frame.tag().eq_ignore_ascii_case(tag) {
                warn!(
                    target: "tagdown::engine",
                    tag,
                    open = captured.frame.tag(),
                    "close does not match the innermost open tag"
                );
            }

            let scope = Scope::new(self.buffer.frames(), captured.frame.target());
            let fragment = text(&mut self.formatters, &captured.inner, &scope);
            self.buffer.append(&fragment);
        }

        if let Some(close) = rule.close {
            if let Some(fragment) = close(&mut self.formatters) {
                self.buffer.append(&fragment);
            }
        }
    }

    /// Flush completed text when a top-level block has closed.
    pub fn on_tag_depth(&mut self, depth: usize) -> Result<()> {
        if depth != 0 {
            return Ok(());
        }
        self.flush()
    }

    pub fn handle(&mut self, event: &TagEvent) -> Result<()> {
        match event {
            TagEvent::Open { name, attrs } => self.convert_open_tag(name, attrs),
            TagEvent::Text(text) => self.convert_text(text),
            TagEvent::Close { name } => self.convert_close_tag(name),
            TagEvent::Depth(depth) => return self.on_tag_depth(*depth),
        }
        Ok(())
    }

    /// Append the collected reference definitions, flush what is left and
    /// signal completion. Returns the sink.
    pub fn done(mut self) -> Result<S> {
        if self.buffer.stash_depth() > 0 {
            warn!(
                target: "tagdown::engine",
                open = self.buffer.stash_depth(),
                "finishing with unclosed tags"
            );
        }

        let links = self.formatters.links.link_references();
        let images = self.formatters.images.link_references();
        self.buffer.append("\n");
        self.buffer.append(&links);
        self.buffer.append("\n");
        self.buffer.append(&images);

        self.flush()?;
        self.sink.done()?;
        Ok(self.sink)
    }

    fn flush(&mut self) -> Result<()> {
        let chunk = self.buffer.take_flushable();
        if chunk.is_empty() {
            return Ok(());
        }
        debug!(target: "tagdown::engine", len = chunk.len(), "flush");
        self.sink.append(&chunk)
    }
}
