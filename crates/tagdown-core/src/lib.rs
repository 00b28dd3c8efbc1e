//! tagdown-core - streaming tag-event to Markdown conversion
//!
//! This crate holds the conversion state machine. A tree-walker (see the
//! `tagdown` crate) reports open tags, text, close tags and the current
//! nesting depth; the [`Converter`] turns them into Markdown and flushes every
//! completed top-level block to a [`MarkdownSink`] without waiting for the
//! rest of the document.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────┐   lookup   ┌──────────────┐
//! tag events ───▶ │  Converter   │ ─────────▶ │ TagRegistry  │
//!                 │              │            └──────┬───────┘
//!                 │ accumulator  │                   │ formats with
//!                 │ + stash      │            ┌──────▼───────┐
//!                 └──────┬───────┘            │  Formatters  │
//!                        │ depth 0            └──────────────┘
//!                        ▼
//!                  MarkdownSink
//! ```
//!
//! # Example
//!
//! ```rust
//! use tagdown_core::{Attributes, Converter, Options, StringSink};
//!
//! let mut converter = Converter::new(StringSink::new(), Options::default());
//! converter.convert_open_tag("P", &Attributes::new());
//! converter.convert_open_tag("STRONG", &Attributes::new());
//! converter.convert_text("hi");
//! converter.convert_close_tag("STRONG");
//! converter.convert_close_tag("P");
//! converter.on_tag_depth(0).unwrap();
//!
//! let markdown = converter.done().unwrap().into_string();
//! assert_eq!(markdown, "**hi**");
//! ```

mod accumulator;
mod engine;
mod event;
pub mod formatting;
mod options;
mod registry;
mod sink;

pub use accumulator::{Accumulator, Captured, Frame};
pub use engine::Converter;
pub use event::{Attributes, TagEvent};
pub use formatting::{Formatters, ReferenceTarget};
pub use options::{
    CodeBlockStyle, HeadingStyle, LinkReferenceStyle, LinkStyle, Options, ParseOptionError,
};
pub use registry::{CloseFn, OpenFn, Opened, Scope, TagRegistry, TagRule, TextFn};
pub use sink::{ChunkSink, MarkdownSink, StringSink, WriteSink};

/// Error type for conversion output
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to write markdown output: {0}")]
    Sink(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
