//! # tagdown
//!
//! Convert HTML to Markdown while the document is being read.
//!
//! The conversion engine lives in `tagdown-core` and only understands tag
//! events. This crate drives it from real HTML:
//!
//! - **`html`** (default): parse with scraper/html5ever and walk the tree
//! - **`streaming`**: walk the input as lol_html tokenizes it, no DOM at all
//!
//! Either walker reports the nesting depth after every element boundary, so
//! each top-level block reaches the output as soon as it closes.
//!
//! ## Example
//!
//! ```rust
//! use tagdown::TagdownService;
//!
//! let service = TagdownService::new();
//! let markdown = service.convert_html("<h1>Hello World</h1>").unwrap();
//! assert_eq!(markdown, "# Hello World");
//! ```
//!
//! ## Writing as you go
//!
//! ```rust
//! use tagdown::TagdownService;
//!
//! let service = TagdownService::new();
//! let out = service
//!     .convert_html_to("<p>one</p><p>two</p>", Vec::new())
//!     .unwrap();
//! assert_eq!(out, b"one\n\ntwo\n");
//! ```

#[cfg(feature = "html")]
pub mod html;
mod service;
#[cfg(feature = "streaming")]
pub mod streaming;
mod utilities;

#[cfg(feature = "html")]
pub use html::walk_html;
pub use service::TagdownService;
#[cfg(feature = "streaming")]
pub use streaming::stream_html;
pub use utilities::*;

pub use tagdown_core::{
    CodeBlockStyle, Converter, HeadingStyle, LinkReferenceStyle, LinkStyle, MarkdownSink,
    Options, TagRegistry, TagRule,
};

/// Error type for tagdown operations
#[derive(Debug, thiserror::Error)]
pub enum TagdownError {
    #[error(transparent)]
    Core(#[from] tagdown_core::Error),

    #[error("HTML parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TagdownError>;
