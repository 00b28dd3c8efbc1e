//! Formatting providers.
//!
//! Each provider renders the Markdown fragment for one semantic category.
//! `text` and `block` are pure functions of their input and the [`Options`];
//! lists, links and images keep the state they need across tag events.

pub mod block;
pub mod images;
pub mod links;
pub mod lists;
pub mod text;

pub use images::ImageFormatter;
pub use links::{LinkFormatter, ReferenceDefinitions};
pub use lists::ListFormatter;

use crate::event::Attributes;
use crate::options::Options;

/// The target of an `A` or `IMG` tag, captured when the tag opens and
/// consumed when its text is resolved on close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTarget {
    pub url: String,
    pub title: Option<String>,
    pub alt: Option<String>,
}

impl ReferenceTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Target of an anchor: `href` and `title`
    pub fn from_link(attrs: &Attributes) -> Self {
        Self {
            url: attrs.cleaned("href"),
            title: attrs.non_empty("title"),
            alt: None,
        }
    }

    /// Target of an image: `src`, `title` and `alt`
    pub fn from_image(attrs: &Attributes) -> Self {
        Self {
            url: attrs.cleaned("src"),
            title: attrs.non_empty("title"),
            alt: attrs.non_empty("alt"),
        }
    }
}

/// All formatting providers of one converter, injected into tag rules.
#[derive(Debug, Default)]
pub struct Formatters {
    pub options: Options,
    pub lists: ListFormatter,
    pub links: LinkFormatter,
    pub images: ImageFormatter,
}

impl Formatters {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            lists: ListFormatter::new(),
            links: LinkFormatter::new(),
            images: ImageFormatter::new(),
        }
    }
}
