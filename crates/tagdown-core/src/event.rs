//! Tag events delivered by a tree-walker.

use indexmap::IndexMap;

/// Attributes of an opening tag, keyed by lowercase name in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes of an anchor pointing at `href`
    pub fn link_target(href: impl Into<String>) -> Self {
        let mut attrs = Self::new();
        attrs.insert("href", href);
        attrs
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name.to_ascii_lowercase().as_str()).map(String::as_str)
    }

    /// Trimmed attribute value, empty when missing
    pub fn cleaned(&self, name: &str) -> String {
        self.get(name).map(|v| v.trim().to_string()).unwrap_or_default()
    }

    /// Trimmed attribute value, `None` when missing or blank
    pub fn non_empty(&self, name: &str) -> Option<String> {
        Some(self.cleaned(name)).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name.as_ref(), value);
        }
        attrs
    }
}

/// One step of a document walk, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    /// An element opened
    Open { name: String, attrs: Attributes },
    /// Text content, already collapsed and escaped by the walker
    Text(String),
    /// An element closed
    Close { name: String },
    /// Nesting depth after the last tag boundary
    Depth(usize),
}

impl TagEvent {
    pub fn open(name: impl Into<String>) -> Self {
        TagEvent::Open {
            name: name.into(),
            attrs: Attributes::new(),
        }
    }

    pub fn open_with(name: impl Into<String>, attrs: Attributes) -> Self {
        TagEvent::Open {
            name: name.into(),
            attrs,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        TagEvent::Text(text.into())
    }

    pub fn close(name: impl Into<String>) -> Self {
        TagEvent::Close { name: name.into() }
    }
}
