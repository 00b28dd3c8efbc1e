//! Link formatting and reference definition bookkeeping.

use indexmap::IndexMap;

use super::ReferenceTarget;
use crate::options::{LinkReferenceStyle, LinkStyle, Options};

/// A collected `[label]: url "title"` definition
#[derive(Debug, Clone, PartialEq, Eq)]
struct Definition {
    url: String,
    title: Option<String>,
}

/// Reference definitions collected across a whole document.
///
/// Numeric labels are shared by identical url/title pairs, so the same
/// target linked twice produces a single definition.
#[derive(Debug)]
pub struct ReferenceDefinitions {
    prefix: &'static str,
    definitions: IndexMap<String, Definition>,
    next_id: usize,
}

impl ReferenceDefinitions {
    /// Create an empty collection whose numeric labels start with `prefix`
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            definitions: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Register `target` under a numeric label, reusing an existing one.
    pub fn numbered(&mut self, target: &ReferenceTarget) -> String {
        let definition = Definition {
            url: target.url.clone(),
            title: target.title.clone(),
        };
        if let Some((label, _)) = self.definitions.iter().find(|(_, d)| **d == definition) {
            return label.clone();
        }

        let label = format!("{}{}", self.prefix, self.next_id);
        self.next_id += 1;
        self.definitions.insert(label.clone(), definition);
        label
    }

    /// Register `target` under the text label itself.
    ///
    /// The first definition of a label wins, matching how Markdown resolves
    /// duplicate labels.
    pub fn labeled(&mut self, label: &str, target: &ReferenceTarget) {
        let key = label.to_lowercase();
        self.definitions.entry(key).or_insert_with(|| Definition {
            url: target.url.clone(),
            title: target.title.clone(),
        });
    }

    /// Definition block appended at the end of the document.
    ///
    /// Empty when nothing was collected, otherwise a leading newline followed
    /// by one definition per line.
    pub fn render(&self) -> String {
        let mut block = String::new();
        for (label, definition) in &self.definitions {
            block.push('\n');
            block.push('[');
            block.push_str(label);
            block.push_str("]: ");
            block.push_str(&definition.url);
            if let Some(title) = &definition.title {
                block.push_str(" \"");
                block.push_str(title);
                block.push('"');
            }
        }
        block
    }
}

/// Renders `A` tags and owns the link reference definitions.
#[derive(Debug)]
pub struct LinkFormatter {
    references: ReferenceDefinitions,
}

impl Default for LinkFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkFormatter {
    pub fn new() -> Self {
        Self {
            references: ReferenceDefinitions::new(""),
        }
    }

    /// Render link `text` pointing at `target`.
    ///
    /// Anchors without a URL (`<a name="...">`) pass their text through.
    pub fn link(&mut self, text: &str, target: Option<&ReferenceTarget>, options: &Options) -> String {
        let Some(target) = target.filter(|t| !t.url.is_empty()) else {
            return text.to_string();
        };

        match options.link_style {
            LinkStyle::Inlined => format!("[{}]({}{})", text, target.url, title_part(target)),
            LinkStyle::Referenced => {
                let label_text = text.trim();
                match options.link_reference_style {
                    LinkReferenceStyle::Collapsed if !label_text.is_empty() => {
                        self.references.labeled(label_text, target);
                        format!("[{}][]", text)
                    }
                    LinkReferenceStyle::Shortcut if !label_text.is_empty() => {
                        self.references.labeled(label_text, target);
                        format!("[{}]", text)
                    }
                    _ => {
                        let label = self.references.numbered(target);
                        format!("[{}][{}]", text, label)
                    }
                }
            }
        }
    }

    /// Collected link definitions, see [`ReferenceDefinitions::render`]
    pub fn link_references(&self) -> String {
        self.references.render()
    }
}

pub(super) fn title_part(target: &ReferenceTarget) -> String {
    target
        .title
        .as_ref()
        .map(|t| format!(" \"{}\"", t))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(url: &str) -> ReferenceTarget {
        ReferenceTarget::new(url)
    }

    #[test]
    fn test_full_reference_link() {
        let options = Options::default();
        let mut links = LinkFormatter::new();
        assert_eq!(links.link("click", Some(&target("http://x")), &options), "[click][1]");
        assert_eq!(links.link("other", Some(&target("http://y")), &options), "[other][2]");
        assert_eq!(links.link_references(), "\n[1]: http://x\n[2]: http://y");
    }

    #[test]
    fn test_same_target_shares_label() {
        let options = Options::default();
        let mut links = LinkFormatter::new();
        links.link("a", Some(&target("http://x")), &options);
        assert_eq!(links.link("b", Some(&target("http://x")), &options), "[b][1]");
        assert_eq!(links.link_references(), "\n[1]: http://x");
    }

    #[test]
    fn test_title_is_kept() {
        let options = Options::default();
        let mut links = LinkFormatter::new();
        let titled = ReferenceTarget::new("http://x").with_title("Home");
        links.link("home", Some(&titled), &options);
        assert_eq!(links.link_references(), "\n[1]: http://x \"Home\"");
    }

    #[test]
    fn test_collapsed_and_shortcut() {
        let mut links = LinkFormatter::new();
        let collapsed = Options {
            link_reference_style: LinkReferenceStyle::Collapsed,
            ..Default::default()
        };
        assert_eq!(links.link("Docs", Some(&target("/docs")), &collapsed), "[Docs][]");

        let shortcut = Options {
            link_reference_style: LinkReferenceStyle::Shortcut,
            ..Default::default()
        };
        assert_eq!(links.link("Blog", Some(&target("/blog")), &shortcut), "[Blog]");
        assert_eq!(links.link_references(), "\n[docs]: /docs\n[blog]: /blog");
    }

    #[test]
    fn test_inlined_link() {
        let options = Options {
            link_style: LinkStyle::Inlined,
            ..Default::default()
        };
        let mut links = LinkFormatter::new();
        assert_eq!(
            links.link("Link", Some(&target("https://example.com")), &options),
            "[Link](https://example.com)"
        );
        assert_eq!(links.link_references(), "");
    }

    #[test]
    fn test_anchor_without_url_passes_text() {
        let options = Options::default();
        let mut links = LinkFormatter::new();
        assert_eq!(links.link("plain", None, &options), "plain");
        assert_eq!(links.link("plain", Some(&target("")), &options), "plain");
        assert!(links.link_references().is_empty());
    }
}
