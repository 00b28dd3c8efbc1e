//! TagdownService - the main entry point for HTML to Markdown conversion.

#[cfg(any(feature = "html", feature = "streaming"))]
use std::io::Write;
use std::sync::Arc;

use tagdown_core::{Converter, MarkdownSink, Options, TagRegistry, TagRule};
#[cfg(any(feature = "html", feature = "streaming"))]
use tagdown_core::{StringSink, WriteSink};
#[cfg(any(feature = "html", feature = "streaming"))]
use tracing::debug;

use crate::utilities::{escape_markdown, SkipList};
#[cfg(any(feature = "html", feature = "streaming"))]
use crate::Result;

/// Converts HTML documents with one set of options and rules.
#[derive(Debug, Clone)]
pub struct TagdownService {
    options: Options,
    registry: Arc<TagRegistry>,
    skip: SkipList,
}

impl TagdownService {
    /// Create a new TagdownService with default options
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create a TagdownService with custom options
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            registry: TagRegistry::standard(),
            skip: SkipList::default(),
        }
    }

    /// Add or replace the conversion rule for a tag
    pub fn add_rule(&mut self, tag: &str, rule: TagRule) -> &mut Self {
        Arc::make_mut(&mut self.registry).insert(tag, rule);
        self
    }

    /// Drop the rule for a tag; its content is still converted
    pub fn pass_through(&mut self, tag: &str) -> &mut Self {
        Arc::make_mut(&mut self.registry).remove(tag);
        self
    }

    /// Drop elements with this tag together with their content
    pub fn remove(&mut self, tag: &str) -> &mut Self {
        self.skip.insert(tag);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Escape markdown special characters in a string
    pub fn escape(&self, text: &str) -> String {
        escape_markdown(text, true)
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn skip_list(&self) -> &SkipList {
        &self.skip
    }

    /// A converter with this service's rules and options, for callers that
    /// produce tag events themselves
    pub fn converter<S: MarkdownSink>(&self, sink: S) -> Converter<S> {
        Converter::with_registry(Arc::clone(&self.registry), sink, self.options.clone())
    }

    /// Convert HTML to Markdown
    #[cfg(feature = "html")]
    pub fn convert_html(&self, html: &str) -> Result<String> {
        let mut converter = self.converter(StringSink::new());
        crate::html::walk_html(html, &mut converter, &self.skip)?;
        let markdown = converter.done()?.into_string();
        debug!(input = html.len(), output = markdown.len(), "converted html");
        Ok(markdown)
    }

    /// Convert HTML and write the Markdown to `writer` block by block.
    /// Returns the writer.
    #[cfg(feature = "html")]
    pub fn convert_html_to<W: Write>(&self, html: &str, writer: W) -> Result<W> {
        let mut converter = self.converter(WriteSink::new(writer));
        crate::html::walk_html(html, &mut converter, &self.skip)?;
        Ok(converter.done()?.into_inner())
    }

    /// Convert HTML to Markdown without building a DOM
    #[cfg(feature = "streaming")]
    pub fn convert_html_streaming(&self, html: &str) -> Result<String> {
        let converter = self.converter(StringSink::new());
        let converter = crate::streaming::stream_html(html, converter, &self.skip)?;
        let markdown = converter.done()?.into_string();
        debug!(input = html.len(), output = markdown.len(), "converted html stream");
        Ok(markdown)
    }

    /// Streaming conversion written to `writer` block by block. Returns the
    /// writer.
    #[cfg(feature = "streaming")]
    pub fn convert_html_streaming_to<W: Write + 'static>(&self, html: &str, writer: W) -> Result<W> {
        let converter = self.converter(WriteSink::new(writer));
        let converter = crate::streaming::stream_html(html, converter, &self.skip)?;
        Ok(converter.done()?.into_inner())
    }
}

impl Default for TagdownService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, feature = "html"))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tagdown_core::{HeadingStyle, LinkStyle};

    #[test]
    fn test_simple_paragraph() {
        let service = TagdownService::new();
        let result = service.convert_html("<p>Hello World</p>").unwrap();
        assert_eq!(result, "Hello World");
    }

    #[test]
    fn test_heading_atx() {
        let service = TagdownService::new();
        let result = service.convert_html("<h1>Title</h1>").unwrap();
        assert_eq!(result, "# Title");
    }

    #[test]
    fn test_heading_setext() {
        let options = Options {
            heading_style: HeadingStyle::Setext,
            ..Default::default()
        };
        let service = TagdownService::with_options(options);
        let result = service.convert_html("<h1>Title</h1>").unwrap();
        assert_eq!(result, "Title\n=====");
    }

    #[test]
    fn test_emphasis() {
        let service = TagdownService::new();
        let result = service.convert_html("<em>emphasized</em>").unwrap();
        assert_eq!(result, "_emphasized_");
    }

    #[test]
    fn test_strong() {
        let service = TagdownService::new();
        let result = service.convert_html("<strong>bold</strong>").unwrap();
        assert_eq!(result, "**bold**");
    }

    #[test]
    fn test_referenced_link() {
        let service = TagdownService::new();
        let result = service
            .convert_html(r#"<p><a href="https://example.com">Link</a></p>"#)
            .unwrap();
        assert_eq!(result, "[Link][1]\n\n[1]: https://example.com");
    }

    #[test]
    fn test_inline_link() {
        let options = Options {
            link_style: LinkStyle::Inlined,
            ..Default::default()
        };
        let service = TagdownService::with_options(options);
        let result = service
            .convert_html(r#"<a href="https://example.com">Link</a>"#)
            .unwrap();
        assert_eq!(result, "[Link](https://example.com)");
    }

    #[test]
    fn test_inline_code() {
        let service = TagdownService::new();
        let result = service.convert_html("<code>code</code>").unwrap();
        assert_eq!(result, "`code`");
    }

    #[test]
    fn test_horizontal_rule() {
        let service = TagdownService::new();
        let result = service.convert_html("<hr>").unwrap();
        assert_eq!(result, "* * *");
    }

    #[test]
    fn test_indented_code_block() {
        let service = TagdownService::new();
        let result = service
            .convert_html("<pre><code>function() {}</code></pre>")
            .unwrap();
        assert_eq!(result, "    function() {}");
    }

    #[test]
    fn test_ordered_list() {
        let service = TagdownService::new();
        let result = service
            .convert_html("<ol><li>One</li><li>Two</li></ol>")
            .unwrap();
        assert_eq!(result, "1.  One\n2.  Two");
    }

    #[test]
    fn test_add_rule_and_remove() {
        let mut service = TagdownService::new();
        service
            .add_rule("mark", TagRule::new().on_text(|_, t, _| format!("=={}==", t)))
            .remove("aside");
        let result = service
            .convert_html("<p><mark>hot</mark></p><aside>gone</aside>")
            .unwrap();
        assert_eq!(result, "==hot==");
        assert!(!TagRegistry::standard().has_tag("MARK"));
    }

    #[test]
    fn test_pass_through() {
        let mut service = TagdownService::new();
        service.pass_through("em");
        let result = service.convert_html("<p><em>plain</em></p>").unwrap();
        assert_eq!(result, "plain");
    }

    #[test]
    fn test_convert_html_to_writer() {
        let service = TagdownService::new();
        let out = service
            .convert_html_to("<p>one</p><p>two</p>", Vec::new())
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "one\n\ntwo\n");
    }

    #[test]
    fn test_empty_document_writes_nothing() {
        let service = TagdownService::new();
        let out = service.convert_html_to("  <script>x</script>\n", Vec::new()).unwrap();
        assert!(out.is_empty());
    }
}
