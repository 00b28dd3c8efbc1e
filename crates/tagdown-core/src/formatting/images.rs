//! Image formatting.

use super::links::{title_part, ReferenceDefinitions};
use super::ReferenceTarget;
use crate::options::{LinkStyle, Options};

/// Renders `IMG` tags and owns the image reference definitions.
#[derive(Debug)]
pub struct ImageFormatter {
    references: ReferenceDefinitions,
}

impl Default for ImageFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageFormatter {
    pub fn new() -> Self {
        Self {
            references: ReferenceDefinitions::new("image-"),
        }
    }

    /// Render the image described by `target`; images without a source
    /// render nothing.
    pub fn image(&mut self, target: Option<&ReferenceTarget>, options: &Options) -> String {
        let Some(target) = target.filter(|t| !t.url.is_empty()) else {
            return String::new();
        };
        let alt = target.alt.as_deref().unwrap_or_default();

        match options.link_style {
            LinkStyle::Inlined => format!("![{}]({}{})", alt, target.url, title_part(target)),
            LinkStyle::Referenced => {
                let label = self.references.numbered(target);
                format!("![{}][{}]", alt, label)
            }
        }
    }

    /// Collected image definitions
    pub fn link_references(&self) -> String {
        self.references.render()
    }
}
