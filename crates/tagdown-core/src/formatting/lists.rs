//! List formatting.
//!
//! List tags interleave with their items: `OL`/`UL` emit a separator when
//! they open, each `LI` wraps its captured text with the marker of the
//! innermost open list, and the close pops that list again.

use crate::options::Options;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListLevel {
    ordered: bool,
    next_number: u32,
}

/// Tracks the currently open lists so items know their marker.
#[derive(Debug, Default)]
pub struct ListFormatter {
    levels: Vec<ListLevel>,
}

impl ListFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lists currently open
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn ordered_list(&mut self, start: u32) -> &'static str {
        self.open_level(true, start)
    }

    pub fn unordered_list(&mut self) -> &'static str {
        self.open_level(false, 1)
    }

    /// Render one item of the innermost list.
    ///
    /// Continuation lines (including nested lists) are indented by the width
    /// of the marker. An item outside of any list renders as a bullet.
    pub fn list_item(&mut self, text: &str, options: &Options) -> String {
        let marker = match self.levels.last_mut() {
            Some(level) if level.ordered => {
                let marker = format!("{}.  ", level.next_number);
                level.next_number = level.next_number.saturating_add(1);
                marker
            }
            _ => format!("{}   ", options.bullet_list_marker),
        };

        let indent = " ".repeat(marker.len());
        let content = text.trim_matches('\n').trim();
        let mut item = marker;
        for (i, line) in content.lines().enumerate() {
            if i > 0 {
                item.push('\n');
                if !line.trim().is_empty() {
                    item.push_str(&indent);
                }
            }
            item.push_str(line);
        }
        item.push('\n');
        item
    }

    pub fn list_close(&mut self) -> &'static str {
        self.levels.pop();
        if self.levels.is_empty() {
            "\n"
        } else {
            ""
        }
    }

    fn open_level(&mut self, ordered: bool, start: u32) -> &'static str {
        let nested = !self.levels.is_empty();
        self.levels.push(ListLevel {
            ordered,
            next_number: start,
        });
        if nested {
            "\n"
        } else {
            "\n\n"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unordered_items() {
        let options = Options::default();
        let mut lists = ListFormatter::new();
        assert_eq!(lists.unordered_list(), "\n\n");
        assert_eq!(lists.list_item("One", &options), "*   One\n");
        assert_eq!(lists.list_item(" Two ", &options), "*   Two\n");
        assert_eq!(lists.list_close(), "\n");
        assert_eq!(lists.depth(), 0);
    }

    #[test]
    fn test_ordered_items_count_from_start() {
        let options = Options::default();
        let mut lists = ListFormatter::new();
        lists.ordered_list(9);
        assert_eq!(lists.list_item("nine", &options), "9.  nine\n");
        assert_eq!(lists.list_item("ten", &options), "10.  ten\n");
    }

    #[test]
    fn test_ordered_numbers_stop_at_max() {
        let options = Options::default();
        let mut lists = ListFormatter::new();
        lists.ordered_list(u32::MAX);
        assert_eq!(lists.list_item("a", &options), "4294967295.  a\n");
        assert_eq!(lists.list_item("b", &options), "4294967295.  b\n");
    }

    #[test]
    fn test_nested_list_is_indented() {
        let options = Options::default();
        let mut lists = ListFormatter::new();
        lists.unordered_list();
        assert_eq!(lists.ordered_list(1), "\n");
        let inner = lists.list_item("inner", &options);
        assert_eq!(lists.list_close(), "");

        let outer = lists.list_item(&format!("outer\n{}", inner), &options);
        assert_eq!(outer, "*   outer\n    1.  inner\n");
    }

    #[test]
    fn test_item_outside_list_uses_bullet() {
        let options = Options {
            bullet_list_marker: '-',
            ..Default::default()
        };
        let mut lists = ListFormatter::new();
        assert_eq!(lists.list_item("loose", &options), "-   loose\n");
    }

    #[test]
    fn test_multi_paragraph_item() {
        let options = Options::default();
        let mut lists = ListFormatter::new();
        lists.unordered_list();
        assert_eq!(
            lists.list_item("\n\nfirst\n\nsecond", &options),
            "*   first\n\n    second\n"
        );
    }
}
