//! Accumulator and stash.
//!
//! The accumulator is the text produced so far in the current nesting
//! context. Opening a tag whose rule wraps its inner text saves the
//! accumulator in a [`Frame`] and starts a fresh capture; closing it hands the
//! captured text back together with the frame so the wrapper can be applied
//! once to the fully resolved content.

use std::mem;

use crate::formatting::ReferenceTarget;

/// One saved capture scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    tag: String,
    depth: usize,
    target: Option<ReferenceTarget>,
    saved: String,
}

impl Frame {
    /// Uppercase name of the tag that opened this scope
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Number of frames below this one on the stash
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Link or image target captured when the tag opened
    pub fn target(&self) -> Option<&ReferenceTarget> {
        self.target.as_ref()
    }
}

/// Inner text of a closed scope together with the frame that held it
#[derive(Debug)]
pub struct Captured {
    pub frame: Frame,
    pub inner: String,
}

#[derive(Debug, Default)]
pub struct Accumulator {
    data: String,
    stash: Vec<Frame>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn append(&mut self, text: &str) {
        self.data.push_str(text);
    }

    /// Save the current text under `tag` and start an empty capture.
    pub fn save(&mut self, tag: &str, target: Option<ReferenceTarget>) {
        let frame = Frame {
            tag: tag.to_ascii_uppercase(),
            depth: self.stash.len(),
            target,
            saved: mem::take(&mut self.data),
        };
        self.stash.push(frame);
    }

    /// End the innermost capture: the saved text becomes current again and
    /// the captured text is returned. `None` when nothing was saved.
    pub fn restore(&mut self) -> Option<Captured> {
        let mut frame = self.stash.pop()?;
        let saved = mem::take(&mut frame.saved);
        let inner = mem::replace(&mut self.data, saved);
        Some(Captured { frame, inner })
    }

    /// Frames currently on the stash, outermost first
    pub fn frames(&self) -> &[Frame] {
        &self.stash
    }

    pub fn stash_depth(&self) -> usize {
        self.stash.len()
    }

    /// Remove and return the text up to its trailing newlines.
    ///
    /// The returned chunk is always a prefix of the accumulator; only the
    /// trailing newlines remain afterwards.
    pub fn take_flushable(&mut self) -> String {
        let len = self.data.trim_end_matches('\n').len();
        let chunk: String = self.data.drain(..len).collect();
        debug_assert!(self.data.bytes().all(|b| b == b'\n'));
        chunk
    }
}
