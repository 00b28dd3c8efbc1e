//! Output sinks receiving flushed Markdown chunks.

use std::io::Write;

use crate::Result;

/// Downstream consumer of the converter's output.
///
/// `append` is called zero or more times with order-preserving chunks, then
/// `done` exactly once.
pub trait MarkdownSink {
    fn append(&mut self, chunk: &str) -> Result<()>;

    fn done(&mut self) -> Result<()>;
}

impl<T: MarkdownSink + ?Sized> MarkdownSink for &mut T {
    fn append(&mut self, chunk: &str) -> Result<()> {
        (**self).append(chunk)
    }

    fn done(&mut self) -> Result<()> {
        (**self).done()
    }
}

/// Normalizes newlines across chunk boundaries: leading and trailing
/// newlines of the document are dropped and longer runs collapse to two.
#[derive(Debug, Default)]
struct NewlineCollapser {
    pending_newlines: usize,
    started: bool,
}

impl NewlineCollapser {
    fn push(&mut self, chunk: &str, out: &mut String) {
        for c in chunk.chars() {
            if c == '\n' {
                self.pending_newlines += 1;
                continue;
            }
            if self.started {
                for _ in 0..self.pending_newlines.min(2) {
                    out.push('\n');
                }
            }
            self.pending_newlines = 0;
            self.started = true;
            out.push(c);
        }
    }
}

/// Collects the whole document into a string.
#[derive(Debug, Default)]
pub struct StringSink {
    output: String,
    newlines: NewlineCollapser,
    done: bool,
}

impl StringSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    pub fn into_string(self) -> String {
        self.output
    }
}

impl MarkdownSink for StringSink {
    fn append(&mut self, chunk: &str) -> Result<()> {
        self.newlines.push(chunk, &mut self.output);
        Ok(())
    }

    fn done(&mut self) -> Result<()> {
        self.done = true;
        Ok(())
    }
}

/// Records every chunk verbatim.
#[derive(Debug, Default)]
pub struct ChunkSink {
    chunks: Vec<String>,
    done: bool,
}

impl ChunkSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Raw concatenation of all chunks
    pub fn joined(&self) -> String {
        self.chunks.concat()
    }
}

impl MarkdownSink for ChunkSink {
    fn append(&mut self, chunk: &str) -> Result<()> {
        self.chunks.push(chunk.to_string());
        Ok(())
    }

    fn done(&mut self) -> Result<()> {
        self.done = true;
        Ok(())
    }
}

/// Streams normalized chunks into any writer as they are flushed.
#[derive(Debug)]
pub struct WriteSink<W: Write> {
    writer: W,
    newlines: NewlineCollapser,
    scratch: String,
    /// Whether any text reached the writer
    wrote: bool,
}

impl<W: Write> WriteSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            newlines: NewlineCollapser::default(),
            scratch: String::new(),
            wrote: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MarkdownSink for WriteSink<W> {
    fn append(&mut self, chunk: &str) -> Result<()> {
        self.scratch.clear();
        self.newlines.push(chunk, &mut self.scratch);
        if self.scratch.is_empty() {
            return Ok(());
        }
        self.writer.write_all(self.scratch.as_bytes())?;
        self.wrote = true;
        Ok(())
    }

    fn done(&mut self) -> Result<()> {
        if self.wrote {
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_sink_normalizes_newlines() {
        let mut sink = StringSink::new();
        sink.append("\n\n# Title").unwrap();
        sink.append("\n\n\n\nBody").unwrap();
        sink.append("\n\n").unwrap();
        sink.done().unwrap();
        assert!(sink.is_done());
        assert_eq!(sink.into_string(), "# Title\n\nBody");
    }

    #[test]
    fn test_string_sink_keeps_single_newlines() {
        let mut sink = StringSink::new();
        sink.append("line  \nnext").unwrap();
        assert_eq!(sink.as_str(), "line  \nnext");
    }

    #[test]
    fn test_chunk_sink_records_raw_chunks() {
        let mut sink = ChunkSink::new();
        sink.append("\n\na").unwrap();
        sink.append("\n\nb").unwrap();
        assert_eq!(sink.chunks(), ["\n\na", "\n\nb"]);
        assert_eq!(sink.joined(), "\n\na\n\nb");
        assert!(!sink.is_done());
    }

    #[test]
    fn test_write_sink_streams() {
        let mut sink = WriteSink::new(Vec::new());
        sink.append("\n\nfirst").unwrap();
        sink.append("\n\n\nsecond").unwrap();
        sink.done().unwrap();
        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "first\n\nsecond\n");
    }

    #[test]
    fn test_write_sink_empty_document_writes_nothing() {
        let mut sink = WriteSink::new(Vec::new());
        sink.append("\n\n").unwrap();
        sink.done().unwrap();
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn test_sink_through_mut_ref() {
        let mut sink = ChunkSink::new();
        {
            let mut by_ref = &mut sink;
            by_ref.append("x").unwrap();
            MarkdownSink::done(&mut by_ref).unwrap();
        }
        assert!(sink.is_done());
    }
}
