//! Sinks for the element stream.

use lsif_type::Entry;
use std::io::{self, Write};

/// Receives every element once, in emission order.
pub trait Emitter {
    fn emit(&mut self, entry: &Entry) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesEmitter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesEmitter<W> {
    pub fn new(out: W) -> Self {
        JsonLinesEmitter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Emitter for JsonLinesEmitter<W> {
    fn emit(&mut self, entry: &Entry) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, entry)?;
        self.out.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Keeps emitted elements in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryEmitter {
    pub entries: Vec<Entry>,
}

impl Emitter for MemoryEmitter {
    fn emit(&mut self, entry: &Entry) -> io::Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }
}

impl<E: Emitter + ?Sized> Emitter for &mut E {
    fn emit(&mut self, entry: &Entry) -> io::Result<()> {
        (**self).emit(entry)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}
