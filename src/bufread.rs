use std::{
    io::{self, prelude::*, Cursor},
    iter::Fuse,
};

/// Either a chunk of decoded output or an error.
pub(crate) type Item = io::Result<Vec<u8>>;

/// Presents an iterator of output chunks as a `BufRead`, so callers can
/// `io::copy` out of a decompressor.
pub struct BufReadAdapter<I: Iterator<Item = Item>> {
    /// What's left of the chunk being read.
    pending: Cursor<Vec<u8>>,

    /// Where later chunks come from. Fused so a finished decoder isn't asked
    /// again.
    source: Fuse<I>,
}

impl<I: Iterator<Item = Item>> BufReadAdapter<I> {
    pub fn new(source: I) -> Self {
        Self {
            pending: Cursor::default(),
            source: source.fuse(),
        }
    }
}

impl<I: Iterator<Item = Item>> BufRead for BufReadAdapter<I> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        // Skip over any empty chunks.
        while self.pending.fill_buf()?.is_empty() {
            match self.source.next() {
                Some(chunk) => self.pending = Cursor::new(chunk?),
                None => break,
            }
        }

        self.pending.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.pending.consume(amt);
    }
}

impl<I: Iterator<Item = Item>> Read for BufReadAdapter<I> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.fill_buf()?.read(buf)?;
        self.consume(n);

        Ok(n)
    }
}
