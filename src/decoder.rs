mod out_buf;

use std::io::{self, BufRead, Write};

use crate::{
    bufread::Item,
    config::Options,
    frame::BitReader,
    tree::{CodeTree, Node},
    Error, Result, Symbol,
};

use self::out_buf::OutBuf;

/// Walks the code tree one bit at a time, emitting a symbol at every leaf.
///
/// Implements iterator, producing chunks of decoded bytes.
pub struct Decompressor<'t, R: BufRead> {
    bits: BitReader<R>,
    tree: &'t CodeTree,
    out_buf: OutBuf,
    decoded: u64,
}

impl<'t, R: BufRead> Decompressor<'t, R> {
    /// Fails if `input` is too short to be a frame.
    pub fn new(input: R, tree: &'t CodeTree, options: &Options) -> Result<Self> {
        Ok(Self {
            bits: BitReader::new(input)?,
            tree,
            out_buf: OutBuf::with_capacity(options.out_chunk_size.max(1)),
            decoded: 0,
        })
    }

    /// Number of symbols decoded so far.
    pub fn decoded(&self) -> u64 {
        self.decoded
    }

    /// Return `Ok(None)` once every bit has been consumed.
    pub fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        let tree = self.tree;
        let Some(root) = tree.root() else {
            // Nothing to decode with. Fine as long as there's nothing to decode.
            if self.bits.has_next() {
                let msg = "frame carries bits but the code tree is empty";
                return Err(Error::format(self.bits.offset(), msg));
            }
            return Ok(None);
        };

        while !self.out_buf.is_full() {
            match self.next_symbol(root)? {
                Some(symbol) => {
                    self.out_buf.push(symbol);
                    self.decoded += 1;
                }
                None => break,
            }
        }

        if self.out_buf.is_empty() {
            tracing::debug!(symbols = self.decoded, "frame decoded");
            Ok(None)
        } else {
            Ok(Some(self.out_buf.take()))
        }
    }

    fn next_symbol(&mut self, root: &Node) -> Result<Option<Symbol>> {
        if !self.bits.has_next() {
            return Ok(None);
        }

        let start = self.bits.offset();
        let mut node = root;
        loop {
            let bit = self.bits.read_bit()?;
            node = node.child(bit).ok_or_else(|| {
                let msg = format!("bit {} leads to a missing child", u8::from(bit));
                Error::format(self.bits.offset(), msg)
            })?;

            if let Some(symbol) = node.symbol() {
                return Ok(Some(symbol));
            }

            if !self.bits.has_next() {
                let msg = "frame ends in the middle of a code";
                return Err(Error::format(start, msg));
            }
        }
    }
}

impl<'t, R: BufRead> Iterator for Decompressor<'t, R> {
    type Item = Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_chunk().map_err(io::Error::from).transpose()
    }
}

/// Decode a whole frame into memory.
pub fn decompress(frame: &[u8], tree: &CodeTree, options: &Options) -> Result<Vec<u8>> {
    let mut out = vec![];
    decompress_to(frame, tree, &mut out, options)?;
    Ok(out)
}

/// Decode the frame in `input` into `output`, returning the number of bytes
/// written.
pub fn decompress_to(
    input: impl BufRead,
    tree: &CodeTree,
    mut output: impl Write,
    options: &Options,
) -> Result<u64> {
    let mut decoder = Decompressor::new(input, tree, options)?;
    while let Some(chunk) = decoder.next_chunk()? {
        output.write_all(&chunk)?;
    }
    output.flush()?;
    Ok(decoder.decoded())
}
