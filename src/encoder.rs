use std::io::{self, BufRead, Seek, SeekFrom, Write};

use crate::{
    code_table::CodeTable,
    config::Options,
    frame::BitWriter,
    frequency::FrequencyTable,
    tree::CodeTree,
    Error, Result, Symbol,
};

/// The output of [`Compressor::compress`].
///
/// The frame does not describe its own tree: keep `tree` around to
/// decompress, or use the [container](crate::container) format instead.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub tree: CodeTree,
    pub frame: Vec<u8>,
}

/// Two passes over the input: one to count, one to encode.
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    options: Options,
}

impl Compressor {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn compress(&self, input: &[u8]) -> Result<Compressed> {
        let mut frame = vec![];
        let tree = self.compress_to(input, &mut frame)?;
        Ok(Compressed { tree, frame })
    }

    /// Compress an in-memory buffer, writing the frame to `output`.
    pub fn compress_to(&self, input: &[u8], output: impl Write) -> Result<CodeTree> {
        let tree = tree_for(&FrequencyTable::from_bytes(input))?;
        self.encode(input.iter().copied().map(Ok), &tree, output)?;
        Ok(tree)
    }

    /// Compress a source that can be rewound: count on the first pass, seek
    /// back to where it started, encode on the second. Nothing is buffered
    /// beyond what `input` itself buffers.
    pub fn compress_seekable<R, W>(&self, mut input: R, output: W) -> Result<CodeTree>
    where
        R: BufRead + Seek,
        W: Write,
    {
        let start = input.stream_position()?;
        let tree = tree_for(&FrequencyTable::from_reader(&mut input)?)?;

        input.seek(SeekFrom::Start(start))?;
        self.encode(Bytes::new(input), &tree, output)?;

        Ok(tree)
    }

    pub(crate) fn encode(
        &self,
        symbols: impl Iterator<Item = io::Result<Symbol>>,
        tree: &CodeTree,
        output: impl Write,
    ) -> Result<()> {
        let table = CodeTable::from_tree(tree);
        let mut writer = BitWriter::with_limit(output, self.options.max_output_bytes);

        for symbol in symbols {
            let symbol = symbol?;
            // Only happens if a rewound source changed between passes.
            let code = table.get(symbol).ok_or_else(|| {
                Error::format(
                    writer.bytes_written(),
                    format!("symbol {symbol:#04x} was not seen while counting"),
                )
            })?;
            writer.write_bits(code)?;
        }

        writer.finish()?;
        Ok(())
    }
}

/// The empty tree stands in for empty input, which encodes to zero bits.
fn tree_for(table: &FrequencyTable) -> Result<CodeTree> {
    if table.is_empty() {
        Ok(CodeTree::empty())
    } else {
        CodeTree::build(table)
    }
}

/// Byte-at-a-time iterator over a `BufRead`.
pub(crate) struct Bytes<R: BufRead> {
    input: R,
}

impl<R: BufRead> Bytes<R> {
    pub(crate) fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Iterator for Bytes<R> {
    type Item = io::Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        crate::read_byte(&mut self.input).transpose()
    }
}
