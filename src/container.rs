//! A self-describing wrapper around the bit frame.
//!
//! A bare frame can only be decoded with the tree that produced it. The
//! container stores the frequency table up front instead, and the reader
//! rebuilds the same tree from it (tree building is deterministic).
//!
//! ```text
//! +---+---+-----+-------+---+---+================+=========+
//! | H | F | VER | FLAGS |   n   | n table entries | frame...|
//! +---+---+-----+-------+---+---+================+=========+
//! ```
//!
//! `n` is a little-endian u16. Each entry is a symbol byte followed by its
//! count, a little-endian u32 (or u64 with [`Flags::WIDE_COUNTS`]). Entries
//! are sorted by symbol, and every count is non-zero.

pub mod flags;

use std::io::{self, BufRead, Read, Seek, SeekFrom, Write};

use crate::{
    config::Options,
    decoder::Decompressor,
    encoder::{Bytes, Compressor},
    frequency::FrequencyTable,
    read_byte, read_u16_le, read_u32_le, read_u64_le,
    tree::CodeTree,
    Error, Result,
};

use self::flags::Flags;

pub const MAGIC: [u8; 2] = *b"HF";

pub const VERSION: u8 = 1;

/// Everything in front of the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub flags: Flags,
    pub table: FrequencyTable,
}

impl Header {
    pub fn new(table: FrequencyTable, options: &Options) -> Self {
        let mut flags = Flags::empty();
        if options.wide_counts || table.max_count() > u64::from(u32::MAX) {
            flags |= Flags::WIDE_COUNTS;
        }
        if options.verify {
            flags |= Flags::VERIFY;
        }
        Self { flags, table }
    }

    /// The tree the frame was (or will be) encoded with.
    pub fn tree(&self) -> Result<CodeTree> {
        if self.table.is_empty() {
            Ok(CodeTree::empty())
        } else {
            CodeTree::build(&self.table)
        }
    }

    pub fn write(&self, mut output: impl Write) -> io::Result<()> {
        output.write_all(&MAGIC)?;
        output.write_all(&[VERSION, self.flags.bits()])?;

        // At most 256 distinct byte values, so this always fits.
        let n = self.table.len() as u16;
        output.write_all(&n.to_le_bytes())?;

        let wide = self.flags.contains(Flags::WIDE_COUNTS);
        for (symbol, count) in self.table.iter() {
            output.write_all(&[symbol])?;
            if wide {
                output.write_all(&count.to_le_bytes())?;
            } else {
                output.write_all(&(count as u32).to_le_bytes())?;
            }
        }

        Ok(())
    }

    pub fn read(mut input: impl BufRead) -> Result<Self> {
        let mut magic = [0; 2];
        input
            .read_exact(&mut magic)
            .map_err(|e| truncated(e, 0))?;
        if magic != MAGIC {
            let msg = format!(
                "unrecognized magic. expected {}, got {}",
                hex::encode(MAGIC),
                hex::encode(magic)
            );
            return Err(Error::format(0, msg));
        }

        let version = read_byte(&mut input)?.ok_or_else(|| Error::format(2, "missing version"))?;
        if version != VERSION {
            let msg = format!("unsupported version. expected {VERSION}, got {version}");
            return Err(Error::format(2, msg));
        }

        let flag_byte = read_byte(&mut input)?.ok_or_else(|| Error::format(3, "missing flags"))?;
        let flags = Flags::new(flag_byte, 3)?;

        let n = read_u16_le(&mut input).map_err(|e| truncated(e, 4))?;
        if n > 256 {
            return Err(Error::format(4, format!("{n} symbols in a byte alphabet")));
        }

        let entry_len = 1 + flags.count_width() as u64;
        let mut counts = Vec::with_capacity(n as usize);
        let mut prev: Option<u8> = None;
        let mut total: u64 = 0;
        for i in 0..u64::from(n) {
            let offset = 6 + i * entry_len;
            let symbol = read_byte(&mut input)?
                .ok_or_else(|| Error::format(offset, "symbol table is truncated"))?;
            let count = if flags.contains(Flags::WIDE_COUNTS) {
                read_u64_le(&mut input)
            } else {
                read_u32_le(&mut input).map(u64::from)
            }
            .map_err(|e| truncated(e, offset + 1))?;

            if prev.is_some_and(|prev| symbol <= prev) {
                let msg = format!("symbol {symbol:#04x} is out of order or repeated");
                return Err(Error::format(offset, msg));
            }
            if count == 0 {
                let msg = format!("symbol {symbol:#04x} has a zero count");
                return Err(Error::format(offset + 1, msg));
            }
            total = total
                .checked_add(count)
                .ok_or_else(|| Error::format(offset + 1, "symbol counts overflow"))?;

            prev = Some(symbol);
            counts.push((symbol, count));
        }

        let header = Self {
            flags,
            table: FrequencyTable::from_counts(counts),
        };
        tracing::debug!(
            flags = ?header.flags,
            symbols = header.table.len(),
            total,
            "read container header"
        );
        Ok(header)
    }

    /// Size of the header in bytes.
    pub fn encoded_len(&self) -> u64 {
        6 + self.table.len() as u64 * (1 + self.flags.count_width() as u64)
    }
}

fn truncated(e: io::Error, offset: u64) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::format(offset, "container header is truncated")
    } else {
        Error::Io(e)
    }
}

pub fn pack(input: &[u8], options: &Options) -> Result<Vec<u8>> {
    let mut out = vec![];
    pack_to(input, &mut out, options)?;
    Ok(out)
}

pub fn pack_to(input: &[u8], mut output: impl Write, options: &Options) -> Result<()> {
    let header = Header::new(FrequencyTable::from_bytes(input), options);
    header.write(&mut output)?;

    let tree = header.tree()?;
    Compressor::new(options.clone()).encode(input.iter().copied().map(Ok), &tree, output)
}

/// Like [`pack_to`], but reads the input twice instead of holding it in
/// memory. Starts from the current position of `input`.
pub fn pack_seekable<R, W>(mut input: R, mut output: W, options: &Options) -> Result<()>
where
    R: BufRead + Seek,
    W: Write,
{
    let start = input.stream_position()?;
    let header = Header::new(FrequencyTable::from_reader(&mut input)?, options);
    header.write(&mut output)?;

    input.seek(SeekFrom::Start(start))?;
    let tree = header.tree()?;
    Compressor::new(options.clone()).encode(Bytes::new(input), &tree, output)
}

pub fn unpack(input: impl BufRead, options: &Options) -> Result<Vec<u8>> {
    let mut out = vec![];
    unpack_to(input, &mut out, options)?;
    Ok(out)
}

/// Decode a container into `output`, returning the number of bytes written.
pub fn unpack_to(mut input: impl BufRead, mut output: impl Write, options: &Options) -> Result<u64> {
    let header = Header::read(&mut input)?;
    let tree = header.tree()?;
    let frame_start = header.encoded_len();

    let verify = header.flags.contains(Flags::VERIFY);
    let mut seen = FrequencyTable::new();

    let mut decoder = Decompressor::new(input, &tree, options)
        .map_err(|e| shift_offset(e, frame_start))?;
    loop {
        let chunk = match decoder.next_chunk() {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => return Err(shift_offset(e, frame_start)),
        };
        if verify {
            seen.add_all(&chunk);
        }
        output.write_all(&chunk)?;
    }
    output.flush()?;

    if verify && seen != header.table {
        let msg = format!(
            "decoded {} symbols that don't match the stored table ({} symbols)",
            seen.total(),
            header.table.total()
        );
        return Err(Error::format(frame_start, msg));
    }

    Ok(decoder.decoded())
}

/// Frame offsets count from the start of the frame; report them relative to
/// the whole container.
fn shift_offset(e: Error, by: u64) -> Error {
    match e {
        Error::Format { offset, reason } => Error::Format {
            offset: offset + by,
            reason,
        },
        Error::EndOfStream { offset } => Error::EndOfStream { offset: offset + by },
        e => e,
    }
}
