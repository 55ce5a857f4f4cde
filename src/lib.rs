//! Lossless Huffman compression of byte streams.
//!
//! Compression counts symbol frequencies, merges the two lightest subtrees
//! until one code tree remains, and writes each symbol's root-to-leaf path
//! into a framed bit stream (see [`frame`]). Decompression walks the same
//! tree bit by bit.
//!
//! The bare frame doesn't carry its tree: [`compress`] hands the tree back
//! and [`decompress`] needs it. For files that decode on their own, use
//! [`pack`] and [`unpack`], which prepend the frequency table.
//!
//! ```
//! let compressed = huffman::compress(b"abracadabra")?;
//! let restored = huffman::decompress(&compressed.frame, &compressed.tree)?;
//! assert_eq!(restored, b"abracadabra");
//!
//! let packed = huffman::pack(b"abracadabra")?;
//! assert_eq!(huffman::unpack(packed.as_slice())?, b"abracadabra");
//! # Ok::<(), huffman::Error>(())
//! ```

mod bufread;
pub mod code_table;
pub mod config;
pub mod container;
pub mod decoder;
pub mod encoder;
mod errors;
pub mod frame;
pub mod frequency;
pub mod tree;

use std::{
    fs::File,
    io::{self, prelude::*, BufReader, BufWriter},
    path::Path,
};

use crate::bufread::BufReadAdapter;

pub use crate::{
    code_table::CodeTable,
    config::Options,
    decoder::Decompressor,
    encoder::{Compressed, Compressor},
    errors::{Error, Result},
    frame::{BitReader, BitWriter},
    frequency::FrequencyTable,
    tree::CodeTree,
};

/// One unit of the input alphabet.
pub type Symbol = u8;

/// Compress `input` into a bare frame. Keep the returned tree: the frame
/// can't be decoded without it.
pub fn compress(input: &[u8]) -> Result<Compressed> {
    Compressor::default().compress(input)
}

/// Decode a bare frame with the tree [`compress`] returned for it.
pub fn decompress(frame: &[u8], tree: &CodeTree) -> Result<Vec<u8>> {
    decoder::decompress(frame, tree, &Options::default())
}

/// Decode a bare frame lazily, as a `BufRead` of the original bytes.
pub fn decode<'t, R>(compressed_input: R, tree: &'t CodeTree) -> Result<impl BufRead + 't>
where
    R: BufRead + 't,
{
    let decoder = Decompressor::new(compressed_input, tree, &Options::default())?;
    Ok(BufReadAdapter::new(decoder))
}

/// Compress the file at `input_path` into a bare frame at `output_path`.
///
/// The input is read twice (count, then encode) rather than loaded whole.
/// On error the output file is left in an unspecified state.
pub fn compress_file(input_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<CodeTree> {
    let input = BufReader::new(File::open(input_path)?);
    let output = BufWriter::new(File::create(output_path)?);
    Compressor::default().compress_seekable(input, output)
}

/// Decompress the bare frame at `input_path` into `output_path`, returning
/// the number of bytes written. `tree` must be the one `compress_file`
/// returned for this frame.
pub fn decompress_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    tree: &CodeTree,
) -> Result<u64> {
    let input = BufReader::new(File::open(input_path)?);
    let output = BufWriter::new(File::create(output_path)?);
    decoder::decompress_to(input, tree, output, &Options::default())
}

/// Compress `input` into a self-describing container.
pub fn pack(input: &[u8]) -> Result<Vec<u8>> {
    container::pack(input, &Options::default())
}

/// Decode a container produced by [`pack`].
pub fn unpack(input: impl BufRead) -> Result<Vec<u8>> {
    container::unpack(input, &Options::default())
}

/// Pack the file at `input_path` into a container at `output_path`.
///
/// Like [`compress_file`], the input is read twice. On error the output file
/// is left in an unspecified state.
pub fn pack_file(input_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<()> {
    let input = BufReader::new(File::open(input_path)?);
    let output = BufWriter::new(File::create(output_path)?);
    container::pack_seekable(input, output, &Options::default())
}

/// Unpack the container at `input_path` into `output_path`, returning the
/// number of bytes written. No tree is needed: the container carries its own
/// frequency table. On error the output file is left in an unspecified state.
pub fn unpack_file(input_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<u64> {
    let input = BufReader::new(File::open(input_path)?);
    let output = BufWriter::new(File::create(output_path)?);
    container::unpack_to(input, output, &Options::default())
}

/// Read one byte, or `None` at EOF.
pub(crate) fn read_byte(mut input: impl BufRead) -> io::Result<Option<u8>> {
    let byte = loop {
        match input.fill_buf() {
            Ok(buf) => break buf.first().copied(),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    };
    if byte.is_some() {
        input.consume(1);
    }
    Ok(byte)
}

pub(crate) fn read_u16_le(mut input: impl BufRead) -> io::Result<u16> {
    let mut buf = [0; 2];
    input.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

pub(crate) fn read_u32_le(mut input: impl BufRead) -> io::Result<u32> {
    let mut buf = [0; 4];
    input.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

pub(crate) fn read_u64_le(mut input: impl BufRead) -> io::Result<u64> {
    let mut buf = [0; 8];
    input.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn decode_as_bufread() -> anyhow::Result<()> {
        let input = b"It was a bright cold day in April, and the clocks were striking thirteen.";
        let Compressed { tree, frame } = compress(input)?;

        let mut reader = decode(Cursor::new(frame), &tree)?;
        let mut first_line = String::new();
        reader.read_line(&mut first_line)?;
        assert_eq!(first_line.as_bytes(), input);
        Ok(())
    }

    #[test]
    fn decode_surfaces_corruption_as_io_errors() -> anyhow::Result<()> {
        let Compressed { tree, .. } = compress(b"aaabbc")?;
        // "1" then end: a truncated code.
        let mut reader = decode(Cursor::new([0b_1000_0000u8, 1]), &tree)?;
        let err = reader.read_to_end(&mut vec![]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        Ok(())
    }

    #[test]
    fn little_endian_helpers() -> anyhow::Result<()> {
        let bytes = [0x01u8, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(read_u16_le(&bytes[..])?, 0x0201);
        assert_eq!(read_u32_le(&bytes[..])?, 0x0403_0201);
        assert_eq!(read_u64_le(&bytes[..])?, 0x0807_0605_0403_0201);
        assert_eq!(read_byte(&[0u8; 0][..])?, None);
        assert!(read_u32_le(&bytes[..3]).is_err());
        Ok(())
    }
}
