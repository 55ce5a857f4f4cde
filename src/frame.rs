//! The framed bit stream.
//!
//! ```text
//! +=========================+------+-------+
//! | full content bytes ...  | last | count |
//! +=========================+------+-------+
//! ```
//!
//! Bits are packed most significant first. `count` (0..=8) says how many
//! bits of `last` are valid. With nothing to write, the frame is `[0, 0]`.

mod reader;
mod writer;

pub use reader::BitReader;
pub use writer::BitWriter;

/// Length of the frame that encodes zero bits.
pub const MIN_FRAME_LEN: usize = 2;

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand_chacha::{
        rand_core::{RngCore, SeedableRng},
        ChaCha8Rng,
    };
    use test_case::test_case;

    use super::*;

    /// Write `n` random bits, then check the reader hands back exactly the
    /// same bits and `has_next` turns false right after the last one.
    #[test_case(0)]
    #[test_case(1)]
    #[test_case(7)]
    #[test_case(8)]
    #[test_case(9)]
    #[test_case(16)]
    #[test_case(1_000)]
    #[test_case(100_003)]
    fn writer_then_reader(n: usize) -> anyhow::Result<()> {
        let mut rng = ChaCha8Rng::seed_from_u64(n as u64);
        let bits: Vec<bool> = (0..n).map(|_| rng.next_u32() & 1 == 1).collect();

        let mut writer = BitWriter::new(vec![]);
        for &bit in &bits {
            writer.write_bit(bit)?;
        }
        let frame = writer.finish()?;
        assert_eq!(frame.len(), n / 8 + MIN_FRAME_LEN);

        let mut reader = BitReader::new(Cursor::new(frame))?;
        let mut read_back = Vec::with_capacity(n);
        while reader.has_next() {
            read_back.push(reader.read_bit()?);
        }
        assert_eq!(read_back, bits);
        assert!(reader.read_bit().is_err());

        Ok(())
    }
}
