use std::io::BufRead;

use crate::{read_byte, Error, Result};

/// Reads a frame written by [`BitWriter`](super::BitWriter), one bit at a
/// time.
///
/// We need to look ahead 3 bytes: only once the byte after `next` turns out
/// to be EOF do we know that `next` is the trailing count of valid bits in
/// `current`.
pub struct BitReader<R: BufRead> {
    input: R,

    /// Byte currently being returned, bit by bit.
    current: u8,

    /// The byte after `current`. Once `after_next` is `None`, this is the
    /// number of bits of `current` still left to return.
    next: u8,

    /// The byte after `next`, or `None` at EOF.
    after_next: Option<u8>,

    /// Selects the next bit of `current` to return.
    mask: u8,

    /// Position of `current` within the frame.
    offset: u64,
}

impl<R: BufRead> BitReader<R> {
    pub fn new(mut input: R) -> Result<Self> {
        let too_short = |offset| Error::format(offset, "frame is shorter than two bytes");

        let current = read_byte(&mut input)?.ok_or_else(|| too_short(0))?;
        let next = read_byte(&mut input)?.ok_or_else(|| too_short(1))?;
        let after_next = read_byte(&mut input)?;

        let reader = Self {
            input,
            current,
            next,
            after_next,
            mask: 0b_1000_0000,
            offset: 0,
        };
        reader.check_trailer()?;

        Ok(reader)
    }

    /// Whether there's at least one more bit to read.
    pub fn has_next(&self) -> bool {
        self.after_next.is_some() || self.next != 0
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        let bit = self.current & self.mask != 0;
        match self.after_next {
            // Emptying the final content byte; `next` counts what's left of it.
            None => {
                if self.next == 0 {
                    return Err(Error::EndOfStream {
                        offset: self.offset + 1,
                    });
                }
                self.next -= 1;
                self.mask >>= 1;
            }
            Some(after_next) => {
                self.mask >>= 1;
                if self.mask == 0 {
                    self.advance(after_next)?;
                }
            }
        }
        Ok(bit)
    }

    /// Byte offset of the byte the next bit comes from.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    fn advance(&mut self, after_next: u8) -> Result<()> {
        self.mask = 0b_1000_0000;
        self.current = self.next;
        self.next = after_next;
        self.after_next = read_byte(&mut self.input)?;
        self.offset += 1;
        self.check_trailer()
    }

    fn check_trailer(&self) -> Result<()> {
        if self.after_next.is_none() && self.next > 8 {
            let msg = format!(
                "trailing bit count must be in 0..=8, found {} ({})",
                self.next,
                hex::encode([self.current, self.next]),
            );
            return Err(Error::format(self.offset + 1, msg));
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for BitReader<R> {
    type Item = Result<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_next() {
            Some(self.read_bit())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use test_case::test_case;

    use super::*;

    fn read_all(frame: &[u8]) -> Result<Vec<bool>> {
        BitReader::new(Cursor::new(frame))?.collect()
    }

    #[test_case(&[] ; "empty")]
    #[test_case(&[0x00] ; "one byte")]
    fn too_short(frame: &[u8]) {
        let err = read_all(frame).unwrap_err();
        assert!(matches!(err, Error::Format { .. }), "{err}");
    }

    #[test]
    fn empty_frame_has_no_bits() -> anyhow::Result<()> {
        let mut reader = BitReader::new(Cursor::new([0u8, 0]))?;
        assert!(!reader.has_next());
        assert!(matches!(
            reader.read_bit(),
            Err(Error::EndOfStream { offset: 1 })
        ));
        Ok(())
    }

    #[test]
    fn honours_trailing_count() -> anyhow::Result<()> {
        let bits = read_all(&[0b_1111_1111, 0b_0110_1111, 3])?;
        let mut expected = vec![true; 8];
        expected.extend([false, true, true]);
        assert_eq!(bits, expected);
        Ok(())
    }

    #[test]
    fn full_final_byte() -> anyhow::Result<()> {
        let bits = read_all(&[0b_1000_0001, 8])?;
        assert_eq!(
            bits,
            [true, false, false, false, false, false, false, true]
        );
        Ok(())
    }

    #[test]
    fn zero_padding_byte_yields_nothing() -> anyhow::Result<()> {
        // What the writer produces after exactly eight bits.
        let bits = read_all(&[0b_0101_0101, 0x00, 0])?;
        assert_eq!(bits.len(), 8);
        Ok(())
    }

    #[test]
    fn read_past_end_fails() -> anyhow::Result<()> {
        let mut reader = BitReader::new(Cursor::new([0b_1000_0000u8, 1]))?;
        assert!(reader.has_next());
        assert!(reader.read_bit()?);
        assert!(!reader.has_next());
        assert!(matches!(
            reader.read_bit(),
            Err(Error::EndOfStream { .. })
        ));
        Ok(())
    }

    #[test_case(&[0x00, 9] ; "at construction")]
    #[test_case(&[0xff, 0x00, 0x42] ; "after advancing")]
    fn bad_trailer(frame: &[u8]) {
        let err = read_all(frame).unwrap_err();
        assert!(matches!(err, Error::Format { .. }), "{err}");
    }
}
