use std::io::Write;

use bitvec::{order::Msb0, slice::BitSlice};

use crate::{config::DEFAULT_MAX_OUTPUT_BYTES, Error, Result};

/// Packs individual bits into bytes, most significant bit first.
///
/// Full bytes go straight to the sink. [`finish`](Self::finish) writes the
/// partial last byte (even if it holds no bits) and one trailing byte with
/// the number of valid bits in it, so every frame is at least two bytes.
pub struct BitWriter<W: Write> {
    output: W,

    /// The byte being filled.
    current: u8,

    /// How many bits of `current` are in use.
    pending: u8,

    /// Bytes handed to `output` so far.
    bytes_written: u64,

    /// `bytes_written` may never exceed this.
    limit: u64,

    /// Set once the limit has been hit; every later call fails.
    exhausted: bool,
}

impl<W: Write> BitWriter<W> {
    pub fn new(output: W) -> Self {
        Self::with_limit(output, DEFAULT_MAX_OUTPUT_BYTES)
    }

    pub fn with_limit(output: W, limit: u64) -> Self {
        Self {
            output,
            current: 0,
            pending: 0,
            bytes_written: 0,
            limit,
            exhausted: false,
        }
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.check_capacity()?;

        self.pending += 1;
        if bit {
            self.current |= 1 << (8 - self.pending);
        }

        // Do we have a full byte?
        if self.pending == 8 {
            let byte = self.current;
            self.current = 0;
            self.pending = 0;
            self.emit(byte)?;
        }

        Ok(())
    }

    pub fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> Result<()> {
        for bit in bits.iter().by_vals() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Write the partial byte and the trailing bit count, and hand back the
    /// sink. Consuming `self` rules out writes after close.
    pub fn finish(mut self) -> Result<W> {
        self.check_capacity()?;

        let (last, valid_bits) = (self.current, self.pending);
        self.emit(last)?;
        self.emit(valid_bits)?;
        self.output.flush()?;

        tracing::debug!(
            frame_len = self.bytes_written,
            valid_bits,
            "bit frame closed"
        );

        Ok(self.output)
    }

    fn check_capacity(&self) -> Result<()> {
        if self.exhausted {
            Err(Error::CapacityExceeded { limit: self.limit })
        } else {
            Ok(())
        }
    }

    fn emit(&mut self, byte: u8) -> Result<()> {
        if self.bytes_written >= self.limit {
            self.exhausted = true;
            return Err(Error::CapacityExceeded { limit: self.limit });
        }

        self.output.write_all(&[byte])?;
        self.bytes_written += 1;
        Ok(())
    }
}
