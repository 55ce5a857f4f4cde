use bitflags::bitflags;

use crate::{Error, Result};

bitflags! {
    /// Container header flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u8 {
        /// Symbol counts are stored as u64 rather than u32.
        const WIDE_COUNTS = 0b_0000_0001;

        /// The reader should recount the decoded symbols and check them
        /// against the stored table.
        const VERIFY = 0b_0000_0010;
    }
}

impl Flags {
    /// Return an error if any reserved bit is set.
    pub fn new(flag_byte: u8, offset: u64) -> Result<Flags> {
        match Flags::from_bits(flag_byte) {
            Some(flags) => Ok(flags),
            None => Err(Error::format(
                offset,
                format!("reserved bit set in flag byte: {flag_byte:08b}"),
            )),
        }
    }

    /// Width in bytes of one stored count.
    pub fn count_width(self) -> usize {
        if self.contains(Flags::WIDE_COUNTS) {
            8
        } else {
            4
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_bits() -> anyhow::Result<()> {
        let flags = Flags::new(0b_0000_0011, 3)?;
        assert!(flags.contains(Flags::WIDE_COUNTS | Flags::VERIFY));
        assert_eq!(flags.count_width(), 8);
        assert_eq!(Flags::new(0, 3)?.count_width(), 4);
        Ok(())
    }

    #[test]
    fn reserved_bits_are_rejected() {
        let err = Flags::new(0b_1000_0000, 3).unwrap_err();
        assert!(matches!(err, Error::Format { offset: 3, .. }), "{err}");
    }
}
