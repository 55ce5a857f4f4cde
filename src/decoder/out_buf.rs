/// A fixed size output buffer.
///
/// Decoded symbols are pushed one at a time; once the buffer is full the
/// caller "consumes" its contents into an owned chunk with `take()`.
pub struct OutBuf {
    buf: Vec<u8>,
    capacity: usize,
}

impl OutBuf {
    pub fn with_capacity(capacity: usize) -> Self {
        assert_ne!(capacity, 0);

        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() >= self.capacity
    }

    pub fn push(&mut self, byte: u8) {
        debug_assert!(!self.is_full());
        self.buf.push(byte);
    }

    /// Hand over the contents of the buffer, and reset it to be empty.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::replace(&mut self.buf, Vec::with_capacity(self.capacity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_and_resets() {
        let mut out = OutBuf::with_capacity(2);
        assert!(out.is_empty());
        out.push(1);
        assert!(!out.is_full());
        out.push(2);
        assert!(out.is_full());
        assert_eq!(out.take(), [1, 2]);
        assert!(out.is_empty());
    }
}
