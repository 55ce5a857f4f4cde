use std::io;

/// Shorthand for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while compressing or decompressing.
///
/// Offsets are byte offsets into the frame (or container) being read, so a
/// corrupted file can be inspected at the right place.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed data: a frame that is too short, a bad trailing bit count,
    /// a bit path that leads nowhere, or a broken container header.
    #[error("malformed input at byte {offset}: {reason}")]
    Format { offset: u64, reason: String },

    /// A bit was requested after the last valid one was consumed.
    #[error("no more bits (stream ended at byte {offset})")]
    EndOfStream { offset: u64 },

    /// A code tree can't be built from zero symbols.
    #[error("cannot build a code tree from empty input")]
    EmptyInput,

    /// The bit writer was asked to emit more bytes than it's allowed to.
    #[error("output exceeded {limit} bytes (runaway writer?)")]
    CapacityExceeded { limit: u64 },

    /// An error yielded by the underlying input or output stream.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn format(offset: u64, reason: impl Into<String>) -> Self {
        Self::Format {
            offset,
            reason: reason.into(),
        }
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(e) => e,
            Error::EndOfStream { .. } => io::Error::new(io::ErrorKind::UnexpectedEof, e),
            Error::Format { .. } => io::Error::new(io::ErrorKind::InvalidData, e),
            _ => io::Error::new(io::ErrorKind::Other, e),
        }
    }
}
