/// Default cap on bytes a single [`BitWriter`](crate::frame::BitWriter) may
/// emit. Large enough for any real file, small enough to stop an infinite
/// loop before it fills the disk.
pub const DEFAULT_MAX_OUTPUT_BYTES: u64 = 1_000_000_000;

/// Size of decompressed chunks (except possibly the last chunk, which may be
/// smaller).
pub const DEFAULT_OUT_CHUNK_SIZE: usize = 32 * 1024;

/// Knobs for compression and decompression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Upper bound on bytes written by the bit writer, trailer included.
    pub max_output_bytes: u64,

    /// Size of the chunks yielded by the decompressor.
    pub out_chunk_size: usize,

    /// Store container counts as u64 even when they all fit in a u32.
    pub wide_counts: bool,

    /// Set the container's VERIFY flag, so readers recount decoded symbols
    /// against the stored frequency table.
    pub verify: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
            out_chunk_size: DEFAULT_OUT_CHUNK_SIZE,
            wide_counts: false,
            verify: true,
        }
    }
}

impl Options {
    pub fn with_max_output_bytes(mut self, limit: u64) -> Self {
        self.max_output_bytes = limit;
        self
    }

    pub fn with_out_chunk_size(mut self, size: usize) -> Self {
        self.out_chunk_size = size;
        self
    }
}
