use thiserror::Error;

/// Result type local to chainbuf-stream.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    // Backend-level grow/reallocate failures pass through unchanged so
    // callers can distinguish fixed-capacity from exhaustion.
    #[error("allocator error: {0}")]
    Alloc(#[from] chainbuf_core::error::Error),

    #[error("write of {requested} bytes cannot proceed at position {position}")]
    WriteStalled { requested: usize, position: usize },
}
