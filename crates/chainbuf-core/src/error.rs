use thiserror::Error;

/// Canonical result for the buffer core.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy shared by all backends and the allocator adapter.
///
/// Backend failures are always returned as values, never as panics. The
/// adapter does not retry internally; retry policy belongs to whatever
/// collaborator sits above it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("capacity exhausted: requested {requested} more bytes, capacity {capacity}, used {used}")]
    Exhausted {
        requested: usize,
        capacity: usize,
        used: usize,
    },

    #[error("fixed-capacity backend cannot grow by {requested} bytes (capacity {capacity})")]
    FixedCapacity { requested: usize, capacity: usize },

    #[error("operation not supported by this backend: {0}")]
    NotSupported(&'static str),

    #[error("internal invariant failed: {0}")]
    Invariant(String),
}
