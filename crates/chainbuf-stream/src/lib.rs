#![forbid(unsafe_code)]
//! chainbuf-stream: writer/reader containers over the singular allocator.
//!
//! These are the container-side consumers of the
//! [`SingularAllocator`](chainbuf_core::alloc::SingularAllocator) contract:
//! they query `max_lock_size` (via the window length), pair every lock with
//! an unlock, and grow capacity only through explicit `reallocate` — never
//! from inside a lock.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{Error, Result};
pub use reader::NetBufReader;
pub use writer::NetBufWriter;
