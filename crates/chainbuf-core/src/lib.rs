#![forbid(unsafe_code)]
//! chainbuf-core: contracts for chained network buffers.
//!
//! This crate defines only traits and shared types: the `NetBuf` buffer-chain
//! contract, the singular locking-allocator contract, memory-budget
//! interfaces, the error taxonomy, and configuration. Concrete backends, the
//! segment pool, and the allocator adapter live in `chainbuf-mem`; stream
//! containers live in `chainbuf-stream`.
//!
//! No I/O and no storage logic here, so any crate can depend on the API
//! without pulling in the pool or the adapter.

pub mod alloc;
pub mod budget;
pub mod config;
pub mod error;
pub mod netbuf;
pub mod prelude;
pub mod transport;

pub use error::{Error, Result};
