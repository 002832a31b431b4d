//! Configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

/// Segment-pool sizing. Consumed by `chainbuf-mem`'s `SegmentPool`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Size of each segment the pool hands out (bytes). Chains are built
    /// from whole segments plus one trailing partial segment.
    pub segment_size: usize,

    /// Hard cap on live bytes across all chains. The pool must *never*
    /// exceed this.
    pub capacity_bytes: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            segment_size: 512,
            capacity_bytes: 1024 * 1024, // 1 MiB default
        }
    }
}

/// Growth policy for the stream writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriterPolicy {
    /// Extra bytes requested beyond the strict need when the writer grows
    /// the backend, so short appends don't reallocate every time.
    pub growth_headroom: usize,
}

impl Default for WriterPolicy {
    fn default() -> Self {
        Self { growth_headroom: 32 }
    }
}
