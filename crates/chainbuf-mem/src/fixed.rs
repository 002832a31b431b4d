//! Fixed-capacity single-chunk backend.

use chainbuf_core::error::{Error, Result};
use chainbuf_core::netbuf::NetBuf;

/// One preallocated chunk of `N` bytes. The whole chain is this chunk, so
/// `advance` never moves and `grow` always fails.
#[derive(Debug)]
pub struct FixedNetBuf<const N: usize> {
    buf: [u8; N],
}

impl<const N: usize> FixedNetBuf<N> {
    pub fn new() -> Self {
        Self { buf: [0; N] }
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for FixedNetBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> NetBuf for FixedNetBuf<N> {
    type Data<'a> = &'a [u8]
    where
        Self: 'a;
    type DataMut<'a> = &'a mut [u8]
    where
        Self: 'a;

    fn chunk_size(&self) -> usize {
        N
    }

    fn total_size(&self) -> usize {
        N
    }

    fn data(&self) -> Self::Data<'_> {
        &self.buf
    }

    fn data_mut(&mut self) -> Self::DataMut<'_> {
        &mut self.buf
    }

    fn advance(&mut self) -> bool {
        false
    }

    fn reset(&mut self) {}

    fn is_last(&self) -> bool {
        true
    }

    fn grow(&mut self, delta: usize, _extend_chain: bool) -> Result<()> {
        Err(Error::FixedCapacity {
            requested: delta,
            capacity: N,
        })
    }
}
