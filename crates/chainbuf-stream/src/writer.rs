//! Append-position writer over a singular allocator.

use chainbuf_core::alloc::{AllocHandle, SingularAllocator};
use chainbuf_core::config::WriterPolicy;
use chainbuf_core::error::Error as CoreError;

use crate::error::{Error, Result};

/// Copies bytes into the bound allocation chunk-by-chunk, growing capacity
/// with an explicit `reallocate` before any write that would pass the
/// current total. Growth requests include the policy's headroom so short
/// appends don't reallocate every time; if the padded request is refused,
/// the writer retries with the exact need before giving up.
pub struct NetBufWriter<A: SingularAllocator> {
    alloc: A,
    pos: usize,
    policy: WriterPolicy,
}

impl<A: SingularAllocator> NetBufWriter<A> {
    pub fn new(alloc: A) -> Self {
        Self::with_policy(alloc, WriterPolicy::default())
    }

    pub fn with_policy(alloc: A, policy: WriterPolicy) -> Self {
        Self {
            alloc,
            pos: 0,
            policy,
        }
    }

    /// Absolute append position (bytes written so far).
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Current capacity of the bound allocation.
    pub fn total_size(&self) -> usize {
        self.alloc.size(AllocHandle::Bound)
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    pub fn into_inner(self) -> A {
        self.alloc
    }

    /// Ensure capacity for at least `needed` total bytes, growing with
    /// headroom. Never shrinks.
    pub fn request(&mut self, needed: usize) -> Result<()> {
        let total = self.alloc.size(AllocHandle::Bound);
        if needed <= total {
            return Ok(());
        }

        let padded = needed.saturating_add(self.policy.growth_headroom);
        match self.alloc.reallocate(AllocHandle::Bound, padded) {
            Ok(_) => Ok(()),
            Err(CoreError::Exhausted { .. }) => {
                // Headroom refused; the exact amount may still fit.
                self.alloc.reallocate(AllocHandle::Bound, needed)?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Append `bytes`, growing first if the write would pass capacity.
    /// Returns the number of bytes written (always `bytes.len()` on `Ok`).
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize> {
        self.request(self.pos + bytes.len())?;

        let mut written = 0;
        while written < bytes.len() {
            let mut window = self.alloc.lock(AllocHandle::Bound, self.pos, 0);
            let n = window.len().min(bytes.len() - written);
            window[..n].copy_from_slice(&bytes[written..written + n]);
            drop(window);
            self.alloc.unlock(AllocHandle::Bound);

            if n == 0 {
                // Capacity was granted but no chunk bytes are reachable at
                // this position; surface instead of spinning.
                return Err(Error::WriteStalled {
                    requested: bytes.len() - written,
                    position: self.pos,
                });
            }
            written += n;
            self.pos += n;
        }
        Ok(written)
    }

    /// Append a single byte.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write(std::slice::from_ref(&byte)).map(|_| ())
    }
}
