//! Transport collaborator interfaces.
//!
//! The buffer core performs no network I/O. These traits describe the calls
//! a transport binding makes into this layer: sending materializes a
//! backend-backed stream's bytes, receiving hands over an externally-owned
//! buffer. Socket/endpoint setup belongs to the binding, not here.

use crate::error::Result;

/// Datagram send surface. Implementations copy or queue `payload`; they must
/// not retain any lock reference across their own queuing or timer work and
/// must re-lock after any wait.
pub trait DatagramTransport {
    type Endpoint;

    /// Send the materialized bytes of a stream to `endpoint`.
    fn send_to(&mut self, payload: &[u8], endpoint: &Self::Endpoint) -> Result<()>;
}

/// Sink invoked by a receive callback with an incoming buffer the network
/// stack owns.
///
/// Ownership of the buffer's reference transfers to the sink, so the receive
/// path binds an external-chain backend *without* bumping the reference
/// count. A sink that instead keeps the buffer past the callback's scope by
/// copying the handle must bump the count itself.
pub trait ReceiveSink<B> {
    type Endpoint;

    fn on_receive(&mut self, buffer: B, from: Self::Endpoint);
}
