//! Stream containers driving the singular allocator per the container
//! contract: explicit reallocate before writing past capacity, lock/unlock
//! pairing, forward-only reads.

use chainbuf_core::config::{PoolConfig, WriterPolicy};
use chainbuf_core::error::Error as CoreError;
use chainbuf_core::netbuf::NetBuf;
use chainbuf_mem::{
    ByteBudget, DynamicNetBuf, ExternalChainNetBuf, FixedNetBuf, NetBufAllocator, SegmentPool,
};
use chainbuf_stream::{Error, NetBufReader, NetBufWriter};

#[test]
fn test_writer_into_fixed_backend() {
    let mut w = NetBufWriter::new(NetBufAllocator::new(FixedNetBuf::<64>::new()));

    let n = w.write(b"Hi2u").expect("write within capacity failed");
    assert_eq!(n, 4);
    assert_eq!(w.position(), 4);
    assert_eq!(&w.allocator().netbuf().data()[..4], b"Hi2u");
}

#[test]
fn test_writer_request_fails_on_fixed_backend() {
    let mut w = NetBufWriter::new(NetBufAllocator::new(FixedNetBuf::<64>::new()));

    let err = w.request(200).expect_err("fixed backends never grow");
    assert!(matches!(
        err,
        Error::Alloc(CoreError::FixedCapacity { .. })
    ));
}

#[test]
fn test_writer_grows_dynamic_backend_with_headroom() {
    let budget = ByteBudget::new(4096);
    let nb = DynamicNetBuf::new(&budget).expect("new failed");
    let mut w = NetBufWriter::with_policy(
        NetBufAllocator::new(nb),
        WriterPolicy { growth_headroom: 32 },
    );

    w.write(b"hello").expect("write failed");
    assert_eq!(w.position(), 5);
    // Headroom means capacity ran ahead of the strict need.
    assert_eq!(w.total_size(), 5 + 32);

    w.write(b" world!").expect("append failed");
    assert_eq!(w.position(), 12);
    // Second append fit inside the headroom; no further growth.
    assert_eq!(w.total_size(), 5 + 32);
}

#[test]
fn test_writer_headroom_falls_back_to_exact_request() {
    // Budget of exactly 100: the padded request (132) is refused, the exact
    // request (100) succeeds.
    let budget = ByteBudget::new(100);
    let nb = DynamicNetBuf::new(&budget).expect("new failed");
    let mut w = NetBufWriter::new(NetBufAllocator::new(nb));

    let payload = vec![7u8; 100];
    w.write(&payload).expect("exact-fit write failed");
    assert_eq!(w.total_size(), 100);
}

#[test]
fn test_writer_surfaces_exhaustion() {
    let budget = ByteBudget::new(16);
    let nb = DynamicNetBuf::new(&budget).expect("new failed");
    let mut w = NetBufWriter::new(NetBufAllocator::new(nb));

    let err = w.write(&[0u8; 64]).expect_err("64 > 16 budget must fail");
    assert!(matches!(err, Error::Alloc(CoreError::Exhausted { .. })));
    assert_eq!(w.position(), 0, "nothing was written");
}

#[test]
fn test_write_then_read_round_trip_dynamic() {
    let budget = ByteBudget::new(4096);
    let nb = DynamicNetBuf::new(&budget).expect("new failed");
    let mut w = NetBufWriter::new(NetBufAllocator::new(nb));

    w.write(b"hello world!").expect("write failed");
    let total = w.position();

    let mut r = NetBufReader::new(w.into_inner());
    let mut out = vec![0u8; total];
    assert_eq!(r.read(&mut out), total);
    assert_eq!(&out, b"hello world!");
    assert_eq!(r.remaining(), 0);
}

#[test]
fn test_writer_crosses_chain_chunk_boundaries() {
    let pool = SegmentPool::new(PoolConfig {
        segment_size: 16,
        capacity_bytes: 4096,
    });
    let chain = pool.alloc_chain(40).expect("alloc failed");
    let mut w = NetBufWriter::new(NetBufAllocator::new(ExternalChainNetBuf::bind(
        chain.clone(),
        true,
    )));

    let payload: Vec<u8> = (0..40).collect();
    w.write(&payload).expect("chunked write failed");

    let mut out = [0u8; 40];
    assert_eq!(chain.read_at(0, &mut out), 40);
    assert_eq!(out.as_slice(), payload.as_slice());
}

#[test]
fn test_writer_cannot_grow_external_chain() {
    let pool = SegmentPool::new(PoolConfig {
        segment_size: 16,
        capacity_bytes: 4096,
    });
    let chain = pool.alloc_chain(8).expect("alloc failed");
    let mut w = NetBufWriter::new(NetBufAllocator::new(ExternalChainNetBuf::bind(chain, false)));

    let err = w
        .write(&[1u8; 16])
        .expect_err("write past a non-growable chain must fail");
    assert!(matches!(err, Error::Alloc(CoreError::NotSupported(_))));
}

#[test]
fn test_reader_skip_and_remaining() {
    let budget = ByteBudget::new(4096);
    let nb = DynamicNetBuf::with_len(&budget, 10).expect("with_len failed");
    let mut r = NetBufReader::new(NetBufAllocator::new(nb));

    assert_eq!(r.remaining(), 10);
    r.skip(4);
    assert_eq!(r.position(), 4);
    assert_eq!(r.remaining(), 6);
    r.skip(100);
    assert_eq!(r.remaining(), 0, "skip clamps at the end");
}
