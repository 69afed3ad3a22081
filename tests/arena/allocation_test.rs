/*!
 * Allocation Test
 * Chunk claiming, splitting and exhaustion through the public API
 */

use memarena::memory::Header;
use memarena::{
    Allocator, ArenaAllocator, ArenaConfig, MemoryError, MemoryInfo, MemoryResult,
    SystemAllocator, SystemHeap, UNIT_SIZE,
};
use pretty_assertions::assert_eq;
use std::ops::Range;

/// Heap that records every chunk request
#[derive(Default)]
struct RecordingHeap {
    inner: SystemHeap,
    requests: Vec<usize>,
}

impl SystemAllocator for RecordingHeap {
    fn request(&mut self, heap: &mut Vec<Header>, units: usize) -> MemoryResult<Range<usize>> {
        self.requests.push(units);
        self.inner.request(heap, units)
    }

    fn claimed(&self) -> usize {
        self.inner.claimed()
    }
}

fn fill<A: Allocator>(allocator: &mut A, sizes: &[usize]) -> Vec<memarena::Block> {
    sizes
        .iter()
        .map(|&bytes| allocator.allocate(bytes).expect("allocation failed"))
        .collect()
}

#[test]
fn test_chunks_are_claimed_lazily() {
    let mut arena = ArenaAllocator::with_system(RecordingHeap::default(), 32);
    assert!(arena.system().requests.is_empty());

    // 2 + 8 + 8 units fit in the first chunk
    let _blocks = fill(&mut arena, &[1, 100, 100]);
    assert_eq!(arena.system().requests, vec![32]);

    // 26 units do not fit in the 14 left
    let _more = fill(&mut arena, &[400]);
    assert_eq!(arena.system().requests, vec![32, 32]);
    assert_eq!(arena.system().claimed(), arena.claimed_units());
}

#[test]
fn test_oversized_request_claims_exact_units() {
    let mut arena = ArenaAllocator::with_system(RecordingHeap::default(), 32);
    let block = arena.allocate(1000).unwrap();

    // 63 payload units plus the header
    assert_eq!(arena.system().requests, vec![64]);
    assert_eq!(arena.block_units(&block), Some(64));
    assert_eq!(arena.free_block_count(), 0);
}

#[test]
fn test_live_blocks_do_not_overlap() {
    let mut arena = ArenaAllocator::new();
    let blocks = fill(&mut arena, &[1, 17, 33, 250, 0, 4096, 7]);

    let mut ranges: Vec<Range<usize>> = blocks
        .iter()
        .map(|block| {
            let start = block.offset() - 1;
            start..start + arena.block_units(block).unwrap()
        })
        .collect();
    ranges.sort_by_key(|range| range.start);

    for pair in ranges.windows(2) {
        assert!(
            pair[0].end <= pair[1].start,
            "blocks {:?} and {:?} overlap",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_payloads_are_independent() {
    let mut arena = ArenaAllocator::new();
    let a = arena.allocate(32).unwrap();
    let b = arena.allocate(32).unwrap();

    arena.bytes_mut(&a).fill(0xAA);
    arena.bytes_mut(&b).fill(0x55);

    assert!(arena.bytes(&a).iter().all(|&byte| byte == 0xAA));
    assert!(arena.bytes(&b).iter().all(|&byte| byte == 0x55));
    assert_eq!(arena.capacity_of(&a), 2 * UNIT_SIZE);
}

#[test]
fn test_next_fit_resumes_after_release() {
    let mut arena = ArenaAllocator::with_system(SystemHeap::unbounded(), 64);
    let _a = arena.allocate(16).unwrap(); // header 63
    let b = arena.allocate(16).unwrap(); // header 61
    let _c = arena.allocate(16).unwrap(); // header 59

    arena.release(b);
    // cursor sits before the freed block, so a fitting request takes it
    let d = arena.allocate(16).unwrap();
    assert_eq!(d.offset(), 62);
}

#[test]
fn test_budget_exhaustion_is_an_error() {
    let config = ArenaConfig::new().with_min_chunk_units(16).with_max_units(16);
    let mut arena = ArenaAllocator::with_config(&config);

    let _a = arena.allocate(200).unwrap(); // 14 units
    let err = arena.allocate(200).unwrap_err();

    assert!(matches!(err, MemoryError::OutOfMemory { limit: 16, .. }));
    assert!(err.to_string().starts_with("Out of memory"));
    assert_eq!(arena.stats().live_allocations, 1);
}

#[test]
fn test_trait_objects_see_the_same_state() {
    let mut arena = ArenaAllocator::new();
    let block = Allocator::allocate(&mut arena, 48).unwrap();

    let info: &dyn MemoryInfo = &arena;
    assert_eq!(info.claimed_units(), 1024);
    assert_eq!(info.free_block_count(), 1020);
    assert!(!info.is_fully_free());

    let mut slot = Some(block);
    Allocator::free(&mut arena, &mut slot);
    assert!(slot.is_none());
    assert!(MemoryInfo::is_fully_free(&arena));
}
