/*!
 * Coalescing Test
 * Adjacent free blocks merge regardless of release order
 */

use memarena::{ArenaAllocator, Block, FreeBlock, SystemHeap};
use pretty_assertions::assert_eq;

/// Four 2-unit blocks at headers 63, 61, 59 and 57 above a free block at 1
fn fragmented() -> (ArenaAllocator, [Block; 4]) {
    let mut arena = ArenaAllocator::with_system(SystemHeap::unbounded(), 64);
    let blocks = [
        arena.allocate(16).unwrap(),
        arena.allocate(16).unwrap(),
        arena.allocate(16).unwrap(),
        arena.allocate(16).unwrap(),
    ];
    (arena, blocks)
}

fn expected_pair() -> Vec<FreeBlock> {
    vec![
        FreeBlock {
            address: 1,
            units: 56,
        },
        FreeBlock {
            address: 59,
            units: 4,
        },
    ]
}

#[test]
fn test_upper_then_lower_merge() {
    let (mut arena, [_a, b, c, _d]) = fragmented();
    arena.release(b);
    arena.release(c);
    assert_eq!(arena.free_blocks(), expected_pair());
}

#[test]
fn test_lower_then_upper_merge() {
    let (mut arena, [_a, b, c, _d]) = fragmented();
    arena.release(c);
    arena.release(b);
    assert_eq!(arena.free_blocks(), expected_pair());
}

#[test]
fn test_release_in_any_order_restores_one_block() {
    let orders: [[usize; 4]; 4] = [[0, 1, 2, 3], [3, 2, 1, 0], [1, 3, 0, 2], [2, 0, 3, 1]];

    for order in orders {
        let (mut arena, blocks) = fragmented();
        let mut slots: Vec<Option<Block>> = blocks.into_iter().map(Some).collect();
        for index in order {
            arena.free(&mut slots[index]);
        }

        assert_eq!(
            arena.free_blocks(),
            vec![FreeBlock {
                address: 1,
                units: 64
            }],
            "release order {:?}",
            order
        );
    }
}

#[test]
fn test_adjacent_chunks_merge() {
    let mut arena = ArenaAllocator::with_system(SystemHeap::unbounded(), 16);
    let a = arena.allocate(200).unwrap(); // 14 units of chunk 1..17
    let b = arena.allocate(200).unwrap(); // 14 units of chunk 17..33
    assert_eq!(arena.chunks().len(), 2);

    arena.release(a);
    arena.release(b);
    assert_eq!(
        arena.free_blocks(),
        vec![FreeBlock {
            address: 1,
            units: 32
        }]
    );
}

#[test]
fn test_gap_keeps_blocks_apart() {
    let (mut arena, [a, _b, c, _d]) = fragmented();
    arena.release(a);
    arena.release(c);

    let stats = arena.stats();
    assert_eq!(stats.free_blocks, 3);
    assert_eq!(stats.free_units, 60);
    assert_eq!(stats.live_allocations, 2);
}
