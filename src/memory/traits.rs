/*!
 * Memory Traits
 * Memory management abstractions
 */

use super::arena::{Block, Header};
use super::types::*;
use crate::core::types::{Address, Size, Units};
use std::ops::Range;

/// Source of raw memory for an arena
///
/// The only dependency outside the allocator core. Chunks are appended to the
/// end of `heap`, so they come out address-ordered.
pub trait SystemAllocator {
    /// Append `units` zeroed header units to `heap` and return their range
    fn request(&mut self, heap: &mut Vec<Header>, units: Units) -> MemoryResult<Range<Address>>;

    /// Units handed out so far
    fn claimed(&self) -> Units;
}

/// Variable-size allocator interface
pub trait Allocator {
    /// Allocate a block with at least `bytes` usable bytes
    fn allocate(&mut self, bytes: Size) -> MemoryResult<Block>;

    /// Return a block to the free list
    fn release(&mut self, block: Block);

    /// Release the held block, if any, and clear the slot
    fn free(&mut self, slot: &mut Option<Block>) {
        if let Some(block) = slot.take() {
            self.release(block);
        }
    }

    /// Size of a live block in units, header included
    fn block_units(&self, block: &Block) -> Option<Units>;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall arena statistics
    fn stats(&self) -> ArenaStats;

    /// Units currently on the free list
    fn free_block_count(&self) -> Units;

    /// Units ever claimed from the system allocator
    fn claimed_units(&self) -> Units;

    /// True when every claimed unit is back on the free list
    fn is_fully_free(&self) -> bool {
        self.free_block_count() == self.claimed_units()
    }
}
