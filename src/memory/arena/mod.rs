/*!
 * Arena Allocator
 *
 * Free-list allocator over an arena of header units.
 *
 * ## Layout
 *
 * The arena is one buffer of 16-byte [`Header`] units addressed by index.
 * Index 0 holds the sentinel base header (size 0). Chunks claimed from the
 * [`SystemAllocator`] are appended behind it, so addresses grow with claim
 * order. Every block is a header followed by `size - 1` payload units.
 *
 * ## Free list
 *
 * - **Circular and address ordered**, rooted at the sentinel
 * - **Next-fit**: searches resume from the entry where the last one ended
 * - **Tail splitting**: a larger block keeps its address and gives away its
 *   highest units
 * - **Coalescing**: released blocks merge with both free neighbours
 *
 * Chunks are kept until the allocator is dropped.
 */

mod allocator;
mod block;
mod diagnostics;
mod header;
mod release;
mod system;

pub use block::Block;
pub use diagnostics::FreeListView;
pub use header::{units_for, Header, UNIT_SIZE};
pub use system::SystemHeap;

use super::config::ArenaConfig;
use super::traits::{Allocator, MemoryInfo, SystemAllocator};
use super::types::{ArenaStats, MemoryResult};
use crate::core::limits::{BASE_ADDRESS, MIN_CHUNK_UNITS};
use crate::core::types::{Address, Size, Units};
use std::ops::Range;
use tracing::{debug, info};

/// Free-list allocator over a single arena
pub struct ArenaAllocator<S: SystemAllocator = SystemHeap> {
    /// Header units; index 0 is the sentinel
    heap: Vec<Header>,
    /// Free-list entry where the next search starts
    cursor: Address,
    /// Units ever claimed from the system allocator
    claimed: Units,
    /// Chunk ranges in claim order
    chunks: Vec<Range<Address>>,
    /// Blocks handed out and not yet released
    live: usize,
    min_chunk_units: Units,
    system: S,
}

impl ArenaAllocator<SystemHeap> {
    /// Allocator over the process heap with default chunk size
    pub fn new() -> Self {
        Self::with_system(SystemHeap::unbounded(), MIN_CHUNK_UNITS)
    }

    /// Allocator configured from an [`ArenaConfig`]
    pub fn with_config(config: &ArenaConfig) -> Self {
        let system = match config.max_units {
            Some(limit) => SystemHeap::with_limit(limit),
            None => SystemHeap::unbounded(),
        };
        Self::with_system(system, config.min_chunk_units)
    }
}

impl<S: SystemAllocator> ArenaAllocator<S> {
    /// Allocator drawing chunks of at least `min_chunk_units` from `system`
    pub fn with_system(system: S, min_chunk_units: Units) -> Self {
        let min_chunk_units = min_chunk_units.max(1);
        debug!(min_chunk_units, "Arena allocator initialized");
        Self {
            heap: vec![Header::SENTINEL],
            cursor: BASE_ADDRESS,
            claimed: 0,
            chunks: Vec::new(),
            live: 0,
            min_chunk_units,
            system,
        }
    }

    /// Smallest chunk requested from the system allocator
    pub fn min_chunk_units(&self) -> Units {
        self.min_chunk_units
    }

    /// Units ever claimed from the system allocator
    pub fn claimed_units(&self) -> Units {
        self.claimed
    }

    /// Chunk ranges in claim order
    pub fn chunks(&self) -> &[Range<Address>] {
        &self.chunks
    }

    /// Free-list entry the next search starts from
    pub fn cursor(&self) -> Address {
        self.cursor
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    /// Size of a live block in units, header included
    pub fn block_units(&self, block: &Block) -> Option<Units> {
        self.payload_range(block).map(|range| range.len() + 1)
    }

    /// Usable bytes of a live block
    pub fn capacity_of(&self, block: &Block) -> Size {
        self.payload_range(block)
            .map_or(0, |range| range.len() * UNIT_SIZE)
    }

    /// Payload of a live block; empty for a handle that leads nowhere
    pub fn bytes(&self, block: &Block) -> &[u8] {
        match self.payload_range(block) {
            Some(range) => bytemuck::cast_slice(&self.heap[range]),
            None => &[],
        }
    }

    /// Mutable payload of a live block; empty for a handle that leads nowhere
    pub fn bytes_mut(&mut self, block: &Block) -> &mut [u8] {
        match self.payload_range(block) {
            Some(range) => bytemuck::cast_slice_mut(&mut self.heap[range]),
            None => &mut [],
        }
    }

    fn payload_range(&self, block: &Block) -> Option<Range<Address>> {
        let header = block.header()?;
        if header == BASE_ADDRESS {
            return None;
        }
        let size = self.heap.get(header)?.size();
        // in-use headers link to themselves
        if size == 0 || self.heap[header].next() != header {
            return None;
        }
        let end = header.checked_add(size)?;
        if end > self.heap.len() {
            return None;
        }
        Some(block.offset()..end)
    }

    #[inline]
    fn next_of(&self, address: Address) -> Address {
        self.heap[address].next()
    }

    #[inline]
    fn size_of(&self, address: Address) -> Units {
        self.heap[address].size()
    }

    #[inline]
    fn set_next(&mut self, address: Address, next: Address) {
        self.heap[address].set_next(next);
    }

    #[inline]
    fn set_size(&mut self, address: Address, size: Units) {
        self.heap[address].set_size(size);
    }
}

impl Default for ArenaAllocator<SystemHeap> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SystemAllocator> Drop for ArenaAllocator<S> {
    fn drop(&mut self) {
        if !self.chunks.is_empty() {
            info!(
                chunks = self.chunks.len(),
                units = self.claimed,
                live = self.live,
                "Arena released {} chunk(s)",
                self.chunks.len()
            );
        }
    }
}

// Implement trait interfaces
impl<S: SystemAllocator> Allocator for ArenaAllocator<S> {
    fn allocate(&mut self, bytes: Size) -> MemoryResult<Block> {
        ArenaAllocator::allocate(self, bytes)
    }

    fn release(&mut self, block: Block) {
        ArenaAllocator::release(self, block)
    }

    fn block_units(&self, block: &Block) -> Option<Units> {
        ArenaAllocator::block_units(self, block)
    }
}

impl<S: SystemAllocator> MemoryInfo for ArenaAllocator<S> {
    fn stats(&self) -> ArenaStats {
        ArenaAllocator::stats(self)
    }

    fn free_block_count(&self) -> Units {
        ArenaAllocator::free_block_count(self)
    }

    fn claimed_units(&self) -> Units {
        ArenaAllocator::claimed_units(self)
    }
}
