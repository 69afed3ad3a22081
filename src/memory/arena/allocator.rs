/*!
 * Arena Allocation
 * Next-fit search, tail splitting and chunk claiming
 */

use super::header::{units_for, Header};
use super::{ArenaAllocator, Block};
use crate::core::types::{Address, Size, Units};
use crate::memory::traits::SystemAllocator;
use crate::memory::types::{MemoryError, MemoryResult};
use tracing::{debug, info};

impl<S: SystemAllocator> ArenaAllocator<S> {
    /// Allocate a block with at least `bytes` usable bytes
    ///
    /// Scans the free list once around from the cursor. The first block that
    /// is large enough wins: an exact fit leaves the list, a larger block
    /// gives away its tail. When a full circuit finds nothing, a chunk of
    /// `max(units, min_chunk_units)` is claimed and the scan continues.
    pub fn allocate(&mut self, bytes: Size) -> MemoryResult<Block> {
        let blocks = units_for(bytes).ok_or(MemoryError::SizeOverflow { bytes })?;

        let mut prev = self.cursor;
        let mut curr = self.next_of(prev);

        loop {
            let size = self.size_of(curr);
            if size >= blocks {
                if size == blocks {
                    let after = self.next_of(curr);
                    self.set_next(prev, after);
                } else {
                    let remaining = size - blocks;
                    self.set_size(curr, remaining);
                    curr += remaining;
                }
                self.heap[curr] = Header::new(curr, blocks);

                self.cursor = prev;
                self.live += 1;

                debug!(
                    bytes,
                    units = blocks,
                    address = curr,
                    cursor = prev,
                    "Allocated block"
                );
                return Ok(Block::new(curr + 1));
            }

            // Wrapped around without a fit
            if curr == self.cursor {
                curr = self.claim_chunk(blocks)?;
            }

            prev = curr;
            curr = self.next_of(curr);
        }
    }

    /// Claim a chunk from the system allocator and put it on the free list
    ///
    /// Returns the cursor after insertion, which precedes the new memory.
    fn claim_chunk(&mut self, blocks: Units) -> MemoryResult<Address> {
        let units = blocks.max(self.min_chunk_units);
        let chunk = self.system.request(&mut self.heap, units)?;

        let start = chunk.start;
        self.claimed += units;
        self.heap[start] = Header::new(start, units);
        self.chunks.push(chunk);

        info!(
            units,
            address = start,
            claimed = self.claimed,
            "Claimed {} units from system allocator",
            units
        );

        self.insert_free(start);
        Ok(self.cursor)
    }
}
