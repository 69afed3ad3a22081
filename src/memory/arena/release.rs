/*!
 * Arena Release
 * Address-ordered insertion with coalescing
 */

use super::{ArenaAllocator, Block};
use crate::core::limits::BASE_ADDRESS;
use crate::core::types::Address;
use crate::memory::traits::SystemAllocator;
use tracing::{debug, warn};

impl<S: SystemAllocator> ArenaAllocator<S> {
    /// Return a block to the free list
    ///
    /// Handles that do not lead to a live header are ignored: offset 0, a
    /// header outside the arena, a size of zero or larger than everything
    /// claimed, or a block that is already free. This is a sanity check, not
    /// a full double-free detector.
    pub fn release(&mut self, block: Block) {
        let offset = block.into_raw();

        let Some(header) = offset.checked_sub(1) else {
            warn!(offset, "Ignoring release of null block");
            return;
        };
        if header == BASE_ADDRESS || header >= self.heap.len() {
            warn!(offset, "Ignoring release of address outside the arena");
            return;
        }

        let size = self.size_of(header);
        if size == 0 || size > self.claimed || header + size > self.heap.len() {
            warn!(
                offset,
                size,
                claimed = self.claimed,
                "Ignoring release of block with invalid size"
            );
            return;
        }

        // in-use headers link to themselves; free ones never do
        if self.next_of(header) != header {
            warn!(offset, size, "Ignoring release of block that is already free");
            return;
        }

        if self.insert_free(header) {
            self.live = self.live.saturating_sub(1);
            debug!(address = header, units = size, cursor = self.cursor, "Released block");
        }
    }

    /// Release the held block, if any, and clear the slot
    pub fn free(&mut self, slot: &mut Option<Block>) {
        if let Some(block) = slot.take() {
            self.release(block);
        }
    }

    /// Insert the block at `block` into the free list, merging with neighbours
    ///
    /// Returns `false` without touching the list when the block is already on
    /// it or overlaps a free block.
    pub(super) fn insert_free(&mut self, block: Address) -> bool {
        let size = self.size_of(block);

        // Find the gap [curr, next) holding `block`. At the wrap point
        // (curr >= next) the gap covers everything above the maximum and
        // below the minimum.
        let mut curr = self.cursor;
        loop {
            let next = self.next_of(curr);
            if block == curr || block == next {
                warn!(address = block, "Block is already on the free list");
                return false;
            }
            if block > curr && block < next {
                break;
            }
            if curr >= next && (block > curr || block < next) {
                break;
            }
            curr = next;
        }

        let next = self.next_of(curr);
        let curr_size = self.size_of(curr);
        if (block > curr && curr + curr_size > block) || (next > block && block + size > next) {
            warn!(
                address = block,
                units = size,
                "Block overlaps free memory, ignoring"
            );
            return false;
        }

        // Merge with the upper neighbour
        if block + size == next {
            let merged = size + self.size_of(next);
            let after = self.next_of(next);
            self.set_size(block, merged);
            self.set_next(block, after);
            self.set_size(next, 0);
        } else {
            self.set_next(block, next);
        }

        // Merge into the lower neighbour
        if curr + curr_size == block {
            let merged = curr_size + self.size_of(block);
            let after = self.next_of(block);
            self.set_size(curr, merged);
            self.set_next(curr, after);
            self.set_size(block, 0);
        } else {
            self.set_next(curr, block);
        }

        self.cursor = curr;
        true
    }
}
