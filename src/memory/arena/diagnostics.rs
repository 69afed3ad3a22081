/*!
 * Arena Diagnostics
 * Free-list introspection and visualization
 */

use super::header::UNIT_SIZE;
use super::ArenaAllocator;
use crate::core::limits::BASE_ADDRESS;
use crate::core::types::Units;
use crate::memory::traits::SystemAllocator;
use crate::memory::types::{ArenaStats, FreeBlock};
use std::fmt;

impl<S: SystemAllocator> ArenaAllocator<S> {
    /// Units currently on the free list
    ///
    /// Sums the sizes over one full circuit starting at the cursor.
    pub fn free_block_count(&self) -> Units {
        let mut curr = self.cursor;
        let mut count = self.size_of(curr);
        loop {
            curr = self.next_of(curr);
            if curr == self.cursor {
                return count;
            }
            count += self.size_of(curr);
        }
    }

    /// Free-list entries in address order, sentinel excluded
    pub fn free_blocks(&self) -> Vec<FreeBlock> {
        let mut blocks = Vec::new();
        let mut curr = self.next_of(BASE_ADDRESS);
        while curr != BASE_ADDRESS {
            blocks.push(FreeBlock {
                address: curr,
                units: self.size_of(curr),
            });
            curr = self.next_of(curr);
        }
        blocks
    }

    pub fn stats(&self) -> ArenaStats {
        let free_blocks = self.free_blocks();
        let free_units = free_blocks.iter().map(|b| b.units).sum::<Units>();

        ArenaStats {
            claimed_units: self.claimed,
            free_units,
            used_units: self.claimed.saturating_sub(free_units),
            free_blocks: free_blocks.len(),
            chunks: self.chunks.len(),
            live_allocations: self.live,
            unit_size: UNIT_SIZE,
        }
    }

    /// Printable view of the free list
    pub fn view<'a>(&'a self, label: &'a str) -> FreeListView<'a, S> {
        FreeListView { arena: self, label }
    }

    /// Print the free list to stdout
    pub fn visualize(&self, label: &str) {
        print!("{}", self.view(label));
    }
}

/// Free list rendered in traversal order from the cursor
pub struct FreeListView<'a, S: SystemAllocator> {
    arena: &'a ArenaAllocator<S>,
    label: &'a str,
}

impl<S: SystemAllocator> fmt::Display for FreeListView<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arena = self.arena;
        writeln!(f, "--- Free list after \"{}\":", self.label)?;

        if arena.next_of(BASE_ADDRESS) == BASE_ADDRESS {
            return writeln!(f, "\tList is empty\n");
        }

        write!(f, "  base: @{:<6} -->  ", BASE_ADDRESS)?;

        let start = arena.cursor;
        let mut curr = start;
        loop {
            if curr != BASE_ADDRESS {
                write!(
                    f,
                    "ptr: @{:<6} size: {:<4} -->  ",
                    curr,
                    arena.size_of(curr)
                )?;
            }
            curr = arena.next_of(curr);
            if curr == start {
                break;
            }
        }
        writeln!(f, "end\n")
    }
}
