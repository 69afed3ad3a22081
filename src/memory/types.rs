/*!
 * Memory Types
 * Common types for the arena allocator
 */

use crate::core::types::{Address, Size, Units};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum MemoryError {
    #[error("Out of memory: requested {requested} units, {claimed} units already claimed (limit {limit} units)")]
    #[diagnostic(
        code(memory::out_of_memory),
        help("Raise `max_units` in the arena configuration or release blocks before allocating.")
    )]
    OutOfMemory {
        requested: Units,
        claimed: Units,
        limit: Units,
    },

    #[error("System allocator refused a chunk of {units} units")]
    #[diagnostic(
        code(memory::chunk_refused),
        help("The process heap could not satisfy the request. The system may be low on memory.")
    )]
    ChunkRefused { units: Units },

    #[error("Allocation size overflow: {bytes} bytes cannot be expressed in header units")]
    #[diagnostic(code(memory::size_overflow))]
    SizeOverflow { bytes: Size },
}

/// Free-list entry as seen from outside the allocator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeBlock {
    pub address: Address,
    pub units: Units,
}

impl FreeBlock {
    /// First address past this block
    pub fn end(&self) -> Address {
        self.address + self.units
    }
}

/// Arena statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaStats {
    /// Units ever claimed from the system allocator
    pub claimed_units: Units,
    /// Units currently on the free list
    pub free_units: Units,
    /// Units held by live blocks, headers included
    pub used_units: Units,
    /// Free-list entries, sentinel excluded
    pub free_blocks: usize,
    /// Chunks claimed from the system allocator
    pub chunks: usize,
    /// Blocks handed out and not yet released
    pub live_allocations: usize,
    /// Bytes per header unit
    pub unit_size: Size,
}

impl ArenaStats {
    pub fn claimed_bytes(&self) -> Size {
        self.claimed_units * self.unit_size
    }

    pub fn free_bytes(&self) -> Size {
        self.free_units * self.unit_size
    }

    /// Units unaccounted for once every block has been released
    ///
    /// Only meaningful when `live_allocations` is zero.
    pub fn leaked_units(&self) -> Units {
        self.claimed_units.saturating_sub(self.free_units)
    }
}
