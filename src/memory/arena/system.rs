/*!
 * System Allocator
 * Chunk source backed by the process heap
 */

use super::header::Header;
use crate::core::types::{Address, Units};
use crate::memory::traits::SystemAllocator;
use crate::memory::types::{MemoryError, MemoryResult};
use bytemuck::Zeroable;
use std::ops::Range;
use tracing::warn;

/// Process heap, optionally capped at a unit budget
#[derive(Debug, Clone, Default)]
pub struct SystemHeap {
    limit: Option<Units>,
    claimed: Units,
}

impl SystemHeap {
    /// Heap without a budget; fails only when the process heap does
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Heap that refuses to hand out more than `limit` units in total
    pub fn with_limit(limit: Units) -> Self {
        Self {
            limit: Some(limit),
            claimed: 0,
        }
    }

    pub fn limit(&self) -> Option<Units> {
        self.limit
    }
}

impl SystemAllocator for SystemHeap {
    fn request(&mut self, heap: &mut Vec<Header>, units: Units) -> MemoryResult<Range<Address>> {
        if let Some(limit) = self.limit {
            if self.claimed.saturating_add(units) > limit {
                warn!(
                    requested = units,
                    claimed = self.claimed,
                    limit,
                    "Chunk request exceeds heap budget"
                );
                return Err(MemoryError::OutOfMemory {
                    requested: units,
                    claimed: self.claimed,
                    limit,
                });
            }
        }

        if heap.try_reserve_exact(units).is_err() {
            warn!(requested = units, "Process heap refused chunk");
            return Err(MemoryError::ChunkRefused { units });
        }

        let start = heap.len();
        heap.resize(start + units, Header::zeroed());
        self.claimed += units;

        Ok(start..start + units)
    }

    fn claimed(&self) -> Units {
        self.claimed
    }
}
