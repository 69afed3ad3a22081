/*!
 * memarena
 * Free-list arena allocator and pooled linked lists
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod pool;

// Re-exports
pub use crate::core::{ConfigError, ConfigResult};
pub use memory::{
    Allocator, ArenaAllocator, ArenaConfig, ArenaStats, Block, FreeBlock, MemoryError,
    MemoryInfo, MemoryResult, SystemAllocator, SystemHeap, UNIT_SIZE,
};
pub use monitoring::init_tracing;
pub use pool::{PoolConfig, PooledList, SlotRef};
