/*!
 * Memory Module
 * Free-list arena allocation
 */

pub mod arena;
pub mod config;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use arena::{units_for, ArenaAllocator, Block, FreeListView, Header, SystemHeap, UNIT_SIZE};
pub use config::ArenaConfig;
pub use traits::*;
pub use types::*;
