/*!
 * Pooled Lists
 * Linked lists backed by fixed-capacity slot pools
 */

mod config;
mod link;
mod list;

pub use config::PoolConfig;
pub use list::{Iter, PooledList, SlotRef};
