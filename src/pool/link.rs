/*!
 * Slots and Pools
 * Storage records threaded into the pooled list chain
 */

use tracing::error;

/// Position of a slot: pool number and index inside that pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId {
    pub pool: usize,
    pub index: usize,
}

impl SlotId {
    #[inline]
    pub fn new(pool: usize, index: usize) -> Self {
        Self { pool, index }
    }
}

/// One element slot and the slot that follows it in the chain
#[derive(Debug)]
pub(crate) struct Link<T> {
    pub value: Option<T>,
    pub next: Option<SlotId>,
}

/// Fixed-capacity slot array, allocated once
#[derive(Debug)]
pub(crate) struct Pool<T> {
    pub links: Box<[Link<T>]>,
}

impl<T> Pool<T> {
    /// Allocate pool number `pool` with its slots threaded in index order
    ///
    /// # Panics
    ///
    /// Panics if the heap cannot hold `capacity` slots.
    pub fn allocate(pool: usize, capacity: usize) -> Self {
        let mut links = Vec::new();
        if links.try_reserve_exact(capacity).is_err() {
            error!(capacity, "No memory available for pool");
            panic!("no memory available for pool with capacity {capacity}");
        }

        links.extend((0..capacity).map(|index| Link {
            value: None,
            next: (index + 1 < capacity).then(|| SlotId::new(pool, index + 1)),
        }));

        Self {
            links: links.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.links.len()
    }
}
