/*!
 * Pooled List
 * Singly linked chain of slots carved from fixed-capacity pools
 */

use super::config::PoolConfig;
use super::link::{Link, Pool, SlotId};
use crate::core::limits::{DEFAULT_POOL_CAPACITY, MIN_POOL_CAPACITY};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info};

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a slot in a [`PooledList`]
///
/// Stays valid until the slot is removed. After removal the same slot may be
/// handed out again by a later append, so the handle then names the new
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotRef {
    list: u64,
    slot: SlotId,
}

impl SlotRef {
    /// Pool holding the slot, in creation order
    pub fn pool(&self) -> usize {
        self.slot.pool
    }

    /// Index of the slot inside its pool
    pub fn index(&self) -> usize {
        self.slot.index
    }
}

/// Linked list whose nodes live in preallocated pools
///
/// Live slots come first in chain order, followed by free slots. `last` marks
/// the boundary: the first free slot, or `None` when every slot holds a
/// value. Removed slots are cleared and moved to the boundary so the next
/// append reuses them before a new pool is allocated. Pools are only returned
/// when the list is dropped.
///
/// # Example
///
/// ```
/// use memarena::PooledList;
///
/// let mut list = PooledList::new(4);
/// list.append("a");
/// let b = list.append("b");
/// assert!(list.remove(b));
///
/// let c = list.append("c");
/// assert_eq!(c, b); // same slot
/// assert_eq!(list.pool_count(), 1);
/// ```
pub struct PooledList<T> {
    id: u64,
    pools: Vec<Pool<T>>,
    /// Chain head
    first: SlotId,
    /// First free slot
    last: Option<SlotId>,
    /// Last live slot
    tail: Option<SlotId>,
    capacity: usize,
    len: usize,
}

impl<T> PooledList<T> {
    /// Create a list whose pools hold `capacity` slots (at least 2)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_POOL_CAPACITY);
        let first = SlotId::new(0, 0);

        debug!(capacity, "Pooled list initialized");
        Self {
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
            pools: vec![Pool::allocate(0, capacity)],
            first,
            last: Some(first),
            tail: None,
            capacity,
            len: 0,
        }
    }

    pub fn with_config(config: &PoolConfig) -> Self {
        Self::new(config.capacity)
    }

    /// Slots per pool
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pools allocated so far
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Number of live values
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `value` in the first free slot, growing by one pool when full
    pub fn append(&mut self, value: T) -> SlotRef {
        let slot = match self.last {
            Some(slot) => slot,
            None => self.grow(),
        };

        let link = self.link_mut(slot);
        link.value = Some(value);
        let next = link.next;

        self.last = next;
        self.tail = Some(slot);
        self.len += 1;

        SlotRef {
            list: self.id,
            slot,
        }
    }

    /// Remove the value in `slot` and recycle the slot
    ///
    /// Scans the live region after the chain head; the head itself is never
    /// a candidate. Returns `false` when the slot is not found.
    ///
    /// # Panics
    ///
    /// Panics if `slot` was not issued by this list.
    pub fn remove(&mut self, slot: SlotRef) -> bool {
        self.assert_owned(slot);
        if self.len == 0 {
            return false;
        }

        let target = slot.slot;
        let mut prev = self.first;
        let mut node = self.link(prev).next;

        while let Some(current) = node {
            if Some(current) == self.last {
                break;
            }

            if current == target {
                let after = self.link(current).next;
                self.link_mut(prev).next = after;
                if self.tail == Some(current) {
                    self.tail = Some(prev);
                }

                // Re-insert as the first free slot
                let boundary = self.last;
                let link = self.link_mut(current);
                link.value = None;
                link.next = boundary;
                if let Some(tail) = self.tail {
                    self.link_mut(tail).next = Some(current);
                }
                self.last = Some(current);
                self.len -= 1;

                debug!(pool = target.pool, index = target.index, "Slot recycled");
                return true;
            }

            prev = current;
            node = self.link(current).next;
        }

        false
    }

    /// Value in a live slot
    pub fn get(&self, slot: SlotRef) -> Option<&T> {
        if slot.list != self.id {
            return None;
        }
        self.pools
            .get(slot.slot.pool)?
            .links
            .get(slot.slot.index)?
            .value
            .as_ref()
    }

    pub fn get_mut(&mut self, slot: SlotRef) -> Option<&mut T> {
        if slot.list != self.id {
            return None;
        }
        self.pools
            .get_mut(slot.slot.pool)?
            .links
            .get_mut(slot.slot.index)?
            .value
            .as_mut()
    }

    /// Live values in chain order
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: Some(self.first),
            remaining: self.len,
        }
    }

    /// Drop every pool and report how many were released
    pub fn release(mut self) -> usize {
        let count = self.pools.len();
        self.pools.clear();
        info!(pools = count, "PooledList released {} pool(s)", count);
        count
    }

    /// Allocate a pool and attach it behind the chain tail
    ///
    /// Only called when no free slot is left, so the tail is the chain end.
    fn grow(&mut self) -> SlotId {
        let pool = self.pools.len();
        self.pools.push(Pool::allocate(pool, self.capacity));

        let head = SlotId::new(pool, 0);
        if let Some(tail) = self.tail {
            self.link_mut(tail).next = Some(head);
        }

        info!(
            pools = self.pools.len(),
            capacity = self.capacity,
            "Pooled list grew to {} pool(s)",
            self.pools.len()
        );
        head
    }

    fn assert_owned(&self, slot: SlotRef) {
        let owned = slot.list == self.id
            && self
                .pools
                .get(slot.slot.pool)
                .is_some_and(|pool| slot.slot.index < pool.capacity());
        if !owned {
            error!(
                list = slot.list,
                pool = slot.slot.pool,
                index = slot.slot.index,
                "Attempting to remove a slot this list does not own"
            );
            panic!("attempting to remove a slot this list does not own");
        }
    }

    #[inline]
    fn link(&self, slot: SlotId) -> &Link<T> {
        &self.pools[slot.pool].links[slot.index]
    }

    #[inline]
    fn link_mut(&mut self, slot: SlotId) -> &mut Link<T> {
        &mut self.pools[slot.pool].links[slot.index]
    }
}

impl<T> Default for PooledList<T> {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}

impl<T> Drop for PooledList<T> {
    fn drop(&mut self) {
        if !self.pools.is_empty() {
            info!(
                pools = self.pools.len(),
                "PooledList released {} pool(s)",
                self.pools.len()
            );
        }
    }
}

/// Iterator over live values in chain order
pub struct Iter<'a, T> {
    list: &'a PooledList<T>,
    next: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let link = self.list.link(self.next?);
        self.next = link.next;
        self.remaining -= 1;
        link.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a PooledList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
