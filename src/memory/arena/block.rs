/*!
 * Block Handle
 * Opaque handle to a live allocation
 */

use crate::core::types::Address;

/// Handle to a block handed out by an [`ArenaAllocator`](super::ArenaAllocator)
///
/// Carries the payload offset; the header sits one unit before it. The handle
/// is deliberately not `Clone`: releasing consumes it, so the same handle
/// cannot be released twice.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "a dropped Block keeps its units until the arena is dropped"]
pub struct Block {
    offset: Address,
}

impl Block {
    #[inline]
    pub(crate) fn new(offset: Address) -> Self {
        Self { offset }
    }

    /// Address of the first payload unit
    #[inline]
    pub fn offset(&self) -> Address {
        self.offset
    }

    /// Address of the header, `None` for offset 0
    #[inline]
    pub fn header(&self) -> Option<Address> {
        self.offset.checked_sub(1)
    }

    /// Give up the handle, keeping only its raw offset
    #[inline]
    pub fn into_raw(self) -> Address {
        self.offset
    }

    /// Rebuild a handle from a raw offset
    ///
    /// Nothing is checked here. Releasing a rebuilt handle is validated
    /// best-effort: offsets that do not lead to a live header are ignored.
    #[inline]
    pub fn from_raw(offset: Address) -> Self {
        Self { offset }
    }
}
