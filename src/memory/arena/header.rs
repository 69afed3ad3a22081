/*!
 * Block Header
 * Bookkeeping record in front of every block, also the unit of size accounting
 */

use crate::core::types::{Address, Size, Units};
use bytemuck::{Pod, Zeroable};
use std::mem::{align_of, size_of};

/// Header unit
///
/// Two words, aligned to the widest scalar alignment of supported targets so
/// payloads that start one unit past a header are aligned for any type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(C, align(16))]
pub struct Header {
    next: u64,
    size: u64,
}

// SAFETY: `repr(C)` with two `u64` fields and 16-byte alignment: size equals
// alignment, so there is no padding, and every bit pattern is a valid value.
unsafe impl Zeroable for Header {}
unsafe impl Pod for Header {}

/// Bytes per header unit
pub const UNIT_SIZE: Size = size_of::<Header>();

const _: () = assert!(size_of::<Header>() == 16 && align_of::<Header>() == 16);

impl Header {
    /// Sentinel base header: empty, linked to itself
    pub const SENTINEL: Header = Header { next: 0, size: 0 };

    #[inline]
    pub fn new(next: Address, size: Units) -> Self {
        Self {
            next: next as u64,
            size: size as u64,
        }
    }

    /// Address of the next free header
    #[inline]
    pub fn next(&self) -> Address {
        self.next as Address
    }

    /// Block size in units, header included
    #[inline]
    pub fn size(&self) -> Units {
        self.size as Units
    }

    #[inline]
    pub(crate) fn set_next(&mut self, next: Address) {
        self.next = next as u64;
    }

    #[inline]
    pub(crate) fn set_size(&mut self, size: Units) {
        self.size = size as u64;
    }
}

/// Units needed to serve `bytes`, one extra for the header
///
/// `(bytes + UNIT_SIZE - 1) / UNIT_SIZE + 1`. Returns `None` on overflow.
#[inline]
pub fn units_for(bytes: Size) -> Option<Units> {
    let payload = bytes.checked_add(UNIT_SIZE - 1)? / UNIT_SIZE;
    payload.checked_add(1)
}
