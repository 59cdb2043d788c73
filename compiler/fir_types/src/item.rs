//! One pool slot: a tag plus a 32-bit payload word.
//!
//! What the word means is fixed by the tag:
//!
//! | Tag family                          | `data`                         |
//! |-------------------------------------|--------------------------------|
//! | intrinsic                           | kind selector                  |
//! | `ref`/`ptr`/`heap`, `boxchar`, `boxproc`, `tdesc` | element handle   |
//! | `box`, `array`, function signature  | start of payload in `extra`    |
//! | `type`                              | record table slot              |
//! | `dims`                              | rank, `u32::MAX` when unknown  |
//! | `iN` / `fN`                         | bit width                      |

use crate::{Idx, Tag};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct Item {
    pub tag: Tag,
    pub data: u32,
}

impl Item {
    #[inline]
    pub const fn new(tag: Tag, data: u32) -> Self {
        Item { tag, data }
    }

    /// Slot with no payload (`field`, `len`, `index`, reserved slots).
    #[inline]
    pub const fn unit(tag: Tag) -> Self {
        Item::new(tag, 0)
    }

    /// Payload read as a handle to the wrapped type.
    #[inline]
    pub const fn element(self) -> Idx {
        Idx::from_raw(self.data)
    }

    /// Payload read as an offset into the extra array.
    #[inline]
    pub fn extra_start(self) -> usize {
        debug_assert!(self.tag.uses_extra(), "{:?} keeps its payload inline", self.tag);
        self.data as usize
    }
}

const _: () = assert!(std::mem::size_of::<Item>() == 8);
