//! Classification bits cached per type.
//!
//! `TypeFlags` are computed once when a type is interned and cached next
//! to its item, so classification never walks the type graph.

use bitflags::bitflags;

use crate::Tag;

bitflags! {
    /// Cached type properties.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u16 {
        // === Category Flags (bits 0-7) ===

        /// Member of the FIR type set.
        const IS_FIR = 1 << 0;
        /// Member of the host IR's type set.
        const IS_STD = 1 << 1;
        /// Character, Complex, Integer, Logical, or Real.
        const IS_INTRINSIC = 1 << 2;
        /// Reference, Pointer, or Heap.
        const IS_INDIRECTION = 1 << 3;
        /// Box, `BoxChar`, or `BoxProc`.
        const IS_DESCRIPTOR = 1 << 4;
        /// Logically bundles several values.
        const IS_AGGREGATE = 1 << 5;
        /// Dims, Field, Len, or `TypeDesc`.
        const IS_METADATA = 1 << 6;

        // === Presence Flags (bits 8-15) ===
        // Propagated from children at interning time. Record components are
        // not followed: their layout can change after interning.

        /// Contains the invalid placeholder.
        const HAS_INVALID = 1 << 8;
        /// Contains a record type.
        const HAS_RECORD = 1 << 9;
    }
}

impl TypeFlags {
    /// Presence flags that flow from a child into its parent.
    pub const PROPAGATE_MASK: Self = Self::HAS_INVALID.union(Self::HAS_RECORD);

    /// Category flags implied by the tag alone.
    pub fn from_tag(tag: Tag) -> Self {
        let mut flags = Self::empty();
        if tag.is_fir() {
            flags |= Self::IS_FIR;
        }
        if tag.is_std() {
            flags |= Self::IS_STD;
        }
        if tag.is_intrinsic() {
            flags |= Self::IS_INTRINSIC;
        }
        if tag.is_indirection() {
            flags |= Self::IS_INDIRECTION;
        }
        if tag.is_descriptor() {
            flags |= Self::IS_DESCRIPTOR | Self::IS_AGGREGATE;
        }
        if tag.is_metadata() {
            flags |= Self::IS_METADATA;
        }
        match tag {
            Tag::Sequence => flags |= Self::IS_AGGREGATE,
            Tag::Record => flags |= Self::IS_AGGREGATE | Self::HAS_RECORD,
            Tag::Invalid => flags |= Self::HAS_INVALID,
            _ => {}
        }
        flags
    }

    /// Check if the placeholder occurs anywhere in the type.
    #[inline]
    pub fn has_invalid(self) -> bool {
        self.contains(Self::HAS_INVALID)
    }
}

#[cfg(test)]
mod tests;
