//! Classification predicates.
//!
//! Read-only and side-effect free; all answers come from the cached flags
//! or the item itself. A handle that names no type in the pool (such as
//! [`Idx::NONE`]) is in no family.

use crate::{Idx, Pool, Tag, TypeFlags};

impl Pool {
    /// Is `idx` any of the FIR types?
    #[inline]
    pub fn is_fir_type(&self, idx: Idx) -> bool {
        self.flags(idx).contains(TypeFlags::IS_FIR)
    }

    /// Is `idx` one of the host IR's types?
    #[inline]
    pub fn is_std_type(&self, idx: Idx) -> bool {
        self.flags(idx).contains(TypeFlags::IS_STD)
    }

    /// Is `idx` a FIR type or a host type?
    #[inline]
    pub fn is_fir_or_std_type(&self, idx: Idx) -> bool {
        self.flags(idx)
            .intersects(TypeFlags::IS_FIR | TypeFlags::IS_STD)
    }

    /// Does `idx` imply a memory (de)reference? True for Reference,
    /// Pointer, and Heap.
    #[inline]
    pub fn is_indirection_type(&self, idx: Idx) -> bool {
        self.flags(idx).contains(TypeFlags::IS_INDIRECTION)
    }

    /// Is `idx` an aggregate: Sequence, Record, Box, `BoxChar`, or `BoxProc`?
    #[inline]
    pub fn is_aggregate_type(&self, idx: Idx) -> bool {
        self.flags(idx).contains(TypeFlags::IS_AGGREGATE)
    }

    /// Is `idx` one of the five intrinsic types?
    #[inline]
    pub fn is_intrinsic_type(&self, idx: Idx) -> bool {
        self.flags(idx).contains(TypeFlags::IS_INTRINSIC)
    }

    /// Can `idx` be wrapped in a `boxproc`?
    ///
    /// Procedure signatures belong to the host type set; this is the hook
    /// through which that set vouches for them.
    #[inline]
    pub fn is_procedure_signature(&self, idx: Idx) -> bool {
        self.get(idx).is_some_and(|item| item.tag == Tag::Function)
    }

    /// Element type behind one level of Reference, Pointer, or Heap.
    ///
    /// `None` for every other type.
    #[inline]
    pub fn element_type_of_indirection(&self, idx: Idx) -> Option<Idx> {
        if self.is_indirection_type(idx) {
            Some(self.item(idx).element())
        } else {
            None
        }
    }
}
