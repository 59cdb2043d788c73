//! Family discriminant of a pooled type.
//!
//! Tags are grouped into numeric ranges so that family membership is a
//! range check.
//!
//! # Tag Categories
//!
//! - 0-15: Special (data unused)
//! - 16-31: Intrinsic types (data = kind selector)
//! - 32-47: Indirection types (data = element Idx)
//! - 48-63: Descriptor types (data = element Idx or extra index)
//! - 64-79: Aggregate types (data = extra index or record slot)
//! - 80-95: Metadata types (data = rank, element Idx, or unused)
//! - 224-239: Host (std) types owned by the surrounding IR

use std::fmt;

/// Type kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Tag {
    // === Special (0-15) ===
    /// Placeholder for a malformed type.
    Invalid = 0,

    // === Intrinsic (16-31) ===
    // data: kind selector
    /// Fortran `CHARACTER` of a given kind (a single character, no LEN).
    Character = 16,
    /// Fortran `COMPLEX`.
    Complex = 17,
    /// Fortran `INTEGER`.
    Integer = 18,
    /// Fortran `LOGICAL`.
    Logical = 19,
    /// Fortran `REAL` and `DOUBLE PRECISION`.
    Real = 20,

    // === Indirection (32-47) ===
    // data: element Idx
    /// Reference to an entity in memory.
    Reference = 32,
    /// Entity with the `POINTER` attribute.
    Pointer = 33,
    /// Entity with the `ALLOCATABLE` attribute.
    Heap = 34,

    // === Descriptors (48-63) ===
    /// Runtime descriptor. data: extra index `[elem, layout]`.
    Box = 48,
    /// CHARACTER buffer plus runtime length. data: element Idx.
    BoxChar = 49,
    /// Procedure plus host-association data. data: element Idx.
    BoxProc = 50,

    // === Aggregates (64-79) ===
    /// Multi-dimensional array. data: extra index `[elem, layout, rank, extents...]`.
    Sequence = 64,
    /// Derived type. data: record slot.
    Record = 65,

    // === Metadata (80-95) ===
    /// Vector of (lower, upper, stride) triples. data: rank or `u32::MAX`.
    Dims = 80,
    /// Component name handle. data: unused.
    Field = 81,
    /// Length-parameter name handle. data: unused.
    Len = 82,
    /// Runtime type descriptor. data: described Idx.
    TypeDesc = 83,

    // === Host types (224-239) ===
    /// Signless integer `iN`. data: width.
    StdInteger = 224,
    /// Float `fN`. data: width.
    StdFloat = 225,
    /// Machine index.
    StdIndex = 226,
    /// Function signature. data: extra index `[n_in, ins..., n_out, outs...]`.
    Function = 227,
}

impl Tag {
    /// Payload is stored out of line in the pool's extra array.
    #[inline]
    pub const fn uses_extra(self) -> bool {
        matches!(self, Self::Box | Self::Sequence | Self::Function)
    }

    /// Check if this tag is one of the five intrinsic types.
    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        let v = self as u8;
        v >= 16 && v < 32
    }

    /// Check if this tag is Reference, Pointer, or Heap.
    #[inline]
    pub const fn is_indirection(self) -> bool {
        let v = self as u8;
        v >= 32 && v < 48
    }

    /// Check if this tag is Box, `BoxChar`, or `BoxProc`.
    #[inline]
    pub const fn is_descriptor(self) -> bool {
        let v = self as u8;
        v >= 48 && v < 64
    }

    /// Check if this tag is Dims, Field, Len, or `TypeDesc`.
    #[inline]
    pub const fn is_metadata(self) -> bool {
        let v = self as u8;
        v >= 80 && v < 96
    }

    /// Check if this tag belongs to the host IR's type set.
    #[inline]
    pub const fn is_std(self) -> bool {
        (self as u8) >= 224
    }

    /// Check if this tag belongs to the FIR type set.
    #[inline]
    pub const fn is_fir(self) -> bool {
        !self.is_std() && !matches!(self, Self::Invalid)
    }

    /// Surface keyword for this tag.
    ///
    /// Host integer and float types are spelled with their width appended
    /// (`i32`, `f64`); for those this returns the prefix only.
    #[inline]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Character => "character",
            Self::Complex => "complex",
            Self::Integer => "int",
            Self::Logical => "logical",
            Self::Real => "real",
            Self::Reference => "ref",
            Self::Pointer => "ptr",
            Self::Heap => "heap",
            Self::Box => "box",
            Self::BoxChar => "boxchar",
            Self::BoxProc => "boxproc",
            Self::Sequence => "array",
            Self::Record => "type",
            Self::Dims => "dims",
            Self::Field => "field",
            Self::Len => "len",
            Self::TypeDesc => "tdesc",
            Self::StdInteger => "i",
            Self::StdFloat => "f",
            Self::StdIndex => "index",
            Self::Function => "function",
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag::{}", self.keyword())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

const _: () = assert!(std::mem::size_of::<Tag>() == 1);

#[cfg(test)]
mod tests;
