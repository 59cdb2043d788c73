//! Canonical type handle.
//!
//! Every FIR type lives in a [`Pool`](crate::Pool) and is referred to by a
//! 32-bit `Idx`. Because the pool interns structurally, two handles from
//! the same pool are equal exactly when they denote the same type.
//!
//! Handles are non-owning. They stay valid for as long as the pool that
//! produced them is alive, and mean nothing to any other pool.

use std::fmt;

/// Handle to a canonical type in one [`Pool`](crate::Pool).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Pre-interned Types (indices 0-3) ===
    // Payload-free types get fixed slots at pool creation.

    /// Placeholder substituted for a type that failed to construct or parse.
    pub const INVALID: Self = Self(0);
    /// `field`: the type of a component name operand.
    pub const FIELD: Self = Self(1);
    /// `len`: the type of a length-parameter name operand.
    pub const LEN: Self = Self(2);
    /// `index`: the host IR's machine-sized integer.
    pub const INDEX: Self = Self(3);

    // === Reserved Range (4-15) ===

    /// First index for dynamically interned types.
    pub const FIRST_DYNAMIC: u32 = 16;

    /// Number of pre-interned types.
    pub const PREINTERNED_COUNT: u32 = 4;

    /// Sentinel meaning "no type".
    pub const NONE: Self = Self(u32::MAX);

    /// Rebuild a handle from [`Idx::raw`].
    ///
    /// The caller must make sure the index belongs to the pool it is used with.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The slot number behind the handle.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a pre-interned type.
    #[inline]
    pub const fn is_preinterned(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    /// Check for the "no type" sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }

    /// Check if this is the INVALID placeholder.
    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }

    /// Slot number inside the pool's item table.
    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::INVALID => write!(f, "Idx::INVALID"),
            Self::FIELD => write!(f, "Idx::FIELD"),
            Self::LEN => write!(f, "Idx::LEN"),
            Self::INDEX => write!(f, "Idx::INDEX"),
            Self::NONE => write!(f, "Idx::NONE"),
            _ => write!(f, "Idx({})", self.0),
        }
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::INVALID => write!(f, "invalid"),
            Self::FIELD => write!(f, "field"),
            Self::LEN => write!(f, "len"),
            Self::INDEX => write!(f, "index"),
            Self::NONE => write!(f, "none"),
            _ => write!(f, "!{}", self.0),
        }
    }
}

const _: () = assert!(std::mem::size_of::<Idx>() == 4);
