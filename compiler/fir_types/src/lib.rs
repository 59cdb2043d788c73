//! Type system for the Fortran IR (FIR).
//!
//! Types are interned in a [`Pool`] and referred to by 32-bit [`Idx`]
//! handles, so type equality is handle equality.
//!
//! # Type Families
//!
//! - Intrinsic: `character`, `complex`, `int`, `logical`, `real`, each with
//!   a kind selector
//! - Indirection: `ref`, `ptr`, `heap`
//! - Descriptor: `box`, `boxchar`, `boxproc`
//! - Aggregate: `array` (sequence) and `type` (derived record)
//! - Metadata: `dims`, `field`, `len`, `tdesc`
//! - Host: `iN`, `fN`, `index`, and function signatures
//!
//! Every constructor checks the family's invariants and returns an
//! [`InvariantViolation`] instead of building a malformed type. The textual
//! codec ([`Pool::parse_type`], [`Pool::print_type`]) goes through the same
//! constructors and round-trips exactly.

mod cursor;
mod error;
mod flags;
mod idx;
mod item;
mod kind;
mod names;
mod pool;
mod shape;
mod shared;
mod stack;
mod tag;

pub use cursor::{is_identifier, Cursor};
pub use error::{InvariantViolation, LayoutError, ParseError, SyntaxError};
pub use flags::TypeFlags;
pub use idx::Idx;
pub use item::Item;
pub use kind::{Intrinsic, Kind};
pub use names::{LayoutMap, Name, NameTable};
pub use pool::{Component, Pool, TypeDisplay, MAX_STD_INT_WIDTH, STD_FLOAT_WIDTHS};
pub use shape::{is_valid_extent, Extent, Shape, UNKNOWN_EXTENT};
pub use shared::SharedPool;
pub use tag::Tag;

// Size assertions to prevent accidental regressions.
mod size_asserts {
    use super::{Idx, Kind, LayoutMap, Name, Tag};

    const _: () = assert!(std::mem::size_of::<Idx>() == 4);
    const _: () = assert!(std::mem::size_of::<Tag>() == 1);
    const _: () = assert!(std::mem::size_of::<Kind>() == 4);
    const _: () = assert!(std::mem::size_of::<Name>() == 4);
    const _: () = assert!(std::mem::size_of::<LayoutMap>() == 4);
}
