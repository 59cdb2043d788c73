//! Array shapes.

use smallvec::SmallVec;

/// Extent of one array dimension: `>= 0`, or [`UNKNOWN_EXTENT`].
pub type Extent = i64;

/// Shape of a sequence type. Empty means the rank itself is unknown.
pub type Shape = SmallVec<[Extent; 4]>;

/// The value `-1` represents an unknown extent for a dimension.
pub const UNKNOWN_EXTENT: Extent = -1;

/// Check that `extent` is a concrete size or the unknown sentinel.
#[inline]
pub const fn is_valid_extent(extent: Extent) -> bool {
    extent >= UNKNOWN_EXTENT
}

/// Split an extent into the two u32 words stored in the pool's extra array.
#[inline]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "bit-level split into two words; decode_extent reassembles it"
)]
pub(crate) const fn encode_extent(extent: Extent) -> [u32; 2] {
    let bits = extent as u64;
    [(bits & 0xFFFF_FFFF) as u32, (bits >> 32) as u32]
}

/// Inverse of [`encode_extent`].
#[inline]
#[expect(
    clippy::cast_possible_wrap,
    reason = "reinterprets the bits written by encode_extent"
)]
pub(crate) const fn decode_extent(lo: u32, hi: u32) -> Extent {
    (((hi as u64) << 32) | lo as u64) as i64
}
