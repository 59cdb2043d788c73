//! Type constructors for the Pool.
//!
//! Every constructor checks the family's construction invariants before
//! touching the pool, so a rejected call leaves the pool unchanged.

use std::borrow::Cow;

use tracing::debug;

use crate::kind::Intrinsic;
use crate::names::LayoutMap;
use crate::shape::{encode_extent, is_valid_extent, Extent};
use crate::{Idx, InvariantViolation, Kind, Pool, Tag};

/// Dims payload for an unknown rank.
pub(crate) const UNKNOWN_RANK: u32 = u32::MAX;

/// Widths accepted for host float types.
pub const STD_FLOAT_WIDTHS: [u32; 5] = [16, 32, 64, 80, 128];

/// Widest host integer type.
pub const MAX_STD_INT_WIDTH: u32 = 128;

/// Build a violation and log it.
pub(crate) fn violation(tag: Tag, reason: impl Into<Cow<'static, str>>) -> InvariantViolation {
    let err = InvariantViolation::new(tag, reason);
    debug!(%err, "rejected type construction");
    err
}

impl Pool {
    // === Intrinsic Types ===

    /// Get the intrinsic type of family `which` with the given kind.
    pub fn intrinsic(&mut self, which: Intrinsic, kind: Kind) -> Idx {
        self.intern(which.tag(), kind.raw(), &[])
    }

    /// `character<kind>`.
    pub fn character(&mut self, kind: Kind) -> Idx {
        self.intrinsic(Intrinsic::Character, kind)
    }

    /// `complex<kind>`.
    pub fn complex(&mut self, kind: Kind) -> Idx {
        self.intrinsic(Intrinsic::Complex, kind)
    }

    /// `int<kind>`.
    pub fn integer(&mut self, kind: Kind) -> Idx {
        self.intrinsic(Intrinsic::Integer, kind)
    }

    /// `logical<kind>`.
    pub fn logical(&mut self, kind: Kind) -> Idx {
        self.intrinsic(Intrinsic::Logical, kind)
    }

    /// `real<kind>`.
    pub fn real(&mut self, kind: Kind) -> Idx {
        self.intrinsic(Intrinsic::Real, kind)
    }

    // === Indirection Types ===

    /// `ref<elem>`: reference to an entity in memory.
    pub fn reference(&mut self, elem: Idx) -> Result<Idx, InvariantViolation> {
        self.indirection(Tag::Reference, elem)
    }

    /// `ptr<elem>`: entity with the `POINTER` attribute.
    pub fn pointer(&mut self, elem: Idx) -> Result<Idx, InvariantViolation> {
        self.indirection(Tag::Pointer, elem)
    }

    /// `heap<elem>`: entity with the `ALLOCATABLE` attribute.
    pub fn heap(&mut self, elem: Idx) -> Result<Idx, InvariantViolation> {
        self.indirection(Tag::Heap, elem)
    }

    fn indirection(&mut self, tag: Tag, elem: Idx) -> Result<Idx, InvariantViolation> {
        self.check_live(tag, elem)?;
        self.verify_indirection(tag, elem)?;
        Ok(self.intern(tag, elem.raw(), &[elem]))
    }

    fn verify_indirection(&self, tag: Tag, elem: Idx) -> Result<(), InvariantViolation> {
        let elem_tag = self.tag(elem);
        if elem_tag.is_indirection() {
            return Err(violation(
                tag,
                format!("element type `{elem_tag}` is already an indirection"),
            ));
        }
        if elem_tag.is_metadata() {
            return Err(violation(
                tag,
                format!("`{elem_tag}` values do not live in memory"),
            ));
        }
        if tag != Tag::Reference && elem_tag.is_descriptor() {
            return Err(violation(
                tag,
                format!("element type `{elem_tag}` is a descriptor; reference the descriptor instead"),
            ));
        }
        Ok(())
    }

    // === Descriptor Types ===

    /// `box<elem>` with an optional layout attribute.
    pub fn boxed(
        &mut self,
        elem: Idx,
        layout: Option<LayoutMap>,
    ) -> Result<Idx, InvariantViolation> {
        self.check_live(Tag::Box, elem)?;
        self.check_layout(Tag::Box, layout)?;
        let payload = [elem.raw(), LayoutMap::encode(layout)];
        Ok(self.intern_complex(Tag::Box, &payload, &[elem]))
    }

    /// `boxchar<kind>`: buffer reference plus runtime length.
    ///
    /// The element type is `character<kind>`, interned as a side effect.
    pub fn boxchar(&mut self, kind: Kind) -> Idx {
        let elem = self.character(kind);
        self.intern(Tag::BoxChar, elem.raw(), &[elem])
    }

    /// `boxproc<sig>`: procedure plus host-association data.
    pub fn boxproc(&mut self, sig: Idx) -> Result<Idx, InvariantViolation> {
        self.check_live(Tag::BoxProc, sig)?;
        if !self.is_procedure_signature(sig) {
            return Err(violation(
                Tag::BoxProc,
                format!("`{}` is not a procedure signature", self.tag(sig)),
            ));
        }
        Ok(self.intern(Tag::BoxProc, sig.raw(), &[sig]))
    }

    fn check_layout(&self, tag: Tag, layout: Option<LayoutMap>) -> Result<(), InvariantViolation> {
        match layout {
            Some(map) if map.name().raw() as usize >= self.names().len() => Err(violation(
                tag,
                "layout attribute was not created by this pool",
            )),
            _ => Ok(()),
        }
    }

    // === Aggregate Types ===

    /// `array<shape:elem>` with an optional layout attribute.
    ///
    /// An empty `shape` means the rank is unknown. That prints as
    /// `array<*:T>`, not `array<?:T>`: a lone `?` is one dimension of
    /// unknown extent, a different type.
    pub fn sequence(
        &mut self,
        shape: &[Extent],
        elem: Idx,
        layout: Option<LayoutMap>,
    ) -> Result<Idx, InvariantViolation> {
        self.check_live(Tag::Sequence, elem)?;
        self.check_layout(Tag::Sequence, layout)?;

        let elem_tag = self.tag(elem);
        if elem_tag == Tag::Sequence {
            return Err(violation(
                Tag::Sequence,
                "element type is already a sequence; add dimensions to the shape instead",
            ));
        }
        if elem_tag.is_descriptor() || elem_tag.is_metadata() {
            return Err(violation(
                Tag::Sequence,
                format!("cannot build an array of `{elem_tag}`"),
            ));
        }
        if let Some(&bad) = shape.iter().find(|&&extent| !is_valid_extent(extent)) {
            return Err(violation(
                Tag::Sequence,
                format!("extent {bad} is neither non-negative nor unknown"),
            ));
        }
        let rank = u32::try_from(shape.len())
            .ok()
            .filter(|&rank| rank != UNKNOWN_RANK)
            .ok_or_else(|| violation(Tag::Sequence, "too many dimensions"))?;

        // Layout: [elem, layout, rank, extent0_lo, extent0_hi, ...]
        let mut payload = Vec::with_capacity(3 + 2 * shape.len());
        payload.push(elem.raw());
        payload.push(LayoutMap::encode(layout));
        payload.push(rank);
        for &extent in shape {
            payload.extend_from_slice(&encode_extent(extent));
        }

        Ok(self.intern_complex(Tag::Sequence, &payload, &[elem]))
    }

    // === Metadata Types ===

    /// `dims<rank>`, or `dims<*>` when `rank` is `None`.
    pub fn dims(&mut self, rank: Option<u32>) -> Result<Idx, InvariantViolation> {
        let data = match rank {
            Some(UNKNOWN_RANK) => {
                return Err(violation(Tag::Dims, "rank is too large"));
            }
            Some(rank) => rank,
            None => UNKNOWN_RANK,
        };
        Ok(self.intern(Tag::Dims, data, &[]))
    }

    /// `field`.
    #[inline]
    pub fn field(&self) -> Idx {
        Idx::FIELD
    }

    /// `len`.
    #[inline]
    pub fn len_type(&self) -> Idx {
        Idx::LEN
    }

    /// `tdesc<of>`: runtime type descriptor for `of`.
    pub fn type_desc(&mut self, of: Idx) -> Result<Idx, InvariantViolation> {
        self.check_live(Tag::TypeDesc, of)?;
        let of_tag = self.tag(of);
        if of_tag.is_descriptor() || of_tag.is_indirection() || of_tag.is_metadata() {
            return Err(violation(
                Tag::TypeDesc,
                format!("cannot describe a `{of_tag}` type"),
            ));
        }
        Ok(self.intern(Tag::TypeDesc, of.raw(), &[of]))
    }

    // === Host Types ===

    /// Host integer `i<width>`.
    pub fn std_integer(&mut self, width: u32) -> Result<Idx, InvariantViolation> {
        if width == 0 || width > MAX_STD_INT_WIDTH {
            return Err(violation(
                Tag::StdInteger,
                format!("width {width} is outside 1..={MAX_STD_INT_WIDTH}"),
            ));
        }
        Ok(self.intern(Tag::StdInteger, width, &[]))
    }

    /// Host float `f<width>`.
    pub fn std_float(&mut self, width: u32) -> Result<Idx, InvariantViolation> {
        if !STD_FLOAT_WIDTHS.contains(&width) {
            return Err(violation(
                Tag::StdFloat,
                format!("unsupported float width {width}"),
            ));
        }
        Ok(self.intern(Tag::StdFloat, width, &[]))
    }

    /// Host `index`.
    #[inline]
    pub fn index(&self) -> Idx {
        Idx::INDEX
    }

    /// Host function signature `(inputs) -> (results)`.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "signature arity is bounded by the pool's u32 handle space"
    )]
    pub fn function(
        &mut self,
        inputs: &[Idx],
        results: &[Idx],
    ) -> Result<Idx, InvariantViolation> {
        for &ty in inputs.iter().chain(results) {
            self.check_live(Tag::Function, ty)?;
        }

        // Layout: [n_in, in0, in1, ..., n_out, out0, out1, ...]
        let mut payload = Vec::with_capacity(inputs.len() + results.len() + 2);
        payload.push(inputs.len() as u32);
        payload.extend(inputs.iter().map(|ty| ty.raw()));
        payload.push(results.len() as u32);
        payload.extend(results.iter().map(|ty| ty.raw()));

        let children: Vec<Idx> = inputs.iter().chain(results).copied().collect();
        Ok(self.intern_complex(Tag::Function, &payload, &children))
    }
}
