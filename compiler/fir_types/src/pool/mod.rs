//! The type pool: canonical storage for every FIR type of one compilation.
//!
//! # Design (from Zig's `InternPool`)
//!
//! - Types are `Item`s (tag + data) addressed by [`Idx`]
//! - Payloads that do not fit in 32 bits live in a shared `extra` array
//! - Structural keys map to existing handles, so equality is `Idx` equality
//! - Flags are computed once at interning time
//!
//! Records are the one exception to immutability: their layout lives in a
//! side table and is attached in place by `finalize_record`, so handles
//! taken while the record was only declared stay valid.
//!
//! Construction goes through `&mut Pool`, queries through `&Pool`. Wrap the
//! pool in a [`SharedPool`](crate::SharedPool) to share it between threads.

mod classify;
mod construct;
mod format;
mod parse;
mod record;

pub use construct::{MAX_STD_INT_WIDTH, STD_FLOAT_WIDTHS};
pub use format::TypeDisplay;
pub use record::Component;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::names::{check_layout_text, LayoutMap, Name, NameTable};
use crate::shape::{decode_extent, Shape};
use crate::{Idx, InvariantViolation, Item, Kind, LayoutError, Tag, TypeFlags};

use record::RecordData;

/// Canonicalizing store for one compilation context.
pub struct Pool {
    items: Vec<Item>,
    flags: Vec<TypeFlags>,
    /// Out-of-line payloads for tags with `uses_extra()`.
    extra: Vec<u32>,
    /// Dedup for single-word payloads: (tag, data).
    simple: FxHashMap<(Tag, u32), Idx>,
    /// Dedup for extra payloads: `[tag, payload...]`.
    complex: FxHashMap<Box<[u32]>, Idx>,
    records: Vec<RecordData>,
    records_by_name: FxHashMap<Name, Idx>,
    names: NameTable,
}

impl Pool {
    /// Create a pool holding only the pre-interned types.
    pub fn new() -> Self {
        let mut pool = Self {
            items: Vec::with_capacity(256),
            flags: Vec::with_capacity(256),
            extra: Vec::with_capacity(256),
            simple: FxHashMap::default(),
            complex: FxHashMap::default(),
            records: Vec::new(),
            records_by_name: FxHashMap::default(),
            names: NameTable::new(),
        };

        let preinterned = [
            (Tag::Invalid, Idx::INVALID),
            (Tag::Field, Idx::FIELD),
            (Tag::Len, Idx::LEN),
            (Tag::StdIndex, Idx::INDEX),
        ];
        for (tag, expected) in preinterned {
            let idx = pool.intern(tag, 0, &[]);
            debug_assert_eq!(idx, expected);
        }

        // Reserved slots: present so fixed indices never move, but never live.
        while pool.items.len() < Idx::FIRST_DYNAMIC as usize {
            pool.items.push(Item::unit(Tag::Invalid));
            pool.flags.push(TypeFlags::from_tag(Tag::Invalid));
        }

        pool
    }

    // === Interning ===

    /// Intern a type whose payload is a single word.
    pub(crate) fn intern(&mut self, tag: Tag, data: u32, children: &[Idx]) -> Idx {
        debug_assert!(!tag.uses_extra());
        if let Some(&idx) = self.simple.get(&(tag, data)) {
            return idx;
        }
        let idx = self.push(Item::new(tag, data), children);
        self.simple.insert((tag, data), idx);
        idx
    }

    /// Intern a type whose payload lives in the extra array.
    pub(crate) fn intern_complex(&mut self, tag: Tag, payload: &[u32], children: &[Idx]) -> Idx {
        debug_assert!(tag.uses_extra());
        let mut key = Vec::with_capacity(payload.len() + 1);
        key.push(u32::from(tag as u8));
        key.extend_from_slice(payload);

        if let Some(&idx) = self.complex.get(key.as_slice()) {
            return idx;
        }

        let start = u32::try_from(self.extra.len())
            .unwrap_or_else(|_| panic!("type pool extra array exceeded u32::MAX words"));
        self.extra.extend_from_slice(payload);
        let idx = self.push(Item::new(tag, start), children);
        self.complex.insert(key.into_boxed_slice(), idx);
        idx
    }

    /// Append a fresh item. Callers have already checked the dedup maps.
    pub(crate) fn push(&mut self, item: Item, children: &[Idx]) -> Idx {
        let raw = u32::try_from(self.items.len())
            .ok()
            .filter(|&raw| raw != Idx::NONE.raw())
            .unwrap_or_else(|| panic!("type pool exceeded u32::MAX - 1 types"));

        let flags = children
            .iter()
            .fold(TypeFlags::from_tag(item.tag), |acc, &child| {
                acc | (self.flags(child) & TypeFlags::PROPAGATE_MASK)
            });

        self.items.push(item);
        self.flags.push(flags);
        trace!(tag = %item.tag, idx = raw, "interned type");
        Idx::from_raw(raw)
    }

    /// Reject handles that do not name a type in this pool.
    pub(crate) fn check_live(&self, building: Tag, idx: Idx) -> Result<(), InvariantViolation> {
        if self.contains(idx) {
            Ok(())
        } else {
            Err(construct::violation(
                building,
                format!("{idx:?} does not name a type in this pool"),
            ))
        }
    }

    // === Raw Access ===

    /// Check whether `idx` names a type in this pool.
    #[inline]
    pub fn contains(&self, idx: Idx) -> bool {
        let raw = idx.raw();
        raw < Idx::PREINTERNED_COUNT
            || (raw >= Idx::FIRST_DYNAMIC && idx.slot() < self.items.len())
    }

    /// Item for `idx`, or `None` if it names no type in this pool.
    #[inline]
    pub fn get(&self, idx: Idx) -> Option<Item> {
        self.contains(idx).then(|| self.items[idx.slot()])
    }

    /// # Panics
    /// Panics if `idx` is past the end of the pool (e.g. [`Idx::NONE`]).
    #[inline]
    pub fn item(&self, idx: Idx) -> Item {
        self.items[idx.slot()]
    }

    /// # Panics
    /// Panics if `idx` is past the end of the pool.
    #[inline]
    pub fn tag(&self, idx: Idx) -> Tag {
        self.items[idx.slot()].tag
    }

    /// # Panics
    /// Panics if `idx` is past the end of the pool.
    #[inline]
    pub fn data(&self, idx: Idx) -> u32 {
        self.items[idx.slot()].data
    }

    /// Cached flags. Empty for handles that name no type in this pool, so
    /// every classification predicate answers `false` for them.
    #[inline]
    pub fn flags(&self, idx: Idx) -> TypeFlags {
        if self.contains(idx) {
            self.flags[idx.slot()]
        } else {
            TypeFlags::empty()
        }
    }

    /// Check if the invalid placeholder occurs anywhere in `idx`.
    #[inline]
    pub fn has_invalid(&self, idx: Idx) -> bool {
        self.flags(idx).has_invalid()
    }

    fn extra_of(&self, idx: Idx) -> &[u32] {
        &self.extra[self.item(idx).extra_start()..]
    }

    /// Number of slots in the pool, reserved ones included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing beyond the pre-interned types has been built.
    pub fn is_empty(&self) -> bool {
        self.items.len() <= Idx::FIRST_DYNAMIC as usize
    }

    // === Names and Layouts ===

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn name_str(&self, name: Name) -> &str {
        self.names.lookup(name)
    }

    /// Intern a layout-transform attribute from its text.
    ///
    /// Surrounding whitespace is dropped. Text that could not be read back
    /// from `box<T, layout=TEXT>` is rejected: empty text, unbalanced or
    /// mismatched brackets, a bare `>`, or a trailing `-`.
    pub fn layout_map(&mut self, text: &str) -> Result<LayoutMap, LayoutError> {
        let text = text.trim();
        check_layout_text(text).map_err(|reason| {
            debug!(text, reason, "rejected layout attribute");
            LayoutError {
                text: text.to_owned(),
                reason,
            }
        })?;
        Ok(LayoutMap(self.names.intern(text)))
    }

    pub fn layout_text(&self, layout: LayoutMap) -> &str {
        self.names.lookup(layout.0)
    }

    // === Payload Accessors ===

    /// Element type of Reference, Pointer, Heap, Box, `BoxChar`, `BoxProc`,
    /// or Sequence.
    ///
    /// For `BoxChar` this is the derived Character type of the same kind.
    pub fn element_type(&self, idx: Idx) -> Option<Idx> {
        let item = self.get(idx)?;
        match item.tag {
            Tag::Reference | Tag::Pointer | Tag::Heap | Tag::BoxChar | Tag::BoxProc => {
                Some(item.element())
            }
            Tag::Box | Tag::Sequence => Some(Idx::from_raw(self.extra_of(idx)[0])),
            _ => None,
        }
    }

    /// Layout attribute of a Box or Sequence, if it has one.
    pub fn layout(&self, idx: Idx) -> Option<LayoutMap> {
        match self.get(idx)?.tag {
            Tag::Box | Tag::Sequence => LayoutMap::decode(self.extra_of(idx)[1]),
            _ => None,
        }
    }

    /// Kind selector of an intrinsic type, or of a `BoxChar`'s character.
    pub fn kind_of(&self, idx: Idx) -> Option<Kind> {
        let item = self.get(idx)?;
        if item.tag.is_intrinsic() {
            Some(Kind::new(item.data))
        } else if item.tag == Tag::BoxChar {
            self.kind_of(item.element())
        } else {
            None
        }
    }

    /// Shape of a sequence. Empty when the rank is unknown.
    pub fn shape(&self, idx: Idx) -> Option<Shape> {
        if self.get(idx)?.tag != Tag::Sequence {
            return None;
        }
        let extra = self.extra_of(idx);
        let rank = extra[2] as usize;
        Some(
            extra[3..3 + 2 * rank]
                .chunks_exact(2)
                .map(|words| decode_extent(words[0], words[1]))
                .collect(),
        )
    }

    /// Number of dimensions of a sequence.
    ///
    /// `None` when the rank is unknown or `idx` is not a sequence.
    pub fn sequence_rank(&self, idx: Idx) -> Option<usize> {
        if self.get(idx)?.tag != Tag::Sequence {
            return None;
        }
        let rank = self.extra_of(idx)[2] as usize;
        (rank != 0).then_some(rank)
    }

    /// Check if a sequence has an unknown rank or any unknown extent.
    pub fn has_unknown_extent(&self, idx: Idx) -> bool {
        self.shape(idx).is_some_and(|shape| {
            shape.is_empty() || shape.contains(&crate::shape::UNKNOWN_EXTENT)
        })
    }

    /// Rank of a Dims type. `None` when unknown or `idx` is not Dims.
    pub fn dims_rank(&self, idx: Idx) -> Option<u32> {
        let item = self.get(idx)?;
        (item.tag == Tag::Dims && item.data != construct::UNKNOWN_RANK).then_some(item.data)
    }

    /// Type described by a `TypeDesc`.
    pub fn type_desc_of(&self, idx: Idx) -> Option<Idx> {
        let item = self.get(idx)?;
        (item.tag == Tag::TypeDesc).then(|| item.element())
    }

    /// Bit width of a host integer or float.
    pub fn std_width(&self, idx: Idx) -> Option<u32> {
        let item = self.get(idx)?;
        matches!(item.tag, Tag::StdInteger | Tag::StdFloat).then_some(item.data)
    }

    /// Input types of a function signature.
    pub fn function_inputs(&self, idx: Idx) -> Vec<Idx> {
        if !self.is_procedure_signature(idx) {
            return Vec::new();
        }
        let extra = self.extra_of(idx);
        let n_in = extra[0] as usize;
        extra[1..=n_in].iter().copied().map(Idx::from_raw).collect()
    }

    /// Result types of a function signature.
    pub fn function_results(&self, idx: Idx) -> Vec<Idx> {
        if !self.is_procedure_signature(idx) {
            return Vec::new();
        }
        let extra = self.extra_of(idx);
        let n_in = extra[0] as usize;
        let n_out = extra[n_in + 1] as usize;
        extra[n_in + 2..n_in + 2 + n_out]
            .iter()
            .copied()
            .map(Idx::from_raw)
            .collect()
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("len", &self.len())
            .field("records", &self.records.len())
            .field("names", &self.names.len())
            .finish_non_exhaustive()
    }
}
