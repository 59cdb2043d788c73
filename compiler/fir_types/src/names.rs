//! Interned identifiers for record names, component names, and layout text.
//!
//! Each pool owns one `NameTable`; a `Name` is only meaningful to the pool
//! that produced it. Strings are owned by the table and released with it.

use std::fmt;

use rustc_hash::FxHashMap;

/// Interned string handle.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

/// Opaque layout-transform attribute carried by Box and Sequence types.
///
/// The text is kept verbatim (e.g. an affine map); the type layer only
/// compares it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutMap(pub(crate) Name);

impl LayoutMap {
    /// Sentinel stored in extra arrays for "no layout".
    pub(crate) const ABSENT: u32 = u32::MAX;

    pub(crate) fn encode(layout: Option<LayoutMap>) -> u32 {
        layout.map_or(Self::ABSENT, |l| l.0.raw())
    }

    pub(crate) fn decode(raw: u32) -> Option<LayoutMap> {
        (raw != Self::ABSENT).then_some(LayoutMap(Name::from_raw(raw)))
    }

    pub fn name(self) -> Name {
        self.0
    }
}

/// Check that trimmed layout text reads back unchanged when printed as
/// `layout=TEXT>`.
///
/// Brackets `<>()[]{}` must nest and match. A `>` right after `-` is an
/// arrow and closes nothing. The text may not end in `-`, which would turn
/// the closing `>` into an arrow.
pub(crate) fn check_layout_text(text: &str) -> Result<(), &'static str> {
    if text.is_empty() {
        return Err("layout text is empty");
    }
    if text.ends_with('-') {
        return Err("layout text ends in `-`");
    }
    let mut open: Vec<u8> = Vec::new();
    let mut prev = 0u8;
    for &b in text.as_bytes() {
        match b {
            b'<' | b'(' | b'[' | b'{' => open.push(b),
            b'>' if prev == b'-' => {}
            b'>' | b')' | b']' | b'}' => match open.pop() {
                Some(opener) if closer(opener) == b => {}
                Some(_) => return Err("mismatched brackets"),
                None if b == b'>' => return Err("`>` outside any brackets"),
                None => return Err("unbalanced closing bracket"),
            },
            _ => {}
        }
        prev = b;
    }
    if open.is_empty() {
        Ok(())
    } else {
        Err("unclosed bracket")
    }
}

fn closer(opener: u8) -> u8 {
    match opener {
        b'<' => b'>',
        b'(' => b')',
        b'[' => b']',
        _ => b'}',
    }
}

/// Per-pool string table.
#[derive(Default)]
pub struct NameTable {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `s`, returning the existing handle when already present.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&name) = self.map.get(s) {
            return name;
        }
        let name = Name(
            u32::try_from(self.strings.len())
                .unwrap_or_else(|_| panic!("name table exceeded u32::MAX entries")),
        );
        self.strings.push(s.into());
        self.map.insert(s.into(), name);
        name
    }

    /// Look up `s` without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied()
    }

    /// Resolve a handle back to its string.
    ///
    /// # Panics
    /// Panics if the handle was not created by this table.
    #[inline]
    pub fn lookup(&self, name: Name) -> &str {
        &self.strings[name.0 as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl fmt::Debug for NameTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameTable")
            .field("len", &self.len())
            .finish()
    }
}
