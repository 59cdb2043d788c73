//! Canonical textual form of types.
//!
//! The same handle always prints the same bytes, and the output parses
//! back to the same handle in the same pool.
//!
//! A finalized record prints its body the first time it is reached. Inside
//! its own body (directly or through other records) it prints as the bare
//! `type<NAME>`, which is what keeps recursive types finite.

use std::fmt::{self, Write};

use crate::shape::UNKNOWN_EXTENT;
use crate::stack::ensure_sufficient_stack;
use crate::{Idx, Pool, Tag};

impl Pool {
    /// Write the canonical form of `idx` to `out`.
    ///
    /// Only sink errors are reported.
    ///
    /// # Panics
    /// Panics if `idx` was not produced by this pool.
    pub fn print_type<W: Write>(&self, idx: Idx, out: &mut W) -> fmt::Result {
        Printer {
            pool: self,
            out,
            open_records: Vec::new(),
        }
        .print(idx)
    }

    /// Format a type as a string.
    pub fn format_type(&self, idx: Idx) -> String {
        let mut buf = String::new();
        // Writing into a String cannot fail.
        let _ = self.print_type(idx, &mut buf);
        buf
    }

    /// `Display` adapter for `idx`.
    pub fn display(&self, idx: Idx) -> TypeDisplay<'_> {
        TypeDisplay { pool: self, idx }
    }
}

/// Displays a type in its canonical form. See [`Pool::display`].
pub struct TypeDisplay<'p> {
    pool: &'p Pool,
    idx: Idx,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pool.print_type(self.idx, f)
    }
}

struct Printer<'p, 'o, W> {
    pool: &'p Pool,
    out: &'o mut W,
    /// Records whose body is currently being printed.
    open_records: Vec<Idx>,
}

impl<W: Write> Printer<'_, '_, W> {
    fn print(&mut self, idx: Idx) -> fmt::Result {
        ensure_sufficient_stack(|| self.print_inner(idx))
    }

    fn print_inner(&mut self, idx: Idx) -> fmt::Result {
        let pool = self.pool;
        let item = pool.item(idx);
        let tag = item.tag;
        match tag {
            Tag::Invalid | Tag::Field | Tag::Len | Tag::StdIndex => self.out.write_str(tag.keyword()),

            Tag::Character | Tag::Complex | Tag::Integer | Tag::Logical | Tag::Real => {
                write!(self.out, "{tag}<{}>", item.data)
            }
            Tag::BoxChar => {
                let kind = pool.data(item.element());
                write!(self.out, "{tag}<{kind}>")
            }

            Tag::Reference | Tag::Pointer | Tag::Heap | Tag::BoxProc | Tag::TypeDesc => {
                write!(self.out, "{tag}<")?;
                self.print(item.element())?;
                self.out.write_char('>')
            }

            Tag::Box => {
                write!(self.out, "{tag}<")?;
                self.print_element_and_layout(idx)?;
                self.out.write_char('>')
            }

            Tag::Sequence => {
                write!(self.out, "{tag}<")?;
                let shape = pool.shape(idx).unwrap_or_default();
                if shape.is_empty() {
                    self.out.write_char('*')?;
                }
                for (i, &extent) in shape.iter().enumerate() {
                    if i > 0 {
                        self.out.write_char('x')?;
                    }
                    if extent == UNKNOWN_EXTENT {
                        self.out.write_char('?')?;
                    } else {
                        write!(self.out, "{extent}")?;
                    }
                }
                self.out.write_char(':')?;
                self.print_element_and_layout(idx)?;
                self.out.write_char('>')
            }

            Tag::Record => self.print_record(idx),

            Tag::Dims => match pool.dims_rank(idx) {
                Some(rank) => write!(self.out, "{tag}<{rank}>"),
                None => write!(self.out, "{tag}<*>"),
            },

            Tag::StdInteger | Tag::StdFloat => write!(self.out, "{tag}{}", item.data),

            Tag::Function => {
                self.print_list(&pool.function_inputs(idx))?;
                self.out.write_str(" -> ")?;
                match pool.function_results(idx).as_slice() {
                    [single] if pool.tag(*single) != Tag::Function => self.print(*single),
                    results => self.print_list(results),
                }
            }
        }
    }

    fn print_element_and_layout(&mut self, idx: Idx) -> fmt::Result {
        let pool = self.pool;
        if let Some(elem) = pool.element_type(idx) {
            self.print(elem)?;
        }
        if let Some(layout) = pool.layout(idx) {
            write!(self.out, ", layout={}", pool.layout_text(layout))?;
        }
        Ok(())
    }

    fn print_list(&mut self, types: &[Idx]) -> fmt::Result {
        self.out.write_char('(')?;
        for (i, &ty) in types.iter().enumerate() {
            if i > 0 {
                self.out.write_str(", ")?;
            }
            self.print(ty)?;
        }
        self.out.write_char(')')
    }

    fn print_record(&mut self, idx: Idx) -> fmt::Result {
        let pool = self.pool;
        write!(self.out, "type<{}", pool.record_name(idx).unwrap_or_default())?;

        if pool.is_finalized(idx) && !self.open_records.contains(&idx) {
            self.open_records.push(idx);

            let len_params = pool.record_len_params(idx);
            if !len_params.is_empty() {
                self.out.write_char('(')?;
                self.print_components(len_params)?;
                self.out.write_char(')')?;
            }
            self.out.write_char('{')?;
            self.print_components(pool.record_components(idx))?;
            self.out.write_char('}')?;

            self.open_records.pop();
        }

        self.out.write_char('>')
    }

    fn print_components(&mut self, components: &[crate::Component]) -> fmt::Result {
        let pool = self.pool;
        for (i, component) in components.iter().enumerate() {
            if i > 0 {
                self.out.write_char(',')?;
            }
            write!(self.out, "{}:", pool.name_str(component.name))?;
            self.print(component.ty)?;
        }
        Ok(())
    }
}
