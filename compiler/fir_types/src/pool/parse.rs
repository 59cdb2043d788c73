//! Parsing type text into pool handles.
//!
//! Recursive descent over a caller-owned [`Cursor`]. Every type is built
//! through the public constructors, so text cannot produce a type the
//! constructors would reject. A record with a body is declared before its
//! components are read, which lets the body refer back to the record.

use smallvec::{smallvec, SmallVec};

use crate::cursor::{is_ident_start, Cursor};
use crate::kind::Intrinsic;
use crate::names::LayoutMap;
use crate::shape::{Extent, UNKNOWN_EXTENT};
use crate::stack::ensure_sufficient_stack;
use crate::{Idx, Kind, ParseError, Pool};

type Components<'a> = SmallVec<[(&'a str, Idx); 8]>;

impl Pool {
    /// Parse one type starting at the cursor.
    ///
    /// On success the cursor sits just past the type. On failure the pool
    /// may hold types built for the part of the text that did parse.
    #[tracing::instrument(level = "trace", skip_all, fields(pos = cursor.pos()))]
    pub fn parse_type(&mut self, cursor: &mut Cursor<'_>) -> Result<Idx, ParseError> {
        self.parse(cursor)
    }

    /// Parse `text`, which must hold exactly one type.
    pub fn parse_type_str(&mut self, text: &str) -> Result<Idx, ParseError> {
        let mut cursor = Cursor::new(text);
        let idx = self.parse_type(&mut cursor)?;
        cursor.skip_whitespace();
        if !cursor.is_eof() {
            return Err(cursor.error("end of input").into());
        }
        Ok(idx)
    }

    fn parse(&mut self, cursor: &mut Cursor<'_>) -> Result<Idx, ParseError> {
        ensure_sufficient_stack(|| self.parse_inner(cursor))
    }

    fn parse_inner(&mut self, cursor: &mut Cursor<'_>) -> Result<Idx, ParseError> {
        cursor.skip_whitespace();
        if cursor.current() == b'(' {
            return self.parse_function(cursor);
        }
        if !is_ident_start(cursor.current()) {
            return Err(cursor.error("a type").into());
        }

        let start = *cursor;
        let word = cursor.identifier()?;

        if let Some(intrinsic) = Intrinsic::from_keyword(word) {
            let kind = parse_kind(cursor)?;
            return Ok(self.intrinsic(intrinsic, kind));
        }

        let idx = match word {
            "ref" => {
                let elem = self.parse_wrapped(cursor)?;
                self.reference(elem)?
            }
            "ptr" => {
                let elem = self.parse_wrapped(cursor)?;
                self.pointer(elem)?
            }
            "heap" => {
                let elem = self.parse_wrapped(cursor)?;
                self.heap(elem)?
            }
            "box" => {
                cursor.expect(b'<')?;
                let elem = self.parse(cursor)?;
                let layout = self.parse_layout(cursor)?;
                cursor.expect(b'>')?;
                self.boxed(elem, layout)?
            }
            "boxchar" => {
                let kind = parse_kind(cursor)?;
                self.boxchar(kind)
            }
            "boxproc" => {
                let sig = self.parse_wrapped(cursor)?;
                self.boxproc(sig)?
            }
            "array" => self.parse_sequence(cursor)?,
            "type" => self.parse_record(cursor)?,
            "dims" => {
                cursor.expect(b'<')?;
                let rank = if cursor.eat(b'*') {
                    None
                } else {
                    Some(cursor.decimal::<u32>()?)
                };
                cursor.expect(b'>')?;
                self.dims(rank)?
            }
            "tdesc" => {
                let of = self.parse_wrapped(cursor)?;
                self.type_desc(of)?
            }
            "field" => self.field(),
            "len" => self.len_type(),
            "index" => self.index(),
            "invalid" => Idx::INVALID,
            _ => match std_width(word) {
                Some((b'i', width)) => self.std_integer(width)?,
                Some((_, width)) => self.std_float(width)?,
                None => {
                    *cursor = start;
                    return Err(cursor.error("a type").into());
                }
            },
        };
        Ok(idx)
    }

    /// `<T>` after a single-element keyword.
    fn parse_wrapped(&mut self, cursor: &mut Cursor<'_>) -> Result<Idx, ParseError> {
        cursor.expect(b'<')?;
        let elem = self.parse(cursor)?;
        cursor.expect(b'>')?;
        Ok(elem)
    }

    /// Optional `, layout=MAP` before the closing `>`.
    fn parse_layout(
        &mut self,
        cursor: &mut Cursor<'_>,
    ) -> Result<Option<LayoutMap>, ParseError> {
        if !cursor.eat(b',') {
            return Ok(None);
        }
        cursor.skip_whitespace();
        let before = *cursor;
        if cursor.identifier().ok() != Some("layout") {
            *cursor = before;
            return Err(cursor.error("`layout`").into());
        }
        cursor.expect(b'=')?;
        cursor.skip_whitespace();
        let start = *cursor;
        let text = cursor.eat_until_closing_angle();
        if text.trim().is_empty() {
            return Err(cursor.error("layout text").into());
        }
        match self.layout_map(text) {
            Ok(map) => Ok(Some(map)),
            Err(_) => Err(start.error("balanced layout text").into()),
        }
    }

    /// `array<SHAPE:T>` or `array<SHAPE:T, layout=MAP>`.
    fn parse_sequence(&mut self, cursor: &mut Cursor<'_>) -> Result<Idx, ParseError> {
        cursor.expect(b'<')?;
        let mut shape: SmallVec<[Extent; 4]> = SmallVec::new();
        if !cursor.eat(b'*') {
            loop {
                let extent = if cursor.eat(b'?') {
                    UNKNOWN_EXTENT
                } else {
                    cursor.decimal::<Extent>()?
                };
                shape.push(extent);
                if !cursor.eat(b'x') {
                    break;
                }
            }
        }
        cursor.expect(b':')?;
        let elem = self.parse(cursor)?;
        let layout = self.parse_layout(cursor)?;
        cursor.expect(b'>')?;
        Ok(self.sequence(&shape, elem, layout)?)
    }

    /// `type<NAME>`, `type<NAME{..}>` or `type<NAME(..){..}>`.
    fn parse_record(&mut self, cursor: &mut Cursor<'_>) -> Result<Idx, ParseError> {
        cursor.expect(b'<')?;
        let name = cursor.identifier()?;
        let record = self.declare_record(name)?;

        let len_params = if cursor.eat(b'(') {
            let list = self.parse_components(cursor, b')')?;
            cursor.skip_whitespace();
            if cursor.current() != b'{' {
                return Err(cursor.error("`{` after the length parameters").into());
            }
            Some(list)
        } else {
            None
        };

        if cursor.eat(b'{') {
            let components = self.parse_components(cursor, b'}')?;
            let len_params = len_params.unwrap_or_default();
            self.finalize_record(record, &len_params, &components)?;
        }

        cursor.expect(b'>')?;
        Ok(record)
    }

    /// `name:T, ...` up to and including `close`.
    fn parse_components<'a>(
        &mut self,
        cursor: &mut Cursor<'a>,
        close: u8,
    ) -> Result<Components<'a>, ParseError> {
        let mut list = Components::new();
        if cursor.eat(close) {
            return Ok(list);
        }
        loop {
            let name = cursor.identifier()?;
            cursor.expect(b':')?;
            let ty = self.parse(cursor)?;
            list.push((name, ty));
            if cursor.eat(close) {
                return Ok(list);
            }
            cursor.expect(b',')?;
        }
    }

    /// `(T, ...) -> R` or `(T, ...) -> (R, ...)`.
    fn parse_function(&mut self, cursor: &mut Cursor<'_>) -> Result<Idx, ParseError> {
        let inputs = self.parse_type_list(cursor)?;
        if !cursor.eat_str("->") {
            return Err(cursor.error("`->`").into());
        }
        cursor.skip_whitespace();
        let results = if cursor.current() == b'(' {
            self.parse_type_list(cursor)?
        } else {
            smallvec![self.parse(cursor)?]
        };
        Ok(self.function(&inputs, &results)?)
    }

    /// `(T, ...)`, possibly empty.
    fn parse_type_list(
        &mut self,
        cursor: &mut Cursor<'_>,
    ) -> Result<SmallVec<[Idx; 4]>, ParseError> {
        cursor.expect(b'(')?;
        let mut list = SmallVec::new();
        if cursor.eat(b')') {
            return Ok(list);
        }
        loop {
            list.push(self.parse(cursor)?);
            if cursor.eat(b')') {
                return Ok(list);
            }
            cursor.expect(b',')?;
        }
    }
}

/// `<K>` after an intrinsic or `boxchar` keyword.
fn parse_kind(cursor: &mut Cursor<'_>) -> Result<Kind, ParseError> {
    cursor.expect(b'<')?;
    let kind = cursor.decimal::<u32>()?;
    cursor.expect(b'>')?;
    Ok(Kind::new(kind))
}

/// Split `i32` / `f64` into prefix and width.
fn std_width(word: &str) -> Option<(u8, u32)> {
    let (&prefix, digits) = word.as_bytes().split_first()?;
    if !matches!(prefix, b'i' | b'f')
        || digits.is_empty()
        || !digits.iter().all(u8::is_ascii_digit)
    {
        return None;
    }
    word[1..].parse().ok().map(|width| (prefix, width))
}
