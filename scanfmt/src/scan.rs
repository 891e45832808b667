//! The public entry points (spec §6.2): `scan`, `scan_value`, `input`,
//! `prompt`. Deliberately thin per spec §1's scope — everything
//! interesting (format parsing, argument dispatch, per-type reading)
//! lives in [`crate::format`], [`crate::args`], and [`crate::read`];
//! this module just wires a source and a tuple of output types to that
//! engine.
//!
//! Rust has no variadic generics, so where the original overloads on an
//! arbitrary arity of `T...`, this crate generates tuple impls of
//! [`ScanTuple`] for arities 1 through 8 via a declarative macro — the
//! same trick `nom`'s tuple combinators and serde's tuple `Deserialize`
//! impls use for the same problem.

use std::io::Write as _;

use smallvec::{smallvec, SmallVec};

use crate::args::Argument;
use crate::buffer::ScanBuffer;
use crate::error::{Error, ScanResult};
use crate::format::{self, FormatToken};
use crate::locale::Locale;
use crate::read::algorithms::CodeUnit;
use crate::source::{IterSource, StdinSource};

/// Holds one [`Argument`] per replacement field without a heap allocation
/// for the common case (spec's tuple arities top out at 8).
pub type ArgVec<'a> = SmallVec<[Argument<'a, u8>; 8]>;

/// The result of a successful scan: the position just past the last
/// code unit consumed, and the parsed value(s) (spec §3's "Scan
/// result").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanned<T> {
    pub end: usize,
    pub value: T,
}

/// A Rust type that can sit in exactly one replacement field: knows how
/// to produce its own [`Argument`] handle and a sensible default to
/// scan into. Implemented for every builtin the argument store supports
/// (spec's closed `arg_type` tag list); custom types implement
/// [`crate::args::CustomScan`] directly instead of this trait.
pub trait ScanArg: Sized {
    fn default_value() -> Self;
    fn as_argument(&mut self) -> Argument<'_, u8>;
}

macro_rules! impl_scan_arg_int {
    ($($t:ty => $variant:ident),* $(,)?) => {$(
        impl ScanArg for $t {
            fn default_value() -> Self { 0 }
            fn as_argument(&mut self) -> Argument<'_, u8> { Argument::$variant(self) }
        }
    )*};
}

impl_scan_arg_int! {
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, u128 => U128, usize => Usize,
}

impl ScanArg for f32 {
    fn default_value() -> Self {
        0.0
    }
    fn as_argument(&mut self) -> Argument<'_, u8> {
        Argument::F32(self)
    }
}

impl ScanArg for f64 {
    fn default_value() -> Self {
        0.0
    }
    fn as_argument(&mut self) -> Argument<'_, u8> {
        Argument::F64(self)
    }
}

impl ScanArg for bool {
    fn default_value() -> Self {
        false
    }
    fn as_argument(&mut self) -> Argument<'_, u8> {
        Argument::Bool(self)
    }
}

impl ScanArg for char {
    fn default_value() -> Self {
        '\0'
    }
    fn as_argument(&mut self) -> Argument<'_, u8> {
        Argument::CodePoint(self)
    }
}

impl ScanArg for String {
    fn default_value() -> Self {
        String::new()
    }
    fn as_argument(&mut self) -> Argument<'_, u8> {
        Argument::String(self)
    }
}

/// A `usize` bit pattern scanned from a `{:p}` field (spec's
/// supplemented pointer presentation). A distinct newtype rather than a
/// bare `usize` impl so that `scan::<usize>(...)` (decimal) and
/// `scan::<Pointer>(...)` (hex, `0x`-prefixed) stay unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pointer(pub usize);

impl ScanArg for Pointer {
    fn default_value() -> Self {
        Pointer(0)
    }
    fn as_argument(&mut self) -> Argument<'_, u8> {
        Argument::Pointer(&mut self.0)
    }
}

/// Anything that can supply a narrow (UTF-8) scan buffer: a contiguous
/// byte/str source, a forward byte iterator, or (via [`StdinSource`])
/// the process-wide standard-input buffer (spec §6.2's `source`
/// parameter, narrow case).
pub trait IntoNarrowSource<'s> {
    fn into_scan_buffer(self) -> ScanBuffer<'s, u8>;
}

impl<'s> IntoNarrowSource<'s> for &'s str {
    fn into_scan_buffer(self) -> ScanBuffer<'s, u8> {
        ScanBuffer::from_slice(self.as_bytes())
    }
}

impl<'s> IntoNarrowSource<'s> for &'s [u8] {
    fn into_scan_buffer(self) -> ScanBuffer<'s, u8> {
        ScanBuffer::from_slice(self)
    }
}

impl<'s, I> IntoNarrowSource<'s> for IterSource<I>
where
    I: Iterator<Item = u8> + 's,
{
    fn into_scan_buffer(self) -> ScanBuffer<'s, u8> {
        ScanBuffer::from_source(self)
    }
}

/// Scans `source` under `format` into a fresh `T`, using the classic
/// locale (spec §6.2's `scan<T...>(source, format)`).
pub fn scan<'s, T: ScanTuple>(
    source: impl IntoNarrowSource<'s>,
    format: &str,
) -> ScanResult<Scanned<T>> {
    scan_with_locale(source, format, &Locale::classic())
}

/// As [`scan`], but with an explicit [`Locale`] (spec §6.2's
/// `scan<T...>(locale, source, format)`).
pub fn scan_with_locale<'s, T: ScanTuple>(
    source: impl IntoNarrowSource<'s>,
    format: &str,
    locale: &Locale,
) -> ScanResult<Scanned<T>> {
    let mut buf = source.into_scan_buffer();
    let mut value = T::default_value();
    let end = scan_into(&mut buf, 0, format, locale, &mut T::as_arguments(&mut value))?;
    Ok(Scanned { end, value })
}

/// Scans `source` under `format`, seeding the output tuple with
/// `initial_values` instead of each field's default (spec §6.2's
/// `scan<T...>(source, format, initial_values)`) — useful when a field
/// should be left untouched by an optional replacement that the format
/// string doesn't always produce.
pub fn scan_seeded<'s, T: ScanTuple>(
    source: impl IntoNarrowSource<'s>,
    format: &str,
    mut initial_values: T,
) -> ScanResult<Scanned<T>> {
    let mut buf = source.into_scan_buffer();
    let end = scan_into(
        &mut buf,
        0,
        format,
        &Locale::classic(),
        &mut T::as_arguments(&mut initial_values),
    )?;
    Ok(Scanned {
        end,
        value: initial_values,
    })
}

/// Scans a single value out of `source` with the implicit format `{}`
/// (spec §6.2's `scan_value<T>`).
pub fn scan_value<'s, T: ScanArg>(source: impl IntoNarrowSource<'s>) -> ScanResult<Scanned<T>> {
    let mut buf = source.into_scan_buffer();
    let mut value = T::default_value();
    let end = scan_into(&mut buf, 0, "{}", &Locale::classic(), &mut [value.as_argument()])?;
    Ok(Scanned { end, value })
}

/// Reads from the process-wide standard-input buffer under `format`
/// (spec §6.2's `input<T...>`). Locks stdin for the duration of the
/// call, per spec §5.
pub fn input<T: ScanTuple>(format: &str) -> ScanResult<T> {
    let stdin = StdinSource::lock();
    let mut buf = ScanBuffer::from_source(stdin);
    let mut value = T::default_value();
    scan_into(&mut buf, 0, format, &Locale::classic(), &mut T::as_arguments(&mut value))?;
    Ok(value)
}

/// Writes `message` to standard output, flushes it, then reads from
/// stdin under `format` (spec §6.2's `prompt<T...>`).
pub fn prompt<T: ScanTuple>(message: &str, format: &str) -> ScanResult<T> {
    print!("{message}");
    std::io::stdout()
        .flush()
        .map_err(|_| Error::bad_source(0, "failed to flush prompt message to stdout"))?;
    input(format)
}

/// The engine shared by every entry point above: parses `format`,
/// consumes literal text exactly, and dispatches each replacement field
/// to [`crate::args::read_argument`] (spec §4.2).
pub fn scan_into<'s, CU: CodeUnit>(
    buf: &mut ScanBuffer<'s, CU>,
    start: usize,
    format: &str,
    locale: &Locale,
    args: &mut [Argument<'s, CU>],
) -> ScanResult<usize> {
    let parsed = format::parse(format)?;

    let mut pos = start;
    for token in &parsed.tokens {
        match token {
            FormatToken::Literal(text) => {
                pos = consume_literal(buf, pos, text)?;
            }
            FormatToken::Replacement { arg_id, spec } => {
                let arg = args
                    .get_mut(*arg_id)
                    .ok_or_else(|| Error::invalid_format_string(pos, "argument index out of range"))?;
                pos = crate::args::read_argument(buf, pos, spec, locale, arg)?;
            }
        }
    }
    Ok(pos)
}

fn consume_literal<CU: CodeUnit>(buf: &mut ScanBuffer<CU>, pos: usize, text: &str) -> ScanResult<usize> {
    let mut p = pos;
    for want in text.chars() {
        match crate::read::algorithms::peek_code_point(buf, p)? {
            Some((c, len)) if c == want => p += len,
            Some(_) => {
                return Err(Error::invalid_scanned_value(
                    p,
                    "source did not match the format string's literal text",
                ))
            }
            None => return Err(Error::end_of_range(p)),
        }
    }
    Ok(p)
}

/// Implemented for tuples of [`ScanArg`] of arity 1 through 8, giving
/// `scan`/`input`/`prompt` their `scan<T...>` shape without variadic
/// generics.
pub trait ScanTuple: Sized {
    fn default_value() -> Self;
    fn as_arguments(value: &mut Self) -> ArgVec<'_>;
}

impl<A: ScanArg> ScanTuple for A {
    fn default_value() -> Self {
        A::default_value()
    }
    fn as_arguments(value: &mut Self) -> ArgVec<'_> {
        smallvec![value.as_argument()]
    }
}

macro_rules! impl_scan_tuple {
    ($($name:ident),+) => {
        impl<$($name: ScanArg),+> ScanTuple for ($($name,)+) {
            fn default_value() -> Self {
                ($($name::default_value(),)+)
            }

            #[allow(non_snake_case)]
            fn as_arguments(value: &mut Self) -> ArgVec<'_> {
                let ($(ref mut $name,)+) = *value;
                smallvec![$($name.as_argument()),+]
            }
        }
    };
}

impl_scan_tuple!(A1, A2);
impl_scan_tuple!(A1, A2, A3);
impl_scan_tuple!(A1, A2, A3, A4);
impl_scan_tuple!(A1, A2, A3, A4, A5);
impl_scan_tuple!(A1, A2, A3, A4, A5, A6);
impl_scan_tuple!(A1, A2, A3, A4, A5, A6, A7);
impl_scan_tuple!(A1, A2, A3, A4, A5, A6, A7, A8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_single_int() {
        let Scanned { end, value } = scan::<i32>("42", "{}").unwrap();
        assert_eq!(value, 42);
        assert_eq!(end, 2);
    }

    #[test]
    fn scans_pair() {
        let Scanned { end, value } = scan::<(i32, i32)>("123 456", "{} {}").unwrap();
        assert_eq!(value, (123, 456));
        assert_eq!(end, 7);
    }

    #[test]
    fn leading_whitespace_is_skipped_by_default() {
        let Scanned { value, .. } = scan::<i32>(" \n42", "{}").unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn literal_text_must_match() {
        let Scanned { value, .. } = scan::<i32>("x=42", "x={}").unwrap();
        assert_eq!(value, 42);
        assert!(scan::<i32>("y=42", "x={}").is_err());
    }

    #[test]
    fn fixed_width_string_field() {
        let Scanned { end, value } = scan::<String>("abc def", "{:.4c}").unwrap();
        assert_eq!(value, "abc ");
        assert_eq!(end, 4);
    }

    #[test]
    fn double_sign_is_rejected() {
        assert!(scan::<i32>("--4", "{}").is_err());
    }

    #[test]
    fn scan_value_uses_implicit_field() {
        let Scanned { value, .. } = scan_value::<i32>("42").unwrap();
        assert_eq!(value, 42);
    }
}
