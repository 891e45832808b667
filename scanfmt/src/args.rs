//! Argument store & dispatch (spec C5): a closed, tagged variant over
//! every builtin output location the engine can fill in, plus one
//! variant for user-defined types carrying a `dyn` trait object instead
//! of a raw function pointer (the idiomatic Rust equivalent of the
//! spec's "function pointer slot" — §9 Design Notes explicitly calls for
//! a closed tagged-variant rather than open-ended polymorphism over
//! every `T`).
//!
//! Grounded in the teacher's own closed dispatch shape
//! (`impl/src/generator.rs` matches on a small, fixed set of format
//! characters to pick a packer/unpacker); here the match is over argument
//! variants instead of format characters, but the principle — a finite
//! `match`, no open trait object per builtin — is the same.

use crate::buffer::ScanBuffer;
use crate::error::{Error, ScanResult};
use crate::format::spec::{FormatSpec, Presentation};
use crate::locale::Locale;
use crate::read::algorithms::CodeUnit;
use crate::read::{boolean, char_, float, integer, pointer, string};

#[cfg(feature = "regex")]
use crate::read::regex::{self, RegexCapture};

/// Every builtin type tag the scanner can read into (spec §3's
/// "Argument"). Kept purely for introspection/diagnostics — dispatch
/// itself happens by matching on [`Argument`], not by comparing tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgTypeTag {
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Bool,
    CodePoint,
    String,
    StringView,
    Pointer,
    RegexMatches,
    Custom,
}

/// A user-defined reader, the escape hatch for types the builtin tags
/// don't cover (spec §4.11's `custom` tag). Implementors consume the
/// parse context (the format spec for their field) and the scan
/// context (the buffer and position) and return the position just past
/// what they read.
pub trait CustomScan<CU: CodeUnit> {
    fn scan(
        &mut self,
        buf: &mut ScanBuffer<CU>,
        pos: usize,
        spec: &FormatSpec,
        locale: &Locale,
    ) -> ScanResult<usize>;
}

/// A type-erased handle to one caller-supplied output location (spec
/// §3's `Argument`: a `(type_tag, erased_out_ptr)` pair). The pointee is
/// never owned — it borrows from the caller's tuple of output variables
/// for the duration of one scan call.
pub enum Argument<'a, CU: CodeUnit> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    I128(&'a mut i128),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    U128(&'a mut u128),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Bool(&'a mut bool),
    CodePoint(&'a mut char),
    String(&'a mut String),
    /// Requires a contiguous narrow (UTF-8) source; see
    /// [`read_argument`]'s handling of this variant.
    StringView(&'a mut &'a str),
    Pointer(&'a mut usize),
    #[cfg(feature = "regex")]
    RegexMatches(&'a mut RegexMatchesOut),
    Custom(&'a mut dyn CustomScan<CU>),
}

/// Destination for a `{:/…/}` regex read: the whole match plus each
/// capture group, `None` for groups that didn't participate (spec's
/// supplemented "nullopt for unmatched groups").
#[cfg(feature = "regex")]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegexMatchesOut {
    pub whole: String,
    pub groups: Vec<Option<RegexCapture>>,
}

impl<'a, CU: CodeUnit> Argument<'a, CU> {
    pub fn tag(&self) -> ArgTypeTag {
        match self {
            Argument::I8(_) => ArgTypeTag::I8,
            Argument::I16(_) => ArgTypeTag::I16,
            Argument::I32(_) => ArgTypeTag::I32,
            Argument::I64(_) => ArgTypeTag::I64,
            Argument::I128(_) => ArgTypeTag::I128,
            Argument::Isize(_) => ArgTypeTag::Isize,
            Argument::U8(_) => ArgTypeTag::U8,
            Argument::U16(_) => ArgTypeTag::U16,
            Argument::U32(_) => ArgTypeTag::U32,
            Argument::U64(_) => ArgTypeTag::U64,
            Argument::U128(_) => ArgTypeTag::U128,
            Argument::Usize(_) => ArgTypeTag::Usize,
            Argument::F32(_) => ArgTypeTag::F32,
            Argument::F64(_) => ArgTypeTag::F64,
            Argument::Bool(_) => ArgTypeTag::Bool,
            Argument::CodePoint(_) => ArgTypeTag::CodePoint,
            Argument::String(_) => ArgTypeTag::String,
            Argument::StringView(_) => ArgTypeTag::StringView,
            Argument::Pointer(_) => ArgTypeTag::Pointer,
            #[cfg(feature = "regex")]
            Argument::RegexMatches(_) => ArgTypeTag::RegexMatches,
            Argument::Custom(_) => ArgTypeTag::Custom,
        }
    }

    /// Spec I-F1: confirms `spec` is a legal combination for this
    /// argument's tag, independent of whatever the grammar already
    /// accepted syntactically (e.g. a `:d` field bound to a `bool`
    /// destination is syntactically fine but semantically wrong).
    pub fn check_spec(&self, spec: &FormatSpec) -> ScanResult<()> {
        let ok = match self {
            Argument::I8(_)
            | Argument::I16(_)
            | Argument::I32(_)
            | Argument::I64(_)
            | Argument::I128(_)
            | Argument::Isize(_)
            | Argument::U8(_)
            | Argument::U16(_)
            | Argument::U32(_)
            | Argument::U64(_)
            | Argument::U128(_)
            | Argument::Usize(_) => matches!(spec.presentation, Presentation::None) || spec.presentation.is_integer(),
            Argument::F32(_) | Argument::F64(_) => {
                matches!(spec.presentation, Presentation::None) || spec.presentation.is_float()
            }
            Argument::Bool(_) => matches!(
                spec.presentation,
                Presentation::None
                    | Presentation::String
                    | Presentation::IntGeneric
                    | Presentation::IntDecimal
                    | Presentation::IntBinary
            ),
            Argument::CodePoint(_) => {
                matches!(spec.presentation, Presentation::None | Presentation::CodePoint | Presentation::CharFixed)
            }
            Argument::String(_) | Argument::StringView(_) => spec.presentation.is_string_family(),
            Argument::Pointer(_) => matches!(spec.presentation, Presentation::None | Presentation::Pointer),
            #[cfg(feature = "regex")]
            Argument::RegexMatches(_) => matches!(spec.presentation, Presentation::Regex(_)),
            Argument::Custom(_) => true,
        };
        if ok {
            Ok(())
        } else {
            Err(Error::invalid_format_string(
                0,
                "presentation type does not match the argument's destination type",
            ))
        }
    }
}

/// Dispatches one replacement field: picks the reader for `arg`'s static
/// tag and invokes it with `(buf, pos, spec, locale)` (spec §4.11).
/// Returns the position just past the consumed value.
pub fn read_argument<'s, CU: CodeUnit>(
    buf: &mut ScanBuffer<'s, CU>,
    pos: usize,
    spec: &FormatSpec,
    locale: &Locale,
    arg: &mut Argument<'s, CU>,
) -> ScanResult<usize> {
    arg.check_spec(spec)?;

    macro_rules! read_int {
        ($slot:expr, $ty:ty) => {{
            let (after, v) = integer::read_with_specs::<$ty, CU>(buf, pos, spec, locale)?;
            *$slot = v;
            after
        }};
    }

    Ok(match arg {
        Argument::I8(slot) => read_int!(*slot, i8),
        Argument::I16(slot) => read_int!(*slot, i16),
        Argument::I32(slot) => read_int!(*slot, i32),
        Argument::I64(slot) => read_int!(*slot, i64),
        Argument::I128(slot) => read_int!(*slot, i128),
        Argument::Isize(slot) => read_int!(*slot, isize),
        Argument::U8(slot) => read_int!(*slot, u8),
        Argument::U16(slot) => read_int!(*slot, u16),
        Argument::U32(slot) => read_int!(*slot, u32),
        Argument::U64(slot) => read_int!(*slot, u64),
        Argument::U128(slot) => read_int!(*slot, u128),
        Argument::Usize(slot) => read_int!(*slot, usize),
        Argument::F32(slot) => {
            let (after, v) = float::read_with_specs::<f32, CU>(buf, pos, spec, locale)?;
            **slot = v;
            after
        }
        Argument::F64(slot) => {
            let (after, v) = float::read_with_specs::<f64, CU>(buf, pos, spec, locale)?;
            **slot = v;
            after
        }
        Argument::Bool(slot) => {
            let (after, v) = boolean::read_with_specs(buf, pos, spec, locale)?;
            **slot = v;
            after
        }
        Argument::Pointer(slot) => {
            let (after, v) = pointer::read_default(buf, pos)?;
            **slot = v;
            after
        }
        Argument::CodePoint(slot) => {
            let (after, c) = char_::read_code_point(buf, pos)?;
            **slot = c;
            after
        }
        Argument::String(slot) => {
            let (after, s) = read_string_family(buf, pos, spec)?;
            **slot = s;
            after
        }
        Argument::StringView(slot) => {
            let narrow = CU::as_narrow_buffer(buf).ok_or_else(|| {
                Error::invalid_scanned_value(pos, "string_view requires a narrow (UTF-8) source")
            })?;
            let data = narrow
                .contiguous_view()
                .ok_or_else(|| Error::invalid_scanned_value(pos, "string_view requires a contiguous source"))?;
            let text = as_str_view(data).ok_or_else(|| Error::invalid_encoding(pos))?;
            let (after, view) = string_view_family(text, pos, spec)?;
            **slot = view;
            after
        }
        #[cfg(feature = "regex")]
        Argument::RegexMatches(slot) => {
            let Presentation::Regex(regex_spec) = &spec.presentation else {
                return Err(Error::invalid_format_string(pos, "regex argument requires a `:/…/` spec"));
            };
            let data_buf: &ScanBuffer<u8> = CU::as_narrow_buffer(buf)
                .ok_or_else(|| Error::invalid_format_string(pos, "regex reads are only supported on narrow (u8) sources"))?;
            let (after, whole, groups) = regex::read_match(data_buf, pos, regex_spec)?;
            **slot = RegexMatchesOut { whole, groups };
            after
        }
        Argument::Custom(custom) => custom.scan(buf, pos, spec, locale)?,
    })
}

fn read_string_family<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    spec: &FormatSpec,
) -> ScanResult<(usize, String)> {
    match &spec.presentation {
        Presentation::CharacterSet(set) => string::read_charset(buf, pos, set),
        Presentation::CharFixed => {
            let n = spec.precision.unwrap_or(spec.width.max(1));
            string::read_fixed_width(buf, pos, n)
        }
        _ => string::read_default(buf, pos),
    }
}

fn string_view_family<'s>(
    data: &'s str,
    pos: usize,
    spec: &FormatSpec,
) -> ScanResult<(usize, &'s str)> {
    match &spec.presentation {
        Presentation::CharacterSet(_) => {
            Err(Error::invalid_format_string(pos, "character-set presentation on a string_view is not supported"))
        }
        Presentation::CharFixed => {
            Err(Error::invalid_format_string(pos, "fixed-width presentation on a string_view is not supported"))
        }
        _ => string::read_default_nocopy(data, pos),
    }
}

fn as_str_view(data: &[u8]) -> Option<&str> {
    std::str::from_utf8(data).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::IterSource;

    #[test]
    fn dispatches_integer() {
        let mut buf: ScanBuffer<u8> = ScanBuffer::from_slice(b"42");
        let mut value = 0i32;
        let mut arg = Argument::I32(&mut value);
        let spec = FormatSpec::default();
        let after = read_argument(&mut buf, 0, &spec, &Locale::classic(), &mut arg).unwrap();
        assert_eq!(value, 42);
        assert_eq!(after, 2);
    }

    #[test]
    fn spec_mismatch_is_rejected() {
        let mut buf: ScanBuffer<u8> = ScanBuffer::from_slice(b"true");
        let mut value = false;
        let mut arg = Argument::Bool(&mut value);
        let mut spec = FormatSpec::default();
        spec.presentation = Presentation::FloatFixed;
        let err = read_argument(&mut buf, 0, &spec, &Locale::classic(), &mut arg).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidFormatString);
    }

    #[test]
    fn dispatches_string_over_buffered_source() {
        let mut buf: ScanBuffer<u8> = ScanBuffer::from_source(IterSource::new(b"hi there".iter().copied()));
        let mut value = String::new();
        let mut arg = Argument::String(&mut value);
        let spec = FormatSpec::default();
        let after = read_argument(&mut buf, 0, &spec, &Locale::classic(), &mut arg).unwrap();
        assert_eq!(value, "hi");
        assert_eq!(after, 2);
    }
}
