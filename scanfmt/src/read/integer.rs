//! The integer reader (spec C8).

use crate::buffer::ScanBuffer;
use crate::error::{Error, ScanResult};
use crate::format::{FormatSpec, Presentation};
use crate::locale::Locale;
use crate::read::algorithms::{skip_classic_whitespace, CodeUnit};

/// Any integer type the reader can fill in directly. Implemented for
/// every fixed-width signed/unsigned integer the argument store can hold
/// (spec's "Argument" type tags).
///
/// Digits are accumulated into `Magnitude` — the same-width *unsigned*
/// type for a signed `T`, or `T` itself when `T` is already unsigned
/// (spec §4.4 step 4, "accumulating into the target unsigned width") —
/// so the most negative value of a signed type (whose magnitude is
/// `2^(bits-1)`, one past that type's own positive range) can be
/// accumulated without overflowing before the sign is applied.
pub trait ScanInt: Sized + Copy {
    const SIGNED: bool;
    type Magnitude: Copy;

    fn magnitude_zero() -> Self::Magnitude;

    /// Accumulates one more digit (`digit < base`) into `acc`, returning
    /// `None` on overflow.
    fn magnitude_mul_add(acc: Self::Magnitude, base: u32, digit: u32) -> Option<Self::Magnitude>;

    /// Applies the sign to a fully-accumulated magnitude, returning
    /// `None` when it doesn't fit `T` (spec §4.4 step 6).
    fn from_magnitude(magnitude: Self::Magnitude, negative: bool) -> Option<Self>;
}

macro_rules! impl_scan_int_unsigned {
    ($($t:ty),*) => {$(
        impl ScanInt for $t {
            const SIGNED: bool = false;
            type Magnitude = $t;

            fn magnitude_zero() -> Self::Magnitude { 0 }

            fn magnitude_mul_add(acc: Self::Magnitude, base: u32, digit: u32) -> Option<Self::Magnitude> {
                acc.checked_mul(base as $t)?.checked_add(digit as $t)
            }

            fn from_magnitude(magnitude: Self::Magnitude, negative: bool) -> Option<Self> {
                if negative {
                    if magnitude == 0 { Some(0) } else { None }
                } else {
                    Some(magnitude)
                }
            }
        }
    )*};
}

macro_rules! impl_scan_int_signed {
    ($(($t:ty, $u:ty)),* $(,)?) => {$(
        impl ScanInt for $t {
            const SIGNED: bool = true;
            type Magnitude = $u;

            fn magnitude_zero() -> Self::Magnitude { 0 }

            fn magnitude_mul_add(acc: Self::Magnitude, base: u32, digit: u32) -> Option<Self::Magnitude> {
                acc.checked_mul(base as $u)?.checked_add(digit as $u)
            }

            fn from_magnitude(magnitude: Self::Magnitude, negative: bool) -> Option<Self> {
                const MIN_MAGNITUDE: $u = <$t>::MIN.unsigned_abs();
                if negative {
                    if magnitude == MIN_MAGNITUDE {
                        Some(<$t>::MIN)
                    } else if magnitude < MIN_MAGNITUDE {
                        Some(-(magnitude as $t))
                    } else {
                        None
                    }
                } else if magnitude <= <$t>::MAX as $u {
                    Some(magnitude as $t)
                } else {
                    None
                }
            }
        }
    )*};
}

impl_scan_int_unsigned!(u8, u16, u32, u64, u128, usize);
impl_scan_int_signed!((i8, u8), (i16, u16), (i32, u32), (i64, u64), (i128, u128), (isize, usize));

fn digit_value(c: char, base: u32) -> Option<u32> {
    let v = c.to_digit(36)?;
    if v < base {
        Some(v)
    } else {
        None
    }
}

fn base_for(spec: &FormatSpec) -> Option<u32> {
    match spec.presentation {
        Presentation::IntBinary => Some(2),
        Presentation::IntOctal => Some(8),
        Presentation::IntDecimal | Presentation::IntUnsigned => Some(10),
        Presentation::IntHex => Some(16),
        Presentation::IntArbitraryBase(b) => Some(b),
        _ => None,
    }
}

/// Reads an integer with the default (no-spec) behavior: skip leading
/// whitespace, optional sign, base-10 digits.
pub fn read_default<T: ScanInt, CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
) -> ScanResult<(usize, T)> {
    read_with_specs(buf, pos, &FormatSpec::default(), &Locale::classic())
}

/// Reads an integer honoring a parsed format spec (spec §4.4).
pub fn read_with_specs<T: ScanInt, CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    spec: &FormatSpec,
    locale: &Locale,
) -> ScanResult<(usize, T)> {
    let start = skip_classic_whitespace(buf, pos, false)?;
    let mut p = start;

    // 1. Optional sign.
    let mut negative = false;
    if let Some(c) = peek_char(buf, p)? {
        if c == '+' {
            p += 1;
        } else if c == '-' {
            if !T::SIGNED {
                return Err(Error::invalid_scanned_value(
                    start,
                    "unsigned destination cannot accept a negative sign",
                ));
            }
            negative = true;
            p += 1;
        }
    }

    // 2. & 3. Base selection, honoring any explicit presentation.
    let explicit_base = base_for(spec);
    let sniff_base_from_prefix = matches!(
        spec.presentation,
        Presentation::IntGeneric | Presentation::None
    );

    let (base, p_after_prefix) = if let Some(b) = explicit_base {
        let p2 = consume_matching_prefix(buf, p, b, spec.alt)?;
        (b, p2)
    } else if sniff_base_from_prefix {
        sniff_base(buf, p)?
    } else {
        (10, p)
    };
    p = p_after_prefix;

    // 4. Digit accumulation, with thousands-separator support.
    let digit_start = p;
    let mut acc = T::magnitude_zero();
    let mut any_digit = false;
    let mut group_sizes: Vec<usize> = Vec::new();
    let mut current_group = 0usize;
    let thsep_active = spec.thsep || spec.localized;

    loop {
        match peek_char(buf, p)? {
            Some(c) if digit_value(c, base).is_some() => {
                let d = digit_value(c, base).unwrap();
                acc = T::magnitude_mul_add(acc, base, d)
                    .ok_or_else(|| Error::value_out_of_range(digit_start))?;
                any_digit = true;
                current_group += 1;
                p += 1;
            }
            Some(c) if thsep_active && c == locale.thousands_sep && any_digit => {
                group_sizes.push(current_group);
                current_group = 0;
                p += 1;
            }
            _ => break,
        }
    }
    if current_group > 0 || group_sizes.is_empty() {
        group_sizes.push(current_group);
    }

    if !any_digit {
        return Err(Error::invalid_scanned_value(
            start,
            "expected at least one digit",
        ));
    }
    if thsep_active && group_sizes.len() > 1 {
        let mut sizes_outward = group_sizes.clone();
        sizes_outward.reverse();
        if !locale.grouping_is_valid(&sizes_outward) {
            return Err(Error::invalid_scanned_value(
                digit_start,
                "thousands separators inconsistent with locale grouping",
            ));
        }
    }

    // 6. Sign application.
    let value = T::from_magnitude(acc, negative).ok_or_else(|| Error::value_out_of_range(start))?;

    Ok((p, value))
}

fn peek_char<CU: CodeUnit>(buf: &mut ScanBuffer<CU>, pos: usize) -> ScanResult<Option<char>> {
    Ok(crate::read::algorithms::peek_code_point(buf, pos)?.map(|(c, _)| c))
}

/// Consumes a `0x`/`0b`/`0o` prefix matching `base`, if present. When
/// `required` is true the prefix must be present or this fails.
fn consume_matching_prefix<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    base: u32,
    required: bool,
) -> ScanResult<usize> {
    let prefixes: &[(char, u32)] = &[('x', 16), ('X', 16), ('b', 2), ('B', 2), ('o', 8), ('O', 8)];
    if let Some('0') = peek_char(buf, pos)? {
        if let Some(second) = peek_char(buf, pos + 1)? {
            if let Some(&(_, pbase)) = prefixes.iter().find(|&&(c, _)| c == second) {
                if pbase == base {
                    return Ok(pos + 2);
                }
            }
        }
    }
    if required {
        return Err(Error::invalid_scanned_value(
            pos,
            "explicit base prefix required but not present",
        ));
    }
    Ok(pos)
}

/// Sniffs the base from a `0x`/`0X`, `0b`/`0B`, `0o`/`0O`, or leading `0`
/// prefix (spec §4.4 step 3, `int_generic`/no presentation).
fn sniff_base<CU: CodeUnit>(buf: &mut ScanBuffer<CU>, pos: usize) -> ScanResult<(u32, usize)> {
    if peek_char(buf, pos)? == Some('0') {
        match peek_char(buf, pos + 1)? {
            Some('x') | Some('X') => return Ok((16, pos + 2)),
            Some('b') | Some('B') => return Ok((2, pos + 2)),
            Some('o') | Some('O') => return Ok((8, pos + 2)),
            Some(c) if c.is_ascii_digit() => return Ok((8, pos + 1)),
            _ => return Ok((10, pos)),
        }
    }
    Ok((10, pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::IterSource;

    fn buf_from(s: &'static str) -> ScanBuffer<'static, u8> {
        ScanBuffer::from_slice(s.as_bytes())
    }

    #[test]
    fn simple_decimal() {
        let mut buf = buf_from("42");
        let (p, v) = read_default::<i32, u8>(&mut buf, 0).unwrap();
        assert_eq!(v, 42);
        assert_eq!(p, 2);
    }

    #[test]
    fn leading_whitespace_skipped() {
        let mut buf = buf_from(" \n42");
        let (_, v) = read_default::<i32, u8>(&mut buf, 0).unwrap();
        assert_eq!(v, 42);
    }

    #[test]
    fn double_sign_is_invalid() {
        let mut buf = buf_from("--4");
        assert!(read_default::<i32, u8>(&mut buf, 0).is_err());
    }

    #[test]
    fn overflow_is_out_of_range() {
        let mut buf = buf_from("999999999999999999999");
        let err = read_default::<i64, u8>(&mut buf, 0).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ValueOutOfRange);
    }

    #[test]
    fn most_negative_values_are_accepted() {
        let mut buf = buf_from("-128");
        let (_, v) = read_default::<i8, u8>(&mut buf, 0).unwrap();
        assert_eq!(v, i8::MIN);

        let mut buf = buf_from("-2147483648");
        let (_, v) = read_default::<i32, u8>(&mut buf, 0).unwrap();
        assert_eq!(v, i32::MIN);

        let mut buf = buf_from("-9223372036854775808");
        let (_, v) = read_default::<i64, u8>(&mut buf, 0).unwrap();
        assert_eq!(v, i64::MIN);
    }

    #[test]
    fn one_past_most_negative_is_out_of_range() {
        let mut buf = buf_from("-129");
        let err = read_default::<i8, u8>(&mut buf, 0).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ValueOutOfRange);
    }

    #[test]
    fn hex_prefix_sniffed() {
        let mut buf = buf_from("0x2A");
        let (_, v) = read_default::<i32, u8>(&mut buf, 0).unwrap();
        assert_eq!(v, 0x2A);
    }

    #[test]
    fn lone_prefix_fails() {
        let mut buf = buf_from("0x");
        assert!(read_default::<i32, u8>(&mut buf, 0).is_err());
    }

    #[test]
    fn unsigned_rejects_minus() {
        let mut buf = buf_from("-1");
        assert!(read_default::<u32, u8>(&mut buf, 0).is_err());
    }
}
