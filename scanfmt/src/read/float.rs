//! The floating-point reader (spec C9).

use crate::buffer::ScanBuffer;
use crate::error::{Error, ScanResult};
use crate::format::{FormatSpec, Presentation};
use crate::locale::Locale;
use crate::read::algorithms::{peek_code_point, skip_classic_whitespace, CodeUnit};

/// Any floating-point type the reader can fill in directly.
pub trait ScanFloat: Sized + Copy {
    fn from_f64(v: f64) -> Self;
    fn nan() -> Self;
    fn infinity(negative: bool) -> Self;
}

impl ScanFloat for f32 {
    fn from_f64(v: f64) -> Self {
        v as f32
    }
    fn nan() -> Self {
        f32::NAN
    }
    fn infinity(negative: bool) -> Self {
        if negative {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        }
    }
}

impl ScanFloat for f64 {
    fn from_f64(v: f64) -> Self {
        v
    }
    fn nan() -> Self {
        f64::NAN
    }
    fn infinity(negative: bool) -> Self {
        if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    }
}

/// Reads a float with the default (no-spec) behavior.
pub fn read_default<T: ScanFloat, CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
) -> ScanResult<(usize, T)> {
    read_with_specs(buf, pos, &FormatSpec::default(), &Locale::classic())
}

/// Reads a float honoring a parsed format spec (spec §4.5).
///
/// Recognizes, in this order: `nan` (with an optional parenthesized
/// n-char-sequence payload, which is accepted and discarded — this
/// implementation has no NaN payload bits to carry), `inf`/`infinity`,
/// or a fixed/scientific/hex decimal literal, gated by the spec's
/// presentation when one is given.
pub fn read_with_specs<T: ScanFloat, CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    spec: &FormatSpec,
    locale: &Locale,
) -> ScanResult<(usize, T)> {
    let start = skip_classic_whitespace(buf, pos, false)?;
    let mut p = start;

    let mut negative = false;
    if let Some(c) = peek_char(buf, p)? {
        if c == '+' {
            p += 1;
        } else if c == '-' {
            negative = true;
            p += 1;
        }
    }

    if let Some(after) = try_read_nan(buf, p)? {
        return Ok((after, T::nan()));
    }
    if let Some(after) = try_read_keyword(buf, p, "infinity")?.or(try_read_keyword(buf, p, "inf")?)
    {
        return Ok((after, T::infinity(negative)));
    }

    let allow_hex = matches!(spec.presentation, Presentation::FloatHex | Presentation::None);
    let allow_scientific = matches!(
        spec.presentation,
        Presentation::FloatScientific | Presentation::FloatGeneral | Presentation::None
    );

    if allow_hex {
        if let Some((after, text)) = try_read_hex_float(buf, p)? {
            let value = parse_hex_float(&text)
                .ok_or_else(|| Error::invalid_scanned_value(p, "malformed hex float"))?;
            return Ok((after, T::from_f64(if negative { -value } else { value })));
        }
    }

    let require_exponent = matches!(spec.presentation, Presentation::FloatScientific);
    let (after, text) = read_decimal_literal(buf, p, locale, allow_scientific, require_exponent)?;
    if text.is_empty() {
        return Err(Error::invalid_scanned_value(
            start,
            "expected a floating-point number",
        ));
    }
    let value: f64 = text
        .parse()
        .map_err(|_| Error::invalid_scanned_value(start, "malformed floating-point literal"))?;
    Ok((after, T::from_f64(if negative { -value } else { value })))
}

fn peek_char<CU: CodeUnit>(buf: &mut ScanBuffer<CU>, pos: usize) -> ScanResult<Option<char>> {
    Ok(peek_code_point(buf, pos)?.map(|(c, _)| c))
}

fn try_read_keyword<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    kw: &str,
) -> ScanResult<Option<usize>> {
    let mut p = pos;
    for want in kw.chars() {
        match peek_char(buf, p)? {
            Some(c) if c.to_ascii_lowercase() == want => p += 1,
            _ => return Ok(None),
        }
    }
    Ok(Some(p))
}

/// Reads `nan` plus an optional `(n-char-sequence)` payload (spec's
/// supplemented NaN-payload handling: the sequence is validated to be
/// alphanumeric/underscore and then discarded).
fn try_read_nan<CU: CodeUnit>(buf: &mut ScanBuffer<CU>, pos: usize) -> ScanResult<Option<usize>> {
    let Some(mut p) = try_read_keyword(buf, pos, "nan")? else {
        return Ok(None);
    };
    if peek_char(buf, p)? == Some('(') {
        let mut q = p + 1;
        loop {
            match peek_char(buf, q)? {
                Some(c) if c.is_alphanumeric() || c == '_' => q += 1,
                Some(')') => {
                    p = q + 1;
                    break;
                }
                _ => return Ok(Some(p)),
            }
        }
    }
    Ok(Some(p))
}

fn try_read_hex_float<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
) -> ScanResult<Option<(usize, String)>> {
    let mut p = pos;
    if peek_char(buf, p)? != Some('0') {
        return Ok(None);
    }
    match peek_char(buf, p + 1)? {
        Some('x') | Some('X') => p += 2,
        _ => return Ok(None),
    }
    let mut text = String::new();
    let mut any_hex_digit = false;
    while let Some(c) = peek_char(buf, p)? {
        if c.is_ascii_hexdigit() {
            text.push(c);
            any_hex_digit = true;
            p += 1;
        } else {
            break;
        }
    }
    if peek_char(buf, p)? == Some('.') {
        text.push('.');
        p += 1;
        while let Some(c) = peek_char(buf, p)? {
            if c.is_ascii_hexdigit() {
                text.push(c);
                any_hex_digit = true;
                p += 1;
            } else {
                break;
            }
        }
    }
    if !any_hex_digit {
        return Ok(None);
    }
    if let Some(c) = peek_char(buf, p)? {
        if c == 'p' || c == 'P' {
            let mut q = p + 1;
            let mut exp = String::from("p");
            if let Some(sign) = peek_char(buf, q)? {
                if sign == '+' || sign == '-' {
                    exp.push(sign);
                    q += 1;
                }
            }
            let mut any_exp_digit = false;
            while let Some(d) = peek_char(buf, q)? {
                if d.is_ascii_digit() {
                    exp.push(d);
                    any_exp_digit = true;
                    q += 1;
                } else {
                    break;
                }
            }
            if any_exp_digit {
                text.push_str(&exp);
                p = q;
            }
        }
    }
    Ok(Some((p, text)))
}

/// Parses a hex-float literal of the shape `h+.h*(p[+-]d+)?` where `h` is
/// a hex digit; the exponent, if present, scales by powers of two.
fn parse_hex_float(text: &str) -> Option<f64> {
    let (mantissa_part, exp_part) = match text.split_once(['p', 'P']) {
        Some((m, e)) => (m, Some(e)),
        None => (text, None),
    };
    let (int_part, frac_part) = match mantissa_part.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa_part, ""),
    };
    let mut value = 0.0f64;
    for c in int_part.chars() {
        value = value * 16.0 + c.to_digit(16)? as f64;
    }
    let mut scale = 1.0 / 16.0;
    for c in frac_part.chars() {
        value += c.to_digit(16)? as f64 * scale;
        scale /= 16.0;
    }
    if let Some(e) = exp_part {
        let exp: i32 = e.parse().ok()?;
        value *= 2f64.powi(exp);
    }
    Some(value)
}

/// Reads a decimal float literal (optionally scientific), returning the
/// text with any locale thousands separators stripped and the decimal
/// point normalized to `.` so it can be handed to `str::parse`. When
/// `require_exponent` is set (spec §4.5 `float_scientific`: "mandatory
/// `e`/`E` + ... digits"), a literal with no exponent is rejected instead
/// of being returned as a plain fixed-point number.
fn read_decimal_literal<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    locale: &Locale,
    allow_scientific: bool,
    require_exponent: bool,
) -> ScanResult<(usize, String)> {
    let mut p = pos;
    let mut text = String::new();
    let mut any_digit = false;

    while let Some(c) = peek_char(buf, p)? {
        if c.is_ascii_digit() {
            text.push(c);
            any_digit = true;
            p += 1;
        } else if c == locale.thousands_sep && any_digit {
            p += 1;
        } else {
            break;
        }
    }

    if peek_char(buf, p)? == Some(locale.decimal_point) {
        text.push('.');
        p += 1;
        while let Some(c) = peek_char(buf, p)? {
            if c.is_ascii_digit() {
                text.push(c);
                any_digit = true;
                p += 1;
            } else {
                break;
            }
        }
    }

    if !any_digit {
        return Ok((pos, String::new()));
    }

    let mut found_exponent = false;
    if allow_scientific {
        if let Some(c) = peek_char(buf, p)? {
            if c == 'e' || c == 'E' {
                let mut q = p + 1;
                let mut exp = String::from("e");
                if let Some(sign) = peek_char(buf, q)? {
                    if sign == '+' || sign == '-' {
                        exp.push(sign);
                        q += 1;
                    }
                }
                let mut any_exp_digit = false;
                while let Some(d) = peek_char(buf, q)? {
                    if d.is_ascii_digit() {
                        exp.push(d);
                        any_exp_digit = true;
                        q += 1;
                    } else {
                        break;
                    }
                }
                if any_exp_digit {
                    text.push_str(&exp);
                    p = q;
                    found_exponent = true;
                }
            }
        }
    }

    if require_exponent && !found_exponent {
        return Err(Error::invalid_scanned_value(
            pos,
            "scientific presentation requires an e/E exponent",
        ));
    }

    Ok((p, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf_from(s: &'static str) -> ScanBuffer<'static, u8> {
        ScanBuffer::from_slice(s.as_bytes())
    }

    #[test]
    fn simple_decimal() {
        let mut buf = buf_from("3.14");
        let (_, v) = read_default::<f64, u8>(&mut buf, 0).unwrap();
        assert!((v - 3.14).abs() < 1e-12);
    }

    #[test]
    fn scientific_notation() {
        let mut buf = buf_from("1.5e3");
        let (_, v) = read_default::<f64, u8>(&mut buf, 0).unwrap();
        assert!((v - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn negative_infinity() {
        let mut buf = buf_from("-infinity");
        let (_, v) = read_default::<f64, u8>(&mut buf, 0).unwrap();
        assert!(v.is_infinite() && v.is_sign_negative());
    }

    #[test]
    fn nan_with_payload() {
        let mut buf = buf_from("nan(123abc)rest");
        let (p, v) = read_default::<f64, u8>(&mut buf, 0).unwrap();
        assert!(v.is_nan());
        assert_eq!(p, "nan(123abc)".len());
    }

    #[test]
    fn hex_float() {
        let mut buf = buf_from("0x1.8p3");
        let (_, v) = read_default::<f64, u8>(&mut buf, 0).unwrap();
        assert!((v - 12.0).abs() < 1e-9);
    }

    #[test]
    fn no_digits_is_invalid() {
        let mut buf = buf_from("abc");
        assert!(read_default::<f64, u8>(&mut buf, 0).is_err());
    }

    #[test]
    fn scientific_presentation_requires_exponent() {
        let spec = FormatSpec {
            presentation: Presentation::FloatScientific,
            ..FormatSpec::default()
        };
        let mut buf = buf_from("1.5");
        assert!(read_with_specs::<f64, u8>(&mut buf, 0, &spec, &Locale::classic()).is_err());

        let mut buf = buf_from("1.5e0");
        let (_, v) = read_with_specs::<f64, u8>(&mut buf, 0, &spec, &Locale::classic()).unwrap();
        assert!((v - 1.5).abs() < 1e-12);
    }
}
