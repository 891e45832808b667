//! The boolean reader (spec C10): text names first, numeric fallback.

use crate::buffer::ScanBuffer;
use crate::error::{Error, ScanResult};
use crate::format::{FormatSpec, Presentation};
use crate::locale::Locale;
use crate::read::algorithms::{peek_code_point, skip_classic_whitespace, CodeUnit};

/// Reads a bool using the classic locale's `true`/`false` names, with
/// both the text and numeric forms allowed.
pub fn read_default<CU: CodeUnit>(buf: &mut ScanBuffer<CU>, pos: usize) -> ScanResult<(usize, bool)> {
    read_with_specs(buf, pos, &FormatSpec::default(), &Locale::classic())
}

/// Reads a bool honoring a parsed format spec (spec §4.6): `:s` allows
/// only the locale's `truename`/`falsename`; `:i`/`:d`/`:b` allow only a
/// `0`/`1` digit; no presentation (or any other presentation a bool
/// argument accepts) allows both, text tried first.
pub fn read_with_specs<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    spec: &FormatSpec,
    locale: &Locale,
) -> ScanResult<(usize, bool)> {
    let (allow_text, allow_numeric) = match spec.presentation {
        Presentation::String => (true, false),
        Presentation::IntGeneric | Presentation::IntDecimal | Presentation::IntBinary => (false, true),
        _ => (true, true),
    };
    read_with_locale(buf, pos, locale, allow_text, allow_numeric)
}

/// Reads a bool: when `allow_text`, tries the locale's
/// `truename`/`falsename` (case-sensitive, per spec §4.6) first; when
/// that fails (or is disallowed) and `allow_numeric`, falls back to a
/// single `0`/`1` digit read from the *original* position — not from
/// wherever the failed word match left off (spec §9 Open Question).
pub fn read_with_locale<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    locale: &Locale,
    allow_text: bool,
    allow_numeric: bool,
) -> ScanResult<(usize, bool)> {
    let start = skip_classic_whitespace(buf, pos, false)?;

    if allow_text {
        if let Some(after) = try_match_word(buf, start, locale.truename)? {
            return Ok((after, true));
        }
        if let Some(after) = try_match_word(buf, start, locale.falsename)? {
            return Ok((after, false));
        }
    }

    if allow_numeric {
        match peek_code_point(buf, start)? {
            Some(('0', len)) => return Ok((start + len, false)),
            Some(('1', len)) => return Ok((start + len, true)),
            _ => {}
        }
    }

    Err(Error::invalid_scanned_value(
        start,
        "expected a boolean truename, falsename, 0, or 1",
    ))
}

fn try_match_word<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    word: &str,
) -> ScanResult<Option<usize>> {
    let mut p = pos;
    for want in word.chars() {
        match peek_code_point(buf, p)? {
            Some((c, len)) if c == want => p += len,
            _ => return Ok(None),
        }
    }
    Ok(Some(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf_from(s: &'static str) -> ScanBuffer<'static, u8> {
        ScanBuffer::from_slice(s.as_bytes())
    }

    #[test]
    fn reads_true_name() {
        let mut buf = buf_from("true");
        let (p, v) = read_default(&mut buf, 0).unwrap();
        assert!(v);
        assert_eq!(p, 4);
    }

    #[test]
    fn reads_false_name() {
        let mut buf = buf_from("false");
        let (_, v) = read_default(&mut buf, 0).unwrap();
        assert!(!v);
    }

    #[test]
    fn numeric_fallback() {
        let mut buf = buf_from("1");
        let (_, v) = read_default(&mut buf, 0).unwrap();
        assert!(v);
    }

    #[test]
    fn neither_form_is_invalid() {
        let mut buf = buf_from("maybe");
        assert!(read_default(&mut buf, 0).is_err());
    }

    #[test]
    fn string_presentation_disables_numeric_form() {
        let spec = FormatSpec {
            presentation: Presentation::String,
            ..FormatSpec::default()
        };
        let mut buf = buf_from("1");
        assert!(read_with_specs(&mut buf, 0, &spec, &Locale::classic()).is_err());

        let mut buf = buf_from("true");
        let (_, v) = read_with_specs(&mut buf, 0, &spec, &Locale::classic()).unwrap();
        assert!(v);
    }

    #[test]
    fn numeric_presentations_disable_text_form() {
        for presentation in [
            Presentation::IntGeneric,
            Presentation::IntDecimal,
            Presentation::IntBinary,
        ] {
            let spec = FormatSpec {
                presentation,
                ..FormatSpec::default()
            };
            let mut buf = buf_from("true");
            assert!(read_with_specs(&mut buf, 0, &spec, &Locale::classic()).is_err());

            let mut buf = buf_from("0");
            let (_, v) = read_with_specs(&mut buf, 0, &spec, &Locale::classic()).unwrap();
            assert!(!v);
        }
    }
}
