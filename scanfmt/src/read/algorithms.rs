//! Reading algorithms (spec C7): `read_exactly_n`, `read_while_code_unit`,
//! `read_until_code_point`, `skip_classic_whitespace`,
//! `read_n_width_units`, each in nocopy and copying variants.

use crate::buffer::ScanBuffer;
use crate::error::{Error, ScanResult};
use crate::unicode;

/// A code unit type a [`ScanBuffer`] can be built over: narrow (`u8`,
/// UTF-8) or wide (`u16`/`u32`, UTF-16/UTF-32).
pub trait CodeUnit: Copy + PartialEq + 'static {
    /// Decodes one code point from the front of `units`, returning it
    /// and the number of code units consumed.
    fn decode(units: &[Self]) -> Result<(char, usize), ()>;

    /// Encodes `c`, appending its code units to `out`.
    fn encode(c: char, out: &mut Vec<Self>);

    /// Narrows `buf` to a `ScanBuffer<u8>` reference when `Self = u8`,
    /// for readers (regex, string-view) that are narrow-only by spec.
    /// `None` for every other code unit type; overridden only by the
    /// `u8` impl below.
    fn as_narrow_buffer<'b, 's>(_buf: &'b ScanBuffer<'s, Self>) -> Option<&'b ScanBuffer<'s, u8>> {
        None
    }
}

impl CodeUnit for u8 {
    fn decode(units: &[Self]) -> Result<(char, usize), ()> {
        unicode::decode_utf8(units)
    }

    fn encode(c: char, out: &mut Vec<Self>) {
        let mut buf = [0u8; 4];
        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    fn as_narrow_buffer<'b, 's>(buf: &'b ScanBuffer<'s, Self>) -> Option<&'b ScanBuffer<'s, u8>> {
        Some(buf)
    }
}

#[cfg(feature = "wide")]
impl CodeUnit for u16 {
    fn decode(units: &[Self]) -> Result<(char, usize), ()> {
        unicode::decode_utf16(units)
    }

    fn encode(c: char, out: &mut Vec<Self>) {
        let mut buf = [0u16; 2];
        out.extend_from_slice(c.encode_utf16(&mut buf));
    }
}

#[cfg(feature = "wide")]
impl CodeUnit for u32 {
    fn decode(units: &[Self]) -> Result<(char, usize), ()> {
        unicode::decode_utf32(units)
    }

    fn encode(c: char, out: &mut Vec<Self>) {
        out.push(c as u32);
    }
}

/// Classic Pattern_White_Space set used by `skip_classic_whitespace`
/// (spec §4.3).
pub fn is_classic_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{09}'..='\u{0D}' | '\u{20}' | '\u{85}' | '\u{200E}' | '\u{200F}' | '\u{2028}' | '\u{2029}'
    )
}

/// Advances `pos` over classic whitespace code points. If `allow_exhaustion`
/// is false and the range is exhausted while still looking for the first
/// non-whitespace unit, returns `end_of_range`.
pub fn skip_classic_whitespace<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    allow_exhaustion: bool,
) -> ScanResult<usize> {
    let mut p = pos;
    loop {
        match peek_code_point(buf, p)? {
            Some((c, len)) if is_classic_whitespace(c) => p += len,
            Some(_) => return Ok(p),
            None => {
                return if allow_exhaustion {
                    Ok(p)
                } else {
                    Err(Error::end_of_range(p))
                }
            }
        }
    }
}

/// Skips whitespace per the locale's classification instead of the
/// classic Pattern_White_Space set (spec §4.3's localized variant).
pub fn skip_localised_whitespace<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    loc: &crate::locale::Locale,
) -> ScanResult<usize> {
    let mut p = pos;
    loop {
        match peek_code_point(buf, p)? {
            Some((c, len)) if loc.classify_whitespace(c) => p += len,
            _ => return Ok(p),
        }
    }
}

/// Decodes the code point starting at `pos` without advancing, reading
/// as many additional code units from the buffer as the decode needs.
pub fn peek_code_point<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
) -> ScanResult<Option<(char, usize)>> {
    // A code point is at most 4 code units in UTF-8 and 2 in UTF-16; we
    // gather a small lookahead window and let `CU::decode` figure out how
    // much of it it needed.
    let mut window = Vec::with_capacity(4);
    for i in 0..4 {
        match buf.unit_at(pos + i)? {
            Some(u) => window.push(u),
            None => break,
        }
        if let Ok((c, len)) = CU::decode(&window) {
            return Ok(Some((c, len)));
        }
    }
    if window.is_empty() {
        Ok(None)
    } else {
        Err(Error::invalid_encoding(pos))
    }
}

/// Consumes exactly `n` code units (not code points), returning the new
/// position. Fails with `end_of_range` if fewer than `n` remain.
pub fn read_exactly_n<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    n: usize,
) -> ScanResult<usize> {
    for i in 0..n {
        if buf.unit_at(pos + i)?.is_none() {
            return Err(Error::end_of_range(pos + i));
        }
    }
    Ok(pos + n)
}

/// Consumes a maximal run of code units satisfying `pred`, returning the
/// new position. May consume zero units.
pub fn read_while_code_unit<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    pred: impl Fn(CU) -> bool,
) -> ScanResult<usize> {
    let mut p = pos;
    while let Some(u) = buf.unit_at(p)? {
        if !pred(u) {
            break;
        }
        p += 1;
    }
    Ok(p)
}

/// Consumes a maximal run of code points satisfying `pred`, copying the
/// decoded text into an owned `String` (the copying variant; see
/// [`read_until_code_point_nocopy`] for contiguous narrow sources).
pub fn read_until_code_point<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    pred: impl Fn(char) -> bool,
) -> ScanResult<(usize, String)> {
    let mut p = pos;
    let mut out = String::new();
    loop {
        match peek_code_point(buf, p)? {
            Some((c, len)) if pred(c) => {
                out.push(c);
                p += len;
            }
            _ => return Ok((p, out)),
        }
    }
}

/// The nocopy variant of [`read_until_code_point`]: only callable on a
/// contiguous `u8` (UTF-8) buffer, returns a borrowed `&str` slice of the
/// source rather than an owned copy (spec's "nocopy path").
pub fn read_until_code_point_nocopy<'s>(
    data: &'s [u8],
    pos: usize,
    pred: impl Fn(char) -> bool,
) -> ScanResult<(usize, &'s str)> {
    let mut p = pos;
    loop {
        match data.get(p..).and_then(|rest| {
            if rest.is_empty() {
                None
            } else {
                unicode::decode_utf8(rest).ok()
            }
        }) {
            Some((c, len)) if pred(c) => p += len,
            Some((_, _)) => break,
            None => break,
        }
    }
    let s = std::str::from_utf8(&data[pos..p]).map_err(|_| Error::invalid_encoding(pos))?;
    Ok((p, s))
}

/// Consumes exactly `n` code points (not code units), used by the fixed
/// width character/string readers (`:.Nc`). Fails with `end_of_range` if
/// fewer than `n` code points remain.
pub fn read_n_width_units<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    n: usize,
) -> ScanResult<(usize, String)> {
    let mut p = pos;
    let mut out = String::new();
    for _ in 0..n {
        match peek_code_point(buf, p)? {
            Some((c, len)) => {
                out.push(c);
                p += len;
            }
            None => return Err(Error::end_of_range(p)),
        }
    }
    Ok((p, out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::IterSource;

    #[test]
    fn skip_ws_idempotent() {
        let mut buf: ScanBuffer<u8> =
            ScanBuffer::from_source(IterSource::new(b"   \tabc".iter().copied()));
        let p1 = skip_classic_whitespace(&mut buf, 0, true).unwrap();
        let p2 = skip_classic_whitespace(&mut buf, p1, true).unwrap();
        assert_eq!(p1, p2);
        assert_eq!(buf.unit_at(p1).unwrap(), Some(b'a'));
    }

    #[test]
    fn read_n_width_units_counts_code_points_not_bytes() {
        let data = "héllo".as_bytes();
        let mut buf: ScanBuffer<u8> = ScanBuffer::from_slice(data);
        let (p, s) = read_n_width_units(&mut buf, 0, 3).unwrap();
        assert_eq!(s, "hél");
        assert_eq!(p, "hél".len());
    }

    #[test]
    fn read_until_nocopy_stops_at_predicate() {
        let data = b"abc def";
        let (p, s) = read_until_code_point_nocopy(data, 0, |c| !c.is_whitespace()).unwrap();
        assert_eq!(s, "abc");
        assert_eq!(p, 3);
    }
}
