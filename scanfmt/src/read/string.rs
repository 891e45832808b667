//! The string readers (spec C12): default (whitespace-delimited),
//! fixed-width (`:.Nc`), and charset-bounded (`:[…]`).

use crate::buffer::ScanBuffer;
use crate::error::{Error, ScanResult};
use crate::format::spec::CharSet;
use crate::read::algorithms::{
    read_n_width_units, read_until_code_point, read_until_code_point_nocopy,
    skip_classic_whitespace, CodeUnit,
};

/// Reads a default (`:s`/no-spec) string: skip leading whitespace, then
/// consume a maximal run of non-whitespace code points.
pub fn read_default<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
) -> ScanResult<(usize, String)> {
    let start = skip_classic_whitespace(buf, pos, false)?;
    let (after, s) = read_until_code_point(buf, start, |c| !c.is_whitespace())?;
    if s.is_empty() {
        return Err(Error::end_of_range(start));
    }
    Ok((after, s))
}

/// The nocopy path for a default string read over a contiguous UTF-8
/// buffer: borrows directly from the source instead of allocating.
pub fn read_default_nocopy(data: &str, pos: usize) -> ScanResult<(usize, &str)> {
    let bytes = data.as_bytes();
    let mut p = pos;
    while let Some(&b) = bytes.get(p) {
        if b.is_ascii_whitespace() {
            p += 1;
        } else {
            break;
        }
    }
    let start = p;
    let (after, s) = read_until_code_point_nocopy(bytes, start, |c| !c.is_whitespace())?;
    if s.is_empty() {
        return Err(Error::end_of_range(start));
    }
    Ok((after, s))
}

/// Reads exactly `n` code points with no whitespace skipping (`:.Nc`).
pub fn read_fixed_width<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    n: u32,
) -> ScanResult<(usize, String)> {
    read_n_width_units(buf, pos, n as usize)
}

/// Reads a maximal run of code points accepted by `set` (`:[…]`), per
/// spec I-F2 requiring the set accept at least one code point. Leading
/// whitespace is skipped only if the set itself would accept whitespace
/// is irrelevant here; per spec §4.8 charset reads never implicitly skip
/// leading whitespace, matching character reads.
pub fn read_charset<CU: CodeUnit>(
    buf: &mut ScanBuffer<CU>,
    pos: usize,
    set: &CharSet,
) -> ScanResult<(usize, String)> {
    let (after, s) = read_until_code_point(buf, pos, |c| set.contains(c))?;
    if s.is_empty() {
        return Err(Error::invalid_scanned_value(
            pos,
            "no code point at the current position matched the character set",
        ));
    }
    Ok((after, s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf_from(s: &'static str) -> ScanBuffer<'static, u8> {
        ScanBuffer::from_slice(s.as_bytes())
    }

    #[test]
    fn default_stops_at_whitespace() {
        let mut buf = buf_from("  hello world");
        let (p, s) = read_default(&mut buf, 0).unwrap();
        assert_eq!(s, "hello");
        assert_eq!(p, "  hello".len());
    }

    #[test]
    fn fixed_width_counts_code_points() {
        let mut buf = buf_from("héllo world");
        let (_, s) = read_fixed_width(&mut buf, 0, 3).unwrap();
        assert_eq!(s, "hél");
    }

    #[test]
    fn charset_collects_matching_run() {
        let mut set = CharSet::empty();
        set.add_range('a', 'z');
        let mut buf = buf_from("abcDEF");
        let (p, s) = read_charset(&mut buf, 0, &set).unwrap();
        assert_eq!(s, "abc");
        assert_eq!(p, 3);
    }

    #[test]
    fn empty_match_is_an_error() {
        let mut set = CharSet::empty();
        set.add_range('a', 'z');
        let mut buf = buf_from("XYZ");
        assert!(read_charset(&mut buf, 0, &set).is_err());
    }

    #[test]
    fn nocopy_borrows_from_source() {
        let data = "  abc def";
        let (p, s) = read_default_nocopy(data, 0).unwrap();
        assert_eq!(s, "abc");
        assert_eq!(p, 5);
    }
}
