//! The character readers (spec C11): a single narrow code unit, a single
//! decoded code point, and the `:c`/no-spec default.
//!
//! The original's narrow-char-from-wide-source overflow check (a wide
//! code point that doesn't fit a narrow `char` type) has no Rust
//! counterpart: `char` is always a full 32-bit Unicode scalar value
//! regardless of the source's code unit width, so decoding a code point
//! out of a `u16`/`u32` source into a `char` destination can never
//! overflow the way it can in a language where "narrow char" is its own
//! fixed-width integer type.

use crate::buffer::ScanBuffer;
use crate::error::{Error, ScanResult};
use crate::read::algorithms::{peek_code_point, CodeUnit};

/// Reads exactly one code point, with no whitespace skipping — a `char`
/// replacement field consumes whatever is at the cursor, whitespace
/// included (spec §4.7: character reading never skips leading space).
pub fn read_code_point<CU: CodeUnit>(buf: &mut ScanBuffer<CU>, pos: usize) -> ScanResult<(usize, char)> {
    match peek_code_point(buf, pos)? {
        Some((c, len)) => Ok((pos + len, c)),
        None => Err(Error::end_of_range(pos)),
    }
}

/// Reads a single narrow (`u8`) code unit verbatim, without requiring it
/// to be valid UTF-8 on its own — used when the destination is a raw byte
/// rather than a `char` (spec's narrow-character reader).
pub fn read_narrow_unit(buf: &mut ScanBuffer<u8>, pos: usize) -> ScanResult<(usize, u8)> {
    match buf.unit_at(pos)? {
        Some(u) => Ok((pos + 1, u)),
        None => Err(Error::end_of_range(pos)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_single_code_point() {
        let mut buf: ScanBuffer<u8> = ScanBuffer::from_slice("héllo".as_bytes());
        let (p, c) = read_code_point(&mut buf, 0).unwrap();
        assert_eq!(c, 'h');
        assert_eq!(p, 1);
        let (p2, c2) = read_code_point(&mut buf, p).unwrap();
        assert_eq!(c2, 'é');
        assert_eq!(p2, p + 'é'.len_utf8());
    }

    #[test]
    fn whitespace_is_not_skipped() {
        let mut buf: ScanBuffer<u8> = ScanBuffer::from_slice(b" x");
        let (_, c) = read_code_point(&mut buf, 0).unwrap();
        assert_eq!(c, ' ');
    }

    #[test]
    fn narrow_unit_reads_raw_byte() {
        let mut buf: ScanBuffer<u8> = ScanBuffer::from_slice(&[0xFFu8]);
        let (p, u) = read_narrow_unit(&mut buf, 0).unwrap();
        assert_eq!(u, 0xFF);
        assert_eq!(p, 1);
    }

    #[test]
    fn end_of_range_at_eof() {
        let mut buf: ScanBuffer<u8> = ScanBuffer::from_slice(b"");
        assert!(read_code_point(&mut buf, 0).is_err());
    }
}
