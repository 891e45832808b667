//! The pointer reader (spec's supplemented `p` presentation, grounded in
//! `src/scn/impl/reader/pointer_reader.h`): a required `0x`/`0X` prefix
//! followed by hex digits, reusing the integer reader's hex path rather
//! than duplicating digit accumulation.
//!
//! The original produces a `void*`; there is no safe way to manufacture
//! a raw pointer from scanned text, so this reads into a `usize` bit
//! pattern instead (spec §3's "Argument" lists a void-pointer tag for
//! exactly this purpose).

use crate::buffer::ScanBuffer;
use crate::error::{Error, ScanResult};
use crate::format::spec::{FormatSpec, Presentation};
use crate::locale::Locale;
use crate::read::algorithms::{skip_classic_whitespace, CodeUnit};
use crate::read::integer;

/// Reads a pointer value: whitespace-skipped, mandatory `0x`/`0X` prefix,
/// one or more hex digits, no sign.
pub fn read_default<CU: CodeUnit>(buf: &mut ScanBuffer<CU>, pos: usize) -> ScanResult<(usize, usize)> {
    let start = skip_classic_whitespace(buf, pos, false)?;
    let mut spec = FormatSpec::default();
    spec.presentation = Presentation::IntHex;
    spec.alt = true;
    integer::read_with_specs::<usize, CU>(buf, start, &spec, &Locale::classic()).map_err(|e| {
        if e.kind() == crate::error::ErrorKind::InvalidScannedValue {
            Error::invalid_scanned_value(start, "expected a '0x'-prefixed pointer value")
        } else {
            e
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_hex_pointer() {
        let mut buf: ScanBuffer<u8> = ScanBuffer::from_slice(b"0x1a2b3c");
        let (_, v) = read_default(&mut buf, 0).unwrap();
        assert_eq!(v, 0x1a2b3c);
    }

    #[test]
    fn missing_prefix_is_invalid() {
        let mut buf: ScanBuffer<u8> = ScanBuffer::from_slice(b"1a2b3c");
        assert!(read_default(&mut buf, 0).is_err());
    }
}
