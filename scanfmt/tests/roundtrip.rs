//! Round-trip properties (spec §8): scanning the text a value formats to
//! must reproduce that value, for every supported integer base and for
//! finite floats under the classic locale.

use proptest::prelude::*;
use scanfmt::{scan, Scanned};

proptest! {
    #[test]
    fn integer_decimal_roundtrip(n in any::<i64>()) {
        let text = n.to_string();
        let Scanned { value, .. } = scan::<i64>(&text, "{}").unwrap();
        prop_assert_eq!(value, n);
    }

    #[test]
    fn integer_hex_roundtrip(n in any::<u32>()) {
        let text = format!("{n:x}");
        let Scanned { value, .. } = scan::<u32>(&text, "{:x}").unwrap();
        prop_assert_eq!(value, n);
    }

    #[test]
    fn integer_binary_roundtrip(n in any::<u16>()) {
        let text = format!("{n:b}");
        let Scanned { value, .. } = scan::<u16>(&text, "{:b}").unwrap();
        prop_assert_eq!(value, n);
    }

    #[test]
    fn integer_octal_roundtrip(n in any::<u32>()) {
        let text = format!("{n:o}");
        let Scanned { value, .. } = scan::<u32>(&text, "{:o}").unwrap();
        prop_assert_eq!(value, n);
    }

    #[test]
    fn float_decimal_roundtrip(f in proptest::num::f64::NORMAL) {
        let text = format!("{f}");
        let Scanned { value, .. } = scan::<f64>(&text, "{:f}").unwrap();
        prop_assert_eq!(value.to_bits(), f.to_bits());
    }

    #[test]
    fn string_word_roundtrip(word in "[a-zA-Z0-9]{1,16}") {
        let Scanned { value, .. } = scan::<String>(&word, "{}").unwrap();
        prop_assert_eq!(value, word);
    }
}
