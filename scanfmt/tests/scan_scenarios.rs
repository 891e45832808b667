//! End-to-end scan scenarios (spec §8's nine concrete cases) plus a few
//! of the cross-cutting invariants (idempotent whitespace skip, no
//! retrogression on chained scans, encoding closure).

use scanfmt::{scan, scan_value, ErrorKind, Scanned};

#[test]
fn scans_a_single_integer() {
    let Scanned { end, value } = scan::<i32>("42", "{}").unwrap();
    assert_eq!(value, 42);
    assert_eq!(end, 2);
}

#[test]
fn scans_two_integers() {
    let Scanned { end, value } = scan::<(i32, i32)>("123 456", "{} {}").unwrap();
    assert_eq!(value, (123, 456));
    assert_eq!(end, 7);
}

#[test]
fn skips_leading_whitespace_by_default() {
    let Scanned { value, .. } = scan::<i32>(" \n42", "{}").unwrap();
    assert_eq!(value, 42);
}

#[test]
fn scans_a_whitespace_delimited_word() {
    let Scanned { end, value } = scan::<String>("abc def", "{}").unwrap();
    assert_eq!(value, "abc");
    assert_eq!(end, 3);
}

#[test]
fn scans_a_fixed_width_string() {
    let Scanned { end, value } = scan::<String>("abc def", "{:.4c}").unwrap();
    assert_eq!(value, "abc ");
    assert_eq!(end, 4);
}

#[test]
fn scans_a_negated_word_character_set() {
    // \W is "not a word character": a single leading space qualifies, the
    // following 'a' does not, so exactly one code point is consumed.
    let Scanned { end, value } = scan::<String>(" abc_123", "{:[\\W]}").unwrap();
    assert_eq!(value, " ");
    assert_eq!(end, 1);
}

#[test]
fn double_sign_is_an_invalid_scanned_value() {
    let err = scan::<i32>("--4", "{}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidScannedValue);
}

#[test]
fn overflowing_integer_is_value_out_of_range() {
    let err = scan::<i64>("999999999999999999999", "{}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueOutOfRange);
}

#[test]
fn scans_a_pointer_value() {
    let x = 0x7fffu32;
    let formatted = format!("{:#x}", x);
    let Scanned { value, .. } = scan::<scanfmt::scan::Pointer>(formatted.as_str(), "{}").unwrap();
    assert_eq!(value.0, x as usize);
}

#[test]
fn chained_scans_never_retrogress() {
    let source = "10 20 30";
    let Scanned { end: first_end, value: first } = scan::<i32>(source, "{}").unwrap();
    let Scanned { end: second_end, value: second } =
        scan::<i32>(source[first_end..].trim_start(), "{}").unwrap();
    assert_eq!((first, second), (10, 20));
    assert!(second_end > 0 && first_end <= source.len());
}

#[test]
fn string_reads_never_split_a_code_point() {
    let Scanned { value, .. } = scan::<String>("héllo world", "{}").unwrap();
    assert!(value.chars().count() > 0);
    assert_eq!(value, "héllo");
}

#[test]
fn scan_value_uses_the_implicit_field() {
    let Scanned { value, .. } = scan_value::<i32>("7").unwrap();
    assert_eq!(value, 7);
}

#[test]
fn literal_text_must_match_exactly() {
    assert!(scan::<i32>("x=42", "x={}").is_ok());
    assert!(scan::<i32>("y=42", "x={}").is_err());
}

#[test]
fn escaped_braces_are_literal() {
    let Scanned { value, .. } = scan::<i32>("{42}", "{{{}}}").unwrap();
    assert_eq!(value, 42);
}
