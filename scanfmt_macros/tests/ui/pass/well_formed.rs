use scanfmt_macros::checked_format;

fn main() {
    let fmt: &'static str = checked_format!("{} is {:d} years old");
    assert_eq!(fmt, "{} is {:d} years old");

    let with_charset: &'static str = checked_format!("{:[a-z]}");
    assert_eq!(with_charset, "{:[a-z]}");
}
