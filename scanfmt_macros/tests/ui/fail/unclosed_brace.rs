use scanfmt_macros::checked_format;

fn main() {
    let _ = checked_format!("{:d");
}
