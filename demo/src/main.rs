//! A small tour of `scanfmt`: scanning out of an in-memory string, a
//! compile-time-checked format string, and an interactive prompt.

use anyhow::Context;
use scanfmt::Scanned;
use scanfmt_macros::checked_format;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    scan_a_pair()?;
    scan_with_checked_format()?;
    scan_a_sequence()?;
    interactive_prompt()?;
    Ok(())
}

/// The simplest case: two whitespace-separated fields, default presentation.
fn scan_a_pair() -> anyhow::Result<()> {
    let Scanned { value: (name, age), .. } =
        scanfmt::scan::<(String, u32)>("Grace 37", "{} {}").context("scanning name and age")?;
    println!("{name} is {age} years old");
    Ok(())
}

/// `checked_format!` rejects a malformed format string at compile time; at
/// runtime it behaves exactly like the string literal it expands to.
fn scan_with_checked_format() -> anyhow::Result<()> {
    let fmt = checked_format!("{:x} {:.2f}");
    let Scanned { value: (flags, ratio), .. } =
        scanfmt::scan::<(u32, f64)>("ff 0.75", fmt).context("scanning flags and ratio")?;
    println!("flags = 0x{flags:x}, ratio = {ratio}");
    Ok(())
}

/// Reading a bracketed list of integers through the range-of-T reader.
fn scan_a_sequence() -> anyhow::Result<()> {
    let mut buf = scanfmt::buffer::ScanBuffer::from_slice("[1, 2, 3, 4]".as_bytes());
    let (end, numbers) =
        scanfmt::read::range::read_sequence(&mut buf, 0, scanfmt::read::integer::read_default::<i32, u8>)
            .context("scanning a sequence of integers")?;
    println!("read {} numbers, consumed {end} bytes: {numbers:?}", numbers.len());
    Ok(())
}

/// Prompts on stdout and reads a line of input from stdin.
fn interactive_prompt() -> anyhow::Result<()> {
    if std::env::var_os("SCANFMT_DEMO_SKIP_PROMPT").is_some() {
        return Ok(());
    }
    let name: String = match scanfmt::prompt("What's your name? ", "{}") {
        Ok(name) => name,
        Err(err) => {
            tracing::warn!(%err, "no interactive input available, skipping prompt");
            return Ok(());
        }
    };
    println!("Nice to meet you, {name}.");
    Ok(())
}
