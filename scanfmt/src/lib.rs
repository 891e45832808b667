//! `scanfmt` is a typed, format-string-driven input scanning library —
//! the `scanf` analogue of a modern typed formatter. It reads values of
//! programmer-specified types out of a character source, under the
//! direction of a `{}`-style format string, with compile-time format
//! validation (via the companion `scanfmt_macros` crate), Unicode
//! awareness, and support for both narrow (UTF-8) and wide
//! (UTF-16/UTF-32) character sources.
//!
//! ```
//! use scanfmt::Scanned;
//!
//! let Scanned { value: (name, age), .. } =
//!     scanfmt::scan::<(String, u32)>("Alice 30", "{} {}").unwrap();
//! assert_eq!(name, "Alice");
//! assert_eq!(age, 30);
//! ```
//!
//! # Format strings
//!
//! A replacement field is `{[arg-id][:spec]}`; `spec` carries fill,
//! alignment, sign, width, precision, and a presentation type selecting
//! which reader handles the field (`d` for decimal, `x` for hex, `s` for
//! string, `[…]` for a character set, `/…/ ` for a regex match, and so
//! on). See [`format`] for the full grammar.
//!
//! # Module map
//!
//! | Module | Responsibility |
//! |---|---|
//! | [`unicode`] | Code-point validation, UTF-8/16/32 transcoding, display width |
//! | [`buffer`] | The scan buffer: read-with-putback over any source |
//! | [`source`] | Adapters from contiguous memory, iterators, `FILE*`, and stdin |
//! | [`error`] | The closed error taxonomy |
//! | [`format`] | Format-string parsing and per-field spec validation |
//! | [`args`] | Type-erased argument store and dispatch |
//! | [`read`] | The per-type value readers (integers, floats, strings, …) |
//! | [`locale`] | The opaque locale handle (thousands separator, decimal point, grouping) |
//! | [`scan`] | The public entry points: `scan`, `scan_value`, `input`, `prompt` |

#![warn(missing_debug_implementations)]

pub mod args;
pub mod buffer;
pub mod error;
pub mod format;
pub mod locale;
pub mod read;
pub mod scan;
pub mod source;
pub mod unicode;

pub use args::{ArgTypeTag, Argument, CustomScan};
pub use error::{Error, ErrorKind, ScanResult};
pub use format::{FormatSpec, Presentation};
pub use locale::Locale;
pub use scan::{input, prompt, scan, scan_seeded, scan_value, scan_with_locale, Scanned};
