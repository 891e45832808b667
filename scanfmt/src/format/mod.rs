//! The format-string parser (spec C4): tokenises `{…}` replacement
//! fields, parses specs, and validates them against the static argument
//! type list.

pub mod parser;
pub mod spec;

pub use parser::{parse, ParsedFormat};
pub use spec::{Align, CharSet, FormatSpec, Presentation, RegexSpec, Sign};

/// One piece of a parsed format string: either a run of literal text to
/// be skipped over verbatim against the source, or a replacement field.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatToken {
    Literal(String),
    Replacement {
        arg_id: usize,
        spec: FormatSpec,
    },
}
