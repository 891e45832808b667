//! The closed error taxonomy shared by every reader and by the format
//! parser (spec §7).

use std::fmt;

/// The six error kinds a scan operation can fail with. Closed by design:
/// a reader never invents a new kind, it only picks one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorKind {
    /// Source exhausted before a required code unit was available.
    #[error("end of range")]
    EndOfRange,
    /// Format string rejected by the parser or spec validator.
    #[error("invalid format string")]
    InvalidFormatString,
    /// A reader could not parse a value at the current position.
    #[error("invalid scanned value")]
    InvalidScannedValue,
    /// The value is lexically valid but does not fit the destination type.
    #[error("value out of range")]
    ValueOutOfRange,
    /// Source contained a malformed code-point sequence that had to be
    /// decoded.
    #[error("invalid encoding")]
    InvalidEncoding,
    /// Underlying source reported an unrecoverable failure.
    #[error("bad source")]
    BadSource,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::EndOfRange => "end of range",
            ErrorKind::InvalidFormatString => "invalid format string",
            ErrorKind::InvalidScannedValue => "invalid scanned value",
            ErrorKind::ValueOutOfRange => "value out of range",
            ErrorKind::InvalidEncoding => "invalid encoding",
            ErrorKind::BadSource => "bad source",
        }
    }
}

/// A scan error: a kind plus an optional static message and the logical
/// position (in code units from the start of the range passed to `scan`)
/// at which the failure was detected.
#[derive(Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<&'static str>,
    pub position: usize,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at position {}: {}",
            self.kind.as_str(),
            self.position,
            self.message.unwrap_or(self.kind.as_str())
        )
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(kind: ErrorKind, position: usize) -> Self {
        Self {
            kind,
            message: None,
            position,
        }
    }

    pub fn with_message(kind: ErrorKind, position: usize, message: &'static str) -> Self {
        Self {
            kind,
            message: Some(message),
            position,
        }
    }

    pub fn end_of_range(position: usize) -> Self {
        Self::new(ErrorKind::EndOfRange, position)
    }

    pub fn invalid_format_string(position: usize, message: &'static str) -> Self {
        Self::with_message(ErrorKind::InvalidFormatString, position, message)
    }

    pub fn invalid_scanned_value(position: usize, message: &'static str) -> Self {
        Self::with_message(ErrorKind::InvalidScannedValue, position, message)
    }

    pub fn value_out_of_range(position: usize) -> Self {
        Self::new(ErrorKind::ValueOutOfRange, position)
    }

    pub fn invalid_encoding(position: usize) -> Self {
        Self::new(ErrorKind::InvalidEncoding, position)
    }

    pub fn bad_source(position: usize, message: &'static str) -> Self {
        Self::with_message(ErrorKind::BadSource, position, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// The result type used throughout the engine. Carries a `scanfmt::Error`
/// on the error side, exactly as `expected<iterator>` does in the
/// original (spec §3's "Scan result").
pub type ScanResult<T> = Result<T, Error>;
