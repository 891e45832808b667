//! The parsed form of a replacement field (spec §3 "Format specs", §6.1).

use std::fmt;

/// Fill/align/width/precision/sign/etc., plus the selected presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatSpec {
    pub width: u32,
    pub precision: Option<u32>,
    pub fill: char,
    pub align: Align,
    pub sign: Sign,
    pub alt: bool,
    pub zero_pad: bool,
    pub localized: bool,
    pub thsep: bool,
    pub presentation: Presentation,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            width: 0,
            precision: None,
            fill: ' ',
            align: Align::None,
            sign: Sign::Default,
            alt: false,
            zero_pad: false,
            localized: false,
            thsep: false,
            presentation: Presentation::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    None,
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Default,
    Plus,
    Minus,
    Space,
}

/// The presentation tag: which reader a replacement field selects (spec
/// §3's `type` field).
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    None,
    IntGeneric,
    IntBinary,
    IntOctal,
    IntDecimal,
    IntHex,
    IntUnsigned,
    IntArbitraryBase(u32),
    FloatFixed,
    FloatScientific,
    FloatHex,
    FloatGeneral,
    CharFixed,
    CodePoint,
    String,
    CharacterSet(CharSet),
    Regex(RegexSpec),
    Pointer,
}

impl Presentation {
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Presentation::IntGeneric
                | Presentation::IntBinary
                | Presentation::IntOctal
                | Presentation::IntDecimal
                | Presentation::IntHex
                | Presentation::IntUnsigned
                | Presentation::IntArbitraryBase(_)
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(
            self,
            Presentation::FloatFixed
                | Presentation::FloatScientific
                | Presentation::FloatHex
                | Presentation::FloatGeneral
        )
    }

    pub fn is_string_family(&self) -> bool {
        matches!(
            self,
            Presentation::None | Presentation::String | Presentation::CharFixed | Presentation::CharacterSet(_)
        )
    }
}

/// A `:[…]` character-set presentation: a bitset for the ASCII range plus
/// a list of extended ranges, and a negation flag (spec §4.8).
#[derive(Debug, Clone, PartialEq)]
pub struct CharSet {
    pub negated: bool,
    /// Bit `i` set means ASCII code point `i` (0..128) is accepted.
    pub ascii_bits: u128,
    /// Ranges (inclusive) covering non-ASCII code points, or ASCII ranges
    /// too large to enumerate conveniently bit-by-bit.
    pub ranges: Vec<(char, char)>,
}

impl CharSet {
    pub fn empty() -> Self {
        Self {
            negated: false,
            ascii_bits: 0,
            ranges: Vec::new(),
        }
    }

    pub fn add_char(&mut self, c: char) {
        if (c as u32) < 128 {
            self.ascii_bits |= 1u128 << (c as u32);
        } else {
            self.ranges.push((c, c));
        }
    }

    pub fn add_range(&mut self, lo: char, hi: char) {
        if (lo as u32) < 128 && (hi as u32) < 128 {
            for cp in (lo as u32)..=(hi as u32) {
                self.ascii_bits |= 1u128 << cp;
            }
        } else {
            self.ranges.push((lo, hi));
        }
    }

    fn raw_contains(&self, c: char) -> bool {
        let cp = c as u32;
        if cp < 128 {
            (self.ascii_bits >> cp) & 1 == 1
        } else {
            self.ranges.iter().any(|&(lo, hi)| c >= lo && c <= hi)
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.raw_contains(c) != self.negated
    }

    /// Spec I-F2: a character-set presentation has at least one accepted
    /// code point. A negated empty set is never empty (it accepts
    /// everything), so this only rejects a positive, literally-empty set.
    pub fn is_empty_positive(&self) -> bool {
        !self.negated && self.ascii_bits == 0 && self.ranges.is_empty()
    }
}

/// A `:/…/` regex presentation: the pattern text and any trailing flags.
#[derive(Debug, Clone, PartialEq)]
pub struct RegexSpec {
    pub pattern: String,
    pub flags: String,
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Presentation::None => "default",
            Presentation::IntGeneric => "i",
            Presentation::IntBinary => "b",
            Presentation::IntOctal => "o",
            Presentation::IntDecimal => "d",
            Presentation::IntHex => "x",
            Presentation::IntUnsigned => "u",
            Presentation::IntArbitraryBase(_) => "base-n integer",
            Presentation::FloatFixed => "f",
            Presentation::FloatScientific => "e",
            Presentation::FloatHex => "a",
            Presentation::FloatGeneral => "g",
            Presentation::CharFixed => "c",
            Presentation::CodePoint => "code point",
            Presentation::String => "s",
            Presentation::CharacterSet(_) => "character set",
            Presentation::Regex(_) => "regex",
            Presentation::Pointer => "p",
        };
        f.write_str(name)
    }
}
