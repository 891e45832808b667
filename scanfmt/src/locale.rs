//! An opaque locale handle exposing only the capabilities the engine
//! actually uses (spec §9 Design Notes): thousands separator, decimal
//! point, grouping string, and character classification. Deliberately
//! not tied to the OS locale database — callers construct one explicitly.

/// `grouping` entries follow the classic C convention: each byte is the
/// size of one digit group, read from the least-significant group
/// outward; `0` repeats the previous group size forever; `CHAR_MAX`
/// (`255`) means "no further grouping".
pub const NO_FURTHER_GROUPING: u8 = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub thousands_sep: char,
    pub decimal_point: char,
    pub grouping: Vec<u8>,
    pub truename: &'static str,
    pub falsename: &'static str,
}

impl Locale {
    /// The "classic" (`"C"`) locale: `.` decimal point, `,` thousands
    /// separator, no grouping enforced by default, `true`/`false`.
    pub fn classic() -> Self {
        Self {
            thousands_sep: ',',
            decimal_point: '.',
            grouping: vec![NO_FURTHER_GROUPING],
            truename: "true",
            falsename: "false",
        }
    }

    /// Builds a custom locale handle, e.g. for a European-style
    /// `1.234,56` convention (`,` decimal point, `.` thousands,
    /// three-digit grouping).
    pub fn new(
        thousands_sep: char,
        decimal_point: char,
        grouping: Vec<u8>,
        truename: &'static str,
        falsename: &'static str,
    ) -> Self {
        Self {
            thousands_sep,
            decimal_point,
            grouping,
            truename,
            falsename,
        }
    }

    /// Checks whether `group_sizes`, read from the least-significant
    /// group outward, is consistent with this locale's `grouping`
    /// (spec's supplemented thousands-separator validation).
    pub fn grouping_is_valid(&self, group_sizes: &[usize]) -> bool {
        let mut expected = self.grouping.iter().copied();
        let mut last = None;
        for (i, &size) in group_sizes.iter().enumerate() {
            let want = match expected.next() {
                Some(NO_FURTHER_GROUPING) | None => last,
                Some(0) => last,
                Some(n) => {
                    last = Some(n as usize);
                    last
                }
            };
            // The outermost (first, most-significant) group may be
            // shorter than the expected size, never longer.
            let is_first = i + 1 == group_sizes.len();
            match want {
                Some(w) if is_first => {
                    if size > w {
                        return false;
                    }
                }
                Some(w) => {
                    if size != w {
                        return false;
                    }
                }
                None => {}
            }
        }
        true
    }

    pub fn classify_alpha(&self, c: char) -> bool {
        c.is_alphabetic()
    }

    pub fn classify_whitespace(&self, c: char) -> bool {
        c.is_whitespace()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_grouping_accepts_threes() {
        let loc = Locale {
            grouping: vec![3, NO_FURTHER_GROUPING],
            ..Locale::classic()
        };
        // "1,234,567" -> groups (read outward from least significant): 3,3,1
        assert!(loc.grouping_is_valid(&[3, 3, 1]));
        assert!(!loc.grouping_is_valid(&[3, 2, 1]));
    }
}
