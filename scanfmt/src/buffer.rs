//! The scan buffer (spec C2): a uniform read-with-putback abstraction
//! over contiguous memory, forward iterators, FILE* streams, and stdin.
//!
//! Positions are logical offsets (`usize`) rather than raw pointers, so
//! they stay valid across the putback arena's growth (spec §9, "Putback
//! buffer as an arena").

use tracing::trace;

use crate::error::{Error, ScanResult};
use crate::source::UnitSource;

/// A forward sequence of code units, backed either directly by a
/// contiguous slice (the nocopy fast path, I-B3) or by a pull-based
/// [`UnitSource`] plus a growing putback arena (I-B1, I-B2).
pub enum ScanBuffer<'s, CU: Copy> {
    Contiguous(&'s [CU]),
    Buffered(BufferedState<'s, CU>),
}

pub struct BufferedState<'s, CU: Copy> {
    source: Box<dyn UnitSource<CU> + 's>,
    /// Every unit ever produced by `source`, in order. Acts as both the
    /// "putback" store and the cache that lets `unit_at` be called with
    /// any previously-seen position without re-pulling.
    arena: Vec<CU>,
    exhausted: bool,
}

impl<'s, CU: Copy> ScanBuffer<'s, CU> {
    pub fn from_slice(data: &'s [CU]) -> Self {
        ScanBuffer::Contiguous(data)
    }

    pub fn from_source(source: impl UnitSource<CU> + 's) -> Self {
        ScanBuffer::Buffered(BufferedState {
            source: Box::new(source),
            arena: Vec::new(),
            exhausted: false,
        })
    }

    /// Spec I-B3: true when `segment` spans the entire source and
    /// `putback` is empty — readers may take the nocopy path.
    pub fn is_contiguous(&self) -> bool {
        matches!(self, ScanBuffer::Contiguous(_))
    }

    /// Returns the whole source as a slice, only when contiguous.
    pub fn contiguous_view(&self) -> Option<&'s [CU]> {
        match self {
            ScanBuffer::Contiguous(data) => Some(data),
            ScanBuffer::Buffered(_) => None,
        }
    }

    /// Total units already produced: `putback` plus the current segment
    /// suffix. For a contiguous source that is simply its length.
    pub fn chars_available(&self) -> usize {
        match self {
            ScanBuffer::Contiguous(data) => data.len(),
            ScanBuffer::Buffered(state) => state.arena.len(),
        }
    }

    /// Ensures the unit at logical `pos` has been produced, pulling more
    /// from the source as needed, and returns it (or `None` at EOF).
    pub fn unit_at(&mut self, pos: usize) -> ScanResult<Option<CU>> {
        match self {
            ScanBuffer::Contiguous(data) => Ok(data.get(pos).copied()),
            ScanBuffer::Buffered(state) => {
                while state.arena.len() <= pos && !state.exhausted {
                    match state.source.pull()? {
                        Some(unit) => {
                            state.arena.push(unit);
                            if state.arena.len().is_power_of_two() {
                                trace!(len = state.arena.len(), "putback arena grew");
                            }
                        }
                        None => state.exhausted = true,
                    }
                }
                Ok(state.arena.get(pos).copied())
            }
        }
    }

    /// Spec I-B4: position the underlying source so that discarding the
    /// buffer and reading raw from the source would yield the units at
    /// and after `pos`.
    pub fn sync(&mut self, pos: usize) -> ScanResult<()> {
        match self {
            ScanBuffer::Contiguous(_) => Ok(()),
            ScanBuffer::Buffered(state) => {
                if pos >= state.arena.len() {
                    return Ok(());
                }
                let tail = state.arena[pos..].to_vec();
                state.source.sync_rewind(&tail)?;
                trace!(rewound = tail.len(), "buffer synced behind arena tip");
                Ok(())
            }
        }
    }

    /// Whether `pos` is the end of everything the source can produce.
    /// For buffered sources this requires having attempted to pull past
    /// `pos` at least once (i.e. `unit_at(pos)` having returned `None`).
    pub fn is_end(&self, pos: usize) -> bool {
        match self {
            ScanBuffer::Contiguous(data) => pos >= data.len(),
            ScanBuffer::Buffered(state) => pos >= state.arena.len() && state.exhausted,
        }
    }
}

/// A lightweight cursor into a [`ScanBuffer`]: just a logical position.
/// Cheap to copy, valid for the buffer's lifetime (I-B1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor(pub usize);

impl Cursor {
    pub fn start() -> Self {
        Cursor(0)
    }

    pub fn advance(self) -> Self {
        Cursor(self.0 + 1)
    }

    pub fn advance_by(self, n: usize) -> Self {
        Cursor(self.0 + n)
    }
}

impl<'s, CU: Copy> ScanBuffer<'s, CU> {
    pub fn current(&mut self, at: Cursor) -> ScanResult<Option<CU>> {
        self.unit_at(at.0)
    }

    pub fn require_current(&mut self, at: Cursor) -> ScanResult<CU> {
        self.current(at)?.ok_or_else(|| Error::end_of_range(at.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::IterSource;

    #[test]
    fn contiguous_is_fast_path() {
        let data = [1u8, 2, 3];
        let buf = ScanBuffer::from_slice(&data);
        assert!(buf.is_contiguous());
        assert_eq!(buf.contiguous_view(), Some(&data[..]));
    }

    #[test]
    fn buffered_putback_is_stable() {
        let mut buf = ScanBuffer::from_source(IterSource::new(vec![10u8, 20, 30].into_iter()));
        assert_eq!(buf.unit_at(1).unwrap(), Some(20));
        // Re-reading position 0 after having advanced past it must yield
        // the same unit (I-B1).
        assert_eq!(buf.unit_at(0).unwrap(), Some(10));
        assert_eq!(buf.unit_at(2).unwrap(), Some(30));
        assert_eq!(buf.unit_at(3).unwrap(), None);
        assert!(buf.is_end(3));
    }

    #[test]
    fn order_independent_advancement() {
        // I-B2: for i <= j, the units between them don't depend on the
        // order positions were first requested in.
        let mut a = ScanBuffer::from_source(IterSource::new(vec![1u8, 2, 3, 4].into_iter()));
        let mut b = ScanBuffer::from_source(IterSource::new(vec![1u8, 2, 3, 4].into_iter()));

        let forward: Vec<_> = (0..4).map(|i| a.unit_at(i).unwrap()).collect();
        let backward: Vec<_> = (0..4).rev().map(|i| b.unit_at(i).unwrap()).collect::<Vec<_>>();
        let mut backward = backward;
        backward.reverse();

        assert_eq!(forward, backward);
    }
}
