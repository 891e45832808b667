//! Source-range adapters (spec C6): wraps any of {contiguous, forward
//! iterator, buffered stdio, erased} into the uniform interface the scan
//! buffer and readers expect.
//!
//! The FILE* adapter follows the teacher's own use of `libc` (`restruct`
//! depends on `libc` to name native C types for its format strings); here
//! the same dependency backs real `fgetc`/`ungetc` calls instead.

use std::io::Read;
use std::sync::{Mutex, OnceLock};

use crate::error::{Error, ScanResult};

/// A pull-based code-unit source: the minimal capability the scan buffer
/// needs from anything that isn't already contiguous in memory.
pub trait UnitSource<CU> {
    /// Produce the next code unit, or `None` at end of source.
    fn pull(&mut self) -> ScanResult<Option<CU>>;

    /// Best-effort rewind hint used by `ScanBuffer::sync` (spec I-B4).
    /// `units` is the tail of the putback arena to push back onto the
    /// underlying resource, most-recently-produced first. Sources with no
    /// real rewind capability (plain forward iterators) leave this a
    /// no-op: nothing needs to happen because the iterator's output is
    /// already fully captured in the arena.
    fn sync_rewind(&mut self, units: &[CU]) -> ScanResult<()> {
        let _ = units;
        Ok(())
    }
}

/// Adapts any `Iterator<Item = CU>` (spec's "forward iterator range").
pub struct IterSource<I> {
    iter: I,
}

impl<I> IterSource<I> {
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I, CU> UnitSource<CU> for IterSource<I>
where
    I: Iterator<Item = CU>,
{
    fn pull(&mut self) -> ScanResult<Option<CU>> {
        Ok(self.iter.next())
    }
}

/// Adapts a `libc::FILE*`, reading one byte at a time via `fgetc` and
/// rewinding via `ungetc`. Locking matches the original: the lock is held
/// for the full scan call (spec §5), represented here by the caller
/// holding `&mut FileSource` for the duration.
pub struct FileSource {
    file: *mut libc::FILE,
}

impl FileSource {
    /// # Safety
    /// `file` must be a valid, open `FILE*` that outlives the returned
    /// `FileSource` and is not concurrently accessed elsewhere.
    pub unsafe fn new(file: *mut libc::FILE) -> Self {
        Self { file }
    }
}

impl UnitSource<u8> for FileSource {
    fn pull(&mut self) -> ScanResult<Option<u8>> {
        // SAFETY: `self.file` is a valid FILE* per the constructor's contract,
        // and the scan buffer serializes all access to it.
        let c = unsafe { libc::fgetc(self.file) };
        if c == libc::EOF {
            // SAFETY: ferror only reads the stream's error indicator.
            if unsafe { libc::ferror(self.file) } != 0 {
                return Err(Error::bad_source(0, "I/O error reading from FILE*"));
            }
            Ok(None)
        } else {
            Ok(Some(c as u8))
        }
    }

    fn sync_rewind(&mut self, units: &[u8]) -> ScanResult<()> {
        // Push back in reverse so a subsequent read order matches `units`.
        // Per the Open Question in spec §9: we only guarantee *some*
        // rewound bytes are readable again; platform ungetc chains
        // typically guarantee one byte, some guarantee more.
        for &b in units.iter().rev() {
            // SAFETY: self.file is valid; ungetc's return value is checked.
            let pushed = unsafe { libc::ungetc(b as libc::c_int, self.file) };
            if pushed == libc::EOF {
                break;
            }
        }
        Ok(())
    }
}

/// The process-wide standard-input buffer (spec §4.1, §6.3): lazily
/// initialized, lives until program termination, guarded by a mutex
/// acquired for the full scan call.
pub struct StdinSource {
    guard: std::sync::MutexGuard<'static, std::io::Stdin>,
}

static STDIN: OnceLock<Mutex<std::io::Stdin>> = OnceLock::new();

impl StdinSource {
    /// Acquires the process-wide stdin lock for the duration of a scan
    /// call. Recursive calls from within a reader are not supported
    /// (spec §5) and will deadlock, matching the original's documented
    /// restriction.
    pub fn lock() -> Self {
        let mutex = STDIN.get_or_init(|| Mutex::new(std::io::stdin()));
        let guard = mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Self { guard }
    }
}

impl UnitSource<u8> for StdinSource {
    fn pull(&mut self) -> ScanResult<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.guard.read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            Err(_) => Err(Error::bad_source(0, "I/O error reading from stdin")),
        }
    }
}

/// A type-erased source, used when the concrete adapter isn't known at
/// the call site (the `input`/`prompt` entry points, for instance).
pub struct ErasedSource<'s, CU> {
    inner: Box<dyn UnitSource<CU> + 's>,
}

impl<'s, CU> ErasedSource<'s, CU> {
    pub fn new(inner: impl UnitSource<CU> + 's) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl<'s, CU> UnitSource<CU> for ErasedSource<'s, CU> {
    fn pull(&mut self) -> ScanResult<Option<CU>> {
        self.inner.pull()
    }

    fn sync_rewind(&mut self, units: &[CU]) -> ScanResult<()> {
        self.inner.sync_rewind(units)
    }
}
