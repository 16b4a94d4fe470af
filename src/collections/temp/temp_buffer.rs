use std::fmt::{self, Arguments, Debug, Formatter, Write};
use std::str;

use super::{Exhausted, FormatError, TempError};

/// The capacity used by [`TempBuffer::new`].
pub const DEFAULT_TEMP_CAPACITY: usize = 5 * 1024;

/// A position within a [`TempBuffer`], obtained from [`TempBuffer::save`] and consumed by
/// [`TempBuffer::rewind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// The buffer offset that this checkpoint refers to.
    pub const fn offset(&self) -> usize {
        self.0
    }
}

/// A fixed-capacity scratch arena for short-lived byte and string allocations.
///
/// Allocation bumps a cursor through a single boxed slice and never grows it. Nothing is freed
/// individually; instead the cursor is moved back with [`rewind`](TempBuffer::rewind) or
/// [`reset`](TempBuffer::reset), which reclaims everything allocated since. Every allocation
/// borrows the buffer mutably, so the borrow checker rules out holding on to a slice across a
/// rewind.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `allocate` | `O(1)` |
/// | `duplicate` | `O(n)` |
/// | `format` | `O(n)`* |
/// | `save` | `O(1)` |
/// | `rewind` | `O(1)` |
///
/// \* Formatting runs the arguments twice: once to measure, once to write.
///
/// # Examples
/// ```
/// # use scratch_lib::collections::temp::TempBuffer;
/// let mut buf = TempBuffer::with_cap(64);
/// let start = buf.save();
/// let path = buf.format(format_args!("{}/{}", "usr", "lib")).unwrap();
/// assert_eq!(path, "usr/lib");
/// buf.rewind(start);
/// assert_eq!(buf.cursor(), 0);
/// ```
pub struct TempBuffer {
    storage: Box<[u8]>,
    cursor: usize,
}

impl TempBuffer {
    /// Creates a new, empty buffer with [`DEFAULT_TEMP_CAPACITY`] bytes of space.
    pub fn new() -> TempBuffer {
        TempBuffer::with_cap(DEFAULT_TEMP_CAPACITY)
    }

    /// Creates a new, empty buffer with exactly `cap` bytes of space. The capacity never changes
    /// afterwards.
    pub fn with_cap(cap: usize) -> TempBuffer {
        TempBuffer {
            storage: vec![0_u8; cap].into_boxed_slice(),
            cursor: 0,
        }
    }

    /// Returns the total capacity of the buffer in bytes.
    pub fn cap(&self) -> usize {
        self.storage.len()
    }

    /// Returns the offset of the next allocation.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the number of bytes that can still be allocated.
    pub fn remaining(&self) -> usize {
        self.cap() - self.cursor
    }

    /// Allocates `size` contiguous bytes starting at the current cursor and advances the cursor
    /// past them. The returned bytes hold whatever was last written there.
    ///
    /// # Errors
    /// Returns [`Exhausted`] if fewer than `size` bytes remain, in which case the cursor is left
    /// where it was.
    ///
    /// # Examples
    /// ```
    /// # use scratch_lib::collections::temp::TempBuffer;
    /// let mut buf = TempBuffer::with_cap(8);
    /// buf.allocate(6).unwrap().fill(b'x');
    /// assert!(buf.allocate(3).is_err());
    /// assert_eq!(buf.cursor(), 6);
    /// ```
    pub fn allocate(&mut self, size: usize) -> Result<&mut [u8], Exhausted> {
        let start = self.cursor;
        let end = self.reserve(size)?;
        Ok(&mut self.storage[start..end])
    }

    /// Copies `value` into the buffer followed by a `\0` terminator, returning the copy (without
    /// the terminator).
    ///
    /// # Errors
    /// Returns [`Exhausted`] if `value.len() + 1` bytes aren't available.
    pub fn duplicate(&mut self, value: &str) -> Result<&str, Exhausted> {
        let len = value.len();
        let start = self.cursor;
        let size = len.checked_add(1).ok_or(Exhausted {
            requested: usize::MAX,
            remaining: self.remaining(),
        })?;
        self.reserve(size)?;

        self.storage[start..start + len].copy_from_slice(value.as_bytes());
        self.storage[start + len] = b'\0';

        Ok(self.text_at(start, len))
    }

    /// Formats `args` into the buffer followed by a `\0` terminator. The exact length is measured
    /// first so that exactly `len + 1` bytes are allocated. Use [`temp_format!`] for `format!`-like
    /// syntax.
    ///
    /// # Errors
    /// - [`Exhausted`] if the formatted text and its terminator don't fit.
    /// - [`FormatError`] if a formatting implementation fails, or writes a different length on the
    ///   second pass. The allocation is rolled back in this case.
    ///
    /// [`temp_format!`]: crate::temp_format
    pub fn format(&mut self, args: Arguments<'_>) -> Result<&str, TempError> {
        let mut counter = LengthCounter(0);
        counter.write_fmt(args).map_err(|_| FormatError)?;
        let len = counter.0;

        let start = self.cursor;
        let size = len.checked_add(1).ok_or(Exhausted {
            requested: usize::MAX,
            remaining: self.remaining(),
        })?;
        self.reserve(size)?;

        let mut writer = SliceWriter {
            target: &mut self.storage[start..start + len],
            written: 0,
        };
        if writer.write_fmt(args).is_err() || writer.written != len {
            trace!("format pass mismatch at offset {}, rolling back", start);
            self.cursor = start;
            Err(FormatError)?
        }
        self.storage[start + len] = b'\0';

        Ok(self.text_at(start, len))
    }

    /// Records the current cursor so that later allocations can be discarded together.
    pub const fn save(&self) -> Checkpoint {
        Checkpoint(self.cursor)
    }

    /// Moves the cursor back to `checkpoint`, logically freeing every allocation made after it was
    /// taken. A checkpoint from a different, larger buffer is clamped to this buffer's capacity.
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        trace!("rewinding temp buffer from {} to {}", self.cursor, checkpoint.0);
        self.cursor = checkpoint.0.min(self.cap());
    }

    /// Discards every allocation, equivalent to rewinding to offset 0.
    pub fn reset(&mut self) {
        self.rewind(Checkpoint(0));
    }

    /// Advances the cursor by `size`, returning the new cursor.
    fn reserve(&mut self, size: usize) -> Result<usize, Exhausted> {
        match self.cursor.checked_add(size) {
            Some(end) if end <= self.cap() => {
                self.cursor = end;
                Ok(end)
            },
            _ => {
                debug!("temp buffer exhausted: {} requested, {} remaining", size, self.remaining());
                Err(Exhausted {
                    requested: size,
                    remaining: self.remaining(),
                })
            },
        }
    }

    /// Reinterprets a range that was just written from a `&str` as a `&str` again.
    fn text_at(&self, start: usize, len: usize) -> &str {
        // Only ever called on bytes copied from valid UTF-8.
        str::from_utf8(&self.storage[start..start + len]).unwrap_or_default()
    }
}

impl Default for TempBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for TempBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TempBuffer")
            .field("cursor", &self.cursor)
            .field("cap", &self.cap())
            .finish()
    }
}

/// Formats into a [`TempBuffer`] using the syntax of [`format!`].
///
/// # Examples
/// ```
/// # use scratch_lib::{temp_format, collections::temp::TempBuffer};
/// let mut buf = TempBuffer::new();
/// assert_eq!(temp_format!(buf, "{}-{}", 4, 2).unwrap(), "4-2");
/// ```
#[macro_export]
macro_rules! temp_format {
    ($buf:expr, $($arg:tt)*) => {
        $buf.format(::std::format_args!($($arg)*))
    };
}

struct LengthCounter(usize);

impl Write for LengthCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 = self.0.checked_add(s.len()).ok_or(fmt::Error)?;
        Ok(())
    }
}

struct SliceWriter<'a> {
    target: &'a mut [u8],
    written: usize,
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.written.checked_add(s.len()).ok_or(fmt::Error)?;
        let dest = self.target.get_mut(self.written..end).ok_or(fmt::Error)?;
        dest.copy_from_slice(s.as_bytes());
        self.written = end;
        Ok(())
    }
}
