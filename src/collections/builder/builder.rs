use std::cmp;
use std::fmt::{self, Debug, Display, Formatter, Write};
use std::ops::{Deref, Index};
use std::string::FromUtf8Error;

use crate::collections::view::StringView;
pub use crate::util::error::{AllocationFailure, IndexOutOfBounds};
use crate::util::result::ResultExtension;

/// The capacity used by [`StringBuilder::new`].
pub const DEFAULT_BUILDER_CAP: usize = 256;

const MIN_CAP: usize = 2;
const MAX_CAP: usize = isize::MAX as usize;

const GROWTH_FACTOR: usize = 2;

/// A growable buffer of bytes for building up strings one piece at a time.
///
/// Unlike [`String`], the capacity is tracked exactly: it only changes when the builder grows by
/// its scaler, when an element is removed (which shrinks it to the length) or when
/// [`fit`](StringBuilder::fit) is called. All growth is fallible and reported through
/// [`AllocationFailure`] rather than aborting.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of bytes in the builder.
/// - `i`: The index of the byte in question.
/// - `m`: The number of bytes being added.
///
/// | Method | Complexity |
/// |-|-|
/// | `at` | `O(1)` |
/// | `append` | `O(1)`*, `O(n)` |
/// | `extend` | `O(m)`*, `O(n+m)` |
/// | `combine` | `O(m)`*, `O(n+m)` |
/// | `remove` | `O(n)`** |
/// | `data` | `O(1)`*, `O(n)` |
/// | `fit` | `O(n)` |
///
/// \* If the builder doesn't have enough capacity, the storage is reallocated in `O(n)`.
///
/// \** Removal shifts the following `n-i` bytes and then shrinks the storage to fit, which copies
/// the remaining bytes. There is no amortization, so repeated removals are quadratic.
pub struct StringBuilder {
    // Holds `len` bytes, plus the terminator while `terminated` is set.
    items: Vec<u8>,
    len: usize,
    cap: usize,
    scaler: usize,
    terminated: bool,
}

impl StringBuilder {
    /// Creates a new, empty builder with a capacity of [`DEFAULT_BUILDER_CAP`].
    ///
    /// # Panics
    /// Panics if the initial storage can't be allocated.
    pub fn new() -> StringBuilder {
        StringBuilder::with_cap(DEFAULT_BUILDER_CAP)
    }

    /// Creates a new, empty builder with capacity exactly equal to `cap`.
    ///
    /// # Panics
    /// Panics if the initial storage can't be allocated. Use
    /// [`try_with_cap`](StringBuilder::try_with_cap) to handle this instead.
    ///
    /// # Examples
    /// ```
    /// # use scratch_lib::collections::builder::StringBuilder;
    /// let mut sb = StringBuilder::with_cap(4);
    /// sb.extend(b"four").unwrap();
    /// assert_eq!(sb.cap(), 4);
    /// sb.append(b'!').unwrap();
    /// assert_eq!(sb.cap(), 8);
    /// ```
    pub fn with_cap(cap: usize) -> StringBuilder {
        StringBuilder::try_with_cap(cap).throw()
    }

    /// Creates a new, empty builder with capacity exactly equal to `cap`.
    ///
    /// # Errors
    /// Returns [`AllocationFailure`] if the storage can't be allocated.
    pub fn try_with_cap(cap: usize) -> Result<StringBuilder, AllocationFailure> {
        let mut items = Vec::new();
        items.try_reserve_exact(cap).map_err(|_| AllocationFailure { requested: cap })?;

        Ok(StringBuilder {
            items,
            len: 0,
            cap,
            scaler: GROWTH_FACTOR,
            terminated: false,
        })
    }

    /// Returns the number of bytes in the builder, not counting any terminator added by
    /// [`data`](StringBuilder::data).
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the builder contains no bytes.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the builder.
    pub const fn cap(&self) -> usize {
        self.cap
    }

    /// Returns the factor that the capacity is multiplied by when the builder runs out of space.
    pub const fn scaler(&self) -> usize {
        self.scaler
    }

    /// Sets the factor that the capacity is multiplied by when the builder runs out of space.
    /// Factors below 2 wouldn't grow the builder, so they are raised to 2.
    pub fn set_scaler(&mut self, scaler: usize) {
        self.scaler = cmp::max(scaler, GROWTH_FACTOR);
    }

    /// Appends a single byte, growing the builder by its scaler if it is full.
    ///
    /// # Errors
    /// Returns [`AllocationFailure`] if the builder needed to grow and couldn't. The contents are
    /// left unchanged.
    ///
    /// # Examples
    /// ```
    /// # use scratch_lib::collections::builder::StringBuilder;
    /// let mut sb = StringBuilder::new();
    /// for b in b"abc" {
    ///     sb.append(*b).unwrap();
    /// }
    /// assert_eq!(&*sb, b"abc");
    /// ```
    pub fn append(&mut self, value: u8) -> Result<(), AllocationFailure> {
        self.unterminate();

        if self.len == self.cap {
            self.resize_by(self.scaler)?;
        }

        self.items.push(value);
        self.len += 1;
        Ok(())
    }

    /// Appends every byte of `values` in order.
    ///
    /// # Errors
    /// Returns [`AllocationFailure`] if the builder needed to grow and couldn't. Bytes appended
    /// before the failure remain in the builder, so a failed extend can leave a prefix of `values`
    /// behind.
    pub fn extend(&mut self, values: &[u8]) -> Result<(), AllocationFailure> {
        for value in values {
            self.append(*value)?;
        }
        Ok(())
    }

    /// Appends the UTF-8 bytes of `value`, with the same semantics as
    /// [`extend`](StringBuilder::extend).
    pub fn extend_str(&mut self, value: &str) -> Result<(), AllocationFailure> {
        self.extend(value.as_bytes())
    }

    /// Appends every byte of `source` onto the end of this builder.
    ///
    /// # Errors
    /// Returns [`AllocationFailure`] under the same conditions as [`extend`](StringBuilder::extend).
    pub fn combine(&mut self, source: &StringBuilder) -> Result<(), AllocationFailure> {
        self.extend(source.as_bytes())
    }

    /// Returns a reference to the byte at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn at(&self, index: usize) -> Result<&u8, IndexOutOfBounds> {
        self.check_index(index)?;
        Ok(&self.items[index])
    }

    /// Returns a mutable reference to the byte at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut u8, IndexOutOfBounds> {
        self.check_index(index)?;
        Ok(&mut self.items[index])
    }

    /// Returns the contents of the builder followed by a single `\0` byte, for handing to code
    /// that expects a terminated string.
    ///
    /// The terminator is stored after the contents and isn't counted by
    /// [`len`](StringBuilder::len). Calling this again without modifying the builder in between
    /// returns the same bytes without adding a second terminator.
    ///
    /// # Errors
    /// Returns [`AllocationFailure`] if there was no room for the terminator and the builder
    /// couldn't grow.
    ///
    /// # Examples
    /// ```
    /// # use scratch_lib::collections::builder::StringBuilder;
    /// let mut sb = StringBuilder::with_cap(2);
    /// sb.extend(b"hi").unwrap();
    /// assert_eq!(sb.data().unwrap(), b"hi\0");
    /// assert_eq!(sb.data().unwrap(), b"hi\0");
    /// assert_eq!(sb.len(), 2);
    /// ```
    pub fn data(&mut self) -> Result<&[u8], AllocationFailure> {
        if !self.terminated {
            if self.len == self.cap {
                self.resize_by(self.scaler)?;
            }
            self.items.push(b'\0');
            self.terminated = true;
        }
        Ok(&self.items[..=self.len])
    }

    /// Removes the byte at `index`, moving all following bytes to fill the gap, and then shrinks
    /// the capacity to the new length.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if the builder is empty or `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use scratch_lib::collections::builder::StringBuilder;
    /// let mut sb: StringBuilder = "hello".bytes().collect();
    /// assert_eq!(sb.remove(1), Ok(b'e'));
    /// assert_eq!(&*sb, b"hllo");
    /// assert_eq!(sb.cap(), 4);
    /// assert!(sb.remove(4).is_err());
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<u8, IndexOutOfBounds> {
        self.check_index(index)?;
        self.unterminate();

        let value = self.items.remove(index);
        self.len -= 1;
        self.shrink();
        Ok(value)
    }

    /// Shrinks the capacity of the builder to its length.
    pub fn fit(&mut self) {
        self.unterminate();
        self.shrink();
    }

    /// Grows the capacity of the builder to `cap * scaler`, or to a minimum of 2 for an empty
    /// builder. Scalers below 2 are raised to 2.
    ///
    /// # Errors
    /// Returns [`AllocationFailure`] if the new capacity overflows or can't be allocated.
    pub fn resize_by(&mut self, scaler: usize) -> Result<(), AllocationFailure> {
        let scaler = cmp::max(scaler, GROWTH_FACTOR);
        let new_cap = cmp::max(
            self.cap.checked_mul(scaler).ok_or(AllocationFailure { requested: MAX_CAP })?,
            MIN_CAP,
        );

        if new_cap > MAX_CAP {
            Err(AllocationFailure { requested: new_cap })?
        }

        self.items
            .try_reserve_exact(new_cap - self.items.len())
            .map_err(|_| AllocationFailure { requested: new_cap })?;

        debug!("string builder grew from {} to {}", self.cap, new_cap);
        self.cap = new_cap;
        Ok(())
    }

    /// Doubles the capacity of the builder.
    ///
    /// # Errors
    /// Returns [`AllocationFailure`] if the new capacity overflows or can't be allocated.
    pub fn resize(&mut self) -> Result<(), AllocationFailure> {
        self.resize_by(GROWTH_FACTOR)
    }

    /// Returns the bytes in the builder, excluding any terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.items[..self.len]
    }

    /// Returns a borrowed view over the bytes in the builder.
    pub fn as_view(&self) -> StringView<'_> {
        StringView::new(self.as_bytes())
    }

    /// Drops the terminator added by [`data`](StringBuilder::data) before a modification.
    fn unterminate(&mut self) {
        if self.terminated {
            self.items.truncate(self.len);
            self.terminated = false;
        }
    }

    fn shrink(&mut self) {
        self.items.shrink_to(self.len);
        if self.cap != self.len {
            trace!("string builder shrank from {} to {}", self.cap, self.len);
        }
        self.cap = self.len;
    }

    /// Checks that the provided index refers to a byte in the builder.
    fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index >= self.len {
            Err(IndexOutOfBounds {
                index,
                len: self.len,
            })?
        }
        Ok(())
    }
}

impl Default for StringBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for StringBuilder {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for StringBuilder {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Index<usize> for StringBuilder {
    type Output = u8;

    /// # Panics
    /// Panics if `index` is out of bounds.
    fn index(&self, index: usize) -> &Self::Output {
        self.at(index).throw()
    }
}

impl Write for StringBuilder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.extend_str(s).map_err(|_| fmt::Error)
    }
}

impl FromIterator<u8> for StringBuilder {
    /// # Panics
    /// Panics if the builder can't grow to hold every item.
    fn from_iter<I: IntoIterator<Item = u8>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut sb = StringBuilder::with_cap(iter.size_hint().0);

        for item in iter {
            sb.append(item).throw();
        }

        sb
    }
}

impl From<&str> for StringBuilder {
    /// # Panics
    /// Panics if the storage can't be allocated.
    fn from(value: &str) -> Self {
        value.bytes().collect()
    }
}

impl TryFrom<StringBuilder> for String {
    type Error = FromUtf8Error;

    fn try_from(mut value: StringBuilder) -> Result<Self, Self::Error> {
        value.unterminate();
        String::from_utf8(value.items)
    }
}

impl Clone for StringBuilder {
    fn clone(&self) -> Self {
        let mut items = Vec::with_capacity(self.cap);
        items.extend_from_slice(self.as_bytes());

        StringBuilder {
            items,
            len: self.len,
            cap: self.cap,
            scaler: self.scaler,
            terminated: false,
        }
    }
}

impl PartialEq for StringBuilder {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for StringBuilder {}

impl Debug for StringBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringBuilder")
            .field("contents", &String::from_utf8_lossy(self.as_bytes()))
            .field("len", &self.len)
            .field("cap", &self.cap)
            .finish()
    }
}

impl Display for StringBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&String::from_utf8_lossy(self.as_bytes()), f)
    }
}
