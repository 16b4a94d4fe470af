use std::fmt::{self, Debug, Display, Formatter};

/// A borrowed, non-owning view over a sequence of bytes, usually text.
///
/// All operations produce new views into the same underlying bytes, so nothing is copied. Bytes
/// aren't required to be valid UTF-8; [`Display`] is lossy.
///
/// # Examples
/// ```
/// # use scratch_lib::collections::view::StringView;
/// let mut line = StringView::from("  key = value  ").trim();
/// let key = line.chop_by_delimiter(b'=').trim();
/// assert_eq!(key, "key");
/// assert_eq!(line.trim(), "value");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StringView<'a> {
    data: &'a [u8],
}

impl<'a> StringView<'a> {
    /// Creates a view over `data`.
    pub const fn new(data: &'a [u8]) -> StringView<'a> {
        StringView { data }
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub const fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Returns a view without any leading ASCII whitespace.
    pub fn trim_left(&self) -> StringView<'a> {
        let start = self
            .data
            .iter()
            .position(|b| !is_space(*b))
            .unwrap_or(self.data.len());
        StringView::new(&self.data[start..])
    }

    /// Returns a view without any trailing ASCII whitespace.
    pub fn trim_right(&self) -> StringView<'a> {
        let end = self
            .data
            .iter()
            .rposition(|b| !is_space(*b))
            .map_or(0, |i| i + 1);
        StringView::new(&self.data[..end])
    }

    /// Returns a view without leading or trailing ASCII whitespace.
    pub fn trim(&self) -> StringView<'a> {
        self.trim_left().trim_right()
    }

    /// Splits off and returns everything before the first `delimiter`, advancing this view past
    /// the delimiter. If the delimiter doesn't occur, the whole view is returned and this view
    /// becomes empty.
    ///
    /// # Examples
    /// ```
    /// # use scratch_lib::collections::view::StringView;
    /// let mut path = StringView::from("usr/local/bin");
    /// assert_eq!(path.chop_by_delimiter(b'/'), "usr");
    /// assert_eq!(path.chop_by_delimiter(b'/'), "local");
    /// assert_eq!(path.chop_by_delimiter(b'/'), "bin");
    /// assert!(path.is_empty());
    /// ```
    pub fn chop_by_delimiter(&mut self, delimiter: u8) -> StringView<'a> {
        match self.find_first_of(delimiter) {
            Some(i) => {
                let chunk = StringView::new(&self.data[..i]);
                self.data = &self.data[i + 1..];
                chunk
            },
            None => {
                let chunk = *self;
                self.data = &self.data[self.data.len()..];
                chunk
            },
        }
    }

    /// Returns the index of the first occurrence of `value`.
    pub fn find_first_of(&self, value: u8) -> Option<usize> {
        self.data.iter().position(|b| *b == value)
    }

    /// Returns the index of the last occurrence of `value`.
    pub fn find_last_of(&self, value: u8) -> Option<usize> {
        self.data.iter().rposition(|b| *b == value)
    }

    pub fn starts_with<P: AsRef<[u8]>>(&self, prefix: P) -> bool {
        self.data.starts_with(prefix.as_ref())
    }

    pub fn ends_with<P: AsRef<[u8]>>(&self, suffix: P) -> bool {
        self.data.ends_with(suffix.as_ref())
    }
}

// Matches C's `isspace` in the default locale, which also counts vertical tab.
const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

impl<'a> From<&'a str> for StringView<'a> {
    fn from(value: &'a str) -> Self {
        StringView::new(value.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for StringView<'a> {
    fn from(value: &'a [u8]) -> Self {
        StringView::new(value)
    }
}

impl AsRef<[u8]> for StringView<'_> {
    fn as_ref(&self) -> &[u8] {
        self.data
    }
}

impl PartialEq<str> for StringView<'_> {
    fn eq(&self, other: &str) -> bool {
        self.data == other.as_bytes()
    }
}

impl PartialEq<&str> for StringView<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.data == other.as_bytes()
    }
}

impl Debug for StringView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.data))
    }
}

impl Display for StringView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&String::from_utf8_lossy(self.data), f)
    }
}
