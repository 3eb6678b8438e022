//! Non-owning string views and the lazy, pipe-composable operators over them.
//!
//! A [`View`] is a half-open sub-range of an existing buffer, carried as an
//! explicit (buffer, start, end) triple so that position is observable: a
//! failed [`Search`] is an empty view *at the haystack's end*, not a missing
//! value. Operators work in two equivalent forms:
//!
//! ```
//! use fcgi_web::{Search, View};
//!
//! let haystack = View::new("abcde");
//!
//! let direct = Search::new("bcd").within(haystack);
//! let piped = haystack | Search::new("bcd");
//!
//! assert!(direct.strong_eq(&piped));
//! assert_eq!(direct, "bcd");
//! ```

use memchr::{memchr, memmem};
use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::BitOr,
};

/// A non-owning reference to a contiguous sub-range of a string buffer.
///
/// Never allocates, and the borrow checker guarantees it cannot outlive the
/// buffer it references. `==` compares content. [`strong_eq`](View::strong_eq) additionally compares
/// buffer identity and offsets, which is how the positional sentinels of
/// [`Search`] and [`Before`] are observed.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    buf: &'a str,
    start: usize,
    end: usize,
}

impl<'a> View<'a> {
    /// A view over the whole of `buf`.
    #[inline]
    pub fn new(buf: &'a str) -> Self {
        Self {
            buf,
            start: 0,
            end: buf.len(),
        }
    }

    /// A detached empty view. Content-equal to any empty view.
    #[inline]
    pub const fn empty() -> View<'static> {
        View {
            buf: "",
            start: 0,
            end: 0,
        }
    }

    /// The referenced text.
    #[inline]
    pub fn as_str(&self) -> &'a str {
        &self.buf[self.start..self.end]
    }

    /// Byte offset of the view's first position within its buffer.
    #[inline]
    pub const fn begin(&self) -> usize {
        self.start
    }

    /// Byte offset one past the view's last position within its buffer.
    #[inline]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the view spans no bytes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Content equality plus buffer identity plus position equality.
    ///
    /// Two empty views at different positions are `==` but not strongly
    /// equal.
    #[inline]
    pub fn strong_eq(&self, other: &View<'_>) -> bool {
        std::ptr::eq(self.buf, other.buf) && self.start == other.start && self.end == other.end
    }

    // Sub-view of the same buffer with absolute offsets.
    #[inline(always)]
    fn slice(&self, start: usize, end: usize) -> View<'a> {
        View {
            buf: self.buf,
            start,
            end,
        }
    }

    // Empty view pinned at this view's first position.
    #[inline(always)]
    fn collapsed_at_begin(&self) -> View<'a> {
        self.slice(self.start, self.start)
    }

    // Empty view pinned one past this view's last position.
    #[inline(always)]
    fn collapsed_at_end(&self) -> View<'a> {
        self.slice(self.end, self.end)
    }
}

impl PartialEq for View<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for View<'_> {}

impl PartialEq<str> for View<'_> {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for View<'_> {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Hash for View<'_> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> From<&'a str> for View<'a> {
    #[inline]
    fn from(buf: &'a str) -> Self {
        View::new(buf)
    }
}

// Content-consistent with the `Hash` and `Eq` impls above, so a map keyed by
// views can be queried with plain string slices.
impl std::borrow::Borrow<str> for View<'_> {
    #[inline]
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

// SPLIT

/// Delimiter-based lazy decomposition of a view.
///
/// Produces exactly `count(delimiter) + 1` segments, left to right, each
/// excluding the delimiter byte. Empty segments are produced, never skipped:
/// an empty source yields one empty segment, consecutive delimiters yield
/// empty segments between them. Applying the operator does not consume the
/// source, so a split can be restarted at will.
///
/// Only an ASCII delimiter can match. A non-ASCII byte is never a complete
/// character in UTF-8 text, so it delimits nothing and the whole source comes
/// back as a single segment; every produced view stays sliceable.
///
/// # Examples
/// ```
/// use fcgi_web::{SplitBy, View};
///
/// let segments: Vec<_> = (View::new("a=1&&b=2") | SplitBy(b'&')).collect();
///
/// assert_eq!(segments.len(), 3);
/// assert_eq!(segments[0], "a=1");
/// assert_eq!(segments[1], "");
/// assert_eq!(segments[2], "b=2");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SplitBy(pub u8);

impl SplitBy {
    /// Direct-call form of `view | SplitBy(..)`.
    #[inline]
    pub fn apply<'a>(self, source: View<'a>) -> Split<'a> {
        Split {
            source,
            cursor: source.start,
            delimiter: self.0,
            done: false,
        }
    }
}

/// Lazy iterator of [`SplitBy`] segments.
#[derive(Debug, Clone)]
pub struct Split<'a> {
    source: View<'a>,
    cursor: usize,
    delimiter: u8,
    done: bool,
}

impl<'a> Iterator for Split<'a> {
    type Item = View<'a>;

    fn next(&mut self) -> Option<View<'a>> {
        if self.done {
            return None;
        }

        let rest = &self.source.buf.as_bytes()[self.cursor..self.source.end];

        // A non-ASCII byte only occurs inside a multi-byte character, where a
        // segment boundary would land mid-character; such a delimiter never
        // matches.
        let found = if self.delimiter.is_ascii() {
            memchr(self.delimiter, rest)
        } else {
            None
        };

        match found {
            Some(pos) => {
                let segment = self.source.slice(self.cursor, self.cursor + pos);
                self.cursor += pos + 1;
                Some(segment)
            }
            None => {
                self.done = true;
                Some(self.source.slice(self.cursor, self.source.end))
            }
        }
    }
}

impl std::iter::FusedIterator for Split<'_> {}

// BUNDLE

/// Destructures the first `N` elements of a segment sequence into a fixed
/// array.
///
/// Missing trailing slots are filled with empty views, never an error.
/// Callers rely on this to tolerate a bare `key` with no `=`:
///
/// ```
/// use fcgi_web::{Bundle, SplitBy, View};
///
/// let [key, value] = View::new("debug") | SplitBy(b'=') | Bundle::<2>;
///
/// assert_eq!(key, "debug");
/// assert!(value.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Bundle<const N: usize>;

impl<const N: usize> Bundle<N> {
    /// Direct-call form of `segments | Bundle::<N>`.
    pub fn apply<'a, I>(self, segments: I) -> [View<'a>; N]
    where
        I: Iterator<Item = View<'a>>,
    {
        let mut bundle = [View::empty(); N];
        for (slot, segment) in bundle.iter_mut().zip(segments) {
            *slot = segment;
        }
        bundle
    }
}

// SEARCH

/// First occurrence of a needle inside a haystack, as a positioned view.
///
/// The result is always well defined; there is no error path:
/// - found: a view over the occurrence, inside the haystack;
/// - empty needle: an empty view at the haystack's *start*;
/// - not found: an empty view at the haystack's *end*, the observable
///   sentinel, tested via `result.begin() == haystack.end()`.
#[derive(Debug, Clone, Copy)]
pub struct Search<'n>(&'n str);

impl<'n> Search<'n> {
    #[inline]
    pub fn new(needle: &'n str) -> Self {
        Self(needle)
    }

    /// Direct-call form of `haystack | Search::new(..)`.
    pub fn within<'a>(self, haystack: View<'a>) -> View<'a> {
        if self.0.is_empty() {
            return haystack.collapsed_at_begin();
        }

        match memmem::find(haystack.as_str().as_bytes(), self.0.as_bytes()) {
            Some(pos) => {
                let start = haystack.start + pos;
                haystack.slice(start, start + self.0.len())
            }
            None => haystack.collapsed_at_end(),
        }
    }
}

// BEFORE

/// The prefix of a haystack up to (excluding) the first occurrence of a
/// needle.
///
/// Edge cases, preserved exactly for compatibility with existing call sites:
/// - needle absent: an *empty* view at the haystack's end, not the whole
///   haystack;
/// - empty needle: an empty view at the haystack's start;
/// - needle at position 0: an empty view at the haystack's start.
#[derive(Debug, Clone, Copy)]
pub struct Before<'n>(&'n str);

impl<'n> Before<'n> {
    #[inline]
    pub fn new(needle: &'n str) -> Self {
        Self(needle)
    }

    /// Direct-call form of `haystack | Before::new(..)`.
    pub fn apply<'a>(self, haystack: View<'a>) -> View<'a> {
        if self.0.is_empty() {
            return haystack.collapsed_at_begin();
        }

        match memmem::find(haystack.as_str().as_bytes(), self.0.as_bytes()) {
            Some(pos) => haystack.slice(haystack.start, haystack.start + pos),
            None => haystack.collapsed_at_end(),
        }
    }
}

// PIPE FORMS
//
// `input | Op(..)` is the same algorithm as the direct call, by construction.

impl<'a> BitOr<SplitBy> for View<'a> {
    type Output = Split<'a>;

    #[inline]
    fn bitor(self, op: SplitBy) -> Split<'a> {
        op.apply(self)
    }
}

impl<'a> BitOr<SplitBy> for &'a str {
    type Output = Split<'a>;

    #[inline]
    fn bitor(self, op: SplitBy) -> Split<'a> {
        op.apply(View::new(self))
    }
}

impl<'a, const N: usize> BitOr<Bundle<N>> for Split<'a> {
    type Output = [View<'a>; N];

    #[inline]
    fn bitor(self, op: Bundle<N>) -> [View<'a>; N] {
        op.apply(self)
    }
}

impl<'a, 'n> BitOr<Search<'n>> for View<'a> {
    type Output = View<'a>;

    #[inline]
    fn bitor(self, op: Search<'n>) -> View<'a> {
        op.within(self)
    }
}

impl<'a, 'n> BitOr<Search<'n>> for &'a str {
    type Output = View<'a>;

    #[inline]
    fn bitor(self, op: Search<'n>) -> View<'a> {
        op.within(View::new(self))
    }
}

impl<'a, 'n> BitOr<Before<'n>> for View<'a> {
    type Output = View<'a>;

    #[inline]
    fn bitor(self, op: Before<'n>) -> View<'a> {
        op.apply(self)
    }
}

impl<'a, 'n> BitOr<Before<'n>> for &'a str {
    type Output = View<'a>;

    #[inline]
    fn bitor(self, op: Before<'n>) -> View<'a> {
        op.apply(View::new(self))
    }
}
