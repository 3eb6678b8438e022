//! Lazy integer range pipeline: [`Range`], [`Reverse`], [`Drop`], [`Take`].
//!
//! Shares the pipe convention of the [view pipeline](crate::seq::view): every
//! stage composes via `|`, in any order, and each stage is O(1) arithmetic on
//! the range bounds — nothing is materialized until the final stage is pulled
//! through the standard iterator protocol.
//!
//! ```
//! use fcgi_web::{Drop, Range, Reverse, Take};
//!
//! let pipeline = Range::new(3, 20) | Drop(2) | Reverse | Take(3);
//!
//! assert_eq!(pipeline.collect::<Vec<_>>(), [19, 18, 17]);
//! ```

use std::ops::BitOr;

/// A half-open integer interval `[start, stop)` with a direction flag.
///
/// Produces a lazy, possibly reversed, possibly truncated sequence of
/// integers. Empty when `start >= stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    start: i64,
    stop: i64,
    descending: bool,
}

impl Range {
    /// The ascending sequence `start, start + 1, ..., stop - 1`.
    #[inline]
    pub fn new(start: i64, stop: i64) -> Self {
        Self {
            start,
            stop: stop.max(start),
            descending: false,
        }
    }

    /// The ascending sequence `0, 1, ..., stop - 1`.
    #[inline]
    pub fn to(stop: i64) -> Self {
        Self::new(0, stop)
    }

    /// Remaining element count.
    #[inline]
    pub fn len(&self) -> usize {
        // `stop >= start` always holds, but the unsigned difference can
        // exceed `i64::MAX` for bounds near the type limits.
        self.stop.wrapping_sub(self.start) as u64 as usize
    }

    /// Returns `true` if no elements remain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.stop
    }
}

impl Iterator for Range {
    type Item = i64;

    #[inline]
    fn next(&mut self) -> Option<i64> {
        if self.start >= self.stop {
            return None;
        }

        if self.descending {
            self.stop -= 1;
            Some(self.stop)
        } else {
            let next = self.start;
            self.start += 1;
            Some(next)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Range {
    #[inline]
    fn next_back(&mut self) -> Option<i64> {
        if self.start >= self.stop {
            return None;
        }

        if self.descending {
            let next = self.start;
            self.start += 1;
            Some(next)
        } else {
            self.stop -= 1;
            Some(self.stop)
        }
    }
}

impl ExactSizeIterator for Range {}
impl std::iter::FusedIterator for Range {}

/// Direction flip; `| Reverse | Reverse` is the identity.
#[derive(Debug, Clone, Copy)]
pub struct Reverse;

/// Skips the first `n` elements, or all of them if fewer exist.
#[derive(Debug, Clone, Copy)]
pub struct Drop(pub usize);

/// Yields at most the first `n` elements.
#[derive(Debug, Clone, Copy)]
pub struct Take(pub usize);

// `n` counts elements; clamp before mixing it into bound arithmetic.
#[inline(always)]
fn as_count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

impl BitOr<Reverse> for Range {
    type Output = Range;

    #[inline]
    fn bitor(mut self, _: Reverse) -> Range {
        self.descending = !self.descending;
        self
    }
}

impl BitOr<Drop> for Range {
    type Output = Range;

    #[inline]
    fn bitor(mut self, Drop(n): Drop) -> Range {
        let n = as_count(n);

        if self.descending {
            self.stop = (self.stop.saturating_sub(n)).max(self.start);
        } else {
            self.start = (self.start.saturating_add(n)).min(self.stop);
        }
        self
    }
}

impl BitOr<Take> for Range {
    type Output = Range;

    #[inline]
    fn bitor(mut self, Take(n): Take) -> Range {
        let n = as_count(n);

        if self.descending {
            self.start = (self.stop.saturating_sub(n)).max(self.start);
        } else {
            self.stop = (self.start.saturating_add(n)).min(self.stop);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending() {
        assert_eq!(
            Range::to(10).collect::<Vec<_>>(),
            [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]
        );
    }

    #[test]
    fn reversed() {
        assert_eq!(
            (Range::new(1, 10) | Reverse).collect::<Vec<_>>(),
            [9, 8, 7, 6, 5, 4, 3, 2, 1]
        );
    }

    #[test]
    fn double_reverse_is_identity() {
        let range = Range::new(3, 8);

        assert_eq!(range | Reverse | Reverse, range);
    }

    #[test]
    fn empty_when_start_not_below_stop() {
        assert_eq!(Range::new(5, 5).count(), 0);
        assert_eq!(Range::new(7, 3).count(), 0);
        assert_eq!((Range::new(7, 3) | Reverse).count(), 0);
    }

    #[test]
    fn drop_skips_front() {
        assert_eq!((Range::to(5) | Drop(2)).collect::<Vec<_>>(), [2, 3, 4]);
        assert_eq!(
            (Range::to(5) | Reverse | Drop(2)).collect::<Vec<_>>(),
            [2, 1, 0]
        );
    }

    #[test]
    fn drop_saturates() {
        assert_eq!((Range::to(3) | Drop(10)).count(), 0);
        assert_eq!((Range::to(3) | Reverse | Drop(10)).count(), 0);
    }

    #[test]
    fn take_truncates() {
        assert_eq!((Range::to(10) | Take(3)).collect::<Vec<_>>(), [0, 1, 2]);
        assert_eq!(
            (Range::to(10) | Reverse | Take(3)).collect::<Vec<_>>(),
            [9, 8, 7]
        );
    }

    #[test]
    fn take_saturates() {
        assert_eq!((Range::to(3) | Take(10)).count(), 3);
    }

    #[test]
    fn len_spans_extreme_bounds() {
        assert_eq!(Range::new(i64::MIN, 1).len(), (1u64 << 63) as usize + 1);
        assert_eq!(Range::new(i64::MIN, i64::MAX).len(), usize::MAX);
        assert!(!Range::new(i64::MIN, 1).is_empty());
    }

    #[test]
    fn negative_bounds() {
        assert_eq!(Range::new(-3, 2).collect::<Vec<_>>(), [-3, -2, -1, 0, 1]);
    }

    // Long composition pinned to its literal output; stage order matters.
    #[test]
    fn golden_pipeline() {
        let pipeline = Range::new(3, 20)
            | Drop(2)
            | Reverse
            | Drop(3)
            | Reverse
            | Take(5)
            | Reverse;

        assert_eq!(pipeline.collect::<Vec<_>>(), [9, 8, 7, 6, 5]);
    }

    #[test]
    fn pull_based_consumption() {
        let mut pipeline = Range::new(0, i64::MAX) | Take(2);

        assert_eq!(pipeline.next(), Some(0));
        assert_eq!(pipeline.next(), Some(1));
        assert_eq!(pipeline.next(), None);
    }
}
