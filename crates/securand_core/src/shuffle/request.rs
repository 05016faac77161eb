//! Shuffle request and window resolution.

use crate::error::{RandomError, Result};

/// Options for one ranged shuffle.
///
/// The window defaults to the whole sequence; either end may be overridden.
///
/// # Examples
///
/// ```rust
/// use securand_core::ShuffleRequest;
///
/// let request = ShuffleRequest::new().range(1, 4).avoid_identical(true);
/// let window = request.window(5).unwrap();
/// assert_eq!((window.start, window.end), (1, 4));
///
/// assert!(ShuffleRequest::new().range(2, 9).window(5).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShuffleRequest {
    range_start: Option<usize>,
    range_end: Option<usize>,
    in_place: bool,
    avoid_identical: bool,
}

impl ShuffleRequest {
    /// Whole-sequence shuffle into a copy, identity allowed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the shuffle to `[start, end)`.
    #[must_use]
    pub fn range(mut self, start: usize, end: usize) -> Self {
        self.range_start = Some(start);
        self.range_end = Some(end);
        self
    }

    /// Sets the first shuffled index; the end keeps its default.
    #[must_use]
    pub fn range_start(mut self, start: usize) -> Self {
        self.range_start = Some(start);
        self
    }

    /// Sets the exclusive end index; the start keeps its default.
    #[must_use]
    pub fn range_end(mut self, end: usize) -> Self {
        self.range_end = Some(end);
        self
    }

    /// Mutate the caller's sequence instead of a copy.
    #[must_use]
    pub fn in_place(mut self, in_place: bool) -> Self {
        self.in_place = in_place;
        self
    }

    /// Guarantee that the result differs from the input.
    ///
    /// This removes the identity permutation from the outcome space, so the
    /// result is no longer uniform over all permutations.
    #[must_use]
    pub fn avoid_identical(mut self, avoid_identical: bool) -> Self {
        self.avoid_identical = avoid_identical;
        self
    }

    /// Whether the caller's sequence is mutated.
    #[inline]
    pub fn is_in_place(&self) -> bool {
        self.in_place
    }

    /// Whether the identity permutation is ruled out.
    #[inline]
    pub fn avoids_identical(&self) -> bool {
        self.avoid_identical
    }

    /// Resolves the window against a sequence of `len` elements.
    ///
    /// # Errors
    ///
    /// Returns `RandomError::Validation` unless `start <= end <= len`.
    pub fn window(&self, len: usize) -> Result<ShuffleWindow> {
        let start = self.range_start.unwrap_or(0);
        let end = self.range_end.unwrap_or(len);

        if end > len {
            return Err(RandomError::validation(format!(
                "range_end {} exceeds sequence length {}",
                end, len
            )));
        }
        if start > end {
            return Err(RandomError::validation(format!(
                "range_start {} exceeds range_end {}",
                start, end
            )));
        }

        Ok(ShuffleWindow { start, end })
    }
}

/// Resolved index window `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShuffleWindow {
    /// First shuffled index.
    pub start: usize,
    /// One past the last shuffled index.
    pub end: usize,
}

impl ShuffleWindow {
    /// Number of positions in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the window covers no positions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Windows of fewer than two elements have a single arrangement.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.len() < 2
    }
}
