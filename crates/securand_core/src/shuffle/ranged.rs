//! Ranged Fisher–Yates shuffle with identity avoidance.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::request::{ShuffleRequest, ShuffleWindow};
use crate::entropy::{EntropySource, OsEntropy};
use crate::error::{RandomError, Result};
use crate::generator::BoundedGenerator;

/// Permutes a sub-range of a sequence, drawing every swap index from a
/// [`BoundedGenerator`].
///
/// # Examples
///
/// ```rust
/// use securand_core::{RangedShuffler, ShuffleRequest};
///
/// let mut shuffler = RangedShuffler::from_os().unwrap();
/// let mut letters = vec!['A', 'B', 'C', 'D', 'E'];
///
/// let shuffled = shuffler
///     .shuffle(&mut letters, &ShuffleRequest::new().range(1, 4))
///     .unwrap();
/// assert_eq!(shuffled[0], 'A');
/// assert_eq!(shuffled[4], 'E');
///
/// // The caller's sequence is untouched unless `in_place` is requested.
/// assert_eq!(letters, vec!['A', 'B', 'C', 'D', 'E']);
/// ```
#[derive(Debug)]
pub struct RangedShuffler<E: EntropySource = OsEntropy> {
    generator: BoundedGenerator<E>,
}

impl RangedShuffler<OsEntropy> {
    /// Shuffler over OS entropy with the default generator configuration.
    ///
    /// # Errors
    ///
    /// Returns `RandomError::Configuration` if OS entropy is unavailable.
    pub fn from_os() -> Result<Self> {
        Ok(Self::new(BoundedGenerator::from_os()?))
    }
}

impl<E: EntropySource> RangedShuffler<E> {
    /// Shuffler drawing its swap indices from `generator`.
    pub fn new(generator: BoundedGenerator<E>) -> Self {
        Self { generator }
    }

    /// Returns the underlying generator.
    #[inline]
    pub fn generator(&self) -> &BoundedGenerator<E> {
        &self.generator
    }

    /// Shuffles according to `request`, in place or into a copy.
    ///
    /// In-place requests permute `sequence` and borrow it back; otherwise the
    /// permutation is returned as an owned copy and `sequence` is unchanged.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the entropy source is unavailable
    /// - `Validation` for an out-of-bounds or inverted window, or a sequence
    ///   that cannot be snapshotted when `avoid_identical` is set
    pub fn shuffle<'a, T>(
        &mut self,
        sequence: &'a mut [T],
        request: &ShuffleRequest,
    ) -> Result<Cow<'a, [T]>>
    where
        T: Clone + Serialize,
    {
        if request.is_in_place() {
            self.shuffle_in_place(sequence, request)?;
            Ok(Cow::Borrowed(sequence))
        } else {
            self.shuffled(sequence, request).map(Cow::Owned)
        }
    }

    /// Returns a shuffled copy of `sequence`.
    pub fn shuffled<T>(&mut self, sequence: &[T], request: &ShuffleRequest) -> Result<Vec<T>>
    where
        T: Clone + Serialize,
    {
        let mut copy = sequence.to_vec();
        self.shuffle_in_place(&mut copy, request)?;
        Ok(copy)
    }

    /// Shuffles the window of `sequence` in place, whatever `request.is_in_place()` says.
    pub fn shuffle_in_place<T>(&mut self, sequence: &mut [T], request: &ShuffleRequest) -> Result<()>
    where
        T: Serialize,
    {
        self.generator.entropy().ensure_available()?;
        let window = request.window(sequence.len())?;

        // Captured for every identity-avoiding request, in-place or not.
        let original = if request.avoids_identical() {
            Some(snapshot(sequence)?)
        } else {
            None
        };

        if window.is_trivial() {
            return Ok(());
        }

        self.permute(sequence, window)?;

        if let Some(original) = original {
            if snapshot(sequence)? == original {
                debug!(
                    start = window.start,
                    end = window.end,
                    "shuffle reproduced its input; swapping window ends"
                );
                sequence.swap(window.start, window.end - 1);
            }
        }

        Ok(())
    }

    fn permute<T>(&mut self, sequence: &mut [T], window: ShuffleWindow) -> Result<()> {
        for i in (window.start + 1..window.end).rev() {
            let j = self.generator.generate_index(window.start, i)?;
            sequence.swap(i, j);
        }
        Ok(())
    }
}

/// Order-sensitive, value-based image of the whole sequence.
fn snapshot<T: Serialize>(sequence: &[T]) -> Result<Value> {
    serde_json::to_value(sequence).map_err(|e| {
        RandomError::validation(format!("sequence cannot be snapshotted: {}", e))
    })
}
