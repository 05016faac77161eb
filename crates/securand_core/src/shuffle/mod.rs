//! # Ranged Permutation Engine
//!
//! Fisher–Yates over an index window `[range_start, range_end)` of a
//! sequence. Elements outside the window are never moved. Every swap index is
//! drawn through the [`BoundedGenerator`](crate::generator::BoundedGenerator),
//! so the shuffle inherits its exact uniformity.
//!
//! With `avoid_identical`, a snapshot of the whole sequence is taken before
//! shuffling; if the shuffle reproduces it, the first and last elements of the
//! window are swapped. That guarantee costs uniformity: the identity
//! permutation can no longer occur.

mod ranged;
mod request;

pub use ranged::RangedShuffler;
pub use request::{ShuffleRequest, ShuffleWindow};
