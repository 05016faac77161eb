//! One-call entry points over OS entropy.
//!
//! Each call checks the entropy source first, then validates parameters, then
//! runs a fresh generator with the default configuration. Nothing is shared
//! between calls.

use std::borrow::Cow;

use serde::Serialize;

use crate::entropy::OsEntropy;
use crate::error::Result;
use crate::generator::{BoundedGenerator, Number};
use crate::params::{NumberParams, ShuffleParams};
use crate::shuffle::RangedShuffler;

/// Generates one number satisfying `params`.
///
/// # Examples
///
/// ```rust
/// use securand_core::{generate_number, Exclusion, NumberParams};
///
/// let params = NumberParams {
///     exclusion: Some(Exclusion::Both),
///     ..NumberParams::new(1.0, 10.0)
/// };
/// let value = generate_number(&params).unwrap().as_f64();
/// assert!((2.0..=9.0).contains(&value));
/// ```
pub fn generate_number(params: &NumberParams) -> Result<Number> {
    let entropy = OsEntropy::new()?;
    let request = params.to_request()?;
    BoundedGenerator::new(entropy).generate(&request)
}

/// Shuffles `sequence` according to `params`.
///
/// Returns the borrowed, mutated sequence for in-place requests and an owned
/// shuffled copy otherwise.
///
/// # Examples
///
/// ```rust
/// use securand_core::{shuffle_sequence, ShuffleParams};
///
/// let mut items = vec![1, 2, 3, 4, 5];
/// let params = ShuffleParams {
///     range_start: Some(1),
///     range_end: Some(4),
///     ..ShuffleParams::default()
/// };
/// let shuffled = shuffle_sequence(&mut items, &params).unwrap();
/// assert_eq!((shuffled[0], shuffled[4]), (1, 5));
/// ```
pub fn shuffle_sequence<'a, T>(sequence: &'a mut [T], params: &ShuffleParams) -> Result<Cow<'a, [T]>>
where
    T: Clone + Serialize,
{
    let entropy = OsEntropy::new()?;
    let request = params.to_request()?;
    RangedShuffler::new(BoundedGenerator::new(entropy)).shuffle(sequence, &request)
}
