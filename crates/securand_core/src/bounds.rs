//! Bound normalisation helpers shared by the generator and the shuffler.
//!
//! Callers may supply bounds in either order; everything downstream works on
//! [`NormalizedBounds`], where `min <= max` always holds. Integer generation
//! further narrows the bounds by the requested [`Exclusion`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RandomError, Result};

/// Largest integer magnitude an `f64` bound can carry without losing precision
/// (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Which endpoints of the range are excluded from the result set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exclusion {
    /// Both endpoints are valid results.
    #[default]
    None,
    /// The lesser endpoint is excluded.
    Lower,
    /// The greater endpoint is excluded.
    Upper,
    /// Both endpoints are excluded.
    Both,
}

impl Exclusion {
    /// Builds the exclusion mode from two independent flags.
    pub fn from_flags(lower: bool, upper: bool) -> Self {
        match (lower, upper) {
            (false, false) => Exclusion::None,
            (true, false) => Exclusion::Lower,
            (false, true) => Exclusion::Upper,
            (true, true) => Exclusion::Both,
        }
    }

    /// Returns true when the lesser endpoint is excluded.
    #[inline]
    pub fn excludes_lower(&self) -> bool {
        matches!(self, Exclusion::Lower | Exclusion::Both)
    }

    /// Returns true when the greater endpoint is excluded.
    #[inline]
    pub fn excludes_upper(&self) -> bool {
        matches!(self, Exclusion::Upper | Exclusion::Both)
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Exclusion::None => "none",
            Exclusion::Lower => "lower",
            Exclusion::Upper => "upper",
            Exclusion::Both => "both",
        }
    }
}

impl FromStr for Exclusion {
    type Err = RandomError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Exclusion::None),
            "lower" | "min" => Ok(Exclusion::Lower),
            "upper" | "max" => Ok(Exclusion::Upper),
            "both" => Ok(Exclusion::Both),
            other => Err(RandomError::validation(format!(
                "unknown exclusion '{}': expected one of none, lower, upper, both",
                other
            ))),
        }
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounds reordered so that `min <= max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedBounds {
    /// Lesser of the two supplied bounds.
    pub min: f64,
    /// Greater of the two supplied bounds.
    pub max: f64,
}

impl NormalizedBounds {
    /// Reorders two bounds.
    ///
    /// # Examples
    /// ```
    /// use securand_core::bounds::NormalizedBounds;
    ///
    /// let bounds = NormalizedBounds::new(10.0, -2.5);
    /// assert_eq!(bounds.min, -2.5);
    /// assert_eq!(bounds.max, 10.0);
    /// ```
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            min: lower.min(upper),
            max: lower.max(upper),
        }
    }

    /// Returns true when both bounds are the same point.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Width of the interval.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Narrows whole-number bounds by the exclusion mode.
    ///
    /// # Errors
    ///
    /// - `RandomError::Validation` unless both bounds are safe integers
    /// - `RandomError::Range` when nothing is left after exclusion
    pub fn to_integer(&self, exclusion: Exclusion) -> Result<IntegerBounds> {
        for bound in [self.min, self.max] {
            if !is_safe_integer(bound) {
                return Err(RandomError::validation(format!(
                    "integer bounds must be whole numbers within +/-(2^53 - 1), got {}",
                    bound
                )));
            }
        }

        let min = self.min as i64;
        let max = self.max as i64;
        let effective_min = if exclusion.excludes_lower() { min + 1 } else { min };
        let effective_max = if exclusion.excludes_upper() { max - 1 } else { max };

        if effective_min > effective_max {
            return Err(RandomError::range(format!(
                "no integer in [{}, {}] remains after excluding {}",
                min, max, exclusion
            )));
        }

        Ok(IntegerBounds {
            min,
            max,
            effective_min,
            effective_max,
        })
    }
}

/// Integer bounds after exclusion narrowing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntegerBounds {
    /// Normalised lesser bound, before exclusion.
    pub min: i64,
    /// Normalised greater bound, before exclusion.
    pub max: i64,
    /// Smallest value that may be returned.
    pub effective_min: i64,
    /// Largest value that may be returned.
    pub effective_max: i64,
}

impl IntegerBounds {
    /// Number of distinct outcomes in `[effective_min, effective_max]`.
    #[inline]
    pub fn outcomes(&self) -> u64 {
        (self.effective_max - self.effective_min) as u64 + 1
    }
}

/// Tolerance comparison used for every fractional equality check.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < f64::EPSILON
}

/// Returns true when `value` is (within tolerance) a mathematical integer.
#[inline]
pub fn is_whole(value: f64) -> bool {
    approx_eq(value, value.round())
}

/// Returns true when `value` is a finite whole number representable exactly.
pub fn is_safe_integer(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER
}
