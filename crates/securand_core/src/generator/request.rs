//! Generation request and result value objects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bounds::{is_safe_integer, Exclusion, NormalizedBounds};
use crate::error::{RandomError, Result};

/// Largest number of decimal digits a fractional result can be rounded to.
pub const MAX_FRACTION_DIGITS: u8 = 15;

/// Requested numeric kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    /// Whole numbers in the effective bounds.
    #[default]
    Integer,
    /// Values rounded to a fixed number of decimal digits, never whole.
    Fractional,
}

impl FromStr for NumberKind {
    type Err = RandomError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "integer" | "int" => Ok(NumberKind::Integer),
            "fractional" | "float" | "decimal" => Ok(NumberKind::Fractional),
            other => Err(RandomError::validation(format!(
                "unknown kind '{}': expected integer or fractional",
                other
            ))),
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberKind::Integer => write!(f, "integer"),
            NumberKind::Fractional => write!(f, "fractional"),
        }
    }
}

/// A single bounded generation request.
///
/// Bounds may be given in either order. Construct with
/// [`GenerationRequest::integer`] or [`GenerationRequest::fractional`] and
/// refine with [`GenerationRequest::with_exclusion`].
///
/// # Examples
///
/// ```rust
/// use securand_core::{Exclusion, GenerationRequest, NumberKind};
///
/// let request = GenerationRequest::integer(10.0, 1.0).with_exclusion(Exclusion::Both);
/// assert_eq!(request.kind(), NumberKind::Integer);
/// assert!(request.validate().is_ok());
///
/// let invalid = GenerationRequest::fractional(1.0, 2.0, 0);
/// assert!(invalid.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationRequest {
    lower_bound: f64,
    upper_bound: f64,
    kind: NumberKind,
    exclusion: Exclusion,
    fraction_digits: u8,
}

impl GenerationRequest {
    /// Creates a request with every field given explicitly.
    pub fn new(
        lower_bound: f64,
        upper_bound: f64,
        kind: NumberKind,
        exclusion: Exclusion,
        fraction_digits: u8,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            kind,
            exclusion,
            fraction_digits,
        }
    }

    /// Integer request with no exclusion.
    pub fn integer(lower_bound: f64, upper_bound: f64) -> Self {
        Self::new(lower_bound, upper_bound, NumberKind::Integer, Exclusion::None, 0)
    }

    /// Fractional request with no exclusion.
    pub fn fractional(lower_bound: f64, upper_bound: f64, fraction_digits: u8) -> Self {
        Self::new(
            lower_bound,
            upper_bound,
            NumberKind::Fractional,
            Exclusion::None,
            fraction_digits,
        )
    }

    /// Returns a copy with the given exclusion mode.
    #[must_use]
    pub fn with_exclusion(mut self, exclusion: Exclusion) -> Self {
        self.exclusion = exclusion;
        self
    }

    /// Bound as supplied by the caller.
    #[inline]
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    /// Bound as supplied by the caller.
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Requested numeric kind.
    #[inline]
    pub fn kind(&self) -> NumberKind {
        self.kind
    }

    /// Endpoints excluded from the result set.
    #[inline]
    pub fn exclusion(&self) -> Exclusion {
        self.exclusion
    }

    /// Decimal digits of a fractional result; ignored for integers.
    #[inline]
    pub fn fraction_digits(&self) -> u8 {
        self.fraction_digits
    }

    /// Bounds reordered so that `min <= max`.
    #[inline]
    pub fn bounds(&self) -> NormalizedBounds {
        NormalizedBounds::new(self.lower_bound, self.upper_bound)
    }

    /// Checks the request invariants.
    ///
    /// # Errors
    ///
    /// Returns `RandomError::Validation` if:
    /// - a bound is NaN or infinite
    /// - the kind is `Integer` and a bound is not a safe whole number
    /// - `fraction_digits` exceeds 15
    /// - the kind is `Fractional` and `fraction_digits` is 0
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("lower_bound", self.lower_bound),
            ("upper_bound", self.upper_bound),
        ] {
            if !value.is_finite() {
                return Err(RandomError::validation(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
            if self.kind == NumberKind::Integer && !is_safe_integer(value) {
                return Err(RandomError::validation(format!(
                    "{} must be a whole number within +/-(2^53 - 1) for integer generation, got {}",
                    name, value
                )));
            }
        }

        if self.fraction_digits > MAX_FRACTION_DIGITS {
            return Err(RandomError::validation(format!(
                "fraction_digits {} must be in range [0, {}]",
                self.fraction_digits, MAX_FRACTION_DIGITS
            )));
        }

        if self.kind == NumberKind::Fractional && self.fraction_digits == 0 {
            return Err(RandomError::validation(
                "fraction_digits must not be 0 for fractional generation; request an integer instead",
            ));
        }

        Ok(())
    }
}

/// A generated value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    /// Result of an `Integer` request.
    Integer(i64),
    /// Result of a `Fractional` request.
    Fractional(f64),
}

impl Number {
    /// Value as a float, whatever its kind.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(v) => v as f64,
            Number::Fractional(v) => v,
        }
    }

    /// Integer value, if this is an integer result.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Integer(v) => Some(v),
            Number::Fractional(_) => None,
        }
    }

    /// Kind of request that produced this value.
    pub fn kind(&self) -> NumberKind {
        match self {
            Number::Integer(_) => NumberKind::Integer,
            Number::Fractional(_) => NumberKind::Fractional,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(v) => write!(f, "{}", v),
            Number::Fractional(v) => write!(f, "{}", v),
        }
    }
}
