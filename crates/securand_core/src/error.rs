//! Error types for bounded generation and ranged shuffling.
//!
//! This module provides:
//! - `RandomError`: the single error type surfaced by every public operation
//! - `Constraint`: the constraints a generation attempt can fail to satisfy,
//!   enumerated in exhaustion messages

use std::fmt;
use thiserror::Error;

use crate::bounds::Exclusion;
use crate::validation::ShapeError;

/// Categorised generation errors.
///
/// # Variants
/// - `Validation`: malformed or out-of-contract input
/// - `Range`: bounds collapse to an empty or contradictory set
/// - `Exhaustion`: the retry budget was consumed without a valid value
/// - `Configuration`: the entropy source is unavailable
///
/// # Examples
/// ```
/// use securand_core::RandomError;
///
/// let err = RandomError::validation("fraction_digits must be in [0, 15]");
/// assert_eq!(
///     format!("{}", err),
///     "Validation error: fraction_digits must be in [0, 15]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RandomError {
    /// Malformed or out-of-contract input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bounds form an empty or contradictory set.
    #[error("Range error: {0}")]
    Range(String),

    /// Retry budget exceeded.
    #[error(
        "Exhaustion error: no value satisfied {} after {attempts} attempts",
        Constraint::join(.unmet)
    )]
    Exhaustion {
        /// Number of attempts consumed.
        attempts: u32,
        /// Every constraint that remained unmet.
        unmet: Vec<Constraint>,
    },

    /// Entropy source unavailable.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RandomError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a range error
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Returns true for errors raised before any random draw.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Range(_))
    }
}

/// Shape violations surface as validation errors under a fixed prefix.
impl From<ShapeError> for RandomError {
    fn from(err: ShapeError) -> Self {
        Self::Validation(format!("invalid parameters: {}", err))
    }
}

/// A requirement a generated candidate must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// The candidate must not equal an excluded endpoint.
    Exclusion(Exclusion),
    /// A fractional candidate must not be a whole number.
    NonInteger,
    /// A rounded fractional candidate must stay inside the bounds.
    RoundedWithinBounds,
    /// A byte draw must fall below the rejection limit.
    UnbiasedDraw,
}

impl Constraint {
    fn join(constraints: &[Constraint]) -> String {
        match constraints {
            [] => "the request".to_string(),
            [only] => only.to_string(),
            [init @ .., last] => {
                let head: Vec<String> = init.iter().map(ToString::to_string).collect();
                format!("{} and {}", head.join(", "), last)
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Exclusion(mode) => write!(f, "the exclusion ({})", mode),
            Constraint::NonInteger => write!(f, "the non-integer requirement"),
            Constraint::RoundedWithinBounds => {
                write!(f, "the rounded value staying within bounds")
            }
            Constraint::UnbiasedDraw => write!(f, "an unbiased draw"),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RandomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RandomError::range("lower bound 3 exceeds upper bound 2");
        assert!(err.to_string().starts_with("Range error:"));

        let err = RandomError::configuration("entropy source unavailable");
        assert!(err.to_string().contains("entropy source unavailable"));
    }

    #[test]
    fn test_exhaustion_lists_every_constraint() {
        let err = RandomError::Exhaustion {
            attempts: 100,
            unmet: vec![
                Constraint::Exclusion(Exclusion::Both),
                Constraint::NonInteger,
                Constraint::RoundedWithinBounds,
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("exclusion (both)"));
        assert!(msg.contains("non-integer requirement"));
        assert!(msg.contains(", the non-integer requirement and the rounded value"));
        assert!(msg.contains("100 attempts"));
    }

    #[test]
    fn test_exhaustion_single_constraint() {
        let err = RandomError::Exhaustion {
            attempts: 5,
            unmet: vec![Constraint::Exclusion(Exclusion::Lower)],
        };
        assert_eq!(
            err.to_string(),
            "Exhaustion error: no value satisfied the exclusion (lower) after 5 attempts"
        );
    }

    #[test]
    fn test_shape_error_is_prefixed() {
        let err: RandomError = ShapeError::MissingField {
            schema: "number request",
            field: "lower_bound",
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Validation error: invalid parameters: number request: missing required field 'lower_bound'"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(RandomError::validation("x").is_input_error());
        assert!(RandomError::range("x").is_input_error());
        assert!(!RandomError::configuration("x").is_input_error());
    }
}
