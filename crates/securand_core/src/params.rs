//! Caller-facing parameter objects.
//!
//! Parameters carry only what the caller supplied: optional fields are
//! `Option`s and are left out of the serialised form when absent, so the
//! shape validator never sees placeholder values. Defaults are applied after
//! validation, when the parameters become a request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bounds::Exclusion;
use crate::error::{RandomError, Result};
use crate::generator::{GenerationRequest, NumberKind, MAX_FRACTION_DIGITS};
use crate::shuffle::ShuffleRequest;
use crate::validation::{assert_shape, Field, FieldType, Schema};

/// Decimal digits used for fractional requests that do not specify any.
pub const DEFAULT_FRACTION_DIGITS: u8 = 2;

/// Shape of a number request.
pub const NUMBER_SCHEMA: Schema = Schema {
    name: "number request",
    fields: &[
        Field::required("lower_bound", FieldType::Number),
        Field::required("upper_bound", FieldType::Number),
        Field::optional("kind", FieldType::OneOf(&["integer", "fractional"])),
        Field::optional(
            "exclusion",
            FieldType::OneOf(&["none", "lower", "upper", "both"]),
        ),
        Field::optional(
            "fraction_digits",
            FieldType::Integer {
                min: Some(0),
                max: Some(MAX_FRACTION_DIGITS as i64),
            },
        ),
    ],
};

/// Shape of a shuffle request.
pub const SHUFFLE_SCHEMA: Schema = Schema {
    name: "shuffle request",
    fields: &[
        Field::optional(
            "range_start",
            FieldType::Integer {
                min: Some(0),
                max: None,
            },
        ),
        Field::optional(
            "range_end",
            FieldType::Integer {
                min: Some(0),
                max: None,
            },
        ),
        Field::optional("in_place", FieldType::Boolean),
        Field::optional("avoid_identical", FieldType::Boolean),
    ],
};

/// Parameters of a number request.
///
/// # Examples
///
/// ```rust
/// use securand_core::{NumberKind, NumberParams};
///
/// let params = NumberParams {
///     kind: Some(NumberKind::Fractional),
///     ..NumberParams::new(1.0, 2.0)
/// };
/// let request = params.to_request().unwrap();
/// assert_eq!(request.fraction_digits(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumberParams {
    /// One endpoint of the range.
    pub lower_bound: f64,
    /// The other endpoint; bounds may be given in either order.
    pub upper_bound: f64,
    /// Defaults to `integer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NumberKind>,
    /// Defaults to `none`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion: Option<Exclusion>,
    /// Decimal digits of a fractional result, defaults to 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraction_digits: Option<u8>,
}

impl NumberParams {
    /// Bounds only; every optional field absent.
    pub fn new(lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            kind: None,
            exclusion: None,
            fraction_digits: None,
        }
    }

    /// Validates raw JSON input and reads it as parameters.
    ///
    /// # Errors
    ///
    /// Returns `RandomError::Validation` if `raw` does not match [`NUMBER_SCHEMA`].
    pub fn from_json(raw: &Value) -> Result<Self> {
        assert_shape(raw, &NUMBER_SCHEMA)?;
        serde_json::from_value(raw.clone()).map_err(invalid)
    }

    /// Validates the supplied fields, then applies defaults.
    ///
    /// # Errors
    ///
    /// Returns `RandomError::Validation` on any shape violation.
    pub fn to_request(&self) -> Result<GenerationRequest> {
        let supplied = serde_json::to_value(self).map_err(invalid)?;
        assert_shape(&supplied, &NUMBER_SCHEMA)?;

        let kind = self.kind.unwrap_or_default();
        let fraction_digits = self.fraction_digits.unwrap_or(match kind {
            NumberKind::Integer => 0,
            NumberKind::Fractional => DEFAULT_FRACTION_DIGITS,
        });

        Ok(GenerationRequest::new(
            self.lower_bound,
            self.upper_bound,
            kind,
            self.exclusion.unwrap_or_default(),
            fraction_digits,
        ))
    }
}

/// Parameters of a shuffle request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleParams {
    /// First shuffled index, defaults to 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_start: Option<usize>,
    /// Exclusive end of the window, defaults to the sequence length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_end: Option<usize>,
    /// Mutate the caller's sequence, defaults to `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_place: Option<bool>,
    /// Rule out the identity permutation, defaults to `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoid_identical: Option<bool>,
}

impl ShuffleParams {
    /// Validates raw JSON input and reads it as parameters.
    ///
    /// # Errors
    ///
    /// Returns `RandomError::Validation` if `raw` does not match [`SHUFFLE_SCHEMA`].
    pub fn from_json(raw: &Value) -> Result<Self> {
        assert_shape(raw, &SHUFFLE_SCHEMA)?;
        serde_json::from_value(raw.clone()).map_err(invalid)
    }

    /// Validates the supplied fields, then applies defaults.
    ///
    /// The window is checked against the sequence length by the shuffler.
    pub fn to_request(&self) -> Result<ShuffleRequest> {
        let supplied = serde_json::to_value(self).map_err(invalid)?;
        assert_shape(&supplied, &SHUFFLE_SCHEMA)?;

        let mut request = ShuffleRequest::new()
            .in_place(self.in_place.unwrap_or(false))
            .avoid_identical(self.avoid_identical.unwrap_or(false));
        if let Some(start) = self.range_start {
            request = request.range_start(start);
        }
        if let Some(end) = self.range_end {
            request = request.range_end(end);
        }
        Ok(request)
    }
}

fn invalid(err: serde_json::Error) -> RandomError {
    RandomError::validation(format!("invalid parameters: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_are_not_serialised() {
        let value = serde_json::to_value(NumberParams::new(1.0, 2.0)).unwrap();
        assert_eq!(value, json!({"lower_bound": 1.0, "upper_bound": 2.0}));

        let value = serde_json::to_value(ShuffleParams::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_number_defaults() {
        let request = NumberParams::new(10.0, 1.0).to_request().unwrap();
        assert_eq!(request.kind(), NumberKind::Integer);
        assert_eq!(request.exclusion(), Exclusion::None);
        assert_eq!(request.fraction_digits(), 0);

        let params = NumberParams {
            kind: Some(NumberKind::Fractional),
            ..NumberParams::new(1.0, 2.0)
        };
        let request = params.to_request().unwrap();
        assert_eq!(request.fraction_digits(), DEFAULT_FRACTION_DIGITS);
    }

    #[test]
    fn test_number_out_of_range_digits() {
        let params = NumberParams {
            kind: Some(NumberKind::Fractional),
            fraction_digits: Some(16),
            ..NumberParams::new(1.0, 2.0)
        };
        let err = params.to_request().unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Validation error: invalid parameters: number request"));
    }

    #[test]
    fn test_non_finite_bound_is_rejected() {
        // NaN serialises as null, which the schema refuses.
        let err = NumberParams::new(f64::NAN, 1.0).to_request().unwrap_err();
        assert!(matches!(err, RandomError::Validation(_)));
    }

    #[test]
    fn test_number_from_json() {
        let params = NumberParams::from_json(&json!({
            "lower_bound": 1,
            "upper_bound": 10,
            "exclusion": "both"
        }))
        .unwrap();
        assert_eq!(params.exclusion, Some(Exclusion::Both));
        assert_eq!(params.kind, None);

        let err = NumberParams::from_json(&json!({"lower_bound": 1})).unwrap_err();
        assert!(err.to_string().contains("missing required field 'upper_bound'"));

        let err = NumberParams::from_json(&json!({
            "lower_bound": 1,
            "upper_bound": 2,
            "kind": null
        }))
        .unwrap_err();
        assert!(err.to_string().contains("field 'kind' must be a string, got null"));
    }

    #[test]
    fn test_float_literal_digits_are_rejected() {
        let err = NumberParams::from_json(&json!({
            "lower_bound": 1,
            "upper_bound": 2,
            "kind": "fractional",
            "fraction_digits": 2.0
        }))
        .unwrap_err();
        assert!(matches!(err, RandomError::Validation(_)));
        assert!(err
            .to_string()
            .contains("field 'fraction_digits' must be an integer, got a number"));

        let err = ShuffleParams::from_json(&json!({"range_start": 1.0})).unwrap_err();
        assert!(err.to_string().contains("field 'range_start' must be an integer"));
    }

    #[test]
    fn test_shuffle_defaults_and_overrides() {
        let request = ShuffleParams::default().to_request().unwrap();
        assert_eq!(request, ShuffleRequest::new());

        let params = ShuffleParams {
            range_start: Some(1),
            in_place: Some(true),
            ..ShuffleParams::default()
        };
        let request = params.to_request().unwrap();
        assert!(request.is_in_place());
        assert!(!request.avoids_identical());
        assert_eq!(request.window(5).unwrap().start, 1);
        assert_eq!(request.window(5).unwrap().end, 5);
    }

    #[test]
    fn test_shuffle_from_json() {
        let params = ShuffleParams::from_json(&json!({
            "range_start": 0,
            "range_end": 3,
            "avoid_identical": true
        }))
        .unwrap();
        assert_eq!(params.range_end, Some(3));

        let err = ShuffleParams::from_json(&json!({"range_start": -1})).unwrap_err();
        assert!(err.to_string().contains("must be >= 0"));

        let err = ShuffleParams::from_json(&json!({"inPlace": true})).unwrap_err();
        assert!(err.to_string().contains("unknown field 'inPlace'"));
    }
}
