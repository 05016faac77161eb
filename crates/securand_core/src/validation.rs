//! Declarative shape validation for raw request input.
//!
//! A [`Schema`] lists the fields an input object may carry, whether each is
//! required, and its type and range. [`assert_shape`] checks a raw
//! `serde_json::Value` against a schema and reports the first violation.
//!
//! Integer fields take JSON integer literals only; `3.0` is a wrong type even
//! though it is whole, since it would not deserialise into an integer field.
//!
//! Optional fields must be *absent* when not supplied: an explicit `null` is
//! a type violation, not a stand-in for "use the default".

use serde_json::Value;
use thiserror::Error;

/// Shape violations reported by [`assert_shape`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// The input is not a JSON object.
    #[error("{schema}: expected an object, got {found}")]
    NotAnObject {
        /// Schema name.
        schema: &'static str,
        /// JSON type of the input.
        found: &'static str,
    },

    /// A required field is absent.
    #[error("{schema}: missing required field '{field}'")]
    MissingField {
        /// Schema name.
        schema: &'static str,
        /// Name of the absent field.
        field: &'static str,
    },

    /// The input carries a field the schema does not declare.
    #[error("{schema}: unknown field '{field}'")]
    UnknownField {
        /// Schema name.
        schema: &'static str,
        /// Name of the undeclared field.
        field: String,
    },

    /// A field holds a value of the wrong JSON type.
    #[error("{schema}: field '{field}' must be {expected}, got {found}")]
    WrongType {
        /// Schema name.
        schema: &'static str,
        /// Offending field.
        field: &'static str,
        /// Declared type.
        expected: &'static str,
        /// JSON type found.
        found: &'static str,
    },

    /// A field has the right type but an unacceptable value.
    #[error("{schema}: field '{field}' {detail}")]
    OutOfRange {
        /// Schema name.
        schema: &'static str,
        /// Offending field.
        field: &'static str,
        /// What the value violates.
        detail: String,
    },
}

/// Declared type (and range) of one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldType {
    /// Any finite JSON number.
    Number,
    /// A whole JSON number within optional inclusive limits.
    Integer {
        /// Inclusive lower limit.
        min: Option<i64>,
        /// Inclusive upper limit.
        max: Option<i64>,
    },
    /// `true` or `false`.
    Boolean,
    /// A string drawn from a fixed, case-sensitive vocabulary.
    OneOf(&'static [&'static str]),
}

/// One declared field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    /// JSON key.
    pub name: &'static str,
    /// Whether the key must be present.
    pub required: bool,
    /// Accepted values.
    pub ty: FieldType,
}

impl Field {
    /// Field that must be present.
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            required: true,
            ty,
        }
    }

    /// Field that may be absent, but never `null`.
    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            required: false,
            ty,
        }
    }
}

/// Named set of fields describing an input object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schema {
    /// Name used as the prefix of every error message.
    pub name: &'static str,
    /// Every field the object may carry.
    pub fields: &'static [Field],
}

impl Schema {
    fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Checks that `raw` matches `schema`.
///
/// # Errors
///
/// Returns the first [`ShapeError`] found: non-object input, unknown fields,
/// missing required fields, then per-field type and range violations.
///
/// # Examples
///
/// ```rust
/// use securand_core::validation::{assert_shape, Field, FieldType, Schema};
/// use serde_json::json;
///
/// const POINT: Schema = Schema {
///     name: "point",
///     fields: &[
///         Field::required("x", FieldType::Number),
///         Field::optional("label", FieldType::OneOf(&["a", "b"])),
///     ],
/// };
///
/// assert!(assert_shape(&json!({"x": 1.5}), &POINT).is_ok());
/// assert!(assert_shape(&json!({"x": 1.5, "label": null}), &POINT).is_err());
/// assert!(assert_shape(&json!({"label": "a"}), &POINT).is_err());
/// ```
pub fn assert_shape(raw: &Value, schema: &Schema) -> Result<(), ShapeError> {
    let object = raw.as_object().ok_or(ShapeError::NotAnObject {
        schema: schema.name,
        found: type_name(raw),
    })?;

    if let Some(unknown) = object.keys().find(|key| schema.field(key).is_none()) {
        return Err(ShapeError::UnknownField {
            schema: schema.name,
            field: unknown.clone(),
        });
    }

    for field in schema.fields {
        match object.get(field.name) {
            Some(value) => check_field(schema, field, value)?,
            None if field.required => {
                return Err(ShapeError::MissingField {
                    schema: schema.name,
                    field: field.name,
                })
            }
            None => {}
        }
    }

    Ok(())
}

fn check_field(schema: &Schema, field: &Field, value: &Value) -> Result<(), ShapeError> {
    let wrong_type = |expected: &'static str| ShapeError::WrongType {
        schema: schema.name,
        field: field.name,
        expected,
        found: type_name(value),
    };
    let out_of_range = |detail: String| ShapeError::OutOfRange {
        schema: schema.name,
        field: field.name,
        detail,
    };

    match field.ty {
        FieldType::Number => {
            let number = value.as_f64().ok_or_else(|| wrong_type("a number"))?;
            if !number.is_finite() {
                return Err(out_of_range("must be finite".to_string()));
            }
        }
        FieldType::Integer { min, max } => {
            if value.is_u64() && value.as_i64().is_none() {
                return Err(out_of_range(format!("must fit in 64 signed bits, got {}", value)));
            }
            let integer = value.as_i64().ok_or_else(|| wrong_type("an integer"))?;
            if let Some(min) = min {
                if integer < min {
                    return Err(out_of_range(format!("must be >= {}, got {}", min, integer)));
                }
            }
            if let Some(max) = max {
                if integer > max {
                    return Err(out_of_range(format!("must be <= {}, got {}", max, integer)));
                }
            }
        }
        FieldType::Boolean => {
            value.as_bool().ok_or_else(|| wrong_type("a boolean"))?;
        }
        FieldType::OneOf(allowed) => {
            let text = value.as_str().ok_or_else(|| wrong_type("a string"))?;
            if !allowed.contains(&text) {
                return Err(out_of_range(format!(
                    "must be one of [{}], got '{}'",
                    allowed.join(", "),
                    text
                )));
            }
        }
    }

    Ok(())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: Schema = Schema {
        name: "sample",
        fields: &[
            Field::required("amount", FieldType::Number),
            Field::optional(
                "digits",
                FieldType::Integer {
                    min: Some(0),
                    max: Some(15),
                },
            ),
            Field::optional("flag", FieldType::Boolean),
            Field::optional("mode", FieldType::OneOf(&["fast", "slow"])),
        ],
    };

    #[test]
    fn test_accepts_minimal_and_full_input() {
        assert!(assert_shape(&json!({"amount": 1}), &SAMPLE).is_ok());
        assert!(assert_shape(
            &json!({"amount": -2.5, "digits": 3, "flag": true, "mode": "slow"}),
            &SAMPLE
        )
        .is_ok());
    }

    #[test]
    fn test_integer_fields_reject_float_literals() {
        let err = assert_shape(&json!({"amount": 0, "digits": 3.0}), &SAMPLE).unwrap_err();
        assert_eq!(
            err,
            ShapeError::WrongType {
                schema: "sample",
                field: "digits",
                expected: "an integer",
                found: "a number",
            }
        );
        assert_eq!(
            err.to_string(),
            "sample: field 'digits' must be an integer, got a number"
        );

        let err = assert_shape(&json!({"amount": 0, "digits": u64::MAX}), &SAMPLE).unwrap_err();
        assert!(err.to_string().contains("must fit in 64 signed bits"));
    }

    #[test]
    fn test_rejects_non_object() {
        let err = assert_shape(&json!([1, 2]), &SAMPLE).unwrap_err();
        assert_eq!(err.to_string(), "sample: expected an object, got an array");
    }

    #[test]
    fn test_rejects_missing_and_unknown_fields() {
        let err = assert_shape(&json!({}), &SAMPLE).unwrap_err();
        assert!(matches!(err, ShapeError::MissingField { field: "amount", .. }));

        let err = assert_shape(&json!({"amount": 1, "colour": "red"}), &SAMPLE).unwrap_err();
        assert!(err.to_string().contains("unknown field 'colour'"));
    }

    #[test]
    fn test_rejects_explicit_null_for_optional_field() {
        let err = assert_shape(&json!({"amount": 1, "flag": null}), &SAMPLE).unwrap_err();
        assert_eq!(
            err.to_string(),
            "sample: field 'flag' must be a boolean, got null"
        );
    }

    #[test]
    fn test_rejects_wrong_types_and_ranges() {
        assert!(assert_shape(&json!({"amount": "1"}), &SAMPLE).is_err());
        assert!(assert_shape(&json!({"amount": 1, "digits": 1.5}), &SAMPLE).is_err());

        let err = assert_shape(&json!({"amount": 1, "digits": 16}), &SAMPLE).unwrap_err();
        assert!(err.to_string().contains("must be <= 15, got 16"));

        let err = assert_shape(&json!({"amount": 1, "digits": -1}), &SAMPLE).unwrap_err();
        assert!(err.to_string().contains("must be >= 0"));

        let err = assert_shape(&json!({"amount": 1, "mode": "FAST"}), &SAMPLE).unwrap_err();
        assert!(err.to_string().contains("one of [fast, slow]"));
    }
}
