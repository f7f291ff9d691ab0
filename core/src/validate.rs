// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Guards for function-argument contracts.
//!
//! Every client constructor and method calls one of these at the top of its
//! body. Parameters are carried as [`serde_json::Value`], with `Value::Null`
//! (or `None` converted into a value) standing for "not specified". A guard
//! either hands the value back unchanged or returns a [`ValidationError`]
//! rendered as `"<Category> | <description>"`.

use serde_json::Map;
use serde_json::Number;
use serde_json::Value;

/// The closed set of type constraints a parameter can be checked against.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParameterType {
    Integer,
    Float,
    /// Either an `Integer` or a `Float`.
    Number,
    Text,
    Boolean,
    Sequence,
    Mapping,
    /// Anything with a length: `Text`, `Sequence` or `Mapping`.
    Iterable,
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            ParameterType::Integer => "Integer",
            ParameterType::Float => "Float",
            ParameterType::Number => "Number",
            ParameterType::Text => "Text",
            ParameterType::Boolean => "Boolean",
            ParameterType::Sequence => "Sequence",
            ParameterType::Mapping => "Mapping",
            ParameterType::Iterable => "Iterable",
        };

        write!(f, "{name}")
    }
}

impl ParameterType {
    /// Whether a present (non-null) value belongs to this category.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParameterType::Integer => {
                matches!(value, Value::Number(n) if !n.is_f64())
            }
            ParameterType::Float => {
                matches!(value, Value::Number(n) if n.is_f64())
            }
            ParameterType::Number => value.is_number(),
            ParameterType::Text => value.is_string(),
            ParameterType::Boolean => value.is_boolean(),
            ParameterType::Sequence => value.is_array(),
            ParameterType::Mapping => value.is_object(),
            ParameterType::Iterable => matches!(
                value,
                Value::String(_) | Value::Array(_) | Value::Object(_)
            ),
        }
    }

    /// The narrowest category describing `value`, or `None` for null.
    pub fn of(value: &Value) -> Option<ParameterType> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(ParameterType::Boolean),
            Value::Number(n) if n.is_f64() => Some(ParameterType::Float),
            Value::Number(_) => Some(ParameterType::Integer),
            Value::String(_) => Some(ParameterType::Text),
            Value::Array(_) => Some(ParameterType::Sequence),
            Value::Object(_) => Some(ParameterType::Mapping),
        }
    }
}

fn describe(value: &Value) -> String {
    match ParameterType::of(value) {
        Some(parameter_type) => parameter_type.to_string(),
        None => String::from("None"),
    }
}

/// The category tag carried by every validation failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The guard itself was called incorrectly.
    Internal,
    NotNone,
    Type,
    MinLength,
    MinValue,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ValidationErrorKind::Internal => write!(f, "Error-Internal"),
            ValidationErrorKind::NotNone => write!(f, "Error-Not-None"),
            ValidationErrorKind::Type => write!(f, "Error-Type"),
            ValidationErrorKind::MinLength => write!(f, "Error-Min-Len"),
            ValidationErrorKind::MinValue => write!(f, "Error-Min-Value"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    pub fn internal(message: String) -> Self {
        Self::new(ValidationErrorKind::Internal, message)
    }

    pub fn not_specified(name: &str) -> Self {
        Self::new(
            ValidationErrorKind::NotNone,
            format!("The parameter '{name}' must be specified."),
        )
    }

    pub fn wrong_type(
        name: &str,
        expected: ParameterType,
        found: &Value,
        required: bool,
    ) -> Self {
        let found = describe(found);
        let message = if required {
            format!(
                "Expected the parameter '{name}' to be of type {expected}, found {found}."
            )
        } else {
            format!(
                "Expected the parameter '{name}' to be None or of type {expected}, found {found}."
            )
        };

        Self::new(ValidationErrorKind::Type, message)
    }

    /// NaN and the infinities have no JSON form, so they can never be
    /// accepted as a number.
    pub fn not_finite(name: &str, expected: ParameterType, found: f64) -> Self {
        Self::new(
            ValidationErrorKind::Type,
            format!(
                "Expected the parameter '{name}' to be a finite {expected}, found '{found}'."
            ),
        )
    }

    pub fn out_of_range(name: &str, found: &Value) -> Self {
        Self::new(
            ValidationErrorKind::Type,
            format!(
                "Expected the parameter '{name}' to fit in a 64-bit signed Integer, found '{found}'."
            ),
        )
    }

    pub fn too_short(name: &str, min_length: &Number, length: usize) -> Self {
        Self::new(
            ValidationErrorKind::MinLength,
            format!(
                "The parameter '{name}' must have a minimum length of {min_length}, found {length}."
            ),
        )
    }

    pub fn too_small(name: &str, min_value: &Number, value: &Number) -> Self {
        Self::new(
            ValidationErrorKind::MinValue,
            format!(
                "The parameter '{name}' must have a minimum value of '{min_value}', found '{value}'."
            ),
        )
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} | {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Optional constraints applied after the type check.
///
/// `min_length` and `min_value` are kept as untyped values so that a caller
/// handing over something that is not a number is reported as an internal
/// error instead of being silently coerced. Null means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub required: bool,
    pub min_length: Value,
    pub min_value: Value,
}

impl Constraints {
    pub fn optional() -> Self {
        Self::default()
    }

    pub fn required() -> Self {
        Self { required: true, ..Self::default() }
    }

    pub fn min_length(mut self, min_length: impl Into<Value>) -> Self {
        self.min_length = min_length.into();
        self
    }

    pub fn min_value(mut self, min_value: impl Into<Value>) -> Self {
        self.min_value = min_value.into();
        self
    }

    fn check(&self) -> Result<(), ValidationError> {
        match &self.min_length {
            Value::Null => {}
            Value::Number(n) if n.as_f64().is_some_and(|n| n >= 0.0) => {}
            Value::Number(n) => {
                return Err(ValidationError::internal(format!(
                    "Expected the parameter 'min_length' to be non-negative, found '{n}'."
                )));
            }
            other => {
                return Err(ValidationError::internal(format!(
                    "Expected the parameter 'min_length' to be of type Number, found {}.",
                    describe(other)
                )));
            }
        }

        match &self.min_value {
            Value::Null | Value::Number(_) => Ok(()),
            other => Err(ValidationError::internal(format!(
                "Expected the parameter 'min_value' to be of type Number, found {}.",
                describe(other)
            ))),
        }
    }
}

fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(a) => Some(a.len()),
        Value::Object(o) => Some(o.len()),
        _ => None,
    }
}

fn is_below(value: &Number, minimum: &Number) -> bool {
    if let (Some(v), Some(m)) = (value.as_i64(), minimum.as_i64()) {
        return v < m;
    }

    if let (Some(v), Some(m)) = (value.as_u64(), minimum.as_u64()) {
        return v < m;
    }

    match (value.as_f64(), minimum.as_f64()) {
        (Some(v), Some(m)) => v < m,
        _ => false,
    }
}

/// Check `value` against exactly one of `parameter_types` and the given
/// constraints, returning the value unchanged on success.
///
/// Checks run in a fixed order and the first failure wins: the guard's own
/// arguments, presence, type, minimum length, minimum value. A missing value
/// that is not required is accepted without a type check.
pub fn validate_value(
    name: &str,
    value: impl Into<Value>,
    parameter_types: &[ParameterType],
    constraints: &Constraints,
) -> Result<Value, ValidationError> {
    let value = value.into();

    check_name(name)?;

    let expected = match parameter_types {
        [] => {
            return Err(ValidationError::internal(String::from(
                "The parameter 'parameter_type' must be specified.",
            )));
        }
        [expected] => *expected,
        _ => {
            return Err(ValidationError::internal(format!(
                "Expected one and only one parameter type for '{name}', found {}.",
                parameter_types.len()
            )));
        }
    };

    constraints.check()?;

    if value.is_null() {
        if constraints.required {
            return Err(ValidationError::not_specified(name));
        }
        return Ok(value);
    }

    if !expected.matches(&value) {
        return Err(ValidationError::wrong_type(
            name,
            expected,
            &value,
            constraints.required,
        ));
    }

    if let (Value::Number(min_length), Some(length)) =
        (&constraints.min_length, length_of(&value))
    {
        let too_short = match min_length.as_u64() {
            Some(min_length) => (length as u64) < min_length,
            None => min_length.as_f64().is_some_and(|m| (length as f64) < m),
        };

        if too_short {
            return Err(ValidationError::too_short(name, min_length, length));
        }
    }

    if let (Value::Number(min_value), Value::Number(number)) =
        (&constraints.min_value, &value)
    {
        if is_below(number, min_value) {
            return Err(ValidationError::too_small(name, min_value, number));
        }
    }

    Ok(value)
}

fn check_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::internal(String::from(
            "The parameter 'parameter_name' must be specified.",
        )));
    }

    Ok(())
}

/// Arguments of [`float_value`] and [`number_value`].
///
/// `serde_json` turns NaN and the infinities into `Value::Null`, which would
/// read as a missing value, so numbers are converted through this instead
/// of `Into<Value>`. A non-finite float comes back as `Err`.
pub trait NumericParameter {
    fn into_numeric(self) -> Result<Value, f64>;
}

impl NumericParameter for f64 {
    fn into_numeric(self) -> Result<Value, f64> {
        Number::from_f64(self).map(Value::Number).ok_or(self)
    }
}

impl NumericParameter for f32 {
    fn into_numeric(self) -> Result<Value, f64> {
        f64::from(self).into_numeric()
    }
}

impl NumericParameter for i32 {
    fn into_numeric(self) -> Result<Value, f64> {
        Ok(Value::from(self))
    }
}

impl NumericParameter for i64 {
    fn into_numeric(self) -> Result<Value, f64> {
        Ok(Value::from(self))
    }
}

impl NumericParameter for u32 {
    fn into_numeric(self) -> Result<Value, f64> {
        Ok(Value::from(self))
    }
}

impl NumericParameter for u64 {
    fn into_numeric(self) -> Result<Value, f64> {
        Ok(Value::from(self))
    }
}

impl NumericParameter for Number {
    fn into_numeric(self) -> Result<Value, f64> {
        Ok(Value::Number(self))
    }
}

impl<T: NumericParameter> NumericParameter for Option<T> {
    fn into_numeric(self) -> Result<Value, f64> {
        match self {
            Some(value) => value.into_numeric(),
            None => Ok(Value::Null),
        }
    }
}

fn numeric_argument(
    name: &str,
    value: impl NumericParameter,
    expected: ParameterType,
) -> Result<Value, ValidationError> {
    check_name(name)?;

    value
        .into_numeric()
        .map_err(|found| ValidationError::not_finite(name, expected, found))
}

/// Run [`validate_value`] for a single type and convert the accepted value
/// back to its native representation.
fn typed_value<T>(
    name: &str,
    value: impl Into<Value>,
    expected: ParameterType,
    constraints: &Constraints,
    extract: impl FnOnce(Value) -> Result<T, Value>,
) -> Result<Option<T>, ValidationError> {
    let value = validate_value(name, value, &[expected], constraints)?;
    if value.is_null() {
        return Ok(None);
    }

    extract(value).map(Some).map_err(|other| {
        ValidationError::internal(format!(
            "The parameter '{name}' was accepted as {expected} but holds {}.",
            describe(&other)
        ))
    })
}

pub fn string_value(
    name: &str,
    value: impl Into<Value>,
    constraints: &Constraints,
) -> Result<Option<String>, ValidationError> {
    typed_value(name, value, ParameterType::Text, constraints, |v| match v {
        Value::String(s) => Ok(s),
        other => Err(other),
    })
}

/// Integers beyond the range of `i64` fail with a type error.
pub fn integer_value(
    name: &str,
    value: impl Into<Value>,
    constraints: &Constraints,
) -> Result<Option<i64>, ValidationError> {
    match validate_value(name, value, &[ParameterType::Integer], constraints)? {
        Value::Null => Ok(None),
        value => match value.as_i64() {
            Some(i) => Ok(Some(i)),
            None => Err(ValidationError::out_of_range(name, &value)),
        },
    }
}

pub fn float_value(
    name: &str,
    value: impl NumericParameter,
    constraints: &Constraints,
) -> Result<Option<f64>, ValidationError> {
    let value = numeric_argument(name, value, ParameterType::Float)?;

    typed_value(name, value, ParameterType::Float, constraints, |v| {
        match v.as_f64() {
            Some(f) => Ok(f),
            None => Err(v),
        }
    })
}

/// Accepts integers and floats alike.
pub fn number_value(
    name: &str,
    value: impl NumericParameter,
    constraints: &Constraints,
) -> Result<Option<Number>, ValidationError> {
    let value = numeric_argument(name, value, ParameterType::Number)?;

    typed_value(name, value, ParameterType::Number, constraints, |v| match v {
        Value::Number(n) => Ok(n),
        other => Err(other),
    })
}

pub fn boolean_value(
    name: &str,
    value: impl Into<Value>,
    constraints: &Constraints,
) -> Result<Option<bool>, ValidationError> {
    typed_value(name, value, ParameterType::Boolean, constraints, |v| {
        match v {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    })
}

pub fn list_value(
    name: &str,
    value: impl Into<Value>,
    constraints: &Constraints,
) -> Result<Option<Vec<Value>>, ValidationError> {
    typed_value(name, value, ParameterType::Sequence, constraints, |v| {
        match v {
            Value::Array(a) => Ok(a),
            other => Err(other),
        }
    })
}

pub fn mapping_value(
    name: &str,
    value: impl Into<Value>,
    constraints: &Constraints,
) -> Result<Option<Map<String, Value>>, ValidationError> {
    typed_value(name, value, ParameterType::Mapping, constraints, |v| match v {
        Value::Object(o) => Ok(o),
        other => Err(other),
    })
}

/// Text, sequences and mappings are all accepted and returned as-is.
pub fn iterable_value(
    name: &str,
    value: impl Into<Value>,
    constraints: &Constraints,
) -> Result<Option<Value>, ValidationError> {
    typed_value(name, value, ParameterType::Iterable, constraints, Ok)
}

#[cfg(test)]
mod test {
    use serde_json::Value;
    use serde_json::json;

    use super::*;

    fn message(result: Result<impl std::fmt::Debug, ValidationError>) -> String {
        result.expect_err("expected a validation error").to_string()
    }

    #[test]
    fn test_parameter_type_is_missing() {
        assert_eq!(
            message(validate_value("value", 1, &[], &Constraints::optional())),
            "Error-Internal | The parameter 'parameter_type' must be specified."
        );
    }

    #[test]
    fn test_multiple_parameter_types() {
        let result = validate_value(
            "value",
            1,
            &[ParameterType::Integer, ParameterType::Float],
            &Constraints::optional(),
        );

        let error = result.unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::Internal);
        assert_eq!(
            error.to_string(),
            "Error-Internal | Expected one and only one parameter type for 'value', found 2."
        );
    }

    #[test]
    fn test_parameter_name_is_missing() {
        let error = validate_value(
            "",
            1,
            &[ParameterType::Integer],
            &Constraints::optional(),
        )
        .unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::Internal);
    }

    #[test]
    fn test_parameter_min_length_type() {
        validate_value(
            "value",
            1,
            &[ParameterType::Integer],
            &Constraints::optional().min_length(Value::Null),
        )
        .unwrap();

        assert_eq!(
            message(validate_value(
                "value",
                1,
                &[ParameterType::Integer],
                &Constraints::optional().min_length("moo"),
            )),
            "Error-Internal | Expected the parameter 'min_length' to be of type Number, found Text."
        );

        let error = validate_value(
            "value",
            "asdf",
            &[ParameterType::Text],
            &Constraints::optional().min_length(-1),
        )
        .unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::Internal);
    }

    #[test]
    fn test_parameter_min_value_type() {
        validate_value(
            "value",
            1,
            &[ParameterType::Integer],
            &Constraints::optional().min_value(Value::Null),
        )
        .unwrap();

        assert_eq!(
            message(validate_value(
                "value",
                1,
                &[ParameterType::Integer],
                &Constraints::optional().min_value("moo"),
            )),
            "Error-Internal | Expected the parameter 'min_value' to be of type Number, found Text."
        );
    }

    #[test]
    fn test_internal_checks_run_before_presence() {
        let error = validate_value(
            "value",
            Value::Null,
            &[ParameterType::Integer],
            &Constraints::required().min_value("moo"),
        )
        .unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::Internal);
    }

    #[test]
    fn test_wrong_parameter_type_or_none() {
        validate_value(
            "value",
            1,
            &[ParameterType::Integer],
            &Constraints::optional(),
        )
        .unwrap();
        validate_value(
            "value",
            1,
            &[ParameterType::Number],
            &Constraints::optional(),
        )
        .unwrap();

        assert_eq!(
            message(validate_value(
                "value",
                1,
                &[ParameterType::Text],
                &Constraints::optional(),
            )),
            "Error-Type | Expected the parameter 'value' to be None or of type Text, found Integer."
        );

        assert_eq!(
            message(validate_value(
                "value",
                1,
                &[ParameterType::Text],
                &Constraints::default(),
            )),
            "Error-Type | Expected the parameter 'value' to be None or of type Text, found Integer."
        );
    }

    #[test]
    fn test_wrong_parameter_type_but_required() {
        assert_eq!(
            message(validate_value(
                "value",
                1,
                &[ParameterType::Text],
                &Constraints::required(),
            )),
            "Error-Type | Expected the parameter 'value' to be of type Text, found Integer."
        );
    }

    #[test]
    fn test_accepted_values_are_returned_unchanged() {
        let value = json!({"a": [1, 2.5, "three"], "b": null});

        let first = validate_value(
            "value",
            value.clone(),
            &[ParameterType::Mapping],
            &Constraints::required().min_length(2),
        )
        .unwrap();
        let second = validate_value(
            "value",
            first.clone(),
            &[ParameterType::Mapping],
            &Constraints::required().min_length(2),
        )
        .unwrap();

        assert_eq!(first, value);
        assert_eq!(second, value);
    }

    #[test]
    fn test_str_value() {
        for min_length in 0..=4 {
            assert_eq!(
                string_value(
                    "value",
                    "asdf",
                    &Constraints::optional().min_length(min_length),
                )
                .unwrap(),
                Some(String::from("asdf"))
            );
        }

        assert_eq!(
            message(string_value(
                "value",
                "asdf",
                &Constraints::required().min_length(5),
            )),
            "Error-Min-Len | The parameter 'value' must have a minimum length of 5, found 4."
        );
    }

    #[test]
    fn test_str_length_counts_characters() {
        assert_eq!(
            message(string_value(
                "value",
                "añb",
                &Constraints::optional().min_length(4),
            )),
            "Error-Min-Len | The parameter 'value' must have a minimum length of 4, found 3."
        );
    }

    #[test]
    fn test_int_value() {
        assert_eq!(
            integer_value("value", None::<i64>, &Constraints::optional())
                .unwrap(),
            None
        );
        assert_eq!(
            integer_value("value", 1, &Constraints::optional()).unwrap(),
            Some(1)
        );
        assert_eq!(
            integer_value("value", 1, &Constraints::required()).unwrap(),
            Some(1)
        );

        for value in [4, 3, 2] {
            integer_value("value", value, &Constraints::optional().min_value(2))
                .unwrap();
        }

        assert_eq!(
            message(integer_value(
                "value",
                1,
                &Constraints::optional().min_value(2),
            )),
            "Error-Min-Value | The parameter 'value' must have a minimum value of '2', found '1'."
        );

        assert_eq!(
            message(integer_value(
                "value",
                None::<i64>,
                &Constraints::required(),
            )),
            "Error-Not-None | The parameter 'value' must be specified."
        );

        assert_eq!(
            message(integer_value("value", 1.0, &Constraints::optional())),
            "Error-Type | Expected the parameter 'value' to be None or of type Integer, found Float."
        );
    }

    #[test]
    fn test_float_value() {
        assert_eq!(
            float_value("value", None::<f64>, &Constraints::optional())
                .unwrap(),
            None
        );
        assert_eq!(
            float_value("value", 1.0, &Constraints::required()).unwrap(),
            Some(1.0)
        );

        float_value("value", 4.0, &Constraints::optional().min_value(2))
            .unwrap();
        float_value("value", 4.0, &Constraints::optional().min_value(2.5))
            .unwrap();
        float_value("value", 3.0, &Constraints::optional().min_value(2))
            .unwrap();
        float_value("value", 3.0, &Constraints::optional().min_value(2.5))
            .unwrap();
        float_value("value", 2.0, &Constraints::optional().min_value(2))
            .unwrap();

        assert_eq!(
            message(float_value(
                "value",
                2.0,
                &Constraints::optional().min_value(2.5),
            )),
            "Error-Min-Value | The parameter 'value' must have a minimum value of '2.5', found '2.0'."
        );

        assert_eq!(
            message(float_value(
                "value",
                2.0,
                &Constraints::optional().min_value(3),
            )),
            "Error-Min-Value | The parameter 'value' must have a minimum value of '3', found '2.0'."
        );

        assert_eq!(
            message(float_value(
                "value",
                None::<f64>,
                &Constraints::required(),
            )),
            "Error-Not-None | The parameter 'value' must be specified."
        );

        assert_eq!(
            message(float_value("value", 1, &Constraints::optional())),
            "Error-Type | Expected the parameter 'value' to be None or of type Float, found Integer."
        );
    }

    #[test]
    fn test_number_value() {
        number_value("value", None::<f64>, &Constraints::optional()).unwrap();
        number_value("value", 1, &Constraints::required()).unwrap();
        number_value("value", 1.0, &Constraints::required()).unwrap();

        for min_value in [json!(2), json!(2.5)] {
            number_value(
                "value",
                4,
                &Constraints::optional().min_value(min_value.clone()),
            )
            .unwrap();
            number_value(
                "value",
                4.0,
                &Constraints::optional().min_value(min_value),
            )
            .unwrap();
        }

        number_value("value", 2.0, &Constraints::optional().min_value(2))
            .unwrap();

        assert_eq!(
            message(number_value(
                "value",
                2.0,
                &Constraints::optional().min_value(2.5),
            )),
            "Error-Min-Value | The parameter 'value' must have a minimum value of '2.5', found '2.0'."
        );

        assert_eq!(
            message(number_value(
                "value",
                2,
                &Constraints::optional().min_value(2.5),
            )),
            "Error-Min-Value | The parameter 'value' must have a minimum value of '2.5', found '2'."
        );

        assert_eq!(
            message(number_value(
                "value",
                None::<i64>,
                &Constraints::required(),
            )),
            "Error-Not-None | The parameter 'value' must be specified."
        );
    }

    #[test]
    fn test_non_finite_floats_are_present() {
        assert_eq!(
            message(float_value("value", f64::INFINITY, &Constraints::optional())),
            "Error-Type | Expected the parameter 'value' to be a finite Float, found 'inf'."
        );

        let error =
            float_value("value", f64::NAN, &Constraints::required()).unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::Type);
        assert_eq!(
            error.message,
            "Expected the parameter 'value' to be a finite Float, found 'NaN'."
        );

        let error = number_value(
            "value",
            Some(f64::NEG_INFINITY),
            &Constraints::required().min_value(0),
        )
        .unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::Type);
        assert_eq!(
            error.message,
            "Expected the parameter 'value' to be a finite Number, found '-inf'."
        );

        assert_eq!(
            message(float_value("", f64::NAN, &Constraints::optional())),
            "Error-Internal | The parameter 'parameter_name' must be specified."
        );

        assert_eq!(
            float_value("value", f64::MAX, &Constraints::required()).unwrap(),
            Some(f64::MAX)
        );
    }

    #[test]
    fn test_int_value_out_of_range() {
        let error =
            integer_value("value", u64::MAX, &Constraints::required()).unwrap_err();

        assert_eq!(error.kind, ValidationErrorKind::Type);
        assert_eq!(
            error.to_string(),
            "Error-Type | Expected the parameter 'value' to fit in a 64-bit signed Integer, found '18446744073709551615'."
        );

        assert_eq!(
            integer_value("value", i64::MAX as u64, &Constraints::required())
                .unwrap(),
            Some(i64::MAX)
        );
    }

    #[test]
    fn test_min_value_with_negative_numbers() {
        integer_value("value", -3, &Constraints::optional().min_value(-5))
            .unwrap();

        let error =
            integer_value("value", -3, &Constraints::optional().min_value(0))
                .unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::MinValue);

        let error =
            integer_value("value", -1, &Constraints::optional().min_value(u64::MAX))
                .unwrap_err();
        assert_eq!(error.kind, ValidationErrorKind::MinValue);
    }

    #[test]
    fn test_bool_value() {
        assert_eq!(
            boolean_value("value", true, &Constraints::optional()).unwrap(),
            Some(true)
        );
        assert_eq!(
            boolean_value("value", false, &Constraints::optional()).unwrap(),
            Some(false)
        );
        assert_eq!(
            boolean_value("value", None::<bool>, &Constraints::optional())
                .unwrap(),
            None
        );

        assert_eq!(
            message(boolean_value(
                "value",
                None::<bool>,
                &Constraints::required(),
            )),
            "Error-Not-None | The parameter 'value' must be specified."
        );

        assert_eq!(
            message(boolean_value("value", 1, &Constraints::required())),
            "Error-Type | Expected the parameter 'value' to be of type Boolean, found Integer."
        );
    }

    #[test]
    fn test_list_value() {
        let value = json!(["a", "b", "c", "d"]);

        for min_length in 0..=4 {
            list_value(
                "value",
                value.clone(),
                &Constraints::optional().min_length(min_length),
            )
            .unwrap();
        }

        assert_eq!(
            message(list_value(
                "value",
                value.clone(),
                &Constraints::optional().min_length(5),
            )),
            "Error-Min-Len | The parameter 'value' must have a minimum length of 5, found 4."
        );

        assert_eq!(
            message(list_value(
                "value",
                json!({"a": 1}),
                &Constraints::optional(),
            )),
            "Error-Type | Expected the parameter 'value' to be None or of type Sequence, found Mapping."
        );
    }

    #[test]
    fn test_dict_value() {
        let value = json!({"a": 1, "b": 2, "c": 3, "d": 4});

        for min_length in 0..=4 {
            let map = mapping_value(
                "value",
                value.clone(),
                &Constraints::optional().min_length(min_length),
            )
            .unwrap()
            .unwrap();
            assert_eq!(map.len(), 4);
        }

        assert_eq!(
            message(mapping_value(
                "value",
                value,
                &Constraints::optional().min_length(5),
            )),
            "Error-Min-Len | The parameter 'value' must have a minimum length of 5, found 4."
        );
    }

    #[test]
    fn test_iterable_value() {
        let value = json!(["a", "b", "c", "d"]);

        for min_length in 0..=4 {
            iterable_value(
                "value",
                value.clone(),
                &Constraints::optional().min_length(min_length),
            )
            .unwrap();
        }

        iterable_value("value", "abcd", &Constraints::required()).unwrap();
        iterable_value("value", json!({"a": 1}), &Constraints::required())
            .unwrap();

        assert_eq!(
            message(iterable_value(
                "value",
                value,
                &Constraints::optional().min_length(5),
            )),
            "Error-Min-Len | The parameter 'value' must have a minimum length of 5, found 4."
        );

        assert_eq!(
            message(iterable_value("value", 4, &Constraints::optional())),
            "Error-Type | Expected the parameter 'value' to be None or of type Iterable, found Integer."
        );
    }

    #[test]
    fn test_min_length_ignored_for_scalars() {
        integer_value("value", 1, &Constraints::optional().min_length(5))
            .unwrap();
    }
}
