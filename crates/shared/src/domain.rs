use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::InvalidInput;

/// Number of package-size inputs on the order form.
pub const PACKAGE_SLOTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    Amount,
    /// Zero-based slot index.
    PackageSize(usize),
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderField::Amount => write!(f, "order amount"),
            OrderField::PackageSize(index) => write!(f, "package size {}", index + 1),
        }
    }
}

/// What to put on the wire when a form field does not parse as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidNumberPolicy {
    #[default]
    Reject,
    /// Send the field as JSON `null`.
    SendNull,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericField {
    Valid(Number),
    Invalid(OrderField),
}

impl NumericField {
    pub fn is_valid(&self) -> bool {
        matches!(self, NumericField::Valid(_))
    }

    pub fn into_wire(self, policy: InvalidNumberPolicy) -> Result<Option<Number>, InvalidInput> {
        match (self, policy) {
            (NumericField::Valid(number), _) => Ok(Some(number)),
            (NumericField::Invalid(_), InvalidNumberPolicy::SendNull) => Ok(None),
            (NumericField::Invalid(field), InvalidNumberPolicy::Reject) => {
                Err(InvalidInput { field })
            }
        }
    }
}

/// Parses one raw form value. Surrounding whitespace is ignored. Whole values
/// go on the wire as integers however they were written ("10.0", "1e3"), since
/// the service decodes them into ints; only fractional values stay floats.
pub fn parse_numeric(field: OrderField, raw: &str) -> NumericField {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NumericField::Invalid(field);
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return NumericField::Valid(Number::from(value));
    }
    let Some(value) = trimmed.parse::<f64>().ok().filter(|v| v.is_finite()) else {
        return NumericField::Invalid(field);
    };
    if let Some(whole) = as_whole_i64(value) {
        return NumericField::Valid(Number::from(whole));
    }
    match Number::from_f64(value) {
        Some(number) => NumericField::Valid(number),
        None => NumericField::Invalid(field),
    }
}

// 2^63 is exact in f64; anything at or above it does not fit in an i64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn as_whole_i64(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&value)).then(|| value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_keep_integer_representation() {
        let parsed = parse_numeric(OrderField::Amount, " 10 ");
        assert_eq!(parsed, NumericField::Valid(Number::from(10)));
        assert_eq!(
            serde_json::to_string(&parsed.into_wire(InvalidNumberPolicy::Reject).unwrap())
                .unwrap(),
            "10"
        );
    }

    #[test]
    fn fractional_values_are_accepted() {
        let parsed = parse_numeric(OrderField::PackageSize(0), "2.5");
        assert!(parsed.is_valid());
        assert_eq!(
            serde_json::to_string(&parsed.into_wire(InvalidNumberPolicy::Reject).unwrap())
                .unwrap(),
            "2.5"
        );
    }

    #[test]
    fn whole_values_in_float_notation_go_out_as_integers() {
        for (raw, wire) in [("10.0", "10"), ("1e3", "1000"), ("5.", "5"), ("-2.0", "-2")] {
            let parsed = parse_numeric(OrderField::Amount, raw);
            assert_eq!(parsed, NumericField::Valid(Number::from(wire.parse::<i64>().unwrap())));
            let encoded =
                serde_json::to_string(&parsed.into_wire(InvalidNumberPolicy::Reject).unwrap())
                    .unwrap();
            assert_eq!(encoded, wire, "input {raw:?}");
        }
    }

    #[test]
    fn whole_values_beyond_i64_stay_floats() {
        let parsed = parse_numeric(OrderField::Amount, "1e19");
        let NumericField::Valid(number) = parsed else {
            panic!("1e19 is a finite number");
        };
        assert!(number.is_f64());
    }

    #[test]
    fn empty_and_non_numeric_input_is_invalid() {
        for raw in ["", "   ", "abc", "NaN", "inf", "12abc"] {
            assert_eq!(
                parse_numeric(OrderField::PackageSize(3), raw),
                NumericField::Invalid(OrderField::PackageSize(3)),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn invalid_policy_decides_wire_value() {
        let field = OrderField::PackageSize(1);
        let invalid = NumericField::Invalid(field);
        assert_eq!(
            invalid.clone().into_wire(InvalidNumberPolicy::SendNull),
            Ok(None)
        );
        let err = invalid
            .into_wire(InvalidNumberPolicy::Reject)
            .expect_err("reject policy");
        assert_eq!(err.to_string(), "Invalid input in package size 2");
    }
}
