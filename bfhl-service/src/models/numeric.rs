use serde::{Serialize, Serializer};
use serde_json::Value;

/// Largest integer a double represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A JSON number carried as an IEEE-754 double.
///
/// Integral values within ±2^53 serialize as JSON integers, other finite
/// values as floats, and NaN/±∞ as `null`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Numeric(pub f64);

impl Numeric {
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_integral(self) -> bool {
        self.0.is_finite() && self.0.fract() == 0.0
    }

    /// Read a JSON value as a number; anything else yields `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        value.as_f64().map(Numeric)
    }

    /// Arithmetic value of any JSON value under JavaScript `ToNumber`:
    /// `null` and `""` are 0, booleans 0/1, numeric strings parse, a one
    /// element array takes its element's value and everything else is NaN.
    pub fn coerce(value: &Value) -> Self {
        Numeric(match value {
            Value::Null => 0.0,
            Value::Bool(flag) => f64::from(u8::from(*flag)),
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(text) => parse_js_number(text),
            Value::Array(items) => match items.as_slice() {
                [] => 0.0,
                // Arrays convert through their comma-joined string form
                [only] => match only {
                    Value::Null => 0.0,
                    Value::Bool(_) | Value::Object(_) => f64::NAN,
                    other => Numeric::coerce(other).0,
                },
                _ => f64::NAN,
            },
            Value::Object(_) => f64::NAN,
        })
    }
}

/// `StringToNumber`: trimmed decimal, `0x`/`0o`/`0b` literals and signed
/// `Infinity`; the empty string is 0.
fn parse_js_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
    }

    let (sign, unsigned) = match text.as_bytes()[0] {
        b'-' => (-1.0, &text[1..]),
        b'+' => (1.0, &text[1..]),
        _ => (1.0, text),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    // Rust also accepts `inf`, `nan` and friends, which JavaScript does not
    if !unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric(value)
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric(value as f64)
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if !v.is_finite() {
            serializer.serialize_none()
        } else if v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER {
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integral_values_serialize_as_integers() {
        assert_eq!(serde_json::to_string(&Numeric(12.0)).unwrap(), "12");
        assert_eq!(serde_json::to_string(&Numeric(-0.0)).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Numeric(-7.0)).unwrap(), "-7");
    }

    #[test]
    fn fractional_values_serialize_as_floats() {
        assert_eq!(serde_json::to_string(&Numeric(7.5)).unwrap(), "7.5");
    }

    #[test]
    fn non_finite_values_serialize_as_null() {
        assert_eq!(serde_json::to_string(&Numeric(f64::INFINITY)).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Numeric(f64::NAN)).unwrap(), "null");
    }

    #[test]
    fn from_json_accepts_only_numbers() {
        assert_eq!(Numeric::from_json(&json!(3)), Some(Numeric(3.0)));
        assert_eq!(Numeric::from_json(&json!(2.5)), Some(Numeric(2.5)));
        assert_eq!(Numeric::from_json(&json!("3")), None);
        assert_eq!(Numeric::from_json(&json!(null)), None);
    }

    #[test]
    fn coerce_follows_to_number() {
        assert_eq!(Numeric::coerce(&json!(18)), Numeric(18.0));
        assert_eq!(Numeric::coerce(&json!("18")), Numeric(18.0));
        assert_eq!(Numeric::coerce(&json!(" 2.5\n")), Numeric(2.5));
        assert_eq!(Numeric::coerce(&json!("-1e3")), Numeric(-1000.0));
        assert_eq!(Numeric::coerce(&json!("0x1A")), Numeric(26.0));
        assert_eq!(Numeric::coerce(&json!("0b101")), Numeric(5.0));
        assert_eq!(Numeric::coerce(&json!("")), Numeric(0.0));
        assert_eq!(Numeric::coerce(&json!(null)), Numeric(0.0));
        assert_eq!(Numeric::coerce(&json!(true)), Numeric(1.0));
        assert_eq!(Numeric::coerce(&json!(false)), Numeric(0.0));
        assert_eq!(Numeric::coerce(&json!([])), Numeric(0.0));
        assert_eq!(Numeric::coerce(&json!(["7"])), Numeric(7.0));
        assert_eq!(Numeric::coerce(&json!([[4]])), Numeric(4.0));
        assert_eq!(Numeric::coerce(&json!("-Infinity")), Numeric(f64::NEG_INFINITY));
    }

    #[test]
    fn coerce_yields_nan_for_non_numeric_values() {
        for value in [
            json!("abc"),
            json!("inf"),
            json!("NaN"),
            json!("1_000"),
            json!("0x"),
            json!("-0x10"),
            json!([1, 2]),
            json!([true]),
            json!({"a": 1}),
        ] {
            assert!(Numeric::coerce(&value).value().is_nan(), "coerced {value}");
        }
    }

    #[test]
    fn integral_check() {
        assert!(Numeric(5.0).is_integral());
        assert!(!Numeric(5.5).is_integral());
        assert!(!Numeric(f64::INFINITY).is_integral());
    }
}
