use serde::{Serialize, Serializer};
use serde_json::Value;

use super::numeric::Numeric;

/// An array element as supplied by the caller, with its arithmetic value.
///
/// Filtering echoes the element unchanged, so `"7"` stays a string in the
/// output while arithmetic sees 7.
#[derive(Debug, Clone, PartialEq)]
pub struct Operand {
    raw: Value,
    number: Numeric,
}

impl Operand {
    pub fn new(raw: Value) -> Self {
        let number = Numeric::coerce(&raw);
        Self { raw, number }
    }

    pub fn number(&self) -> Numeric {
        self.number
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl From<Value> for Operand {
    fn from(raw: Value) -> Self {
        Operand::new(raw)
    }
}

impl Serialize for Operand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.raw {
            // Numbers go through the integer-preserving form, e.g. `7.0` as `7`
            Value::Number(_) => self.number.serialize(serializer),
            other => other.serialize(serializer),
        }
    }
}
