//! Decoding of the single-key request body into a typed operation.

use serde_json::{Map, Value};

use super::numeric::Numeric;
use super::operand::Operand;
use crate::error::BfhlError;

pub const FIBONACCI_KEY: &str = "fibonacci";
pub const PRIME_KEY: &str = "prime";
pub const LCM_KEY: &str = "lcm";
pub const HCF_KEY: &str = "hcf";
pub const AI_KEY: &str = "AI";

/// A validated `/bfhl` request.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Number of terms to generate.
    Fibonacci(usize),
    /// Elements in input order, of any JSON type.
    Prime(Vec<Operand>),
    /// Non-empty.
    Lcm(Vec<Operand>),
    /// Non-empty.
    Hcf(Vec<Operand>),
    Ai(String),
}

impl Operation {
    /// Decode a parsed JSON body.
    ///
    /// The key count is checked before the key itself; a body that is not an
    /// object has no countable keys and fails the same way. Array elements
    /// are not type-checked; arithmetic coerces them.
    pub fn from_body(body: &Value) -> Result<Self, BfhlError> {
        let object = body.as_object().ok_or(BfhlError::KeyCount)?;
        let (key, value) = single_entry(object)?;

        match key.as_str() {
            FIBONACCI_KEY => decode_fibonacci(value),
            PRIME_KEY => value
                .as_array()
                .map(|items| Operation::Prime(operands(items)))
                .ok_or(BfhlError::InvalidPrimeInput),
            LCM_KEY => decode_non_empty(value)
                .map(Operation::Lcm)
                .ok_or(BfhlError::InvalidLcmInput),
            HCF_KEY => decode_non_empty(value)
                .map(Operation::Hcf)
                .ok_or(BfhlError::InvalidHcfInput),
            AI_KEY => value
                .as_str()
                .map(|prompt| Operation::Ai(prompt.to_string()))
                .ok_or(BfhlError::InvalidAiInput),
            _ => Err(BfhlError::InvalidKey),
        }
    }

    /// Request key this operation was decoded from.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Fibonacci(_) => FIBONACCI_KEY,
            Operation::Prime(_) => PRIME_KEY,
            Operation::Lcm(_) => LCM_KEY,
            Operation::Hcf(_) => HCF_KEY,
            Operation::Ai(_) => AI_KEY,
        }
    }
}

fn single_entry(object: &Map<String, Value>) -> Result<(&String, &Value), BfhlError> {
    let mut entries = object.iter();
    match (entries.next(), entries.next()) {
        (Some(entry), None) => Ok(entry),
        _ => Err(BfhlError::KeyCount),
    }
}

/// Counts past `usize::MAX` saturate; the term limit rejects them later.
fn decode_fibonacci(value: &Value) -> Result<Operation, BfhlError> {
    Numeric::from_json(value)
        .filter(|n| n.is_integral() && n.value() >= 0.0)
        .map(|n| Operation::Fibonacci(n.value() as usize))
        .ok_or(BfhlError::InvalidFibonacciInput)
}

/// Non-empty array, or `None`.
fn decode_non_empty(value: &Value) -> Option<Vec<Operand>> {
    value
        .as_array()
        .filter(|items| !items.is_empty())
        .map(|items| operands(items))
}

fn operands(items: &[Value]) -> Vec<Operand> {
    items.iter().cloned().map(Operand::new).collect()
}
