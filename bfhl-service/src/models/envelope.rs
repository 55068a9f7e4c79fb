use serde::Serialize;

use super::numeric::Numeric;
use super::operand::Operand;

/// Result carried in `data` of a successful response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Sequence(Vec<Numeric>),
    /// Input elements passed through a filter unchanged.
    Operands(Vec<Operand>),
    Number(Numeric),
    /// A lone input element returned by a one-element reduction.
    Operand(Operand),
    Word(String),
}

/// Uniform response body of every endpoint.
///
/// `data` is present only on success and `error` only on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<'a> {
    pub is_success: bool,
    pub official_email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> Envelope<'a> {
    pub fn success(official_email: &'a str, data: Payload) -> Self {
        Self {
            is_success: true,
            official_email,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(official_email: &'a str, error: impl Into<String>) -> Self {
        Self {
            is_success: false,
            official_email,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Success without a payload, as returned by `/health`.
    pub fn healthy(official_email: &'a str) -> Self {
        Self {
            is_success: true,
            official_email,
            data: None,
            error: None,
        }
    }
}
