use axum::http::StatusCode;
use thiserror::Error;

use crate::services::math::MathError;
use crate::services::providers::ProviderError;

/// Failure of a single `/bfhl` request.
///
/// Validation variants carry the exact client-facing message. `Internal`
/// keeps its cause for logging but always displays the generic message.
#[derive(Debug, Error)]
pub enum BfhlError {
    #[error("Exactly one key required")]
    KeyCount,

    #[error("Invalid key")]
    InvalidKey,

    #[error("Invalid Fibonacci input")]
    InvalidFibonacciInput,

    #[error("Invalid Prime input")]
    InvalidPrimeInput,

    #[error("Invalid LCM input")]
    InvalidLcmInput,

    #[error("Invalid HCF input")]
    InvalidHcfInput,

    #[error("Invalid AI input")]
    InvalidAiInput,

    #[error("Invalid JSON body")]
    MalformedBody,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl BfhlError {
    pub fn status(&self) -> StatusCode {
        match self {
            BfhlError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn is_validation(&self) -> bool {
        !matches!(self, BfhlError::Internal(_))
    }
}

impl From<ProviderError> for BfhlError {
    fn from(err: ProviderError) -> Self {
        BfhlError::Internal(anyhow::Error::new(err))
    }
}

impl From<MathError> for BfhlError {
    fn from(err: MathError) -> Self {
        BfhlError::Internal(anyhow::Error::new(err))
    }
}
