//! Routes a decoded [`Operation`] to its kernel or to the AI provider.

use std::time::Instant;

use anyhow::Context;

use super::math::{self, MathError};
use super::metrics;
use super::providers::{first_word, TextProvider};
use crate::error::BfhlError;
use crate::models::{Numeric, Operand, Operation, Payload};

/// Run one operation and produce its payload.
pub async fn execute(
    operation: Operation,
    provider: &dyn TextProvider,
    max_fibonacci_terms: usize,
) -> Result<Payload, BfhlError> {
    match operation {
        Operation::Fibonacci(n) => Ok(Payload::Sequence(math::fibonacci(n, max_fibonacci_terms)?)),
        Operation::Prime(values) => filter_primes(values).await.map(Payload::Operands),
        Operation::Lcm(values) => reduce(values, math::lcm),
        Operation::Hcf(values) => reduce(values, math::hcf),
        Operation::Ai(prompt) => ask(provider, &prompt).await.map(Payload::Word),
    }
}

/// Trial division on large candidates takes long enough to stall the
/// runtime, so the filter runs on the blocking pool.
async fn filter_primes(values: Vec<Operand>) -> Result<Vec<Operand>, BfhlError> {
    let kept = tokio::task::spawn_blocking(move || {
        let mut kept = Vec::new();
        for operand in values {
            if math::is_prime(operand.number().value())? {
                kept.push(operand);
            }
        }
        Ok::<_, MathError>(kept)
    })
    .await
    .context("prime filter task failed")
    .map_err(BfhlError::Internal)??;

    Ok(kept)
}

/// A single element is returned as supplied, without arithmetic.
fn reduce(
    values: Vec<Operand>,
    kernel: fn(&[Numeric]) -> Result<Numeric, MathError>,
) -> Result<Payload, BfhlError> {
    if let [only] = values.as_slice() {
        return Ok(Payload::Operand(only.clone()));
    }
    let numbers: Vec<Numeric> = values.iter().map(Operand::number).collect();
    Ok(Payload::Number(kernel(&numbers)?))
}

/// Ask the provider and keep only the first word of its reply.
async fn ask(provider: &dyn TextProvider, prompt: &str) -> Result<String, BfhlError> {
    let start = Instant::now();
    let result = provider.generate(prompt).await;
    metrics::record_provider_latency(
        provider.name(),
        provider.model(),
        start.elapsed().as_secs_f64(),
    );

    match result {
        Ok(text) => Ok(first_word(&text).to_string()),
        Err(e) => {
            metrics::record_provider_error(provider.name(), e.kind());
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockTextProvider;
    use serde_json::{json, Value};

    const LIMIT: usize = 1_000_000;

    fn nums(values: &[f64]) -> Vec<Numeric> {
        values.iter().copied().map(Numeric).collect()
    }

    fn operands(values: Vec<Value>) -> Vec<Operand> {
        values.into_iter().map(Operand::new).collect()
    }

    fn numeric_operands(values: &[f64]) -> Vec<Operand> {
        operands(values.iter().map(|v| json!(v)).collect())
    }

    async fn run(operation: Operation) -> Result<Payload, BfhlError> {
        execute(operation, &MockTextProvider::replying("unused"), LIMIT).await
    }

    #[tokio::test]
    async fn numeric_operations_use_kernels() {
        let provider = MockTextProvider::replying("unused");

        let fib = execute(Operation::Fibonacci(5), &provider, LIMIT).await.unwrap();
        assert_eq!(fib, Payload::Sequence(nums(&[0.0, 1.0, 1.0, 2.0, 3.0])));

        let primes = execute(
            Operation::Prime(numeric_operands(&[1.0, 2.0, 3.0, 4.0, 5.0, 9.0])),
            &provider,
            LIMIT,
        )
        .await
        .unwrap();
        assert_eq!(primes, Payload::Operands(numeric_operands(&[2.0, 3.0, 5.0])));

        let lcm = execute(Operation::Lcm(numeric_operands(&[4.0, 6.0])), &provider, LIMIT)
            .await
            .unwrap();
        assert_eq!(lcm, Payload::Number(Numeric(12.0)));

        let hcf = execute(Operation::Hcf(numeric_operands(&[12.0, 18.0])), &provider, LIMIT)
            .await
            .unwrap();
        assert_eq!(hcf, Payload::Number(Numeric(6.0)));

        assert!(provider.prompts().is_empty());
    }

    #[tokio::test]
    async fn prime_filter_echoes_coerced_elements() {
        let primes = run(Operation::Prime(operands(vec![
            json!("7"),
            json!(4),
            json!(5),
            json!(null),
            json!(true),
        ])))
        .await
        .unwrap();

        assert_eq!(primes, Payload::Operands(operands(vec![json!("7"), json!(5)])));
    }

    #[tokio::test]
    async fn prime_filter_refuses_infinity() {
        let err = run(Operation::Prime(operands(vec![json!(3), json!("Infinity")])))
            .await
            .unwrap_err();
        assert!(matches!(err, BfhlError::Internal(_)));
    }

    #[tokio::test]
    async fn hcf_and_lcm_coerce_numeric_strings() {
        let hcf = run(Operation::Hcf(operands(vec![json!(12), json!("18")])))
            .await
            .unwrap();
        assert_eq!(hcf, Payload::Number(Numeric(6.0)));

        let lcm = run(Operation::Lcm(operands(vec![json!("4"), json!(6)])))
            .await
            .unwrap();
        assert_eq!(lcm, Payload::Number(Numeric(12.0)));
    }

    #[tokio::test]
    async fn single_element_reduction_returns_it_unchanged() {
        let hcf = run(Operation::Hcf(operands(vec![json!("18")]))).await.unwrap();
        assert_eq!(hcf, Payload::Operand(Operand::new(json!("18"))));
    }

    #[tokio::test]
    async fn non_numeric_reduction_operands_are_internal() {
        let err = run(Operation::Hcf(operands(vec![json!(12), json!("abc")])))
            .await
            .unwrap_err();
        assert!(matches!(err, BfhlError::Internal(_)));
    }

    #[tokio::test]
    async fn fibonacci_above_limit_is_internal() {
        let err = execute(
            Operation::Fibonacci(11),
            &MockTextProvider::replying("unused"),
            10,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, BfhlError::Internal(_)));
    }

    #[tokio::test]
    async fn ai_returns_first_word_of_reply() {
        let provider = MockTextProvider::replying("Paris is the capital of France.");
        let word = execute(Operation::Ai("Capital of France?".into()), &provider, LIMIT)
            .await
            .unwrap();

        assert_eq!(word, Payload::Word("Paris".into()));
        assert_eq!(provider.prompts(), vec!["Capital of France?".to_string()]);
    }

    #[tokio::test]
    async fn provider_failure_is_internal() {
        let provider = MockTextProvider::failing("connection refused");
        let err = execute(Operation::Ai("hi".into()), &provider, LIMIT)
            .await
            .unwrap_err();

        assert!(matches!(err, BfhlError::Internal(_)));
    }

    #[tokio::test]
    async fn non_finite_gcd_is_internal() {
        let err = run(Operation::Lcm(numeric_operands(&[1e200, 1e200, 3.0])))
            .await
            .unwrap_err();

        assert!(matches!(err, BfhlError::Internal(_)));
    }
}
