//! Numeric kernels.
//!
//! All arithmetic is on doubles so fractional and negative inputs follow the
//! literal formulas rather than integer semantics.

use thiserror::Error;

use crate::models::Numeric;

#[derive(Debug, Error, PartialEq)]
pub enum MathError {
    /// Euclid's loop does not terminate on NaN or ±∞.
    #[error("gcd of non-finite operands {0} and {1}")]
    NonFinite(f64, f64),

    #[error("empty sequence")]
    Empty,

    /// Trial division up to `sqrt(∞)` never ends.
    #[error("primality of non-finite value {0}")]
    Unbounded(f64),

    #[error("{requested} fibonacci terms exceed the limit of {limit}")]
    TooManyTerms { requested: usize, limit: usize },
}

/// First `n` Fibonacci terms, starting `0, 1`. Counts above `limit` are
/// refused instead of allocated.
pub fn fibonacci(n: usize, limit: usize) -> Result<Vec<Numeric>, MathError> {
    if n > limit {
        return Err(MathError::TooManyTerms {
            requested: n,
            limit,
        });
    }

    let mut terms: Vec<f64> = Vec::with_capacity(n);
    for i in 0..n {
        let next = match i {
            0 => 0.0,
            1 => 1.0,
            _ => terms[i - 1] + terms[i - 2],
        };
        terms.push(next);
    }
    Ok(terms.into_iter().map(Numeric).collect())
}

/// Greater than 1 with no divisor in `[2, sqrt(x)]`. NaN passes, as no
/// comparison with it holds.
pub fn is_prime(x: f64) -> Result<bool, MathError> {
    if x <= 1.0 {
        return Ok(false);
    }
    if x.is_infinite() {
        return Err(MathError::Unbounded(x));
    }
    let limit = x.sqrt();
    let mut divisor = 2.0;
    while divisor <= limit {
        if x % divisor == 0.0 {
            return Ok(false);
        }
        divisor += 1.0;
    }
    Ok(true)
}

/// Euclid: `gcd(a, 0) = a`, otherwise `gcd(b, a mod b)`.
pub fn gcd(a: f64, b: f64) -> Result<f64, MathError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(MathError::NonFinite(a, b));
    }
    let (mut a, mut b) = (a, b);
    while b != 0.0 {
        (a, b) = (b, a % b);
    }
    Ok(a)
}

/// Left-to-right pairwise gcd reduction.
pub fn hcf(values: &[Numeric]) -> Result<Numeric, MathError> {
    reduce(values, gcd)
}

/// Left-to-right pairwise reduction with `a * b / gcd(a, b)`.
pub fn lcm(values: &[Numeric]) -> Result<Numeric, MathError> {
    reduce(values, |a, b| Ok(a * b / gcd(a, b)?))
}

fn reduce(
    values: &[Numeric],
    step: impl Fn(f64, f64) -> Result<f64, MathError>,
) -> Result<Numeric, MathError> {
    let (first, rest) = values.split_first().ok_or(MathError::Empty)?;
    rest.iter()
        .try_fold(first.value(), |acc, n| step(acc, n.value()))
        .map(Numeric)
}
