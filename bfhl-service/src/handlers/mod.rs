//! HTTP handlers for bfhl-service.

pub mod bfhl;
pub mod health;
pub mod metrics;

pub use bfhl::process_bfhl;
pub use health::health_check;
pub use metrics::metrics;
