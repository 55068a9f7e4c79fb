//! Prometheus metrics for bfhl-service.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

/// Registry and the collectors registered in it.
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    provider_latency_seconds: HistogramVec,
    provider_errors_total: IntCounterVec,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

impl Metrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("bfhl_requests_total", "Total /bfhl requests by outcome"),
            &["operation", "outcome"], // outcome: success, invalid, error
        )?;

        let provider_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "genai_provider_latency_seconds",
                "AI provider API latency in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]),
            &["provider", "model"],
        )?;

        let provider_errors_total = IntCounterVec::new(
            Opts::new("genai_provider_errors_total", "Total AI provider errors"),
            &["provider", "error_type"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(provider_latency_seconds.clone()))?;
        registry.register(Box::new(provider_errors_total.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            provider_latency_seconds,
            provider_errors_total,
        })
    }
}

/// Initialize all metrics. Call once at startup; later calls are ignored.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    if METRICS.get().is_some() {
        return Ok(());
    }
    // A concurrent initializer may win the race; either instance is complete.
    let _ = METRICS.set(Metrics::new()?);

    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let registry = match METRICS.get() {
        Some(m) => &m.registry,
        None => return "# Metrics registry not initialized\n".to_string(),
    };

    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
        format!("# Failed to convert metrics to UTF-8: {}\n", e)
    })
}

// Helper functions for recording metrics

/// Record a finished `/bfhl` request.
pub fn record_request(operation: &str, outcome: &str) {
    if let Some(m) = METRICS.get() {
        m.requests_total
            .with_label_values(&[operation, outcome])
            .inc();
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(m) = METRICS.get() {
        m.provider_latency_seconds
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(m) = METRICS.get() {
        m.provider_errors_total
            .with_label_values(&[provider, error_type])
            .inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_requests_show_up_in_exposition() {
        init_metrics().unwrap();
        record_request("fibonacci", "success");
        record_provider_error("gemini", "network");

        let text = get_metrics();
        assert!(text.contains("bfhl_requests_total{operation=\"fibonacci\",outcome=\"success\"}"));
        assert!(text.contains("genai_provider_errors_total"));
    }

    #[test]
    fn init_is_idempotent() {
        init_metrics().unwrap();
        init_metrics().unwrap();
    }
}
