use service_core::config::{self as core_config, get_env, is_production};
use service_core::error::AppError;

/// Gemini REST endpoint used when `GEMINI_API_BASE` is not set.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 30;
/// Bounds the allocation of a single `fibonacci` reply.
const DEFAULT_MAX_FIBONACCI_TERMS: usize = 1_000_000;
/// Matches the common 100 KiB JSON body limit of web frameworks.
const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024;

#[derive(Debug, Clone)]
pub struct BfhlConfig {
    pub common: core_config::Config,
    /// Contact address echoed in every response envelope.
    pub official_email: String,
    pub gemini: GeminiSettings,
    pub limits: LimitsConfig,
    pub cors: CorsConfig,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Largest `fibonacci` count served; larger counts fail as internal errors.
    pub max_fibonacci_terms: usize,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl BfhlConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = is_production();

        Ok(BfhlConfig {
            common: common_config,
            official_email: get_env("OFFICIAL_EMAIL", Some(""), is_prod)?,
            gemini: GeminiSettings {
                api_key: get_env("GEMINI_API_KEY", Some(""), is_prod)?,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), false)?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), false)?,
                timeout_secs: parse_or(
                    std::env::var("GEMINI_TIMEOUT_SECS").ok(),
                    DEFAULT_GEMINI_TIMEOUT_SECS,
                ),
            },
            limits: LimitsConfig {
                max_fibonacci_terms: parse_or(
                    std::env::var("BFHL_MAX_FIBONACCI_TERMS").ok(),
                    DEFAULT_MAX_FIBONACCI_TERMS,
                ),
                max_body_bytes: parse_or(
                    std::env::var("BFHL_MAX_BODY_BYTES").ok(),
                    DEFAULT_MAX_BODY_BYTES,
                ),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("ALLOWED_ORIGINS")
                    .map(|v| split_origins(&v))
                    .unwrap_or_default(),
            },
            otlp_endpoint: std::env::var("OTLP_ENDPOINT")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        })
    }

    /// Configuration with built-in defaults and the given email; no
    /// environment access. Port 0 binds a random port.
    pub fn with_email(official_email: impl Into<String>) -> Self {
        BfhlConfig {
            common: core_config::Config { port: 0 },
            official_email: official_email.into(),
            gemini: GeminiSettings {
                api_key: String::new(),
                model: DEFAULT_GEMINI_MODEL.to_string(),
                api_base: DEFAULT_GEMINI_API_BASE.to_string(),
                timeout_secs: DEFAULT_GEMINI_TIMEOUT_SECS,
            },
            limits: LimitsConfig {
                max_fibonacci_terms: DEFAULT_MAX_FIBONACCI_TERMS,
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            },
            cors: CorsConfig::default(),
            otlp_endpoint: None,
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
