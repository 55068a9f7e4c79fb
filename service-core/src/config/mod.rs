use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Port used when neither `PORT` nor `APP__PORT` is set.
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Config {
    /// Load the shared settings.
    ///
    /// Sources, lowest precedence first: `configuration.*` file, `APP__*`
    /// environment variables, then the plain `PORT` variable.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .set_override_option("port", env::var("PORT").ok())?
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Read an environment variable, applying the production strictness rule.
///
/// In production every variable must be set explicitly. Elsewhere the
/// default is used when present; a variable without a default is an error.
pub fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

/// `true` when `ENVIRONMENT=prod`.
pub fn is_production() -> bool {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_env_falls_back_to_default_outside_production() {
        let value = get_env("SERVICE_CORE_TEST_UNSET_WITH_DEFAULT", Some("fallback"), false);
        assert_eq!(value.unwrap(), "fallback");
    }

    #[test]
    fn get_env_without_default_is_an_error() {
        let result = get_env("SERVICE_CORE_TEST_UNSET_NO_DEFAULT", None, false);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn get_env_ignores_default_in_production() {
        let result = get_env("SERVICE_CORE_TEST_UNSET_PROD", Some("fallback"), true);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("required in production"));
    }
}
