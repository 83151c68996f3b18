// Runtime configuration, read from the environment with sensible defaults

use std::{env, path::PathBuf, str::FromStr};

use thiserror::Error;

use crate::payment::PaymentConfig;

pub const DB_PATH_VAR: &str = "HOTEL_DB_PATH";
pub const SUCCESS_RATE_VAR: &str = "HOTEL_PAYMENT_SUCCESS_RATE";
pub const DELAY_MS_VAR: &str = "HOTEL_PAYMENT_DELAY_MS";

pub const DEFAULT_DB_PATH: &str = "hotel.json";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub payment: PaymentConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            payment: PaymentConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    // Builds the config from any variable source; unset or blank values keep the default
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(DB_PATH_VAR) {
            config.db_path = PathBuf::from(path.trim());
        }

        if let Some(raw) = get(SUCCESS_RATE_VAR) {
            let rate: f64 = parse_var(SUCCESS_RATE_VAR, &raw)?;
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::InvalidValue {
                    var: SUCCESS_RATE_VAR,
                    value: raw,
                    reason: "must be between 0 and 1".to_string(),
                });
            }
            config.payment.success_rate = rate;
        }

        if let Some(raw) = get(DELAY_MS_VAR) {
            config.payment.delay_ms = parse_var(DELAY_MS_VAR, &raw)?;
        }

        Ok(config)
    }
}

fn parse_var<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
