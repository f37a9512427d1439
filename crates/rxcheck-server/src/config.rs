//! Server configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use rxcheck_core::DEFAULT_MATCH_THRESHOLD;
use thiserror::Error;

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_API_TOKEN: &str = "RXCHECK_API_TOKEN";
pub const ENV_BIND: &str = "RXCHECK_BIND";
pub const ENV_INTERACTIONS_CSV: &str = "RXCHECK_INTERACTIONS_CSV";
pub const ENV_DOSAGE_CSV: &str = "RXCHECK_DOSAGE_CSV";
pub const ENV_LLM_URL: &str = "RXCHECK_LLM_URL";
pub const ENV_LLM_MODEL: &str = "RXCHECK_LLM_MODEL";
pub const ENV_OCR_MODEL: &str = "RXCHECK_OCR_MODEL";
pub const ENV_LLM_TIMEOUT_SECS: &str = "RXCHECK_LLM_TIMEOUT_SECS";
pub const ENV_MATCH_THRESHOLD: &str = "RXCHECK_MATCH_THRESHOLD";

const DEFAULT_BIND: &str = "127.0.0.1:7860";
const DEFAULT_INTERACTIONS_CSV: &str = "db_drug_interactions.csv";
const DEFAULT_DOSAGE_CSV: &str = "age_dosage_data.csv";
const DEFAULT_LLM_URL: &str = "http://localhost:11434";
const DEFAULT_LLM_MODEL: &str = "granite3.3:2b";
const DEFAULT_OCR_MODEL: &str = "llama3.2-vision";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 300;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,rxcheck=debug"
}

/// Configuration errors. All of them are fatal at startup.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set; the generation service requires an API token")]
    MissingToken(&'static str),

    #[error("Invalid value for {name}: {value:?} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_token: String,
    pub bind: SocketAddr,
    pub interactions_csv: PathBuf,
    pub dosage_csv: PathBuf,
    pub llm_url: String,
    pub llm_model: String,
    pub ocr_model: String,
    pub llm_timeout_secs: u64,
    pub match_threshold: u8,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let or_default = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let api_token = get(ENV_API_TOKEN).ok_or(ConfigError::MissingToken(ENV_API_TOKEN))?;

        let bind_raw = or_default(ENV_BIND, DEFAULT_BIND);
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| invalid(ENV_BIND, &bind_raw, e))?;

        let llm_timeout_secs = match get(ENV_LLM_TIMEOUT_SECS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => return Err(invalid(ENV_LLM_TIMEOUT_SECS, &raw, "must be positive")),
                Ok(secs) => secs,
                Err(e) => return Err(invalid(ENV_LLM_TIMEOUT_SECS, &raw, e)),
            },
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };

        let match_threshold = match get(ENV_MATCH_THRESHOLD) {
            Some(raw) => match raw.trim().parse::<u8>() {
                Ok(t) if t <= 100 => t,
                Ok(_) => return Err(invalid(ENV_MATCH_THRESHOLD, &raw, "must be 0 - 100")),
                Err(e) => return Err(invalid(ENV_MATCH_THRESHOLD, &raw, e)),
            },
            None => DEFAULT_MATCH_THRESHOLD,
        };

        Ok(Self {
            api_token,
            bind,
            interactions_csv: PathBuf::from(or_default(ENV_INTERACTIONS_CSV, DEFAULT_INTERACTIONS_CSV)),
            dosage_csv: PathBuf::from(or_default(ENV_DOSAGE_CSV, DEFAULT_DOSAGE_CSV)),
            llm_url: or_default(ENV_LLM_URL, DEFAULT_LLM_URL),
            llm_model: or_default(ENV_LLM_MODEL, DEFAULT_LLM_MODEL),
            ocr_model: or_default(ENV_OCR_MODEL, DEFAULT_OCR_MODEL),
            llm_timeout_secs,
            match_threshold,
        })
    }
}

fn invalid(name: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
