use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "MedReport";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL_ID: &str = "moonshotai/kimi-vl-a3b-thinking:free";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Upload limits per analysis request.
pub const MAX_UPLOAD_FILES: usize = 6;
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Tracing filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "medreport_lib=info,medreport=info,tower_http=warn"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration, read once at startup and passed down explicitly.
#[derive(Clone)]
pub struct AnalyzerConfig {
    /// `None` keeps the server up; `/analyze` then answers 500.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model_id: String,
    pub bind_addr: IpAddr,
    pub port: u16,
    pub request_timeout: Duration,
    /// Served under `/static` when set.
    pub static_dir: Option<PathBuf>,
    pub max_files: usize,
    pub max_file_bytes: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            static_dir: None,
            max_files: MAX_UPLOAD_FILES,
            max_file_bytes: MAX_FILE_BYTES,
        }
    }
}

impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model_id", &self.model_id)
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field("request_timeout", &self.request_timeout)
            .field("static_dir", &self.static_dir)
            .field("max_files", &self.max_files)
            .field("max_file_bytes", &self.max_file_bytes)
            .finish()
    }
}

impl AnalyzerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Ok(Self {
            api_key: get("OPENROUTER_API_KEY"),
            base_url: get("OPENROUTER_BASE_URL").unwrap_or(defaults.base_url),
            model_id: get("MEDREPORT_MODEL").unwrap_or(defaults.model_id),
            bind_addr: parse_or("MEDREPORT_BIND", get("MEDREPORT_BIND"), defaults.bind_addr)?,
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            request_timeout: Duration::from_secs(parse_or(
                "MEDREPORT_TIMEOUT_SECS",
                get("MEDREPORT_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT_SECS,
            )?),
            static_dir: get("MEDREPORT_STATIC_DIR").map(PathBuf::from),
            max_files: defaults.max_files,
            max_file_bytes: defaults.max_file_bytes,
        })
    }

    /// Largest request body accepted: every file at its limit, plus
    /// headroom for form fields and multipart framing.
    pub fn body_limit(&self) -> usize {
        self.max_files * self.max_file_bytes + 1024 * 1024
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}
