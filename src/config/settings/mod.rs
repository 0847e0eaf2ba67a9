
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:7869";
pub const DEFAULT_OLLAMA_MODEL: &str = "gemma3";
pub const DEFAULT_GENERATION_TIMEOUT_SECONDS: u64 = 10 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub qdrant: QdrantConfig,
    pub ollama: OllamaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub sslmode: SslMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    Disable,
    Allow,
    #[default]
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QdrantConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub https: bool,
    pub timeout_seconds: u64,
    pub grpc_port: Option<u16>,
    pub prefer_grpc: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for QdrantConfig {
    #[inline]
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 6333,
            api_key: None,
            https: false,
            timeout_seconds: 60,
            grpc_port: None,
            prefer_grpc: false,
        }
    }
}

impl Default for OllamaConfig {
    #[inline]
    fn default() -> Self {
        Self {
            url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            timeout_seconds: DEFAULT_GENERATION_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingRequired(&'static str),
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
    #[error("Invalid SSL mode: {0} (must be one of disable, allow, prefer, require, verify-ca, verify-full)")]
    InvalidSslMode(String),
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
    #[error("Invalid port: {0} (must be between 1 and 65535)")]
    InvalidPort(u16),
    #[error("Invalid model name: {0} (cannot be empty)")]
    InvalidModel(String),
    #[error("Invalid timeout: {0} (must be at least 1 second)")]
    InvalidTimeout(u64),
}

impl Config {
    /// Resolve the full configuration from the process environment.
    #[inline]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve the configuration from an arbitrary variable source.
    ///
    /// Tests pass a closure over a synthetic map instead of touching the
    /// process environment.
    #[inline]
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            database: DatabaseConfig::from_lookup(&lookup)?,
            qdrant: QdrantConfig::from_lookup(&lookup)?,
            ollama: OllamaConfig::from_lookup(&lookup)?,
        };

        config.validate()?;
        Ok(config)
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.qdrant.validate()?;
        self.ollama.validate()?;
        Ok(())
    }
}

impl DatabaseConfig {
    #[inline]
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sslmode = match optional(lookup, "DB_SSLMODE") {
            Some(raw) => raw.parse()?,
            None => SslMode::default(),
        };

        Ok(Self {
            host: optional(lookup, "DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_or(lookup, "DB_PORT", 5432)?,
            database: required(lookup, "DB_NAME")?,
            user: required(lookup, "DB_USER")?,
            password: required(lookup, "DB_PASSWORD")?,
            sslmode,
        })
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }
        Ok(())
    }
}

impl QdrantConfig {
    #[inline]
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            url: optional(lookup, "QDRANT_URL"),
            host: optional(lookup, "QDRANT_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_or(lookup, "QDRANT_PORT", 6333)?,
            api_key: optional(lookup, "QDRANT_API_KEY"),
            https: flag(lookup, "QDRANT_HTTPS"),
            timeout_seconds: parse_or(lookup, "QDRANT_TIMEOUT", 60)?,
            grpc_port: parse_optional(lookup, "QDRANT_GRPC_PORT")?,
            prefer_grpc: flag(lookup, "QDRANT_PREFER_GRPC"),
        })
    }

    /// Resolve the endpoint the vector client should dial.
    ///
    /// An explicit URL wins over host/port; a preferred gRPC port wins over
    /// the HTTP port when both are configured.
    #[inline]
    pub fn effective_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let scheme = if self.https { "https" } else { "http" };
        match (self.prefer_grpc, self.grpc_port) {
            (true, Some(grpc_port)) => format!("{}://{}:{}", scheme, self.host, grpc_port),
            _ => format!("{}://{}:{}", scheme, self.host, self.port),
        }
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_none() && self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout(self.timeout_seconds));
        }

        if let Some(url) = &self.url {
            Url::parse(url).map_err(|_| ConfigError::InvalidUrl(url.clone()))?;
        }

        Ok(())
    }
}

impl OllamaConfig {
    #[inline]
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            url: optional(lookup, "OLLAMA_URI").unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            model: optional(lookup, "OLLAMA_MODEL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            timeout_seconds: parse_or(lookup, "OLLAMA_TIMEOUT", DEFAULT_GENERATION_TIMEOUT_SECONDS)?,
        })
    }

    #[inline]
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.url).map_err(|_| ConfigError::InvalidUrl(self.url.clone()))
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;

        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidModel(self.model.clone()));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout(self.timeout_seconds));
        }

        Ok(())
    }
}

impl FromStr for SslMode {
    type Err = ConfigError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "allow" => Ok(SslMode::Allow),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            "verify-ca" => Ok(SslMode::VerifyCa),
            "verify-full" => Ok(SslMode::VerifyFull),
            _ => Err(ConfigError::InvalidSslMode(s.to_string())),
        }
    }
}

impl fmt::Display for SslMode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SslMode::Disable => write!(f, "disable"),
            SslMode::Allow => write!(f, "allow"),
            SslMode::Prefer => write!(f, "prefer"),
            SslMode::Require => write!(f, "require"),
            SslMode::VerifyCa => write!(f, "verify-ca"),
            SslMode::VerifyFull => write!(f, "verify-full"),
        }
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, var).ok_or(ConfigError::MissingRequired(var))
}

fn optional<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).filter(|value| !value.trim().is_empty())
}

fn parse_or<T, F>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
        None => Ok(default),
    }
}

fn parse_optional<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match optional(lookup, var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
        None => Ok(None),
    }
}

// Only a literal "true" (any case) enables a flag; anything else disables it.
fn flag<F>(lookup: &F, var: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, var).is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}
