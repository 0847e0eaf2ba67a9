// Configuration management module
// Resolves the explicit configuration bundle once at startup from the environment

pub mod settings;

pub use settings::{Config, ConfigError, DatabaseConfig, OllamaConfig, QdrantConfig, SslMode};
