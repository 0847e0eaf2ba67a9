
use qdrant_client::Qdrant;
use std::time::Duration;
use tracing::debug;

use crate::config::QdrantConfig;
use crate::{ReportError, Result};

/// Build a fresh Qdrant client for the configured endpoint.
///
/// Like the relational factory this hands out a brand-new client per call:
/// no pooling, no retry. The compatibility probe is skipped so construction
/// stays offline; the first real operation surfaces connectivity errors.
///
/// # Errors
///
/// Returns [`ReportError::Connection`] when the endpoint cannot be turned
/// into a client (for example a malformed URL).
#[inline]
pub fn connect(config: &QdrantConfig) -> Result<Qdrant> {
    let url = config.effective_url();
    debug!("Creating Qdrant client for {}", url);

    let mut builder = Qdrant::from_url(&url)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .skip_compatibility_check();

    if let Some(api_key) = &config.api_key {
        builder = builder.api_key(api_key.clone());
    }

    builder.build().map_err(|e| {
        ReportError::Connection(format!("Failed to connect to Qdrant database: {}", e))
    })
}
