use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgSslMode};
use tracing::debug;

use crate::config::{DatabaseConfig, SslMode};
use crate::{ReportError, Result};

pub mod models;
pub mod queries;

pub use models::{
    MachineHistory, MachineRow, MaintenanceTicket, PartUsageRow, SparePartUsage, StockLevel,
    StockRow, TicketRow,
};
pub use queries::MachineQueries;

/// Open a brand-new connection to the maintenance database.
///
/// Each call dials the server from scratch: no pooling, no health checks, no
/// retry. The caller owns the connection and must close it when done.
///
/// # Errors
///
/// Returns [`ReportError::Connection`] when the server cannot be reached or
/// authentication fails.
#[inline]
pub async fn open_connection(config: &DatabaseConfig) -> Result<PgConnection> {
    debug!(
        "Connecting to PostgreSQL at {}:{}/{}",
        config.host, config.port, config.database
    );

    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.user)
        .password(&config.password)
        .ssl_mode(ssl_mode(config.sslmode));

    let connection = options.connect().await.map_err(|e| {
        ReportError::Connection(format!("Failed to connect to PostgreSQL database: {}", e))
    })?;

    debug!("Successfully connected to PostgreSQL");
    Ok(connection)
}

const fn ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Allow => PgSslMode::Allow,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
        SslMode::VerifyCa => PgSslMode::VerifyCa,
        SslMode::VerifyFull => PgSslMode::VerifyFull,
    }
}
