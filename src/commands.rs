use tracing::{error, info};

use crate::config::{Config, DatabaseConfig, OllamaConfig, QdrantConfig};
use crate::database::{postgres, qdrant};
use crate::generation::OllamaClient;
use crate::history;
use crate::pipeline::SummaryPipeline;
use crate::{ReportError, Result};

/// Run the full pipeline for one machine and print the generated summary
#[inline]
pub async fn describe_machine(config: &Config, machine_id: i64) -> Result<()> {
    info!("Generating maintenance summary for machine {}", machine_id);

    let pipeline = SummaryPipeline::new(config);
    match pipeline.run(machine_id).await? {
        Some(summary) => println!("{}", summary),
        None => println!("Machine {} not found", machine_id),
    }

    Ok(())
}

/// Print the assembled maintenance history as JSON, skipping generation
#[inline]
pub async fn fetch_machine(config: &Config, machine_id: i64) -> Result<()> {
    match history::fetch_machine_history(&config.database, machine_id).await? {
        Some(machine) => {
            let json = serde_json::to_string_pretty(&machine)
                .map_err(|e| ReportError::Other(e.into()))?;
            println!("{}", json);
        }
        None => println!("Machine {} not found", machine_id),
    }

    Ok(())
}

/// Verify connectivity to all three backends
#[inline]
pub async fn check(config: &Config) -> Result<()> {
    let mut failures = 0;

    match check_postgres(&config.database).await {
        Ok(version) => println!("PostgreSQL: ok ({})", version),
        Err(e) => {
            failures += 1;
            error!("PostgreSQL check failed: {}", e);
            println!("PostgreSQL: failed ({})", e);
        }
    }

    match check_qdrant(&config.qdrant).await {
        Ok(info) => println!("Qdrant: ok ({})", info),
        Err(e) => {
            failures += 1;
            error!("Qdrant check failed: {}", e);
            println!("Qdrant: failed ({})", e);
        }
    }

    match check_ollama(&config.ollama) {
        Ok(()) => println!("Ollama: ok (model {})", config.ollama.model),
        Err(e) => {
            failures += 1;
            error!("Ollama check failed: {}", e);
            println!("Ollama: failed ({})", e);
        }
    }

    if failures > 0 {
        return Err(ReportError::Connection(format!(
            "{} connectivity check(s) failed",
            failures
        )));
    }

    Ok(())
}

async fn check_postgres(config: &DatabaseConfig) -> Result<String> {
    use sqlx::Connection;

    let mut conn = postgres::open_connection(config).await?;
    let row: (String,) = sqlx::query_as("SELECT version()")
        .fetch_one(&mut conn)
        .await?;

    let _ = conn.close().await;
    Ok(row.0)
}

async fn check_qdrant(config: &QdrantConfig) -> Result<String> {
    let client = qdrant::connect(config)?;
    let reply = client
        .health_check()
        .await
        .map_err(|e| ReportError::Connection(format!("Failed to reach Qdrant: {}", e)))?;

    Ok(format!("{} {}", reply.title, reply.version))
}

fn check_ollama(config: &OllamaConfig) -> Result<()> {
    OllamaClient::new(config)?.health_check()
}

/// Show the resolved configuration with the password masked
#[inline]
pub fn show_config(config: &Config) {
    println!("Database:");
    println!("  Host: {}", config.database.host);
    println!("  Port: {}", config.database.port);
    println!("  Name: {}", config.database.database);
    println!("  User: {}", config.database.user);
    println!("  Password: ********");
    println!("  SSL mode: {}", config.database.sslmode);
    println!();

    println!("Qdrant:");
    println!("  Endpoint: {}", config.qdrant.effective_url());
    println!(
        "  API key: {}",
        if config.qdrant.api_key.is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    println!("  Timeout: {}s", config.qdrant.timeout_seconds);
    println!();

    println!("Ollama:");
    println!("  URL: {}", config.ollama.url);
    println!("  Model: {}", config.ollama.model);
    println!("  Timeout: {}s", config.ollama.timeout_seconds);
}
