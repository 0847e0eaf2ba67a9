use clap::{Parser, Subcommand};
use machine_report::Result;
use machine_report::commands::{check, describe_machine, fetch_machine, show_config};
use machine_report::config::Config;

#[derive(Parser)]
#[command(name = "machine-report")]
#[command(about = "Summarizes a machine's maintenance history with an Ollama-served LLM")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a machine's maintenance history and generate a summary
    Describe {
        /// Identifier of the machine to summarize
        machine_id: i64,
    },
    /// Print the assembled maintenance history as JSON, skipping generation
    Fetch {
        /// Identifier of the machine to fetch
        machine_id: i64,
    },
    /// Verify connectivity to PostgreSQL, Qdrant and Ollama
    Check,
    /// Show the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Describe { machine_id } => {
            describe_machine(&config, machine_id).await?;
        }
        Commands::Fetch { machine_id } => {
            fetch_machine(&config, machine_id).await?;
        }
        Commands::Check => {
            check(&config).await?;
        }
        Commands::Config => {
            show_config(&config);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn cli_parsing() {
        let cli = Cli::try_parse_from(["machine-report", "check"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            matches!(parsed.command, Commands::Check);
        }
    }

    #[test]
    fn describe_command_with_machine_id() {
        let cli = Cli::try_parse_from(["machine-report", "describe", "42"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Describe { machine_id } = parsed.command {
                assert_eq!(machine_id, 42);
            }
        }
    }

    #[test]
    fn fetch_command_with_machine_id() {
        let cli = Cli::try_parse_from(["machine-report", "fetch", "7"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Fetch { machine_id } = parsed.command {
                assert_eq!(machine_id, 7);
            }
        }
    }

    #[test]
    fn describe_requires_machine_id() {
        let cli = Cli::try_parse_from(["machine-report", "describe"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn non_numeric_machine_id_rejected() {
        let cli = Cli::try_parse_from(["machine-report", "describe", "press-7"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn invalid_command() {
        let cli = Cli::try_parse_from(["machine-report", "invalid"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        }
    }

    #[test]
    fn help_message() {
        let cli = Cli::try_parse_from(["machine-report", "--help"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
