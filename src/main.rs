//! tripdesk - Content API and chatbot for a travel agency website.

use std::future::Future;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tripdesk::chatbot::{self, ChatbotError, TrainingSource};
use tripdesk::config::{AppConfig, ConfigError, ConfigLoader};
use tripdesk::server::{ApiServer, AppState, ServerError};
use tripdesk::store::{ContentStore, StoreError};

#[derive(Parser)]
#[command(
    name = "tripdesk",
    about = "Content API and chatbot for a travel agency website",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of the default search paths.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DatabaseArgs {
    /// Path to the content database.
    #[arg(long, env = "TRIPDESK_DATABASE")]
    database: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API until interrupted.
    Serve {
        /// Host address to bind to.
        #[arg(long, env = "TRIPDESK_HOST")]
        host: Option<String>,
        /// Port to listen on.
        #[arg(long, env = "TRIPDESK_PORT")]
        port: Option<u16>,
        #[command(flatten)]
        db: DatabaseArgs,
    },
    /// Ask the chatbot a question and print its answer.
    Ask {
        /// The visitor's message.
        message: String,
        #[command(flatten)]
        db: DatabaseArgs,
    },
    /// Print the chatbot training table as JSON.
    Training {
        #[command(flatten)]
        db: DatabaseArgs,
    },
    /// Execute a SQL script against the content database.
    Seed {
        /// SQL file to run.
        file: PathBuf,
        #[command(flatten)]
        db: DatabaseArgs,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error(transparent)]
    Chatbot(#[from] ChatbotError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn load_config(path: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    ConfigLoader::from_cli(path).load()
}

async fn open_store(config: &AppConfig, db: DatabaseArgs) -> Result<ContentStore, StoreError> {
    let path = db
        .database
        .unwrap_or_else(|| config.database.resolved_path());
    ContentStore::open(path).await
}

/// Cancel `token` once `signal` fires. A listener that fails to install
/// leaves the server running.
async fn cancel_on_signal<F>(signal: F, token: CancellationToken)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            tracing::info!("Received Ctrl-C");
            token.cancel();
        }
        Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl-C"),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(cli.config)?;

    match cli.command {
        Commands::Serve { host, port, db } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let store = open_store(&config, db).await?;
            let state = AppState::with_site(store, config.site.clone());

            let cancel = CancellationToken::new();
            let shutdown = cancel.clone();
            tokio::spawn(cancel_on_signal(tokio::signal::ctrl_c(), shutdown));

            ApiServer::new(state)
                .with_config(config.server)
                .run(cancel)
                .await?;
        }
        Commands::Ask { message, db } => {
            let store = open_store(&config, db).await?;
            let reply = chatbot::answer(&store, Some(&message)).await?;
            println!("{reply}");
        }
        Commands::Training { db } => {
            let store = open_store(&config, db).await?;
            let entries = store.load_training_table().await?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        Commands::Seed { file, db } => {
            let store = open_store(&config, db).await?;
            store.run_script_file(&file).await?;
            tracing::info!(file = %file.display(), "Seed script applied");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "tripdesk failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_cancels_token() {
        let token = CancellationToken::new();
        cancel_on_signal(async { Ok(()) }, token.clone()).await;
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_signal_error_keeps_running() {
        let token = CancellationToken::new();
        let failed = async { Err(std::io::Error::other("no signal handler")) };
        cancel_on_signal(failed, token.clone()).await;
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let err = load_config(Some(PathBuf::from("/nonexistent/tripdesk.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
