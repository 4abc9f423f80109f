//! Cardshop CLI - Browse the card catalog and manage your bag from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Create an account, then log in (opens the menu)
//! cardshop signup -n "Ash" -e ash@example.com
//! cardshop login -e ash@example.com
//!
//! # Browse the catalog or open the bag
//! cardshop menu
//! cardshop bag
//!
//! # Forget the stored session
//! cardshop logout
//! ```
//!
//! # Environment Variables
//!
//! - `CARDSHOP_API_URL` - Backend base URL (or `--api-url`)
//! - `CARDSHOP_SESSION_FILE` - Where the session token is kept
//! - `SENTRY_DSN` - Enables error reporting when set
//! - `RUST_LOG` - Log filter, logs go to stderr

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;
use std::sync::Arc;

use cardshop_client::api::{ApiError, HttpBackend};
use cardshop_client::config::{ClientConfig, ConfigError};
use cardshop_client::session::FileTokenStore;
use cardshop_client::{AppContext, PageError, Route};
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod terminal;

use terminal::TerminalDialogs;

#[derive(Parser)]
#[command(name = "cardshop")]
#[command(author, version, about = "Cardshop trading card marketplace")]
struct Cli {
    /// Backend base URL, overrides `CARDSHOP_API_URL`
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Log in and open the menu
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Forget the stored session
    Logout,
    /// Browse the catalog
    Menu,
    /// Show the bag and check out
    Bag,
}

/// Errors that end the CLI with a failure exit code.
#[derive(Debug, Error)]
enum CliError {
    #[error("Backend client error: {0}")]
    Api(#[from] ApiError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    let config = ClientConfig::from_env()?;
    match &cli.api_url {
        Some(url) => config.with_api_url(url),
        None => Ok(config),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            terminal::report_fatal(&e);
            return ExitCode::FAILURE;
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cardshop_client=info,cardshop_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli, config: &ClientConfig) -> Result<(), CliError> {
    let backend = HttpBackend::new(config)?;
    let store = FileTokenStore::new(config.session_file.clone());
    let ctx = AppContext::new(
        Arc::new(backend),
        Arc::new(store),
        Arc::new(TerminalDialogs),
    );

    let next = match cli.command {
        Commands::Signup { name, email } => commands::auth::signup(&ctx, name, email).await?,
        Commands::Login { email } => commands::auth::login(&ctx, email).await?,
        Commands::Logout => Some(commands::auth::logout(&ctx)?),
        Commands::Menu => Some(Route::Menu),
        Commands::Bag => Some(Route::Bag),
    };

    commands::navigate(ctx, next).await
}
