//! cloudwiz - interactive wizard for cloud servers
//!
//! # Commands
//! - `cloudwiz create` - walk through creating a server
//! - `cloudwiz list` - show existing servers
//! - `cloudwiz delete [--id <id>]` - pick a server and delete it
//! - `cloudwiz login [--token <token>]` - save an API token for a profile
//!
//! At any prompt `<` goes back one step and `q` quits.

mod commands;
mod config;
mod flows;

use anyhow::{Context as _, Result};
use clap::{ArgAction, Parser, Subcommand};
use cloudwiz_cloud::{Catalog, CloudProvider, SandboxCloud};
use cloudwiz_core::{AbortReason, Context};
use cloudwiz_credentials::{CredentialManager, EnvProvider, FileProvider};
use cloudwiz_std::{Prompter, TerminalPrompter};
use commands::{App, Report, render_servers};
use config::Config;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// cloudwiz CLI
#[derive(Parser)]
#[command(name = "cloudwiz")]
#[command(author, version, about = "Interactive wizard for provisioning cloud servers")]
struct Cli {
    /// Config file (default: ./cloudwiz.toml)
    #[arg(long, global = true, env = "CLOUDWIZ_CONFIG")]
    config: Option<PathBuf>,

    /// Credentials profile to use
    #[arg(long, global = true)]
    profile: Option<String>,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Give up after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new server
    Create,

    /// List servers
    List,

    /// Delete a server
    Delete {
        /// Server to delete (default: choose from a list)
        #[arg(long)]
        id: Option<String>,
    },

    /// Save an API token for the selected profile
    Login {
        /// Token to save (default: prompt for it)
        #[arg(long)]
        token: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(error) => {
            eprintln!("error: failed to start runtime: {}", error);
            return ExitCode::FAILURE;
        }
    };
    let result = runtime.block_on(run(cli));
    // An abandoned stdin read keeps a blocking thread parked.
    runtime.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {}", render_error(&error));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so prompts on stdout stay readable. `RUST_LOG` wins
/// over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?.with_overrides(cli.profile, cli.timeout);

    let ctx = Context::new();
    let on_signal = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Interrupt received");
            on_signal.cancel();
        }
    });
    if let Some(timeout) = config.timeout() {
        ctx.cancel_after(timeout);
    }

    if !matches!(cli.command, Commands::Login { .. }) {
        check_credentials(&config)?;
    }

    let prompter: Arc<dyn Prompter> = Arc::new(TerminalPrompter::stdio());
    let app = App::new(open_provider(&config)?, prompter);
    let report = match cli.command {
        Commands::Create => app.create(&ctx).await?,
        Commands::List => app.list().await?,
        Commands::Delete { id } => app.delete(&ctx, id.as_deref()).await?,
        Commands::Login { token } => {
            let store = FileProvider::new(&config.credentials_file);
            app.login(&ctx, &store, &config.profile, token).await?
        }
    };
    print_report(report);
    Ok(())
}

/// The environment variable wins over the credentials file.
fn check_credentials(config: &Config) -> Result<()> {
    let credentials = CredentialManager::default()
        .push(EnvProvider::new(&config.token_env))
        .push(FileProvider::new(&config.credentials_file));
    let resolved = credentials
        .resolve(&config.profile)
        .context("Run `cloudwiz login` or set the token environment variable")?;
    if !resolved.secure {
        eprintln!(
            "warning: credentials for profile '{}' come from {}, which is not secure storage",
            config.profile, resolved.source
        );
    }
    tracing::info!(source = %resolved.source, kind = %resolved.kind, "Using credentials");
    Ok(())
}

fn open_provider(config: &Config) -> Result<Arc<dyn CloudProvider>> {
    let catalog = match &config.catalog {
        Some(path) => {
            Catalog::load(path).with_context(|| format!("Failed to load catalog: {}", path.display()))?
        }
        None => Catalog::builtin()?,
    };
    let cloud = match &config.sandbox_state {
        Some(path) => SandboxCloud::open(catalog, path)
            .with_context(|| format!("Failed to open sandbox state: {}", path.display()))?,
        None => SandboxCloud::new(catalog),
    };
    Ok(Arc::new(cloud))
}

fn print_report(report: Report) {
    match report {
        Report::Created(server) => {
            println!("Created server {} ({}) in {}.", server.name, server.id, server.region)
        }
        Report::Deleted(server) => println!("Deleted server {} ({}).", server.name, server.id),
        Report::Listed(servers) => println!("{}", render_servers(&servers)),
        Report::LoggedIn { profile, path } => {
            println!("Saved credentials for profile '{}' to {}.", profile, path.display())
        }
        Report::Aborted(AbortReason::Cancelled) => println!("Canceled."),
        // Finish the half-written prompt line.
        Report::Aborted(AbortReason::Interrupted) => println!(),
        Report::Aborted(AbortReason::EmptyState) => {}
    }
}

/// The error chain on one line, skipping causes already quoted by their parent.
fn render_error(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    for cause in error.chain().skip(1) {
        let cause = cause.to_string();
        if !message.contains(&cause) {
            message.push_str(": ");
            message.push_str(&cause);
        }
    }
    message
}
