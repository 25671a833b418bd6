//! Museo CLI - administration console for the museum API
//!
//! # Commands
//!
//! - `museo museums list|show|create|edit|delete|budget|between|graph`
//! - `museo rooms list|show|create|edit|delete|area`
//!
//! The API address comes from `MUSEO_API_URL` (a `.env` file is honoured)
//! unless `--api-url` is given; `MUSEO_API_TIMEOUT_MS` sets the timeout.

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use museo_core::{Adapter, Admin, ApiConfig};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod render;

pub use error::Result;

use commands::museums::MuseumCommand;
use commands::rooms::RoomCommand;
use commands::Output;

/// Museum administration console
#[derive(Debug, Parser)]
#[command(name = "museo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the API, e.g. http://localhost:3000/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage museums
    Museums {
        #[command(subcommand)]
        command: MuseumCommand,
    },

    /// Manage exhibition rooms
    Rooms {
        #[command(subcommand)]
        command: RoomCommand,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "museo=debug" } else { "museo=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = config::resolve(ApiConfig::from_env(), cli.api_url);
    debug!(base_url = %config.base_url, timeout = ?config.timeout, "api configured");
    let admin = Admin::new(Adapter::new(&config));
    let mut out = Output::new(io::stdout().lock(), cli.json);

    let result = match cli.command {
        Commands::Museums { command } => commands::museums::run(command, &admin, &mut out),
        Commands::Rooms { command } => commands::rooms::run(command, &admin, &mut out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            for line in err.report() {
                eprintln!("{line}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "museo",
            "museums",
            "list",
            "--json",
            "--api-url",
            "http://x/api",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.api_url.as_deref(), Some("http://x/api"));
        assert!(matches!(
            cli.command,
            Commands::Museums {
                command: MuseumCommand::List
            }
        ));
    }

    #[test]
    fn parses_room_create_fields() {
        let cli = Cli::try_parse_from([
            "museo", "rooms", "create", "--name", "Sala Azul", "--capacity", "30", "--area", "64.5",
            "--climatized", "yes", "--opened", "2003-10-27", "--museum", "1",
        ])
        .unwrap();
        let Commands::Rooms {
            command: RoomCommand::Create(fields),
        } = cli.command
        else {
            panic!("expected rooms create");
        };
        let form = fields.into_form();
        assert_eq!(form.name, "Sala Azul");
        assert_eq!(form.museum_id, "1");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn negative_budget_bound_is_passed_through() {
        let cli = Cli::try_parse_from(["museo", "museums", "budget", "--min", "-5", "--max", "10"])
            .unwrap();
        let Commands::Museums {
            command: MuseumCommand::Budget { min, max },
        } = cli.command
        else {
            panic!("expected museums budget");
        };
        assert_eq!(min.as_deref(), Some("-5"));
        assert_eq!(max.as_deref(), Some("10"));
    }

    #[test]
    fn show_requires_an_id() {
        assert!(Cli::try_parse_from(["museo", "museums", "show"]).is_err());
        assert!(Cli::try_parse_from(["museo", "rooms", "show", "abc"]).is_err());
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
