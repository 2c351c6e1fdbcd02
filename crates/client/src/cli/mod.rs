//! CLI command definitions.

pub mod availability;
pub mod calendars;
pub mod events;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the Caldera API.
#[derive(Debug, Parser)]
#[command(name = "caldera")]
#[command(about = "CLI client for the Caldera calendar API", long_about = None)]
pub struct Cli {
    /// Bearer access token.
    #[arg(long, env = "CALDERA_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Data centre to talk to.
    #[arg(long, env = "CALDERA_DATA_CENTRE")]
    pub data_centre: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Calendar listing.
    Calendars(calendars::CalendarsCommand),
    /// Event listing and deletion.
    Events(events::EventsCommand),
    /// Query participant availability.
    Availability(availability::AvailabilityCommand),
}
