//! Calendar CLI commands.

use clap::{Parser, Subcommand};

/// Calendar commands.
#[derive(Debug, Parser)]
pub struct CalendarsCommand {
    #[command(subcommand)]
    pub action: CalendarsAction,
}

/// Available calendar actions.
#[derive(Debug, Subcommand)]
pub enum CalendarsAction {
    /// List all calendars.
    List,
}
