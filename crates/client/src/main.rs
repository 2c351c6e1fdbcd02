//! caldera CLI entry point.

use anyhow::Context;
use caldera_client::cli::{Cli, Commands, OutputFormat};
use caldera_client::client::ClientContext;
use caldera_client::config::ClientConfig;
use caldera_client::output::{format_output, pretty};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caldera=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ClientConfig::from_env();
    if let Some(token) = cli.token.clone() {
        config.access_token = token;
    }
    if let Some(data_centre) = cli.data_centre.clone() {
        config.data_centre = data_centre;
    }
    if config.access_token.is_empty() {
        anyhow::bail!("no access token: pass --token or set CALDERA_ACCESS_TOKEN");
    }

    let context = ClientContext::from_config(&config).context("failed to create HTTP client")?;
    let client = context.client(&config.access_token, &config.data_centre)?;

    match cli.command {
        Commands::Calendars(calendars_cmd) => {
            use caldera_client::cli::calendars::CalendarsAction;
            match calendars_cmd.action {
                CalendarsAction::List => {
                    let calendars = client.list_calendars()?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&calendars, cli.format)),
                        OutputFormat::Pretty => {
                            println!("{}", pretty::format_calendars(&calendars))
                        }
                    }
                }
            }
        }
        Commands::Events(events_cmd) => {
            use caldera_client::cli::events::{read_events_query, EventsAction};
            match events_cmd.action {
                EventsAction::List {
                    from,
                    to,
                    tzid,
                    calendar_ids,
                    include_deleted,
                } => {
                    let query = read_events_query(from, to, tzid, calendar_ids, include_deleted);
                    let events = client
                        .read_events(&query)?
                        .collect_all()
                        .context("failed to read events")?;
                    match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&events, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_events(&events)),
                    }
                }
                EventsAction::Delete {
                    calendar_id,
                    event_id,
                } => {
                    client.delete_event(&calendar_id, &event_id)?;
                    if !cli.quiet {
                        println!("Deleted event {}", event_id);
                    }
                }
            }
        }
        Commands::Availability(availability_cmd) => {
            let request = availability_cmd.to_request()?;
            let periods = client.availability(&request)?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&periods, cli.format)),
                OutputFormat::Pretty => {
                    println!("{}", pretty::format_available_periods(&periods))
                }
            }
        }
    }

    Ok(())
}
