//! Event CLI commands.

use caldera_core::calendar::ReadEventsQuery;
use caldera_core::time::{Date, DEFAULT_TZID};
use clap::{Parser, Subcommand};

/// Event commands.
#[derive(Debug, Parser)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// Available event actions.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// List events across all pages.
    List {
        /// First day to include (YYYY-MM-DD).
        #[arg(long)]
        from: Option<Date>,
        /// Last day to include (YYYY-MM-DD).
        #[arg(long)]
        to: Option<Date>,
        /// Zone the results are expressed in.
        #[arg(long, default_value = DEFAULT_TZID)]
        tzid: String,
        /// Restrict to these calendars (repeatable).
        #[arg(long = "calendar-id")]
        calendar_ids: Vec<String>,
        /// Include deleted events.
        #[arg(long)]
        include_deleted: bool,
    },
    /// Delete an event created by this application.
    Delete {
        /// Calendar the event lives in.
        #[arg(long)]
        calendar_id: String,
        /// Application-assigned event id.
        #[arg(long)]
        event_id: String,
    },
}

/// Build the listing query from `events list` arguments.
pub fn read_events_query(
    from: Option<Date>,
    to: Option<Date>,
    tzid: String,
    calendar_ids: Vec<String>,
    include_deleted: bool,
) -> ReadEventsQuery {
    let mut query = ReadEventsQuery::new().with_tzid(tzid);
    query.from = from;
    query.to = to;
    query.calendar_ids = calendar_ids;
    if include_deleted {
        query = query.with_include_deleted(true);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};

    #[test]
    fn test_events_list_arguments() {
        let cli = Cli::try_parse_from([
            "caldera",
            "events",
            "list",
            "--from",
            "2014-08-01",
            "--calendar-id",
            "cal_1",
            "--calendar-id",
            "cal_2",
            "--include-deleted",
        ])
        .unwrap();

        let Commands::Events(EventsCommand {
            action:
                EventsAction::List {
                    from,
                    to,
                    tzid,
                    calendar_ids,
                    include_deleted,
                },
        }) = cli.command
        else {
            panic!("expected events list");
        };

        let query = read_events_query(from, to, tzid, calendar_ids, include_deleted);
        assert_eq!(query.from, Some(Date::new(2014, 8, 1).unwrap()));
        assert_eq!(query.to, None);
        assert_eq!(query.tzid, "Etc/UTC");
        assert_eq!(query.calendar_ids, vec!["cal_1", "cal_2"]);
        assert_eq!(query.include_deleted, Some(true));
    }

    #[test]
    fn test_events_list_rejects_bad_date() {
        let result = Cli::try_parse_from(["caldera", "events", "list", "--from", "2014-13-01"]);
        assert!(result.is_err());
    }
}
