//! Pretty output formatting.

use caldera_core::availability::AvailablePeriodResult;
use caldera_core::calendar::{Calendar, Event};
use caldera_core::time::codec::{encode_time, format_instant};

/// Format a calendar for display.
pub fn format_calendar(calendar: &Calendar) -> String {
    let mut output = format!(
        "{} ({})\n  ID: {}\n  Profile: {}",
        calendar.calendar_name, calendar.provider_name, calendar.calendar_id, calendar.profile_name
    );
    if calendar.calendar_primary {
        output.push_str("\n  Primary");
    }
    if calendar.calendar_readonly {
        output.push_str("\n  Read-only");
    }
    output
}

/// Format calendars for display.
pub fn format_calendars(calendars: &[Calendar]) -> String {
    if calendars.is_empty() {
        return "No calendars found.".to_string();
    }
    let mut output = format!("CALENDARS ({})\n", calendars.len());
    output.push_str(&"-".repeat(40));
    for calendar in calendars {
        output.push_str(&format!("\n{}", format_calendar(calendar)));
        output.push('\n');
    }
    output
}

/// Format an event for display.
pub fn format_event(event: &Event) -> String {
    let kind = if event.is_all_day() { "all-day" } else { "timed" };
    let mut output = format!(
        "{} [{}]\n  UID: {}\n  Calendar: {}\n  Start: {} ({})\n  End: {} ({})",
        event.summary,
        kind,
        event.event_uid,
        event.calendar_id,
        encode_time(&event.start),
        event.start.tzid(),
        encode_time(&event.end),
        event.end.tzid(),
    );
    if let Some(id) = &event.event_id {
        output.push_str(&format!("\n  Event ID: {}", id));
    }
    if !event.description.is_empty() {
        output.push_str(&format!("\n  Description: {}", event.description));
    }
    if let Some(location) = &event.location {
        output.push_str(&format!("\n  Location: {}", location.description));
    }
    if event.deleted {
        output.push_str("\n  Deleted");
    }
    output
}

/// Format events for display.
pub fn format_events(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }
    let mut output = format!("EVENTS ({})\n", events.len());
    output.push_str(&"-".repeat(40));
    for event in events {
        output.push_str(&format!("\n{}", format_event(event)));
        output.push('\n');
    }
    output
}

/// Format available periods for display.
pub fn format_available_periods(periods: &[AvailablePeriodResult]) -> String {
    if periods.is_empty() {
        return "No available periods found.".to_string();
    }
    let mut output = format!("AVAILABLE PERIODS ({})\n", periods.len());
    output.push_str(&"-".repeat(40));
    for period in periods {
        let subs: Vec<&str> = period.participants.iter().map(|p| p.sub.as_str()).collect();
        output.push_str(&format!(
            "\n{} - {}\n  Participants: {}\n",
            format_instant(&period.start),
            format_instant(&period.end),
            subs.join(", ")
        ));
    }
    output
}
