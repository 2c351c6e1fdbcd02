mod requests;
mod types;

pub use requests::{
    DeleteEventRequest, FreeBusyQuery, Location, ReadEventsQuery, Transparency,
    UpsertEventRequest, UpsertEventRequestBuilder,
};
pub use types::{
    Calendar, CalendarsResponse, Event, FreeBusy, FreeBusyPage, ReadEventsPage,
};
