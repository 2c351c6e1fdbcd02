pub mod codec;
mod date;
mod error;
mod event_time;

pub use codec::{DEFAULT_TZID, TimeText};
pub use date::Date;
pub use error::TimeError;
pub use event_time::EventTime;
