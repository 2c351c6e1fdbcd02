//! caldera_core - types shared by the caldera API client.
//!
//! Everything here is pure data and validation; no I/O happens in this crate.

pub mod availability;
pub mod builder;
pub mod calendar;
pub mod paging;
pub mod serde;
pub mod time;
