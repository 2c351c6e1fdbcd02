//! caldera_client - HTTP client and CLI for the Caldera calendar API.

pub mod cli;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod output;
pub mod paging;
pub mod transport;

pub use client::{CalderaClient, ClientContext};
pub use error::{ClientError, Result};
pub use paging::PageIterator;
