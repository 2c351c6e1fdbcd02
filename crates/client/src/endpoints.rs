//! Data-centre endpoint resolution.
//!
//! Each data centre serves the API from its own host. [`EndpointRegistry`]
//! derives the endpoint configuration once per data centre and hands out the
//! same `Arc` afterwards. The registry is an ordinary value: share it through
//! an `Arc` (see [`ClientContext`](crate::client::ClientContext)) rather than
//! a process-wide global.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use url::Url;

use crate::error::{ClientError, Result};

/// The data centre used when none is given.
pub const DEFAULT_DATA_CENTRE: &str = "us";

/// Base URLs for one data centre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub data_centre: String,
    pub api_url: Url,
    pub app_url: Url,
}

impl EndpointConfig {
    /// Derives the hosts for `data_centre` under `domain`: the default data
    /// centre uses `api.<domain>`, others `api-<dc>.<domain>`.
    pub fn derive(data_centre: &str, domain: &str) -> Result<Self> {
        let data_centre = normalize(data_centre)?;
        let suffix = if data_centre == DEFAULT_DATA_CENTRE {
            String::new()
        } else {
            format!("-{}", data_centre)
        };

        Ok(Self {
            api_url: Url::parse(&format!("https://api{}.{}", suffix, domain))?,
            app_url: Url::parse(&format!("https://app{}.{}", suffix, domain))?,
            data_centre,
        })
    }

    /// Joins an API path onto the base URL.
    pub fn api(&self, path: &str) -> Result<Url> {
        Ok(self.api_url.join(path)?)
    }
}

/// Lowercases the id and maps the empty id to the default data centre.
fn normalize(data_centre: &str) -> Result<String> {
    let id = data_centre.trim().to_ascii_lowercase();
    if id.is_empty() {
        return Ok(DEFAULT_DATA_CENTRE.to_string());
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ClientError::InvalidInput(format!(
            "invalid data centre: {:?}",
            data_centre
        )));
    }
    Ok(id)
}

/// Memoizing, thread-safe map from data centre to [`EndpointConfig`].
#[derive(Debug)]
pub struct EndpointRegistry {
    domain: String,
    entries: Mutex<HashMap<String, Arc<EndpointConfig>>>,
}

impl EndpointRegistry {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the configuration for `data_centre`, deriving it on first use.
    ///
    /// Lookup and insertion happen under one lock, so concurrent first use
    /// yields a single shared entry.
    pub fn resolve(&self, data_centre: &str) -> Result<Arc<EndpointConfig>> {
        let key = normalize(data_centre)?;
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(config) = entries.get(&key) {
            tracing::trace!(data_centre = %key, "Endpoint cache hit");
            return Ok(Arc::clone(config));
        }

        tracing::trace!(data_centre = %key, "Endpoint cache miss");
        let config = Arc::new(EndpointConfig::derive(&key, &self.domain)?);
        entries.insert(key, Arc::clone(&config));
        Ok(config)
    }

    /// Number of data centres resolved so far.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
