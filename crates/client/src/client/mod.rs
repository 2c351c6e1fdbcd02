//! HTTP client for the Caldera API.

pub mod availability;
pub mod calendars;
pub mod events;
pub mod free_busy;

#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::endpoints::{EndpointConfig, EndpointRegistry};
use crate::error::{ClientError, Result};
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Shared plumbing for creating clients: one transport and one endpoint
/// registry, handed to every client made from this context.
#[derive(Clone)]
pub struct ClientContext {
    transport: Arc<dyn Transport>,
    registry: Arc<EndpointRegistry>,
}

impl ClientContext {
    pub fn new(transport: Arc<dyn Transport>, registry: Arc<EndpointRegistry>) -> Self {
        Self {
            transport,
            registry,
        }
    }

    /// Create a context with a reqwest transport and a fresh registry.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::new(
            Arc::new(transport),
            Arc::new(EndpointRegistry::new(config.api_domain.clone())),
        ))
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// Create a client for `access_token` against `data_centre`.
    pub fn client(&self, access_token: &str, data_centre: &str) -> Result<CalderaClient> {
        let endpoints = self.registry.resolve(data_centre)?;
        Ok(CalderaClient::new(
            access_token,
            Arc::clone(&self.transport),
            endpoints,
        ))
    }
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// HTTP client for the Caldera API.
#[derive(Clone)]
pub struct CalderaClient {
    transport: Arc<dyn Transport>,
    endpoints: Arc<EndpointConfig>,
    access_token: String,
}

impl CalderaClient {
    pub fn new(
        access_token: impl Into<String>,
        transport: Arc<dyn Transport>,
        endpoints: Arc<EndpointConfig>,
    ) -> Self {
        Self {
            transport,
            endpoints,
            access_token: access_token.into(),
        }
    }

    /// Create from configuration, using its token and data centre.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        ClientContext::from_config(config)?.client(&config.access_token, &config.data_centre)
    }

    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    /// Build a URL for an API path.
    fn url(&self, path: &str) -> Result<String> {
        Ok(self.endpoints.api(path)?.to_string())
    }

    /// Start an authenticated request.
    fn request(&self, method: Method, url: impl Into<String>) -> HttpRequest {
        HttpRequest::new(method, url)
            .with_header("Authorization", format!("Bearer {}", self.access_token))
            .with_header("Accept", "application/json")
    }

    /// Send a request and reject non-success statuses.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "Sending request");
        let url = request.url.clone();
        let response = self.transport.send(request)?;
        handle_response(&url, response)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, query: Vec<(String, String)>) -> Result<T> {
        let response = self.execute(self.request(Method::GET, url).with_query(query))?;
        decode(&response)
    }

    fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<HttpResponse> {
        let request = self
            .request(method, self.url(path)?)
            .with_json_body(serde_json::to_string(body)?);
        self.execute(request)
    }
}

impl fmt::Debug for CalderaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalderaClient")
            .field("endpoints", &self.endpoints)
            .field("access_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Handle error responses.
fn handle_response(url: &str, response: HttpResponse) -> Result<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }

    tracing::warn!(url = %url, status = response.status, "Request failed");
    if response.status == 404 {
        Err(ClientError::NotFound {
            resource: url.to_string(),
        })
    } else {
        let message = if response.body.is_empty() {
            "Unknown error".to_string()
        } else {
            response.body
        };
        Err(ClientError::ServerError {
            status: response.status,
            message,
        })
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    serde_json::from_str(&response.body)
        .map_err(|err| ClientError::InvalidResponse(format!("{}: {}", err, response.body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{client_for, ScriptedTransport};

    #[test]
    fn test_requests_carry_bearer_token() {
        let transport = ScriptedTransport::new().respond(200, r#"{"calendars":[]}"#);
        let client = client_for(&transport, "us");

        client.list_calendars().unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].header("authorization"), Some("Bearer test-token"));
        assert_eq!(sent[0].header("accept"), Some("application/json"));
    }

    #[test]
    fn test_not_found_maps_to_not_found() {
        let transport = ScriptedTransport::new().respond(404, "");
        let client = client_for(&transport, "us");

        match client.list_calendars() {
            Err(ClientError::NotFound { resource }) => {
                assert_eq!(resource, "https://api.caldera.io/v1/calendars");
            }
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn test_error_status_keeps_body() {
        let transport = ScriptedTransport::new().respond(422, r#"{"errors":{"event_id":[]}}"#);
        let client = client_for(&transport, "us");

        match client.list_calendars() {
            Err(ClientError::ServerError { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, r#"{"errors":{"event_id":[]}}"#);
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_body_is_invalid_response() {
        let transport = ScriptedTransport::new().respond(200, "not json");
        let client = client_for(&transport, "us");

        assert!(matches!(
            client.list_calendars(),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_context_shares_registry_entries() {
        let transport = ScriptedTransport::new();
        let context = ClientContext::new(
            Arc::new(transport),
            Arc::new(EndpointRegistry::new("caldera.io")),
        );

        let a = context.client("token-a", "de").unwrap();
        let b = context.client("token-b", "DE").unwrap();

        assert_eq!(context.registry().len(), 1);
        assert_eq!(a.endpoints().api_url.as_str(), "https://api-de.caldera.io/");
        assert_eq!(a.endpoints(), b.endpoints());
    }

    #[test]
    fn test_debug_redacts_token() {
        let transport = ScriptedTransport::new();
        let client = client_for(&transport, "us");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("test-token"));
    }
}
