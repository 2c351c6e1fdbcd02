//! Scripted transport for client tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::client::CalderaClient;
use crate::endpoints::EndpointConfig;
use crate::error::{ClientError, Result};
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Replays queued responses in order and records every request.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<HttpResponse>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(status, body));
        self
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::Connection("no scripted response left".to_string()))
    }
}

pub(crate) fn client_for(transport: &ScriptedTransport, data_centre: &str) -> CalderaClient {
    let endpoints = EndpointConfig::derive(data_centre, "caldera.io").unwrap();
    CalderaClient::new("test-token", Arc::new(transport.clone()), Arc::new(endpoints))
}
