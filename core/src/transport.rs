//! Execution of `HttpRequest` values.
//!
//! The dispatcher never touches the network itself; it hands requests to a
//! [`Transport`]. `UreqTransport` is the default. Any
//! `Fn(HttpRequest) -> Result<HttpResponse>` closure is a transport too,
//! which is how tests and hosts with their own HTTP stack plug in.

use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    /// Perform one round trip. Non-2xx statuses are returned as data, only
    /// failures to obtain a response at all are errors.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse> + Send + Sync,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self(request)
    }
}

/// Blocking transport backed by a shared ureq agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status interpretation belongs to the dispatcher, so 4xx/5xx must
        // come back as responses.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let result = match (method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&url), &headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&url), &headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(&url), &headers).send_empty(),
        };
        let mut response = result.map_err(|e| Error::Transport(format!("{method} {url}: {e}")))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| Error::Transport(format!("{method} {url}: reading body: {e}")))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
