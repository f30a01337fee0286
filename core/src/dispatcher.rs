//! The transport factory: one fixed configuration, many endpoint proxies.
//!
//! # Design
//! `Dispatcher` holds the base URL, the log level and a shared
//! [`Transport`]. It has no mutable state after [`Dispatcher::configure`],
//! so a single `Arc<Dispatcher>` backs every proxy of a client and may be
//! used from any number of threads at once.
//!
//! Each call is split the same way as the endpoint tables describe it:
//! `build_request` (pure), `Transport::execute` (I/O), `parse_response`
//! (pure). The two pure halves are public for hosts that run the I/O
//! themselves.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::endpoint::{encode_query, to_params, Endpoint};
use crate::error::{Error, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::modules::Module;
use crate::transport::Transport;

/// Public YTS v2 endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://yts.re/api/v2";

/// How much of each HTTP exchange the dispatcher logs through `tracing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Silent.
    #[default]
    None,
    /// Method, URL, status and elapsed time.
    Basic,
    /// `Basic` plus request and response headers.
    Headers,
    /// `Headers` plus request and response bodies.
    Full,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::None => "none",
            LogLevel::Basic => "basic",
            LogLevel::Headers => "headers",
            LogLevel::Full => "full",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(LogLevel::None),
            "basic" => Ok(LogLevel::Basic),
            "headers" => Ok(LogLevel::Headers),
            "full" => Ok(LogLevel::Full),
            other => Err(Error::Config(format!(
                "unknown log level {other:?}, expected one of none, basic, headers, full"
            ))),
        }
    }
}

/// Check a base URL and normalise away trailing slashes.
pub fn validate_base_url(url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::Config("base URL must not be empty".to_string()));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::Config(format!(
            "base URL {url:?} must start with http:// or https://"
        )));
    }
    Ok(url.trim_end_matches('/').to_string())
}

pub struct Dispatcher {
    base_url: String,
    log_level: LogLevel,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Validate the configuration and bind it to `transport`. No I/O.
    pub fn configure(
        base_url: &str,
        log_level: LogLevel,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        Ok(Self::from_validated(
            validate_base_url(base_url)?,
            log_level,
            transport,
        ))
    }

    /// Bind a base URL that already went through [`validate_base_url`].
    pub(crate) fn from_validated(
        base_url: String,
        log_level: LogLevel,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url,
            log_level,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Materialise the proxy for an endpoint group.
    pub fn create<M: Module>(self: &Arc<Self>) -> M {
        M::bind(Arc::clone(self))
    }

    /// Turn an endpoint and its parameters into a concrete request.
    pub fn build_request<P>(&self, endpoint: &Endpoint, params: &P) -> Result<HttpRequest>
    where
        P: Serialize + ?Sized,
    {
        let (path, rest) = endpoint.bind(to_params(endpoint, params)?)?;
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        if endpoint.method.carries_body() {
            let body = serde_json::to_string(&Value::Object(rest))
                .map_err(|e| Error::Serialization(format!("{}: {e}", endpoint.name)))?;
            return Ok(HttpRequest {
                method: endpoint.method,
                url,
                headers: vec![("content-type".to_string(), "application/json".to_string())],
                body: Some(body),
            });
        }

        if !rest.is_empty() {
            url.push('?');
            url.push_str(&encode_query(endpoint, &rest)?);
        }
        Ok(HttpRequest {
            method: endpoint.method,
            url,
            headers: Vec::new(),
            body: None,
        })
    }

    /// Check the status and decode the body.
    pub fn parse_response<T>(&self, endpoint: &Endpoint, response: HttpResponse) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if !response.is_success() {
            return Err(Error::Api {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body)
            .map_err(|e| Error::Decode(format!("{}: {e}", endpoint.name)))
    }

    /// Build, execute and parse one call.
    pub fn call<P, T>(&self, endpoint: &Endpoint, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(endpoint, params)?;
        self.log_request(endpoint, &request);

        let started = Instant::now();
        let response = self.transport.execute(request).inspect_err(|e| {
            if self.log_level >= LogLevel::Basic {
                tracing::warn!(endpoint = endpoint.name, error = %e, "request failed");
            }
        })?;
        self.log_response(endpoint, &response, started);

        self.parse_response(endpoint, response)
    }

    fn log_request(&self, endpoint: &Endpoint, request: &HttpRequest) {
        if self.log_level == LogLevel::None {
            return;
        }
        tracing::info!(
            endpoint = endpoint.name,
            method = %request.method,
            url = %request.url,
            "--> request"
        );
        if self.log_level >= LogLevel::Headers {
            tracing::info!(endpoint = endpoint.name, headers = ?request.headers, "--> headers");
        }
        if self.log_level >= LogLevel::Full {
            tracing::info!(
                endpoint = endpoint.name,
                body = request.body.as_deref().unwrap_or(""),
                "--> body"
            );
        }
    }

    fn log_response(&self, endpoint: &Endpoint, response: &HttpResponse, started: Instant) {
        if self.log_level == LogLevel::None {
            return;
        }
        tracing::info!(
            endpoint = endpoint.name,
            status = response.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "<-- response"
        );
        if self.log_level >= LogLevel::Headers {
            tracing::info!(endpoint = endpoint.name, headers = ?response.headers, "<-- headers");
        }
        if self.log_level >= LogLevel::Full {
            tracing::info!(endpoint = endpoint.name, body = %response.body, "<-- body");
        }
    }
}
