//! The HTTP transport collaborator and its reqwest implementation.

use async_trait::async_trait;
use log::debug;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;
use tokio::time::timeout;

/// One outbound request. The read timeout travels with the request so a shared client is never
/// reconfigured between calls. It limits how long the transport waits for the next piece of
/// response data, not the duration of the whole exchange.
#[derive(Debug, Clone)]
pub struct ExchangeRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    pub read_timeout: Duration,
}

/// A completed exchange whose status is not a client or server error.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Single-line rendering of status, body and headers for diagnostics.
    pub fn render(&self) -> String {
        format!("<{},{},{:?}>", self.status, self.text(), self.headers)
    }
}

/// Why an exchange produced no usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The remote answered with a 4xx or 5xx status.
    Status {
        status: StatusCode,
        message: String,
        body: String,
    },
    /// No response: refused connection, DNS failure, timeout, broken stream.
    Unreachable { message: String, timed_out: bool },
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Status { message, .. } => write!(f, "{}", message),
            TransportError::Unreachable {
                message,
                timed_out: true,
            } => write!(f, "timed out: {}", message),
            TransportError::Unreachable { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for TransportError {}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends exactly one request. Never retries.
    async fn exchange(&self, request: ExchangeRequest) -> Result<RawResponse, TransportError>;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport that sends every request through the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    /// The read timeout bounds each wait for data: the response head after sending, then every
    /// body chunk. A slow but steady body is never cut off.
    #[tracing::instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn exchange(&self, request: ExchangeRequest) -> Result<RawResponse, TransportError> {
        let read_timeout = request.read_timeout;
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let mut response = timeout(read_timeout, builder.send())
            .await
            .map_err(|_| read_timed_out(read_timeout))?
            .map_err(unreachable_error)?;

        let status = response.status();
        let failure = response.error_for_status_ref().err().map(|e| e.to_string());
        let headers = response.headers().clone();

        let mut body = Vec::new();
        while let Some(chunk) = timeout(read_timeout, response.chunk())
            .await
            .map_err(|_| read_timed_out(read_timeout))?
            .map_err(unreachable_error)?
        {
            body.extend_from_slice(&chunk);
        }

        debug!("Received {} with {} body bytes", status, body.len());

        if let Some(message) = failure {
            return Err(TransportError::Status {
                status,
                message,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

fn read_timed_out(read_timeout: Duration) -> TransportError {
    TransportError::Unreachable {
        message: format!(
            "no response data within read timeout of {}ms",
            read_timeout.as_millis()
        ),
        timed_out: true,
    }
}

fn unreachable_error(error: reqwest::Error) -> TransportError {
    TransportError::Unreachable {
        timed_out: error.is_timeout(),
        message: error_chain(&error),
    }
}

/// reqwest's top-level message hides the cause ("connection refused", "operation timed out").
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
