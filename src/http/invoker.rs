//! Single-shot GET and POST calls with a per-call read timeout.

use anyhow::Result;
use log::{debug, info};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::encoder::{BodyEncoder, JsonEncoder};
use super::translate::{Failure, translate};
use super::transport::{ExchangeRequest, ReqwestTransport, Transport};
use crate::config::Config;
use crate::context::CallContext;
use crate::endpoint::Endpoint;
use crate::error::InvokeError;

/// Executes exactly one request per call and returns either the decoded body of a 200 response
/// or a typed error. Holds no per-call state, so one invoker can serve concurrent calls.
pub struct HttpInvoker<T: Transport, E: BodyEncoder = JsonEncoder> {
    transport: T,
    encoder: E,
}

impl HttpInvoker<ReqwestTransport> {
    /// Invoker over a reqwest client built from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ReqwestTransport::new(config.build_client()?)))
    }
}

impl<T: Transport> HttpInvoker<T> {
    /// Creates an invoker over `transport` that encodes POST bodies as JSON.
    pub fn new(transport: T) -> Self {
        Self::with_encoder(transport, JsonEncoder)
    }
}

impl<T: Transport, E: BodyEncoder> HttpInvoker<T, E> {
    /// Creates an invoker over `transport` that encodes POST bodies with `encoder`.
    pub fn with_encoder(transport: T, encoder: E) -> Self {
        Self { transport, encoder }
    }

    /// GETs `endpoint` and decodes a 200 body as `R`. `read_timeout_ms` bounds every wait for
    /// response data of this call only.

    #[tracing::instrument(skip(self, headers, ctx), fields(correlation_id = ctx.correlation_id()))]
    pub async fn get<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint<'_>,
        headers: &HeaderMap,
        read_timeout_ms: u64,
        ctx: &CallContext,
    ) -> Result<R, InvokeError> {
        self.execute(Method::GET, endpoint, headers.clone(), None, read_timeout_ms, ctx)
            .await
    }

    /// POSTs `body` encoded by the invoker's encoder. With `body == None` nothing is encoded
    /// and the request has no body.
    #[tracing::instrument(skip(self, body, headers, ctx), fields(correlation_id = ctx.correlation_id()))]
    pub async fn post<B, R>(
        &self,
        endpoint: Endpoint<'_>,
        body: Option<&B>,
        headers: &HeaderMap,
        read_timeout_ms: u64,
        ctx: &CallContext,
    ) -> Result<R, InvokeError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = match body {
            Some(value) => match self.encoder.encode(value) {
                Ok(bytes) => Some(bytes),
                Err(e) => return Err(translate(None, Failure::Encode(format!("{:#}", e)), ctx)),
            },
            None => None,
        };

        let mut headers = headers.clone();
        if body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(self.encoder.content_type()),
            );
        }

        self.execute(Method::POST, endpoint, headers, body, read_timeout_ms, ctx)
            .await
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: Endpoint<'_>,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
        read_timeout_ms: u64,
        ctx: &CallContext,
    ) -> Result<R, InvokeError> {
        let url = endpoint.url();
        info!(
            "Calling {} {} with read timeout {}ms",
            method, url, read_timeout_ms
        );

        let request = ExchangeRequest {
            method,
            url,
            headers,
            body,
            read_timeout: Duration::from_millis(read_timeout_ms),
        };

        let response = match self.transport.exchange(request).await {
            Ok(response) => response,
            Err(e) => return Err(translate(None, e.into(), ctx)),
        };

        if response.status != StatusCode::OK {
            return Err(translate(
                Some(&response),
                Failure::UnexpectedStatus(response.status),
                ctx,
            ));
        }

        debug!("Decoding {} byte response body", response.body.len());
        serde_json::from_slice(&response.body)
            .map_err(|e| translate(Some(&response), Failure::Decode(e.to_string()), ctx))
    }
}
