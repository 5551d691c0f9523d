//! Classification of failed calls into `ApiError` or `ServiceUnavailableError`.

use log::error;
use reqwest::StatusCode;

use super::transport::{RawResponse, TransportError};
use crate::context::CallContext;
use crate::error::{ApiError, InvokeError, ServiceUnavailableError};

/// Anything that kept a call from producing its typed result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Transport(TransportError),
    /// Completed with a status other than 200 that the transport did not flag as an error.
    UnexpectedStatus(StatusCode),
    /// A 200 body that does not deserialize into the requested type.
    Decode(String),
    /// The request body could not be serialized; nothing was sent.
    Encode(String),
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Failure::Transport(e) => write!(f, "{}", e),
            Failure::UnexpectedStatus(status) => write!(f, "unexpected status {}", status),
            Failure::Decode(msg) => write!(f, "Failed to decode response body: {}", msg),
            Failure::Encode(msg) => write!(f, "{}", msg),
        }
    }
}

impl From<TransportError> for Failure {
    fn from(e: TransportError) -> Self {
        Failure::Transport(e)
    }
}

/// Maps a failure to the error returned to the caller.
///
/// Priority: a status embedded in the failure wins, then the status of an available response,
/// and only when neither exists is the service reported unavailable.
pub fn translate(
    response: Option<&RawResponse>,
    failure: Failure,
    ctx: &CallContext,
) -> InvokeError {
    error!(
        "Error invoking remote service: response={:?}; failure={}",
        response.map(RawResponse::render),
        failure
    );

    match (failure, response) {
        (
            Failure::Transport(TransportError::Status {
                status,
                message,
                body,
            }),
            _,
        ) => ApiError {
            status,
            message,
            response_body: body,
        }
        .into(),
        (failure, Some(response)) => ApiError {
            status: response.status,
            message: failure.to_string(),
            response_body: response.render(),
        }
        .into(),
        (failure, None) => ServiceUnavailableError {
            message: failure.to_string(),
            correlation_id: ctx.correlation_id().map(str::to_owned),
        }
        .into(),
    }
}
