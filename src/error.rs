//! Typed failures returned by the invoker.

use reqwest::StatusCode;

/// The remote service answered, but not with a usable success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Raw body text, or a rendering of the whole response when no body was embedded
    /// in the failure.
    pub response_body: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "API error {}: {} (response: {})",
            self.status.as_u16(),
            self.message,
            self.response_body
        )
    }
}

impl std::error::Error for ApiError {}

/// No response could be obtained: refused connection, DNS failure, timeout, or a request that
/// could not be prepared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUnavailableError {
    pub message: String,
    pub correlation_id: Option<String>,
}

impl std::fmt::Display for ServiceUnavailableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.correlation_id {
            Some(id) => write!(f, "Service unavailable: {} [logId: {}]", self.message, id),
            None => write!(f, "Service unavailable: {}", self.message),
        }
    }
}

impl std::error::Error for ServiceUnavailableError {}

/// Error returned by `HttpInvoker::get` and `HttpInvoker::post`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    Api(ApiError),
    ServiceUnavailable(ServiceUnavailableError),
}

impl InvokeError {
    /// Status of the remote response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            InvokeError::Api(e) => Some(e.status),
            InvokeError::ServiceUnavailable(_) => None,
        }
    }

    pub fn correlation_id(&self) -> Option<&str> {
        match self {
            InvokeError::Api(_) => None,
            InvokeError::ServiceUnavailable(e) => e.correlation_id.as_deref(),
        }
    }

    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, InvokeError::ServiceUnavailable(_))
    }
}

impl std::fmt::Display for InvokeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvokeError::Api(e) => write!(f, "{}", e),
            InvokeError::ServiceUnavailable(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InvokeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvokeError::Api(e) => Some(e),
            InvokeError::ServiceUnavailable(e) => Some(e),
        }
    }
}

impl From<ApiError> for InvokeError {
    fn from(e: ApiError) -> Self {
        InvokeError::Api(e)
    }
}

impl From<ServiceUnavailableError> for InvokeError {
    fn from(e: ServiceUnavailableError) -> Self {
        InvokeError::ServiceUnavailable(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError {
            status: StatusCode::NOT_FOUND,
            message: "no such employee".to_string(),
            response_body: r#"{"error":"missing"}"#.to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("no such employee"));
        assert!(text.contains("missing"));
    }

    #[test]
    fn test_service_unavailable_display() {
        let err = ServiceUnavailableError {
            message: "connection refused".to_string(),
            correlation_id: Some("abc".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Service unavailable: connection refused [logId: abc]"
        );

        let err = ServiceUnavailableError {
            message: "timed out".to_string(),
            correlation_id: None,
        };
        assert_eq!(err.to_string(), "Service unavailable: timed out");
    }

    #[test]
    fn test_invoke_error_accessors() {
        let api: InvokeError = ApiError {
            status: StatusCode::BAD_REQUEST,
            message: "bad".to_string(),
            response_body: String::new(),
        }
        .into();
        assert_eq!(api.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(api.correlation_id(), None);
        assert!(!api.is_service_unavailable());

        let down: InvokeError = ServiceUnavailableError {
            message: "down".to_string(),
            correlation_id: Some("id-9".to_string()),
        }
        .into();
        assert_eq!(down.status(), None);
        assert_eq!(down.correlation_id(), Some("id-9"));
        assert!(down.is_service_unavailable());
        assert!(std::error::Error::source(&down).is_some());
    }
}
