//! Outbound REST invocation with per-call read timeouts and typed errors.
//!
//! A call either returns the decoded body of a `200 OK` response, an [`ApiError`] when the remote
//! service answered with anything else, or a [`ServiceUnavailableError`] when no response could
//! be obtained.

pub mod config;
pub mod context;
pub mod endpoint;
pub mod error;
pub mod http;

pub use config::Config;
pub use context::{CallContext, LOG_ID};
pub use endpoint::{Endpoint, build_url};
pub use error::{ApiError, InvokeError, ServiceUnavailableError};
pub use http::{HttpInvoker, JsonEncoder, ReqwestTransport};
