//! Outbound HTTP invocation: transport, body encoding, error translation and the invoker.

mod encoder;
mod invoker;
mod translate;
mod transport;

pub use encoder::{BodyEncoder, JsonEncoder};
pub use invoker::HttpInvoker;
pub use translate::{Failure, translate};
pub use transport::{ExchangeRequest, RawResponse, ReqwestTransport, Transport, TransportError};
