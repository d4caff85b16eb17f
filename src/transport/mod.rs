//! HTTP transports.
//!
//! * `ReqwestAsync` backs [`crate::Client`], `UreqBlocking` backs [`crate::BlockingClient`].
//! * A transport performs exactly one GET and hands back status, headers and the full body.
//!   Status classification, decoding and redaction happen in the client.
//! * `no_proxy` ignores system proxy environment variables (HTTP_PROXY, HTTPS_PROXY, etc.).

#[cfg(feature = "async")]
pub mod async_transport;
#[cfg(feature = "blocking")]
pub mod blocking_transport;
#[cfg(feature = "metrics")]
pub(crate) mod metrics;

use http::{HeaderMap, StatusCode};
use std::time::Duration;
use url::Url;

/// One fully prepared GET request.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub url: Url,
    pub headers: HeaderMap,
    pub timeout: Duration,
}

/// Raw answer, whatever the status code.
#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}
