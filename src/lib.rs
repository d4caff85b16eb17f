//! Read-only Jenkins JSON API client.
//!
//! Choose **async** (`Client`, default) and/or **blocking** (`BlockingClient`) at compile time.
//! Both share URL construction, credential injection and response mapping; only the HTTP
//! transport differs.

// compile-time guard: enable at least one client kind.
#[cfg(not(any(feature = "async", feature = "blocking")))]
compile_error!("Enable at least one of: `async` (default) or `blocking`.");

mod auth;
mod error;
mod util;

pub mod api;
pub mod client;
pub mod decode;
pub mod endpoint;
pub mod transport;
pub mod types;

pub use auth::{Credentials, SecretString};
pub use client::{ClientConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT};
pub use endpoint::Resource;
pub use error::{
    BodySnippetConfig, ConfigErrorKind, Error, ErrorKind, HttpError, RequestFailure, Result,
    TransportErrorKind,
};
pub use types::*;

#[cfg(feature = "async")]
pub use client::{Client, ClientBuilder};
#[cfg(feature = "blocking")]
pub use client::{BlockingClient, BlockingClientBuilder};
