use http::{Method, StatusCode};
use std::{error::Error as StdError, fmt};
use thiserror::Error;
use url::Url;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy)]
pub struct BodySnippetConfig {
    pub enabled: bool,
    pub max_bytes: usize,
}

impl Default for BodySnippetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_bytes: 4096,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    InvalidConfig,
    RequestFailed,
    Decode,
}

/// Why a client configuration was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigErrorKind {
    /// No base URL was set, or it was empty.
    MissingUrl,
    /// The base URL (or a URL composed from it) is not an absolute http(s) URL.
    InvalidUrl,
    /// The underlying HTTP stack could not be constructed.
    HttpClient,
    /// Credentials could not be encoded into an `Authorization` header.
    InvalidHeader,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Other,
}

/// A non-2xx answer from the server.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    /// Sanitized URL: no query/fragment/userinfo.
    pub url: Box<Url>,
    pub message: Option<Box<str>>,
    pub request_id: Option<Box<str>>,
    pub body_snippet: Option<Box<str>>,
}

impl HttpError {
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

/// The low-level cause behind [`Error::RequestFailed`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RequestFailure {
    #[error("{0}")]
    Status(HttpError),

    #[error("transport error ({kind:?}): {source}")]
    Transport {
        kind: TransportErrorKind,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// All errors returned by the client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        kind: ConfigErrorKind,
        message: Box<str>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    #[error("Request failed during {method} {path}: {failure}")]
    RequestFailed {
        method: Method,
        path: Box<str>,
        #[source]
        failure: RequestFailure,
    },

    #[error("Decode error (HTTP {status}) during {method} {path}: {source}")]
    Decode {
        status: StatusCode,
        method: Method,
        path: Box<str>,
        request_id: Option<Box<str>>,
        body_snippet: Option<Box<str>>,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
            Self::RequestFailed { .. } => ErrorKind::RequestFailed,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Configuration failure reason, when this is [`Error::InvalidConfig`].
    #[must_use]
    pub fn config_kind(&self) -> Option<ConfigErrorKind> {
        match self {
            Self::InvalidConfig { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RequestFailed {
                failure: RequestFailure::Status(e),
                ..
            } => Some(e.status),
            Self::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::RequestFailed {
                failure: RequestFailure::Status(e),
                ..
            } => e.request_id.as_deref(),
            Self::Decode { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Request path the failure belongs to (absent for configuration errors).
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::RequestFailed { path, .. } | Self::Decode { path, .. } => Some(&**path),
            Self::InvalidConfig { .. } => None,
        }
    }

    /// `true` when the server answered 404, e.g. for an unknown job or build.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND) && self.kind() == ErrorKind::RequestFailed
    }

    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        ) && self.kind() == ErrorKind::RequestFailed
    }

    pub(crate) fn config(kind: ConfigErrorKind, message: impl Into<Box<str>>) -> Self {
        Self::InvalidConfig {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn config_with_source<E>(
        kind: ConfigErrorKind,
        message: impl Into<Box<str>>,
        source: E,
    ) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::InvalidConfig {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn from_http(method: Method, error: HttpError) -> Self {
        Self::RequestFailed {
            method,
            path: error.path().to_string().into_boxed_str(),
            failure: RequestFailure::Status(error),
        }
    }

    pub(crate) fn transport<E>(method: Method, url: &Url, kind: TransportErrorKind, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::RequestFailed {
            method,
            path: url.path().to_string().into_boxed_str(),
            failure: RequestFailure::Transport {
                kind,
                source: Box::new(source),
            },
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} ({})", self.status, self.path())?;
        if let Some(message) = self.message.as_deref() {
            write!(f, ": {message}")?;
        }
        if let Some(request_id) = self.request_id.as_deref() {
            write!(f, " [request-id: {request_id}]")?;
        }
        Ok(())
    }
}
