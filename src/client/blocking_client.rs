//! High-level blocking Jenkins client.

use super::exchange::{Exchange, Mapper};
use crate::{
    ClientConfig, Credentials, Error, Resource, api,
    transport::blocking_transport::{DynBlockingTransport, UreqBlocking},
};
use std::{sync::Arc, time::Duration};

#[cfg(feature = "tracing")]
use tracing::field;

/// Configures and constructs [`BlockingClient`].
#[derive(Clone, Default)]
pub struct BlockingClientBuilder {
    config: ClientConfig,
    transport: Option<DynBlockingTransport>,
}

impl BlockingClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    pub fn url(mut self, url: impl AsRef<str>) -> Self {
        self.config.set_url(url);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.set_credentials(credentials);
        self
    }

    pub fn auth_basic(self, user: impl Into<String>, token: impl Into<String>) -> Self {
        self.credentials(Credentials::new(user, token))
    }

    pub fn no_system_proxy(mut self) -> Self {
        self.config.no_proxy = true;
        self
    }

    pub fn danger_accept_invalid_certs(mut self, yes: bool) -> Self {
        self.config.accept_invalid_certs = yes;
        self
    }

    /// Override the default `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    pub fn timeout(mut self, value: Duration) -> Self {
        self.config.timeout = value;
        self
    }

    pub fn connect_timeout(mut self, value: Duration) -> Self {
        self.config.connect_timeout = value;
        self
    }

    pub fn capture_body_snippet(mut self, enabled: bool) -> Self {
        self.config.body_snippet.enabled = enabled;
        self
    }

    pub fn max_body_snippet_bytes(mut self, max_bytes: usize) -> Self {
        self.config.body_snippet.max_bytes = max_bytes;
        self
    }

    pub fn transport(mut self, transport: DynBlockingTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build(&self) -> Result<BlockingClient, Error> {
        let exchange = Exchange::from_config(&self.config)?;

        let transport: DynBlockingTransport = match &self.transport {
            Some(transport) => Arc::clone(transport),
            None => Arc::new(UreqBlocking::try_new(
                self.config.accept_invalid_certs,
                &self.config.user_agent,
                self.config.timeout,
                self.config.connect_timeout,
                self.config.no_proxy,
            )?),
        };

        Ok(BlockingClient {
            inner: Arc::new(Inner {
                exchange,
                transport,
            }),
        })
    }
}

#[derive(Clone)]
pub struct BlockingClient {
    inner: Arc<Inner>,
}

struct Inner {
    exchange: Exchange,
    transport: DynBlockingTransport,
}

impl BlockingClient {
    #[must_use]
    pub fn builder() -> BlockingClientBuilder {
        BlockingClientBuilder::new()
    }

    pub fn new(url: impl AsRef<str>) -> Result<Self, Error> {
        Self::builder().url(url).build()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.inner.exchange.base()
    }

    #[must_use]
    pub fn jobs(&self) -> api::BlockingJobsService {
        api::BlockingJobsService::new(self.clone())
    }

    #[must_use]
    pub fn views(&self) -> api::BlockingViewsService {
        api::BlockingViewsService::new(self.clone())
    }

    pub(crate) fn fetch<T>(&self, resource: Resource<'_>, map: Mapper<T>) -> Result<T, Error> {
        #[cfg(feature = "metrics")]
        let _inflight = crate::transport::metrics::InFlightGuard::new();
        #[cfg(any(feature = "tracing", feature = "metrics"))]
        let start = std::time::Instant::now();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "jenkins.request",
            resource = resource.kind(),
            http.method = "GET",
            http.host = field::Empty,
            http.path = field::Empty,
            http.status = field::Empty,
            latency_ms = field::Empty,
            error_kind = field::Empty,
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let request = self.inner.exchange.request(&resource)?;
        let url = request.url.clone();
        #[cfg(feature = "tracing")]
        span.record("http.host", url.host_str().unwrap_or_default());
        span.record("http.path", url.path());

        let (status, result) = match self.inner.transport.get(request) {
            Ok(resp) => {
                let status = resp.status;
                (Some(status), self.inner.exchange.finish(&url, resp, map))
            }
            Err(err) => (None, Err(err)),
        };

        #[cfg(any(feature = "tracing", feature = "metrics"))]
        {
            let error_kind = result.as_ref().err().map(Error::kind);
            #[cfg(feature = "tracing")]
            {
                if let Some(status) = status {
                    span.record("http.status", status.as_u16() as i64);
                }
                span.record("latency_ms", start.elapsed().as_millis() as i64);
                if let Some(kind) = error_kind {
                    span.record("error_kind", field::debug(kind));
                }
            }
            #[cfg(feature = "metrics")]
            crate::transport::metrics::record_outcome(
                &resource,
                status,
                start.elapsed(),
                error_kind,
            );
        }
        #[cfg(not(any(feature = "tracing", feature = "metrics")))]
        let _ = status;

        result
    }
}
