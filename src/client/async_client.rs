//! High-level asynchronous Jenkins client.

use super::exchange::{Exchange, Mapper};
use crate::{
    ClientConfig, Credentials, Error, Resource, api,
    transport::async_transport::{DynAsyncTransport, ReqwestAsync},
};
use std::{sync::Arc, time::Duration};

#[cfg(feature = "tracing")]
use tracing::{Instrument, field};

/// Configures and constructs [`Client`].
///
/// `build` borrows the builder, so one builder can produce several independent clients.
#[derive(Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<DynAsyncTransport>,
}

impl ClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    #[must_use]
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    /// Set the Jenkins base URL (required). One trailing `/` is stripped.
    pub fn url(mut self, url: impl AsRef<str>) -> Self {
        self.config.set_url(url);
        self
    }

    /// Authenticate every request with HTTP basic auth.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.set_credentials(credentials);
        self
    }

    /// Shorthand for `credentials(Credentials::new(user, token))`.
    pub fn auth_basic(self, user: impl Into<String>, token: impl Into<String>) -> Self {
        self.credentials(Credentials::new(user, token))
    }

    /// Ignore system proxy environment variables.
    pub fn no_system_proxy(mut self) -> Self {
        self.config.no_proxy = true;
        self
    }

    /// Accept invalid TLS certificates (**dangerous**).
    pub fn danger_accept_invalid_certs(mut self, yes: bool) -> Self {
        self.config.accept_invalid_certs = yes;
        self
    }

    /// Override the default `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Adjust the per-request timeout.
    pub fn timeout(mut self, value: Duration) -> Self {
        self.config.timeout = value;
        self
    }

    /// Adjust the connection establishment timeout.
    pub fn connect_timeout(mut self, value: Duration) -> Self {
        self.config.connect_timeout = value;
        self
    }

    /// Enable/disable capturing `body_snippet` on errors and decode failures.
    pub fn capture_body_snippet(mut self, enabled: bool) -> Self {
        self.config.body_snippet.enabled = enabled;
        self
    }

    /// Set max bytes to keep for `body_snippet`.
    pub fn max_body_snippet_bytes(mut self, max_bytes: usize) -> Self {
        self.config.body_snippet.max_bytes = max_bytes;
        self
    }

    /// Send requests through a custom transport instead of `reqwest`.
    pub fn transport(mut self, transport: DynAsyncTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate configuration and build the client.
    pub fn build(&self) -> Result<Client, Error> {
        let exchange = Exchange::from_config(&self.config)?;

        let transport: DynAsyncTransport = match &self.transport {
            Some(transport) => Arc::clone(transport),
            None => Arc::new(ReqwestAsync::try_new(
                self.config.accept_invalid_certs,
                &self.config.user_agent,
                self.config.timeout,
                self.config.connect_timeout,
                self.config.no_proxy,
            )?),
        };

        Ok(Client {
            inner: Arc::new(Inner {
                exchange,
                transport,
            }),
        })
    }
}

/// Read-only Jenkins client. Cheap to clone; safe to share between tasks.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    exchange: Exchange,
    transport: DynAsyncTransport,
}

impl Client {
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Unauthenticated client with default settings.
    pub fn new(url: impl AsRef<str>) -> Result<Self, Error> {
        Self::builder().url(url).build()
    }

    /// Normalized base URL every request is built on.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.inner.exchange.base()
    }

    #[must_use]
    pub fn jobs(&self) -> api::JobsService {
        api::JobsService::new(self.clone())
    }

    #[must_use]
    pub fn views(&self) -> api::ViewsService {
        api::ViewsService::new(self.clone())
    }

    pub(crate) async fn fetch<T>(&self, resource: Resource<'_>, map: Mapper<T>) -> Result<T, Error> {
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

        let fut = self.fetch_inner(resource, map);
        #[cfg(feature = "tracing")]
        let fut = fut.instrument(span);
        fut.await
    }

    async fn fetch_inner<T>(&self, resource: Resource<'_>, map: Mapper<T>) -> Result<T, Error> {
        #[cfg(feature = "metrics")]
        let _inflight = crate::transport::metrics::InFlightGuard::new();
        #[cfg(any(feature = "tracing", feature = "metrics"))]
        let start = std::time::Instant::now();

        let request = self.inner.exchange.request(&resource)?;
        let url = request.url.clone();
        #[cfg(feature = "tracing")]
        {
            let span = tracing::Span::current();
            span.record("http.host", url.host_str().unwrap_or_default());
            span.record("http.path", url.path());
        }

        let outcome = match self.inner.transport.get(request).await {
            Ok(resp) => {
                let status = resp.status;
                (Some(status), self.inner.exchange.finish(&url, resp, map))
            }
            Err(err) => (None, Err(err)),
        };

        #[cfg(any(feature = "tracing", feature = "metrics"))]
        {
            let (status, result) = &outcome;
            let error_kind = result.as_ref().err().map(Error::kind);
            #[cfg(feature = "tracing")]
            {
                let span = tracing::Span::current();
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
                *status,
                start.elapsed(),
                error_kind,
            );
        }

        outcome.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ConfigErrorKind, ErrorKind,
        transport::{TransportRequest, TransportResponse, async_transport::AsyncTransport},
    };
    use async_trait::async_trait;
    use http::{HeaderMap, StatusCode};
    use std::sync::Mutex;

    /// Answers `/job/<name>/...` from a fixed table and records every requested path.
    struct FakeJenkins {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AsyncTransport for FakeJenkins {
        async fn get(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
            let path = req.url.path().to_owned();
            self.seen.lock().unwrap().push(path.clone());
            let (status, body) = match path.as_str() {
                "/job/a/api/json" => (StatusCode::OK, r#"{"name":"a","nextBuildNumber":1}"#),
                "/job/c/api/json" => (StatusCode::OK, r#"{"name":"c","nextBuildNumber":9}"#),
                _ => (StatusCode::NOT_FOUND, ""),
            };
            Ok(TransportResponse {
                status,
                headers: HeaderMap::new(),
                body: body.as_bytes().to_vec(),
            })
        }
    }

    fn client() -> (Client, Arc<FakeJenkins>) {
        let fake = Arc::new(FakeJenkins {
            seen: Mutex::new(Vec::new()),
        });
        let client = Client::builder()
            .url("https://ci.example.com/")
            .transport(fake.clone())
            .build()
            .unwrap();
        (client, fake)
    }

    #[test]
    fn build_without_url_fails() {
        let err = Client::builder().build().err().unwrap();
        assert_eq!(err.config_kind(), Some(ConfigErrorKind::MissingUrl));
    }

    #[test]
    fn builder_can_build_twice() {
        let builder = Client::builder().url("https://ci.example.com/");
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first.base_url(), "https://ci.example.com");
        assert_eq!(first.base_url(), second.base_url());
        assert!(!Arc::ptr_eq(&first.inner, &second.inner));
    }

    #[tokio::test]
    async fn info_many_runs_in_input_order_and_skips_duplicates() {
        let (client, fake) = client();
        let infos = client.jobs().info_many(["c", "a", "c"]).await.unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos["c"].next_build_number, Some(9));
        assert_eq!(
            *fake.seen.lock().unwrap(),
            ["/job/c/api/json", "/job/a/api/json"]
        );
    }

    #[tokio::test]
    async fn info_many_stops_at_first_failure() {
        let (client, fake) = client();
        let err = client
            .jobs()
            .info_many(["a", "b", "c"])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert!(err.is_not_found());
        assert_eq!(err.path(), Some("/job/b/api/json"));
        assert_eq!(
            *fake.seen.lock().unwrap(),
            ["/job/a/api/json", "/job/b/api/json"]
        );
    }
}
