//! Request preparation and response handling shared by the async and blocking clients.

use crate::{
    BodySnippetConfig, ClientConfig, Credentials, Error, HttpError, Resource,
    transport::{TransportRequest, TransportResponse},
    util::{
        diagnostics,
        redact::redact_text,
        url::{endpoint_url, sanitize_url_for_error},
    },
};
use http::{HeaderMap, HeaderValue, Method, header::ACCEPT};
use std::time::Duration;
use url::Url;

/// Maps a successful response body into a typed record.
pub(crate) type Mapper<T> = fn(&[u8]) -> Result<T, serde_json::Error>;

/// Validated, immutable per-client settings.
#[derive(Clone, Debug)]
pub(crate) struct Exchange {
    base: String,
    credentials: Option<Credentials>,
    timeout: Duration,
    body_snippet: BodySnippetConfig,
}

impl Exchange {
    pub(crate) fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        let base = config.validate()?.to_owned();
        Ok(Self {
            base,
            credentials: config.credentials.clone(),
            timeout: config.timeout,
            body_snippet: config.body_snippet,
        })
    }

    pub(crate) fn base(&self) -> &str {
        &self.base
    }

    pub(crate) fn request(&self, resource: &Resource<'_>) -> Result<TransportRequest, Error> {
        let url = endpoint_url(&self.base, &resource.path())?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(credentials) = &self.credentials {
            credentials.apply(&mut headers)?;
        }

        Ok(TransportRequest {
            url,
            headers,
            timeout: self.timeout,
        })
    }

    /// Turn a raw response into a record: non-2xx fails the request, a body that does not
    /// map fails decoding.
    pub(crate) fn finish<T>(
        &self,
        url: &Url,
        resp: TransportResponse,
        map: Mapper<T>,
    ) -> Result<T, Error> {
        let request_id = diagnostics::request_id(&resp.headers);

        if !resp.status.is_success() {
            let message = diagnostics::extract_message(&resp.body).map(|msg| {
                redact_text(msg.into(), self.credentials.as_ref()).into_boxed_str()
            });
            return Err(Error::from_http(
                Method::GET,
                HttpError {
                    status: resp.status,
                    url: Box::new(sanitize_url_for_error(url)),
                    message,
                    request_id,
                    body_snippet: self.snippet(&resp.body),
                },
            ));
        }

        map(&resp.body).map_err(|source| Error::Decode {
            status: resp.status,
            method: Method::GET,
            path: url.path().to_string().into_boxed_str(),
            request_id,
            body_snippet: self.snippet(&resp.body),
            source,
        })
    }

    fn snippet(&self, body: &[u8]) -> Option<Box<str>> {
        diagnostics::body_snippet(body, self.body_snippet, self.credentials.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, decode};
    use http::{StatusCode, header::AUTHORIZATION};

    fn exchange(credentials: Option<Credentials>) -> Exchange {
        let mut config = ClientConfig::new();
        config.set_url("https://ci.example.com/jenkins/");
        if let Some(credentials) = credentials {
            config.set_credentials(credentials);
        }
        Exchange::from_config(&config).unwrap()
    }

    fn response(status: StatusCode, body: &str) -> TransportResponse {
        TransportResponse {
            status,
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn request_targets_resource_with_auth() {
        let exchange = exchange(Some(Credentials::new("user", "token")));
        let req = exchange
            .request(&Resource::Build {
                job: "demo",
                number: 3,
            })
            .unwrap();
        assert_eq!(
            req.url.as_str(),
            "https://ci.example.com/jenkins/job/demo/3/api/json?pretty=true"
        );
        assert_eq!(
            req.headers.get(AUTHORIZATION).unwrap(),
            "Basic dXNlcjp0b2tlbg=="
        );
    }

    #[test]
    fn request_without_credentials_has_no_auth_header() {
        let req = exchange(None).request(&Resource::AllJobs).unwrap();
        assert!(req.headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn non_success_status_is_request_failure_with_redacted_snippet() {
        let exchange = exchange(Some(Credentials::new("user", "supersecret")));
        let url = Url::parse("https://ci.example.com/jenkins/job/demo/999/api/json?pretty=true")
            .unwrap();
        let err = exchange
            .finish(
                &url,
                response(StatusCode::NOT_FOUND, "no such build supersecret"),
                decode::build_info,
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert!(err.is_not_found());
        assert_eq!(err.path(), Some("/jenkins/job/demo/999/api/json"));
        let text = err.to_string();
        assert!(!text.contains("supersecret"), "{text}");
        match err {
            Error::RequestFailed {
                failure: crate::RequestFailure::Status(http),
                ..
            } => {
                let snippet = http.body_snippet.as_deref().unwrap_or_default();
                assert!(snippet.contains("<redacted>"));
                assert_eq!(http.url.query(), None);
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn redirect_status_is_not_success() {
        let url = Url::parse("https://ci.example.com/jenkins/api/json").unwrap();
        let err = exchange(None)
            .finish(
                &url,
                response(StatusCode::FOUND, ""),
                decode::job_collection,
            )
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::FOUND));
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let url = Url::parse("https://ci.example.com/jenkins/job/demo/api/json").unwrap();
        let err = exchange(None)
            .finish(&url, response(StatusCode::OK, "{\"name\":"), decode::job_info)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.status(), Some(StatusCode::OK));
        match err {
            Error::Decode { body_snippet, .. } => {
                assert_eq!(body_snippet.as_deref(), Some("{\"name\":"));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }
}
