use crate::{
    BodySnippetConfig, Credentials, Error,
    util::url::{trim_base_url, validate_base_url},
};
use std::time::Duration;

/// Per-request timeout used unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Connection establishment timeout used unless overridden.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Everything a client needs, before validation.
///
/// Both builders wrap one of these; [`ClientConfig::validate`] is the single place where
/// configuration is checked, so a built client never fails later for configuration reasons.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct ClientConfig {
    /// Base URL with one trailing `/` already stripped.
    pub base_url: Option<String>,
    pub credentials: Option<Credentials>,
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Ignore system proxy environment variables.
    pub no_proxy: bool,
    /// Accept invalid TLS certificates (**dangerous**).
    pub accept_invalid_certs: bool,
    pub body_snippet: BodySnippetConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            credentials: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            no_proxy: false,
            accept_invalid_certs: false,
            body_snippet: BodySnippetConfig::default(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `url` with exactly one trailing `/` removed.
    ///
    /// Each call normalizes its own input; a stored value is never trimmed twice.
    pub fn set_url(&mut self, url: impl AsRef<str>) {
        self.base_url = Some(trim_base_url(url.as_ref()));
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Check the configuration and return the base URL requests are built on.
    pub fn validate(&self) -> Result<&str, Error> {
        let base = self.base_url.as_deref().unwrap_or_default();
        validate_base_url(base)?;
        if let Some(credentials) = &self.credentials {
            credentials.header_value()?;
        }
        Ok(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigErrorKind;

    #[test]
    fn missing_url_is_rejected() {
        let err = ClientConfig::new().validate().unwrap_err();
        assert_eq!(err.config_kind(), Some(ConfigErrorKind::MissingUrl));

        let mut config = ClientConfig::new();
        config.set_url("");
        let err = config.validate().unwrap_err();
        assert_eq!(err.config_kind(), Some(ConfigErrorKind::MissingUrl));
    }

    #[test]
    fn set_url_normalizes_each_input_once() {
        let mut config = ClientConfig::new();
        config.set_url("https://ci.example.com/");
        assert_eq!(config.validate().unwrap(), "https://ci.example.com");

        config.set_url("https://ci.example.com/");
        assert_eq!(config.validate().unwrap(), "https://ci.example.com");

        config.set_url("https://ci.example.com");
        assert_eq!(config.validate().unwrap(), "https://ci.example.com");
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.user_agent.starts_with("jenkins-json-api/"));
        assert!(config.credentials.is_none());
    }
}
