use crate::{ConfigErrorKind, Error};
use base64::{Engine, engine::general_purpose::STANDARD as B64};
use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use std::fmt;

#[derive(Clone, Default, Eq, PartialEq)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Username and API token sent as HTTP basic authentication.
///
/// Empty values are accepted as-is; Jenkins decides whether they mean anything.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Credentials {
    username: String,
    api_token: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_token: SecretString::new(api_token),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn api_token(&self) -> &SecretString {
        &self.api_token
    }

    pub(crate) fn secrets(&self) -> Vec<&str> {
        vec![self.api_token.expose()]
    }

    /// `Basic base64("<username>:<api_token>")`.
    pub(crate) fn header_value(&self) -> Result<HeaderValue, Error> {
        let raw = format!(
            "Basic {}",
            B64.encode(format!("{}:{}", self.username, self.api_token.expose()))
        );
        let mut value = HeaderValue::from_str(&raw).map_err(|err| {
            Error::config_with_source(
                ConfigErrorKind::InvalidHeader,
                "invalid Authorization header value",
                err,
            )
        })?;
        value.set_sensitive(true);
        Ok(value)
    }

    pub(crate) fn apply(&self, headers: &mut HeaderMap) -> Result<(), Error> {
        headers.insert(AUTHORIZATION, self.header_value()?);
        Ok(())
    }
}
