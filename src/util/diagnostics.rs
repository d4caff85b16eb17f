use crate::{BodySnippetConfig, Credentials};
use http::HeaderMap;

use super::redact::{redact_text, truncate_utf8};

pub(crate) fn request_id(headers: &HeaderMap) -> Option<Box<str>> {
    for name in ["x-request-id", "x-correlation-id", "x-jenkins-session"] {
        if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string().into_boxed_str());
            }
        }
    }
    None
}

/// Pull a human-readable message out of a JSON error body, if there is one.
pub(crate) fn extract_message(body: &[u8]) -> Option<Box<str>> {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) else {
        return None;
    };

    for key in ["message", "error", "errorMessage"] {
        if let Some(msg) = value.get(key).and_then(|v| v.as_str()) {
            let msg = msg.trim();
            if !msg.is_empty() {
                return Some(msg.to_string().into_boxed_str());
            }
        }
    }
    None
}

pub(crate) fn body_snippet(
    body: &[u8],
    config: BodySnippetConfig,
    credentials: Option<&Credentials>,
) -> Option<Box<str>> {
    if !config.enabled {
        return None;
    }

    let body = String::from_utf8_lossy(body);
    let snippet = truncate_utf8(&body, config.max_bytes).to_string();
    Some(redact_text(snippet, credentials).into_boxed_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn extract_message_reads_known_keys() {
        assert_eq!(
            extract_message(br#"{"message":" job not found "}"#).as_deref(),
            Some("job not found")
        );
        assert_eq!(extract_message(b"<html>404</html>"), None);
    }

    #[test]
    fn request_id_skips_blank_values() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("  "));
        headers.insert("x-jenkins-session", HeaderValue::from_static("4f2a"));
        assert_eq!(request_id(&headers).as_deref(), Some("4f2a"));
    }

    #[test]
    fn body_snippet_disabled_returns_none() {
        let config = BodySnippetConfig {
            enabled: false,
            max_bytes: 16,
        };
        assert_eq!(body_snippet(b"abc", config, None), None);
    }
}
