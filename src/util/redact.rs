use crate::Credentials;

pub(crate) fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes.min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

pub(crate) fn redact_text(mut text: String, credentials: Option<&Credentials>) -> String {
    let Some(credentials) = credentials else {
        return text;
    };

    for secret in credentials.secrets() {
        if !secret.is_empty() {
            text = text.replace(secret, "<redacted>");
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_utf8("héllo", 2), "h");
        assert_eq!(truncate_utf8("abc", 10), "abc");
    }

    #[test]
    fn redact_replaces_api_token() {
        let creds = Credentials::new("user", "supersecret");
        let text = redact_text("token=supersecret".to_owned(), Some(&creds));
        assert_eq!(text, "token=<redacted>");
        assert_eq!(redact_text("x".to_owned(), None), "x");
    }
}
