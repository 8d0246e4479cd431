//! Validation of target URLs submitted for shortening.

use url::Url;

/// Reasons a target URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must not contain whitespace or control characters")]
    InvalidCharacters,
}

/// Checks that `input` is an absolute `http` or `https` URL with a host.
///
/// The URL itself is not rewritten: the service stores and redirects to the
/// exact string the owner submitted. The URL parser silently drops tabs and
/// newlines, so such characters are rejected up front; the stored string must
/// be usable verbatim as a `Location` header.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for strings that do not parse
/// as absolute URLs, [`UrlValidationError::UnsupportedProtocol`] for schemes such
/// as `javascript:`, `data:` or `ftp:`, [`UrlValidationError::MissingHost`]
/// when no host is present, and [`UrlValidationError::InvalidCharacters`] for
/// embedded whitespace or control characters.
pub fn validate_http_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(UrlValidationError::InvalidCharacters);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_http_url("https://example.com").is_ok());
        assert!(validate_http_url("http://example.com/path?q=1#frag").is_ok());
        assert!(validate_http_url("https://sub.example.com:8443/a/b").is_ok());
    }

    #[test]
    fn test_rejects_relative_strings() {
        assert!(matches!(
            validate_http_url("not-a-url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_http_url("/just/a/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_http_url(""),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_characters_the_parser_would_drop() {
        for input in [
            "https://example.com/a\nb",
            "https://example.com/a\tb",
            "https://exa\r\nmple.com",
            " https://example.com",
            "https://example.com/a b",
            "https://example.com/\u{7f}",
        ] {
            assert!(
                matches!(
                    validate_http_url(input),
                    Err(UrlValidationError::InvalidCharacters)
                ),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_accepts_non_ascii_path() {
        assert!(validate_http_url("https://example.com/café").is_ok());
    }

    #[test]
    fn test_rejects_other_schemes() {
        for input in [
            "ftp://example.com/file",
            "javascript:alert(1)",
            "data:text/html,hello",
            "mailto:user@example.com",
        ] {
            assert!(
                matches!(
                    validate_http_url(input),
                    Err(UrlValidationError::UnsupportedProtocol)
                ),
                "{input} should be rejected"
            );
        }
    }
}
