use std::net::IpAddr;
use thiserror::Error;
use url::Url;

/// URLs longer than this are rejected outright.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors from URL validation.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    #[error("URL has no host")]
    MissingHost,
    #[error("URL too long ({0} chars, max {MAX_URL_LENGTH})")]
    TooLong(usize),
    #[error("Private IP address not allowed: {0}")]
    PrivateIp(String),
    #[error("Localhost not allowed")]
    Localhost,
}

/// Validate a media or avatar URL from post data or profile input.
///
/// Accepts absolute `http`/`https` URLs with a host.
///
/// ```
/// use reel::util::validate_media_url;
///
/// assert!(validate_media_url("https://example.com/v.mp4").is_ok());
/// assert!(validate_media_url("file:///etc/passwd").is_err());
/// assert!(validate_media_url("not a url").is_err());
/// ```
pub fn validate_media_url(url_str: &str) -> Result<Url, UrlValidationError> {
    if url_str.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong(url_str.len()));
    }
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// Validate a URL before handing it to the system browser.
///
/// Stricter than [`validate_media_url`]: post data must not be able to point
/// the browser at localhost or a private network address.
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = validate_media_url(url_str)?;

    if let Some(host) = url.host_str() {
        if host.eq_ignore_ascii_case("localhost") {
            return Err(UrlValidationError::Localhost);
        }

        // IPv6 hosts come back bracketed
        let host_for_parse = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);

        if let Ok(ip) = host_for_parse.parse::<IpAddr>() {
            if ip.is_loopback() {
                return Err(UrlValidationError::Localhost);
            }
            if is_private_ip(&ip) {
                return Err(UrlValidationError::PrivateIp(ip.to_string()));
            }
        }
    }

    Ok(url)
}

fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            ipv4.is_private() || ipv4.is_loopback() || ipv4.is_link_local() || ipv4.is_unspecified()
        }
        IpAddr::V6(ipv6) => {
            if ipv6.is_loopback() || ipv6.is_unspecified() {
                return true;
            }
            let segments = ipv6.segments();
            // fc00::/7
            let is_unique_local = (segments[0] & 0xfe00) == 0xfc00;
            // fe80::/10
            let is_link_local = (segments[0] & 0xffc0) == 0xfe80;
            is_unique_local || is_link_local
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_urls_accepted() {
        assert!(validate_media_url("https://randomuser.me/api/portraits/men/1.jpg").is_ok());
        assert!(validate_media_url("http://commondatastorage.googleapis.com/v.mp4").is_ok());
        assert!(validate_media_url("  https://example.com/padded.jpg ").is_ok());
    }

    #[test]
    fn test_media_url_schemes_rejected() {
        assert!(matches!(
            validate_media_url("ftp://example.com/v.mp4"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert!(validate_media_url("javascript:alert(1)").is_err());
        assert!(validate_media_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_relative_and_empty_rejected() {
        assert!(matches!(
            validate_media_url("/images/a.jpg"),
            Err(UrlValidationError::InvalidUrl(_))
        ));
        assert!(validate_media_url("").is_err());
    }

    #[test]
    fn test_overlong_url_rejected() {
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            validate_media_url(&url),
            Err(UrlValidationError::TooLong(_))
        ));
    }

    #[test]
    fn test_open_rejects_local_targets() {
        assert!(validate_url_for_open("http://localhost:8080/").is_err());
        assert!(validate_url_for_open("http://127.0.0.1/").is_err());
        assert!(validate_url_for_open("http://[::1]/").is_err());
        assert!(validate_url_for_open("http://192.168.1.1/").is_err());
        assert!(validate_url_for_open("http://10.0.0.1:3000/").is_err());
        assert!(validate_url_for_open("http://169.254.1.1/").is_err());
        assert!(validate_url_for_open("http://[fe80::1]/").is_err());
        assert!(validate_url_for_open("http://0.0.0.0/").is_err());
    }

    #[test]
    fn test_open_accepts_public_urls() {
        assert!(validate_url_for_open("https://example.com/video.mp4").is_ok());
        assert!(validate_url_for_open("https://example.com:443/a.jpg").is_ok());
    }
}
