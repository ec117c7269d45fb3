//! Base URL validation and media URL normalization

use url::Url;

/// Parse a user-entered server address into a base URL
///
/// Accepts bare hosts ("nas.local:5244") by assuming http, which is what
/// self-hosted instances on a LAN usually run. Trailing slashes are dropped
/// so endpoint paths can be appended directly.
pub fn parse_base_url(input: &str) -> Result<Url, String> {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("server address is empty".to_string());
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };
    let url = Url::parse(&candidate).map_err(|e| format!("invalid server address: {}", e))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{}://'", other)),
    }
    if url.host_str().is_none() {
        return Err("server address has no host".to_string());
    }
    Ok(url)
}

/// Build a full endpoint URL from the base and an absolute API path
///
/// Plain concatenation keeps any mount prefix in the base URL, which
/// `Url::join` would strip for absolute paths.
pub fn api_endpoint(base: &Url, path: &str) -> String {
    format!("{}{}", base.as_str().trim_end_matches('/'), path)
}

/// Normalize a server-supplied media URL (thumbnail or raw link)
///
/// Server-relative paths resolve against the base origin, and plain-http
/// URLs are promoted to https when the session itself is secure. URLs the
/// server chose with an explicit scheme are otherwise left alone.
pub fn normalize_media_url(base: &Url, raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    if raw.starts_with('/') {
        return base
            .join(raw)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| raw.to_string());
    }
    if base.scheme() == "https" {
        if let Some(rest) = raw.strip_prefix("http://") {
            return format!("https://{}", rest);
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_adds_default_scheme() {
        let url = parse_base_url("nas.local:5244").unwrap();
        assert_eq!(url.as_str(), "http://nas.local:5244/");
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn test_parse_rejects_empty_and_bad_schemes() {
        assert!(parse_base_url("   ").is_err());
        assert!(parse_base_url("ftp://host").is_err());
    }

    #[test]
    fn test_parse_keeps_mount_prefix() {
        let url = parse_base_url("https://files.example.com/alist/").unwrap();
        assert_eq!(api_endpoint(&url, "/api/fs/list"), "https://files.example.com/alist/api/fs/list");
    }

    #[test]
    fn test_endpoint_concatenation() {
        let url = parse_base_url("https://nas.example.com:5244").unwrap();
        assert_eq!(
            api_endpoint(&url, "/api/auth/login"),
            "https://nas.example.com:5244/api/auth/login"
        );
    }

    #[test]
    fn test_relative_media_resolves_against_origin() {
        let base = parse_base_url("https://nas.example.com:5244").unwrap();
        assert_eq!(
            normalize_media_url(&base, "/p/pics/cat.jpg"),
            "https://nas.example.com:5244/p/pics/cat.jpg"
        );
    }

    #[test]
    fn test_http_thumb_promoted_on_secure_base() {
        let base = parse_base_url("https://nas.example.com").unwrap();
        assert_eq!(
            normalize_media_url(&base, "http://cdn.example.com/t.jpg"),
            "https://cdn.example.com/t.jpg"
        );
    }

    #[test]
    fn test_insecure_base_leaves_scheme_alone() {
        let base = parse_base_url("http://192.168.1.20:5244").unwrap();
        assert_eq!(
            normalize_media_url(&base, "http://192.168.1.20:5244/t.jpg"),
            "http://192.168.1.20:5244/t.jpg"
        );
    }

    #[test]
    fn test_empty_media_stays_empty() {
        let base = parse_base_url("https://nas.example.com").unwrap();
        assert_eq!(normalize_media_url(&base, ""), "");
    }
}
