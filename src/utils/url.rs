//! URL helpers for joining the backend origin with endpoint paths.

/// Normalize a base URL by removing trailing slashes and surrounding whitespace.
///
/// # Examples
///
/// ```
/// use medichat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8000"), "http://localhost:8000");
/// assert_eq!(normalize_base_url("http://localhost:8000///"), "http://localhost:8000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// # Examples
///
/// ```
/// use medichat::utils::url::construct_endpoint_url;
///
/// assert_eq!(
///     construct_endpoint_url("http://localhost:8000/", "/chat"),
///     "http://localhost:8000/chat"
/// );
/// ```
pub fn construct_endpoint_url(base_url: &str, path: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let path = path.trim_start_matches('/');
    format!("{}/{}", normalized_base, path)
}

/// Returns true when the value looks like an absolute http(s) URL.
pub fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    let rest = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"));
    matches!(rest, Some(host) if !host.is_empty() && !host.starts_with('/'))
}
