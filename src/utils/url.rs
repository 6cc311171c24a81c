//! URL utilities for consistent URL handling
//!
//! Normalizes base URLs so endpoint joining never produces double slashes,
//! whatever the user put in their config or flag.

/// Normalize a base URL by removing trailing slashes.
///
/// # Examples
///
/// ```
/// use phrasedeck::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://127.0.0.1:8000"), "http://127.0.0.1:8000");
/// assert_eq!(normalize_base_url("http://127.0.0.1:8000/"), "http://127.0.0.1:8000");
/// assert_eq!(normalize_base_url("http://127.0.0.1:8000///"), "http://127.0.0.1:8000");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Construct a complete endpoint URL from a base URL and endpoint path.
///
/// # Examples
///
/// ```
/// use phrasedeck::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://127.0.0.1:8000", "api/process"),
///     "http://127.0.0.1:8000/api/process"
/// );
/// assert_eq!(
///     construct_api_url("http://127.0.0.1:8000/", "/api/save"),
///     "http://127.0.0.1:8000/api/save"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

/// Host portion of a base URL, for display in the title bar.
pub fn display_host(base_url: &str) -> &str {
    let without_scheme = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
}
