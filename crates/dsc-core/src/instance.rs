//! Service origin handling.
//!
//! Every datasource endpoint lives under a fixed path prefix at the
//! service's origin, e.g. `http://localhost:8088/sanic/datasource/list`.

use url::Url;

use crate::errors::ConfigError;

/// Origin used when nothing is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8088";

/// Path prefix the service mounts all of its routes under.
pub const SERVICE_PREFIX: &str = "sanic";

/// Normalize a service origin to `scheme://host[:port]`.
///
/// A missing scheme defaults to `http://`. Any path, query, or fragment is
/// dropped and the host is lowercased.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOrigin`] when the value cannot be parsed,
/// has no host, or uses a scheme other than `http`/`https`.
pub fn normalize_origin(origin: &str) -> Result<String, ConfigError> {
    let trimmed = origin.trim();
    let invalid = |reason: String| ConfigError::InvalidOrigin {
        origin: origin.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("origin is empty".to_string()));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url.origin().ascii_serialization())
}

/// Build the full URL of a service route: `<origin>/sanic/<path>`.
pub fn service_url(origin: &str, path: &str) -> String {
    format!(
        "{}/{SERVICE_PREFIX}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/'),
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("http://localhost:8088", "http://localhost:8088")]
    #[case("http://localhost:8088/", "http://localhost:8088")]
    #[case("localhost:8088", "http://localhost:8088")]
    #[case("HTTPS://Data.Example.COM", "https://data.example.com")]
    #[case("https://data.example.com:443/", "https://data.example.com")]
    #[case("http://10.0.0.5:8088/chat/index.html", "http://10.0.0.5:8088")]
    #[case("  http://host:1/  ", "http://host:1")]
    fn test_should_normalize_origin(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_origin(input).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("ftp://files.example.com")]
    #[case("http://")]
    fn test_should_reject_invalid_origin(#[case] input: &str) {
        let err = normalize_origin(input).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrigin { .. }));
    }

    #[rstest]
    #[case("http://localhost:8088", "datasource/list", "http://localhost:8088/sanic/datasource/list")]
    #[case("http://localhost:8088/", "/datasource/list", "http://localhost:8088/sanic/datasource/list")]
    #[case("https://h", "user/login", "https://h/sanic/user/login")]
    fn test_should_build_service_url(
        #[case] origin: &str,
        #[case] path: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(service_url(origin, path), expected);
    }

    mod prop {
        use proptest::prelude::*;

        use super::super::*;

        proptest! {
            #[test]
            fn normalize_origin_is_idempotent(
                host in "[a-z][a-z0-9]{0,15}(\\.[a-z]{2,6}){0,2}",
                port in proptest::option::of(1u16..),
            ) {
                let input = match port {
                    Some(p) => format!("http://{host}:{p}/some/path"),
                    None => format!("http://{host}"),
                };
                let once = normalize_origin(&input).unwrap();
                let twice = normalize_origin(&once).unwrap();
                prop_assert_eq!(&once, &twice);
                prop_assert!(!once.ends_with('/'));
            }
        }
    }
}
