use std::time::Duration;

use anyhow::{Result, bail};
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::CorsConfig;

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

/// Build a CORS layer from config. `None` when CORS is disabled.
///
/// # Errors
/// Returns an error if `allow_credentials` is set while any allow-list is
/// `"*"`; browsers reject that combination.
pub fn build_cors_layer(cfg: &CorsConfig) -> Result<Option<CorsLayer>> {
    if !cfg.enabled {
        return Ok(None);
    }

    let has_wildcard_origin = is_wildcard(&cfg.allowed_origins);

    if has_wildcard_origin && cfg.allow_credentials {
        bail!(
            "CORS misconfiguration: allowed_origins=['*'] cannot be combined with \
             allow_credentials=true. Specify explicit origins when using credentials."
        );
    }

    if cfg.allow_credentials
        && (is_wildcard(&cfg.allowed_methods) || is_wildcard(&cfg.allowed_headers))
    {
        bail!(
            "CORS misconfiguration: allow_credentials=true requires explicit \
             allowed_methods and allowed_headers."
        );
    }

    if has_wildcard_origin {
        warn!(
            "CORS is configured with allowed_origins=['*']. \
             Consider specifying explicit origins for production deployments."
        );
    }

    let mut layer = CorsLayer::new();

    if has_wildcard_origin {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cfg
            .allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        if !origins.is_empty() {
            layer = layer.allow_origin(origins);
        }
    }

    if is_wildcard(&cfg.allowed_methods) {
        layer = layer.allow_methods(Any);
    } else {
        let methods: Vec<Method> = cfg
            .allowed_methods
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !methods.is_empty() {
            layer = layer.allow_methods(methods);
        }
    }

    if is_wildcard(&cfg.allowed_headers) {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = cfg
            .allowed_headers
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !headers.is_empty() {
            layer = layer.allow_headers(headers);
        }
    }

    if cfg.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    if cfg.max_age_seconds > 0 {
        layer = layer.max_age(Duration::from_secs(cfg.max_age_seconds));
    }

    Ok(Some(layer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_a_layer() {
        assert!(build_cors_layer(&CorsConfig::default()).unwrap().is_some());
    }

    #[test]
    fn disabled_cors_builds_nothing() {
        let cfg = CorsConfig {
            enabled: false,
            ..CorsConfig::default()
        };
        assert!(build_cors_layer(&cfg).unwrap().is_none());
    }

    #[test]
    fn wildcard_origin_with_credentials_is_rejected() {
        let cfg = CorsConfig {
            allow_credentials: true,
            ..CorsConfig::default()
        };
        assert!(build_cors_layer(&cfg).is_err());
    }

    #[test]
    fn wildcard_headers_with_credentials_are_rejected() {
        let cfg = CorsConfig {
            allowed_origins: vec!["https://maps.city.example".to_owned()],
            allow_credentials: true,
            ..CorsConfig::default()
        };
        assert!(build_cors_layer(&cfg).is_err());
    }

    #[test]
    fn explicit_origins_allow_credentials() {
        let cfg = CorsConfig {
            allowed_origins: vec!["https://maps.city.example".to_owned()],
            allowed_methods: vec!["GET".to_owned(), "POST".to_owned()],
            allowed_headers: vec!["content-type".to_owned()],
            allow_credentials: true,
            max_age_seconds: 600,
            ..CorsConfig::default()
        };
        assert!(build_cors_layer(&cfg).unwrap().is_some());
    }
}
