use axum::http::{HeaderValue, Method};
use std::str::FromStr;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Allowed CORS origins, parsed from a comma-separated list or `*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

impl FromStr for CorsOrigins {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "*" {
            return Ok(CorsOrigins::Any);
        }

        let origins = trimmed
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| format!("invalid origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CorsOrigins::List(origins))
    }
}

/// Creates a CORS layer with common settings for API services.
///
/// - `*` allows any origin without credentials
/// - an explicit list allows credentials
/// - methods: GET, POST, PUT, DELETE, OPTIONS
/// - headers: Content-Type, Authorization, Accept
/// - 1 hour max age
pub fn create_cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600));

    match origins {
        CorsOrigins::Any => layer.allow_origin(Any),
        CorsOrigins::List(list) => layer
            .allow_origin(AllowOrigin::list(list.clone()))
            .allow_credentials(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_and_blank_mean_any() {
        assert_eq!("*".parse::<CorsOrigins>().unwrap(), CorsOrigins::Any);
        assert_eq!("  ".parse::<CorsOrigins>().unwrap(), CorsOrigins::Any);
    }

    #[test]
    fn test_comma_separated_list() {
        let parsed: CorsOrigins = "http://localhost:3000, https://shop.example.com"
            .parse()
            .unwrap();
        assert_eq!(
            parsed,
            CorsOrigins::List(vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("https://shop.example.com"),
            ])
        );
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        assert!("http://ok.example,bad\norigin".parse::<CorsOrigins>().is_err());
    }
}
