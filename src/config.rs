use axum::http::{HeaderValue, Method};
use std::net::SocketAddr;
use std::str::FromStr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

const DEFAULT_DATABASE_URL: &str = "sqlite://staffdir.db";
const DEFAULT_PORT: u16 = 5000;

/// Origins allowed to call the API from a browser.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

/// Server configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database_url: String,
    pub cors_origins: CorsOrigins,
}

impl Config {
    /// Load configuration from environment variables.
    /// DATABASE_URL defaults to "sqlite://staffdir.db"
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from any variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let listen_addr = match var("LISTEN_ADDR") {
            Some(addr) => parse_var("LISTEN_ADDR", &addr, "must be a valid socket address")?,
            None => {
                let port = match var("PORT") {
                    Some(port) => parse_var("PORT", &port, "must be a port number")?,
                    None => DEFAULT_PORT,
                };
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        let cors_origins = match var("CORS_ORIGINS").as_deref().map(str::trim) {
            None | Some("") | Some("*") => CorsOrigins::Any,
            Some(list) => CorsOrigins::List(parse_origins(list)?),
        };

        Ok(Config {
            listen_addr,
            database_url,
            cors_origins,
        })
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any);
        match &self.cors_origins {
            CorsOrigins::Any => layer.allow_origin(Any),
            CorsOrigins::List(origins) => layer.allow_origin(AllowOrigin::list(origins.clone())),
        }
    }
}

fn parse_var<T: FromStr>(
    name: &'static str,
    value: &str,
    msg: &'static str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid(name, msg))
}

/// Comma-separated origins; blank entries are skipped.
fn parse_origins(list: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    let mut origins = Vec::new();
    for origin in list.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        let origin = HeaderValue::from_str(origin)
            .map_err(|_| ConfigError::Invalid("CORS_ORIGINS", "contains an invalid origin"))?;
        origins.push(origin);
    }
    Ok(origins)
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, &'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(var, msg) => write!(f, "Invalid value for {}: {}", var, msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, "sqlite://staffdir.db");
        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:5000");
        assert_eq!(config.cors_origins, CorsOrigins::Any);
    }

    #[test]
    fn test_port_fallback() {
        let config = config_from(&[("PORT", "8080")]).unwrap();
        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:8080");

        // LISTEN_ADDR wins over PORT
        let config = config_from(&[("PORT", "8080"), ("LISTEN_ADDR", "127.0.0.1:9000")]).unwrap();
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_listen_addr() {
        let err = config_from(&[("LISTEN_ADDR", "nowhere")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for LISTEN_ADDR: must be a valid socket address"
        );
        assert!(config_from(&[("PORT", "http")]).is_err());
    }

    #[test]
    fn test_cors_origin_list() {
        let config = config_from(&[(
            "CORS_ORIGINS",
            "http://localhost:3000, https://staff.example.com",
        )])
        .unwrap();
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("https://staff.example.com"),
            ])
        );

        let config = config_from(&[("CORS_ORIGINS", "*")]).unwrap();
        assert_eq!(config.cors_origins, CorsOrigins::Any);
    }
}
