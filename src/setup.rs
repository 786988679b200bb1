use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use std::env;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::routes;

const DEFAULT_PORT: u16 = 2023;
const DEFAULT_LOG_LEVEL: Level = Level::INFO;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Error parsing {name} environment variable: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub log_level: Level,
    /// Origin of the admin front-end. Any origin is allowed when unset.
    pub cors_allowed_origin: Option<HeaderValue>,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Ok(Config {
            port: get_env_port()?,
            log_level: get_env_log_level()?,
            cors_allowed_origin: get_env_cors_origin()?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddrV4 {
        SocketAddrV4::new(Ipv4Addr::new(0, 0, 0, 0), self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            log_level: DEFAULT_LOG_LEVEL,
            cors_allowed_origin: None,
        }
    }
}

fn get_env_port() -> Result<u16, ConfigError> {
    let portstr = match env::var("PORT") {
        Ok(value) => value,
        Err(_) => return Ok(DEFAULT_PORT),
    };

    portstr.parse().map_err(|_| ConfigError::InvalidValue {
        name: "PORT",
        value: portstr,
    })
}

fn get_env_log_level() -> Result<Level, ConfigError> {
    let levelstr = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => return Ok(DEFAULT_LOG_LEVEL),
    };

    levelstr.parse().map_err(|_| ConfigError::InvalidValue {
        name: "LOG_LEVEL",
        value: levelstr,
    })
}

fn get_env_cors_origin() -> Result<Option<HeaderValue>, ConfigError> {
    let origin = match env::var("CORS_ALLOWED_ORIGIN") {
        Ok(value) if !value.trim().is_empty() => value,
        _ => return Ok(None),
    };

    match HeaderValue::from_str(origin.trim()) {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(ConfigError::InvalidValue {
            name: "CORS_ALLOWED_ORIGIN",
            value: origin,
        }),
    }
}

pub fn initialise_logging(level: Level) {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default tracing subscriber failed!");
    info!("Permission gate spinning up...");
}

/// Reports the outcome of loading `.env`. A missing file is fine,
/// the environment may be set up some other way.
pub fn report_environmental_variables(dotenv: Result<PathBuf, dotenvy::Error>) {
    match dotenv {
        Ok(path) => info!("loaded {}", path.display()),
        Err(e) if e.not_found() => warn!("No .env file found, using process environment"),
        Err(e) => {
            error!("Error reading .env file: {e}");
            panic!();
        }
    }
}

pub fn report_listener_socket_addr(listener: &TcpListener) {
    let addr = match listener.local_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Error getting listener socket address: {e}");
            panic!();
        }
    };
    info!("Listener socket address is: {}", addr);
}

pub fn cors_layer(config: &Config) -> CorsLayer {
    let origin = match &config.cors_allowed_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => AllowOrigin::any(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}

pub fn create_app(config: &Config) -> Router {
    routes::routes().layer(cors_layer(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var("PORT");
        env::remove_var("LOG_LEVEL");
        env::remove_var("CORS_ALLOWED_ORIGIN");
    }

    #[test]
    #[serial]
    fn defaults_apply_without_environment() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.cors_allowed_origin.is_none());
    }

    #[test]
    #[serial]
    fn environment_overrides_defaults() {
        clear_env();
        env::set_var("PORT", "8081");
        env::set_var("LOG_LEVEL", "debug");
        env::set_var("CORS_ALLOWED_ORIGIN", "https://admin.example.org");
        let config = Config::from_env().unwrap();
        clear_env();
        assert_eq!(config.port, 8081);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(
            config.cors_allowed_origin,
            Some(HeaderValue::from_static("https://admin.example.org"))
        );
        assert_eq!(config.socket_addr().port(), 8081);
    }

    #[test]
    #[serial]
    fn malformed_values_are_reported() {
        clear_env();
        env::set_var("PORT", "eighty");
        let port = Config::from_env();
        env::set_var("PORT", "8080");
        env::set_var("LOG_LEVEL", "loud");
        let level = Config::from_env();
        clear_env();
        match port {
            Err(ConfigError::InvalidValue { name, value }) => {
                assert_eq!(name, "PORT");
                assert_eq!(value, "eighty");
            }
            other => panic!("expected invalid PORT, got {other:?}"),
        }
        assert!(matches!(
            level,
            Err(ConfigError::InvalidValue { name: "LOG_LEVEL", .. })
        ));
    }
}
