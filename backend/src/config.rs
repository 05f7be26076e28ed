//! Environment-driven server configuration.
//!
//! | Variable        | Default                 |
//! |-----------------|-------------------------|
//! | `HOST`          | `0.0.0.0`               |
//! | `PORT`          | `3000`                  |
//! | `JWT_SECRET`    | `default-secret`        |
//! | `JWT_TTL_HOURS` | `24`                    |
//! | `CORS_ORIGIN`   | `http://localhost:8080` |

use chrono::Duration;
use std::net::{IpAddr, SocketAddr};
use tracing::warn;

pub const DEFAULT_JWT_SECRET: &str = "default-secret";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TTL_HOURS: i64 = 24;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl: Duration,
    pub cors_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_ttl: Duration::hours(DEFAULT_TTL_HOURS),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_var(&lookup, "HOST", DEFAULT_HOST)?;
        let port = parse_var(&lookup, "PORT", &DEFAULT_PORT.to_string())?;

        let ttl_hours: i64 = parse_var(&lookup, "JWT_TTL_HOURS", &DEFAULT_TTL_HOURS.to_string())?;
        if ttl_hours <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_TTL_HOURS",
                value: ttl_hours.to_string(),
            });
        }

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None => {
                warn!("JWT_SECRET is not set, falling back to the built-in development secret");
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        Ok(Self {
            host,
            port,
            jwt_secret,
            jwt_ttl: Duration::hours(ttl_hours),
            cors_origin,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let value = lookup(name).unwrap_or_else(|| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}
