use std::{env, net::SocketAddr, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub backend_url: String,
    pub backend_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_parts(
            env::var("PORT").ok(),
            env::var("BACKEND_URL").ok(),
            env::var("BACKEND_TIMEOUT_SECS").ok(),
        )
    }

    fn from_parts(
        port: Option<String>,
        backend_url: Option<String>,
        timeout: Option<String>,
    ) -> Self {
        let port = parse_or_default("PORT", port, DEFAULT_PORT);
        let timeout = parse_or_default("BACKEND_TIMEOUT_SECS", timeout, DEFAULT_TIMEOUT_SECS);

        let backend_url = match backend_url {
            Some(v) if !v.trim().is_empty() => v.trim().trim_end_matches('/').to_string(),
            _ => DEFAULT_BACKEND_URL.to_string(),
        };

        Self {
            port,
            backend_url,
            backend_timeout: Duration::from_secs(timeout),
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_or_default<T: std::str::FromStr + Copy>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={value:?}");
            default
        }),
    }
}
