use std::net::SocketAddr;

use axum::http::HeaderValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Env {
    Dev,
    Staging,
    Production,
}

impl Env {
    pub fn from_env() -> Self {
        match var("ENVIRONMENT") {
            Ok(Some(env)) => match env.as_str() {
                "dev" => Env::Dev,
                "staging" => Env::Staging,
                "production" => Env::Production,
                _ => Env::Dev,
            },
            _ => Env::Dev,
        }
    }
}

pub struct ServerConfig {
    pub env: Env,
    pub database_url: String,
    pub database_max_connections: usize,
    pub listen_addr: SocketAddr,
    pub cors_origins: Vec<HeaderValue>,
}

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: usize = 10;

fn var(key: &str) -> Result<Option<String>, String> {
    match std::env::var(key) {
        Ok(env) => Ok(Some(env)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(format!(
            "Could not get the environment variable `{key}` due to unicode error"
        )),
    }
}

fn required_var(key: &str) -> String {
    match var(key) {
        Ok(Some(val)) => val,
        Ok(None) => {
            tracing::error!("Environment variable `{key}` is required");
            std::process::exit(1)
        }
        Err(e) => {
            tracing::error!(
                "Environment variable `{key}` is required, but could not retrieve: {e}"
            );
            std::process::exit(1)
        }
    }
}

/// Parses an optional variable. Unset, unreadable and unparsable values all
/// fall back to `default`.
fn parsed_var<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match var(key) {
        Ok(raw) => parse_or(key, raw, default),
        Err(e) => {
            tracing::warn!("{e}, using the default");
            default
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(%raw, "Environment variable `{key}` is invalid: {e}, using the default");
            default
        }
    }
}

fn cors_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%origin, %error, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

impl ServerConfig {
    pub fn new_from_env() -> Self {
        ServerConfig {
            env: Env::from_env(),
            database_url: required_var("DATABASE_URL"),
            database_max_connections: parsed_var(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            ),
            listen_addr: parsed_var(
                "LISTEN_ADDR",
                DEFAULT_LISTEN_ADDR
                    .parse()
                    .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 3000))),
            ),
            cors_origins: match var("CORS_ORIGINS") {
                Ok(Some(raw)) => cors_origins(&raw),
                _ => Vec::new(),
            },
        }
    }
}
