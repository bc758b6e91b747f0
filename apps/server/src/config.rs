use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use axum::http::HeaderValue;
use fintrack_core::constants::{DEFAULT_PAGE_SIZE, DEFAULT_WEEKLY_GOAL};
use rust_decimal::Decimal;

/// Which formatter the tracing subscriber installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("expected 'text' or 'json', got '{}'", other)),
        }
    }
}

/// Allowed CORS origins. `*` allows any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow_origins: CorsOrigins,
    pub request_timeout: Duration,
    pub weekly_goal: Decimal,
    pub default_page_size: i64,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./db/fintrack.db".to_string(),
            cors_allow_origins: CorsOrigins::Any,
            request_timeout: Duration::from_millis(30_000),
            weekly_goal: DEFAULT_WEEKLY_GOAL,
            default_page_size: DEFAULT_PAGE_SIZE,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Reads `FT_*` variables, after loading `.env` if one exists.
    /// Any malformed value stops startup.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr = match var("FT_LISTEN_ADDR") {
            Some(raw) => raw
                .trim()
                .parse::<SocketAddr>()
                .with_context(|| format!("FT_LISTEN_ADDR is not a socket address: '{}'", raw))?,
            None => defaults.listen_addr,
        };

        let db_path = var("FT_DB_PATH").unwrap_or(defaults.db_path);

        let cors_allow_origins = match var("FT_CORS_ALLOW_ORIGINS") {
            Some(raw) => parse_origins(&raw)?,
            None => defaults.cors_allow_origins,
        };

        let request_timeout = match var("FT_REQUEST_TIMEOUT_MS") {
            Some(raw) => {
                let millis = raw.trim().parse::<u64>().with_context(|| {
                    format!("FT_REQUEST_TIMEOUT_MS must be a whole number, got '{}'", raw)
                })?;
                if millis == 0 {
                    bail!("FT_REQUEST_TIMEOUT_MS must be greater than zero");
                }
                Duration::from_millis(millis)
            }
            None => defaults.request_timeout,
        };

        let weekly_goal = match var("FT_WEEKLY_GOAL") {
            Some(raw) => {
                let goal = Decimal::from_str(raw.trim())
                    .with_context(|| format!("FT_WEEKLY_GOAL is not a number: '{}'", raw))?;
                if goal <= Decimal::ZERO {
                    bail!("FT_WEEKLY_GOAL must be greater than zero, got {}", goal);
                }
                goal
            }
            None => defaults.weekly_goal,
        };

        let default_page_size = match var("FT_DEFAULT_PAGE_SIZE") {
            Some(raw) => {
                let size = raw.trim().parse::<i64>().with_context(|| {
                    format!("FT_DEFAULT_PAGE_SIZE must be a whole number, got '{}'", raw)
                })?;
                if size <= 0 {
                    bail!("FT_DEFAULT_PAGE_SIZE must be greater than zero, got {}", size);
                }
                size
            }
            None => defaults.default_page_size,
        };

        let log_format = match var("FT_LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().context("FT_LOG_FORMAT")?,
            None => defaults.log_format,
        };

        Ok(Config {
            listen_addr,
            db_path,
            cors_allow_origins,
            request_timeout,
            weekly_goal,
            default_page_size,
            log_format,
        })
    }
}

fn parse_origins(raw: &str) -> anyhow::Result<CorsOrigins> {
    let origins: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .collect();
    if origins.is_empty() || origins.contains(&"*") {
        return Ok(CorsOrigins::Any);
    }
    let values = origins
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| {
                format!("FT_CORS_ALLOW_ORIGINS has an invalid origin: '{}'", origin)
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(CorsOrigins::List(values))
}
