use std::env;
use std::str::FromStr;

use actix_web::http::Uri;
use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// `None` runs on the in-memory store
    pub database_url: Option<String>,
    pub api_prefix: String,

    // Rate limiting
    pub rate_api_per_min: u32,

    /// Browser origins allowed to call the API, `*` allows any
    pub cors_origins: Vec<String>,

    pub log_dir: String,
    pub log_level: Level,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var_or(name, default)
        .parse()
        .with_context(|| format!("{} has an invalid value", name))
}

fn parse_origins(raw: &str) -> Result<Vec<String>> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect();
    if origins.is_empty() {
        bail!("CORS_ORIGINS must name at least one origin or *");
    }
    for origin in origins.iter().filter(|o| o.as_str() != "*") {
        origin
            .parse::<Uri>()
            .with_context(|| format!("CORS_ORIGINS has an invalid origin {:?}", origin))?;
    }
    Ok(origins)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8000"),
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            api_prefix: var_or("API_PREFIX", "/api"),
            rate_api_per_min: parse_var("RATE_API_PER_MIN", "1000")?,
            cors_origins: parse_origins(&var_or("CORS_ORIGINS", "*"))?,
            log_dir: var_or("LOG_DIR", "logs"),
            log_level: parse_var("LOG_LEVEL", "debug")?,
        })
    }
}
