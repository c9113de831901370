use std::env;
use std::str::FromStr;

use crate::repository::DEFAULT_PAGE_SIZE;

/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Rows returned per listing page.
    pub page_size: usize,
    /// Directory holding the built admin UI.
    pub assets_dir: String,
    /// Directory holding call recordings; stored file paths are relative to it.
    pub recordings_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: "app.db".to_string(),
            address: "127.0.0.1".to_string(),
            port: 8080,
            page_size: DEFAULT_PAGE_SIZE,
            assets_dir: "./assets".to_string(),
            recordings_dir: "./recordings".to_string(),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            address: lookup("ADDRESS").unwrap_or(defaults.address),
            port: parse_or(&lookup, "PORT", defaults.port),
            page_size: parse_or(&lookup, "PAGE_SIZE", defaults.page_size).max(1),
            assets_dir: lookup("ASSETS_DIR").unwrap_or(defaults.assets_dir),
            recordings_dir: lookup("RECORDINGS_DIR").unwrap_or(defaults.recordings_dir),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Ignoring invalid {key} value `{raw}`");
                default
            }
        },
    }
}
