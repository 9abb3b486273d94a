//! Runtime configuration from environment variables.
//!
//! | Variable              | Default | Use                                   |
//! |-----------------------|---------|---------------------------------------|
//! | `DATA_DIR`            | `data`  | directory holding the two JSON files  |
//! | `PORT`                | `3000`  | server port                           |
//! | `OUTPUT_DIR`          | `dist`  | static generator output               |
//! | `PAGE_CACHE_TTL_SECS` | `300`   | TTL for cached rendered pages         |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_OUTPUT_DIR: &str = "dist";
pub const DEFAULT_PAGE_CACHE_TTL_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub port: u16,
    pub output_dir: PathBuf,
    pub page_cache_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            port: DEFAULT_PORT,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            page_cache_ttl: Duration::from_secs(DEFAULT_PAGE_CACHE_TTL_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            data_dir: lookup("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            port: parse_or_default(&lookup, "PORT", DEFAULT_PORT),
            output_dir: lookup("OUTPUT_DIR").map(PathBuf::from).unwrap_or(defaults.output_dir),
            page_cache_ttl: Duration::from_secs(parse_or_default(
                &lookup,
                "PAGE_CACHE_TTL_SECS",
                DEFAULT_PAGE_CACHE_TTL_SECS,
            )),
        }
    }

    pub fn log(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  DATA_DIR: {}", self.data_dir.display());
        tracing::info!("  PORT: {}", self.port);
        tracing::info!("  OUTPUT_DIR: {}", self.output_dir.display());
        tracing::info!("  PAGE_CACHE_TTL_SECS: {}", self.page_cache_ttl.as_secs());
    }
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Invalid {}='{}', using default {}", key, raw, default);
                default
            }
        },
    }
}
