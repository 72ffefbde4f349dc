use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::FeedSource;
use crate::errors::{FeederError, FeederResult};
use crate::services::normalizer::DEFAULT_SUMMARY_WORD_LIMIT;
use crate::sources::rss_atom::DEFAULT_TIMEOUT_SECS;
use crate::sources::SourceRegistry;
use crate::storage::article_cache::DEFAULT_CACHE_TTL_SECS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Source names to ingest; `None` means the registry's default selection
    pub selected_sources: Option<Vec<String>>,
    pub sources_opml: Option<PathBuf>,
    pub cache_ttl: Duration,
    pub summary_word_limit: usize,
    pub request_timeout: Duration,
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selected_sources: None,
            sources_opml: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            summary_word_limit: DEFAULT_SUMMARY_WORD_LIMIT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            parallel: false,
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> FeederResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> FeederResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let selected_sources = get("FEEDER_SOURCES").map(|v| {
            v.split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect()
        });

        let sources_opml = get("FEEDER_SOURCES_OPML").map(PathBuf::from);

        let cache_ttl = match get("FEEDER_CACHE_TTL_SECS") {
            Some(v) => Duration::from_secs(parse_number("FEEDER_CACHE_TTL_SECS", &v)?),
            None => defaults.cache_ttl,
        };

        let summary_word_limit = match get("FEEDER_SUMMARY_WORD_LIMIT") {
            Some(v) => parse_number("FEEDER_SUMMARY_WORD_LIMIT", &v)?,
            None => defaults.summary_word_limit,
        };
        if summary_word_limit == 0 {
            return Err(FeederError::Config(
                "FEEDER_SUMMARY_WORD_LIMIT must be greater than zero".to_string(),
            ));
        }

        let request_timeout = match get("FEEDER_REQUEST_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_number("FEEDER_REQUEST_TIMEOUT_SECS", &v)?),
            None => defaults.request_timeout,
        };

        let parallel = match get("FEEDER_PARALLEL") {
            Some(v) => parse_flag("FEEDER_PARALLEL", &v)?,
            None => defaults.parallel,
        };

        Ok(Self {
            selected_sources,
            sources_opml,
            cache_ttl,
            summary_word_limit,
            request_timeout,
            parallel,
        })
    }

    /// Built-in registry, or the one described by the configured OPML file
    pub fn registry(&self) -> FeederResult<SourceRegistry> {
        match &self.sources_opml {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                SourceRegistry::from_opml(&content)
            }
            None => SourceRegistry::builtin(),
        }
    }

    /// Resolve the configured selection against a registry
    pub fn selection(&self, registry: &SourceRegistry) -> FeederResult<Vec<FeedSource>> {
        match &self.selected_sources {
            Some(names) => registry.select(names.as_slice()),
            None => Ok(registry.default_selection()),
        }
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> FeederResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| FeederError::Config(format!("{} must be a whole number, got '{}'", key, value)))
}

fn parse_flag(key: &str, value: &str) -> FeederResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(FeederError::Config(format!(
            "{} must be true or false, got '{}'",
            key, value
        ))),
    }
}
