// src/config.rs
use crate::error::MonitorError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DIRECTORY_URL: &str =
    "https://www.nasdaqtrader.com/dynamic/SymDir/nasdaqlisted.txt";
pub const DEFAULT_QUOTE_BASE_URL: &str = "https://ca.finance.yahoo.com/quote";
pub const DEFAULT_WATCHLIST_PATH: &str = "stockSave.txt";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Where the symbol directory comes from for this run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectoryLocation {
    Url(String),
    File(PathBuf),
}

#[derive(Clone, Debug)]
pub struct MonitorConfig {
    pub directory: DirectoryLocation,
    pub quote_base_url: String,
    pub watchlist_path: PathBuf,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            directory: DirectoryLocation::Url(DEFAULT_DIRECTORY_URL.to_string()),
            quote_base_url: DEFAULT_QUOTE_BASE_URL.to_string(),
            watchlist_path: PathBuf::from(DEFAULT_WATCHLIST_PATH),
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl MonitorConfig {
    /// Reads the process environment. A local `NASDAQ_DIRECTORY_FILE` takes
    /// precedence over `NASDAQ_DIRECTORY_URL`.
    pub fn from_env() -> Result<Self, MonitorError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, MonitorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("NASDAQ_DIRECTORY_FILE").filter(|s| !s.trim().is_empty()) {
            config.directory = DirectoryLocation::File(PathBuf::from(path));
        } else if let Some(url) = lookup("NASDAQ_DIRECTORY_URL").filter(|s| !s.trim().is_empty()) {
            config.directory = DirectoryLocation::Url(url);
        }

        if let Some(base) = lookup("QUOTE_BASE_URL") {
            config.quote_base_url = base.trim_end_matches('/').to_string();
        }

        if let Some(path) = lookup("WATCHLIST_PATH") {
            config.watchlist_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup("HTTP_TIMEOUT_SECONDS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                MonitorError::Config(format!("HTTP_TIMEOUT_SECONDS must be an integer, got '{}'", raw))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(agent) = lookup("HTTP_USER_AGENT") {
            config.user_agent = agent;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = MonitorConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.directory, DirectoryLocation::Url(DEFAULT_DIRECTORY_URL.into()));
        assert_eq!(config.watchlist_path, PathBuf::from("stockSave.txt"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn directory_file_wins_over_url() {
        let config = MonitorConfig::from_lookup(lookup_from(&[
            ("NASDAQ_DIRECTORY_URL", "https://mirror.example/nasdaqlisted.txt"),
            ("NASDAQ_DIRECTORY_FILE", "/tmp/nasdaqlisted.txt"),
        ]))
        .unwrap();
        assert_eq!(
            config.directory,
            DirectoryLocation::File(PathBuf::from("/tmp/nasdaqlisted.txt"))
        );
    }

    #[test]
    fn quote_base_url_loses_trailing_slash() {
        let config = MonitorConfig::from_lookup(lookup_from(&[(
            "QUOTE_BASE_URL",
            "https://finance.yahoo.com/quote/",
        )]))
        .unwrap();
        assert_eq!(config.quote_base_url, "https://finance.yahoo.com/quote");
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let err = MonitorConfig::from_lookup(lookup_from(&[("HTTP_TIMEOUT_SECONDS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, MonitorError::Config(_)));
    }
}
