//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub base_url: String,
    pub page_size: usize,
    pub timeout: Duration,
    /// Where the signed-in session's tokens are kept between runs.
    pub token_file: PathBuf,
}

impl AppConfig {
    /// Reads `INVENTORY_API_BASE_URL`, `INVENTORY_PAGE_SIZE`,
    /// `INVENTORY_TIMEOUT_SECS` and `INVENTORY_TOKEN_FILE`. Unset or
    /// unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("INVENTORY_API_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let page_size = parse_or(&lookup, "INVENTORY_PAGE_SIZE", DEFAULT_PAGE_SIZE).max(1);
        let timeout_secs = parse_or(&lookup, "INVENTORY_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
        let token_file = lookup("INVENTORY_TOKEN_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_token_file(lookup("HOME")));

        Self {
            base_url,
            page_size,
            timeout: Duration::from_secs(timeout_secs),
            token_file,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn default_token_file(home: Option<String>) -> PathBuf {
    let home = home.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    home.join(".inventory").join("credentials.json")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[("HOME", "/home/clerk")]);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, 6);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(
            config.token_file,
            PathBuf::from("/home/clerk/.inventory/credentials.json")
        );
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("INVENTORY_API_BASE_URL", "https://pos.example.test/"),
            ("INVENTORY_PAGE_SIZE", "10"),
            ("INVENTORY_TIMEOUT_SECS", "5"),
            ("INVENTORY_TOKEN_FILE", "/tmp/tokens.json"),
        ]);
        assert_eq!(config.base_url, "https://pos.example.test");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.token_file, PathBuf::from("/tmp/tokens.json"));
    }

    #[test]
    fn bad_values_fall_back() {
        let config = config_from(&[
            ("INVENTORY_PAGE_SIZE", "lots"),
            ("INVENTORY_TIMEOUT_SECS", "-1"),
            ("INVENTORY_API_BASE_URL", "  "),
        ]);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn zero_page_size_is_raised_to_one() {
        assert_eq!(config_from(&[("INVENTORY_PAGE_SIZE", "0")]).page_size, 1);
    }
}
