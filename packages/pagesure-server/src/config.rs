use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use pagesure::{ExtractionConfig, ResolverConfig};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub extraction_base_url: String,
    pub extraction_timeout: Option<Duration>,
    pub database_url: Option<String>,
    pub port: u16,
    pub coalesce_misses: bool,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            extraction_base_url: get("EXTRACTION_BASE_URL")
                .filter(|v| !v.is_empty())
                .context("EXTRACTION_BASE_URL must be set")?,
            extraction_timeout: get("EXTRACTION_TIMEOUT_SECS")
                .map(|v| {
                    v.parse::<u64>()
                        .map(Duration::from_secs)
                        .context("EXTRACTION_TIMEOUT_SECS must be a whole number of seconds")
                })
                .transpose()?,
            database_url: get("DATABASE_URL").filter(|v| !v.is_empty()),
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            coalesce_misses: get("COALESCE_MISSES")
                .map(|v| parse_bool("COALESCE_MISSES", &v))
                .transpose()?
                .unwrap_or(false),
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN").filter(|v| !v.is_empty()),
        })
    }

    pub fn extraction_config(&self) -> ExtractionConfig {
        let config = ExtractionConfig::new(&self.extraction_base_url);
        match self.extraction_timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new().with_coalesce_misses(self.coalesce_misses)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be a boolean, got '{}'", key, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("EXTRACTION_BASE_URL", "http://localhost:5000")]).unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.database_url.is_none());
        assert!(config.extraction_timeout.is_none());
        assert!(!config.coalesce_misses);
        assert!(config.cors_allowed_origin.is_none());
        assert_eq!(
            config.extraction_config().endpoint(),
            "http://localhost:5000/api/scrape"
        );
        assert_eq!(config.resolver_config().collection, "pages");
    }

    #[test]
    fn test_base_url_required() {
        assert!(config(&[]).is_err());
        assert!(config(&[("EXTRACTION_BASE_URL", "")]).is_err());
    }

    #[test]
    fn test_optional_values() {
        let config = config(&[
            ("EXTRACTION_BASE_URL", "https://scraper.example.com"),
            ("EXTRACTION_TIMEOUT_SECS", "45"),
            ("DATABASE_URL", "sqlite://pagesure.db?mode=rwc"),
            ("PORT", "3000"),
            ("COALESCE_MISSES", "true"),
            ("CORS_ALLOWED_ORIGIN", "https://pagesure.example.com"),
        ])
        .unwrap();

        assert_eq!(config.extraction_timeout, Some(Duration::from_secs(45)));
        assert_eq!(config.extraction_config().timeout, Some(Duration::from_secs(45)));
        assert_eq!(config.database_url.as_deref(), Some("sqlite://pagesure.db?mode=rwc"));
        assert_eq!(config.port, 3000);
        assert!(config.resolver_config().coalesce_misses);
    }

    #[test]
    fn test_invalid_values() {
        let base = ("EXTRACTION_BASE_URL", "http://localhost:5000");
        assert!(config(&[base, ("PORT", "eighty")]).is_err());
        assert!(config(&[base, ("EXTRACTION_TIMEOUT_SECS", "-1")]).is_err());
        assert!(config(&[base, ("COALESCE_MISSES", "maybe")]).is_err());
    }
}
