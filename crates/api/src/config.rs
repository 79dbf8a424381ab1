//! Application configuration

use std::env;
use std::time::Duration;

use url::Url;
use visasite_shared::{LocaleCatalog, LocaleError};

/// Header a fronting proxy sets to override the request host for cookie scoping
pub const DEFAULT_COOKIE_CUTTER_HEADER: &str = "x-ivisa-cookie-cutter";

/// Deployment environment (`APP_ENV`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Local,
    Testing,
    Staging,
    Production,
}

impl AppEnvironment {
    /// Unknown values are treated as production
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "local" | "development" => AppEnvironment::Local,
            "testing" | "test" => AppEnvironment::Testing,
            "staging" => AppEnvironment::Staging,
            _ => AppEnvironment::Production,
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    pub app_url: Url,
    pub environment: AppEnvironment,

    // Localization
    pub locales: LocaleCatalog,
    pub cookie_cutter_header: String,
    pub default_currency: String,

    // Visa catalog
    pub visa_catalog_path: Option<String>,
    pub catalog_cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_url_raw =
            env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        let app_url = Url::parse(&app_url_raw)
            .ok()
            .filter(|url| url.host_str().is_some())
            .ok_or(ConfigError::InvalidUrl("APP_URL"))?;

        Ok(Self {
            // Server
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            app_url,
            environment: AppEnvironment::from_name(
                &env::var("APP_ENV").unwrap_or_else(|_| "production".to_string()),
            ),

            // Localization
            locales: match env::var("SITE_LOCALES") {
                Ok(entries) if !entries.trim().is_empty() => LocaleCatalog::parse(&entries)?,
                _ => LocaleCatalog::default(),
            },
            cookie_cutter_header: env::var("COOKIE_CUTTER_HEADER")
                .unwrap_or_else(|_| DEFAULT_COOKIE_CUTTER_HEADER.to_string())
                .to_ascii_lowercase(),
            default_currency: env::var("DEFAULT_CURRENCY").unwrap_or_else(|_| "USD".to_string()),

            // Visa catalog
            visa_catalog_path: env::var("VISA_CATALOG_PATH").ok().filter(|p| !p.is_empty()),
            catalog_cache_ttl: Duration::from_secs(
                env::var("CATALOG_CACHE_TTL_SECS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()
                    .unwrap_or(300),
            ),
        })
    }

    /// Host part of `APP_URL`, used when no request is available
    pub fn app_host(&self) -> &str {
        self.app_url.host_str().unwrap_or("localhost")
    }

    /// Scheme used for generated absolute links
    pub fn scheme(&self) -> &str {
        self.app_url.scheme()
    }

    /// `APP_URL` without a trailing slash
    pub fn base_url(&self) -> String {
        self.app_url.as_str().trim_end_matches('/').to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL in environment variable: {0}")]
    InvalidUrl(&'static str),
    #[error("Invalid SITE_LOCALES: {0}")]
    Locales(#[from] LocaleError),
}
