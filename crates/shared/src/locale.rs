//! Supported site languages
//!
//! The catalog maps 2-letter locale codes to display names. Its keys are the
//! language subdomains the site answers on (es.example.com, fr.example.com);
//! English lives on the bare or `www` host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::LocaleError;

/// Locale served when the host carries no language subdomain
pub const DEFAULT_LOCALE: &str = "en";

/// Subdomain that marks the English site on a top-level domain
pub const WWW_LABEL: &str = "www";

/// Languages enabled when no catalog is configured
const DEFAULT_LOCALES: &[(&str, &str)] = &[
    ("ar", "العربية"),
    ("de", "Deutsch"),
    ("en", "English"),
    ("es", "Español"),
    ("fr", "Français"),
    ("it", "Italiano"),
    ("ja", "日本語"),
    ("ko", "한국어"),
    ("nl", "Nederlands"),
    ("pt", "Português"),
    ("ru", "Русский"),
    ("tr", "Türkçe"),
    ("zh", "中文"),
];

/// Map of locale code -> display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleCatalog {
    locales: BTreeMap<String, String>,
}

impl Default for LocaleCatalog {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_LOCALES.iter().copied())
    }
}

impl LocaleCatalog {
    /// Build a catalog from (code, name) pairs. Codes are lowercased.
    pub fn from_pairs<I, C, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, N)>,
        C: AsRef<str>,
        N: Into<String>,
    {
        let locales = pairs
            .into_iter()
            .map(|(code, name)| (code.as_ref().trim().to_ascii_lowercase(), name.into()))
            .collect();
        Self { locales }
    }

    /// Parse a catalog from `en=English,es=Español` notation
    pub fn parse(entries: &str) -> Result<Self, LocaleError> {
        let mut locales = BTreeMap::new();

        for entry in entries.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (code, name) = entry
                .split_once('=')
                .ok_or_else(|| LocaleError::MalformedEntry(entry.to_string()))?;
            let code = code.trim().to_ascii_lowercase();
            let name = name.trim();

            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) || name.is_empty()
            {
                return Err(LocaleError::MalformedEntry(entry.to_string()));
            }

            locales.insert(code, name.to_string());
        }

        Ok(Self { locales })
    }

    /// Whether `code` is an enabled locale (exact, lowercase match)
    pub fn contains(&self, code: &str) -> bool {
        self.locales.contains_key(code)
    }

    /// Display name for a locale code
    pub fn name(&self, code: &str) -> Option<&str> {
        self.locales.get(code).map(String::as_str)
    }

    /// Enabled locale codes in sorted order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// (code, name) pairs in code order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.locales.iter().map(|(c, n)| (c.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Whether a hostname label is a language or `www` marker
    pub fn is_prefix_label(&self, label: &str) -> bool {
        label == WWW_LABEL || self.contains(label)
    }

    /// English name of a locale, falling back to the code itself
    pub fn pretty_locale_name(&self, code: Option<&str>) -> String {
        match code {
            Some(code) => self
                .name(&code.to_ascii_lowercase())
                .unwrap_or(code)
                .to_string(),
            None => String::new(),
        }
    }

    /// Locale a request is served in, derived from its hostname
    pub fn locale_from_host<'a>(&'a self, host: &str) -> &'a str {
        let first = host.split('.').next().unwrap_or_default();
        self.locales
            .get_key_value(first)
            .map(|(code, _)| code.as_str())
            .unwrap_or(DEFAULT_LOCALE)
    }
}
