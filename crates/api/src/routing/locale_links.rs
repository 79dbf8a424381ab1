//! Links to the same page on other language subdomains

use serde::Serialize;
use visasite_shared::{resolve_domain, LocaleCatalog, LocaleError, TargetMode};

/// One entry of the language switcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleLink {
    pub code: String,
    pub name: String,
    /// `scheme://host` of the locale's site, without a trailing slash
    pub url_base: String,
}

/// URL bases of every enabled locale, as seen from one request host
#[derive(Debug, Clone)]
pub struct LocaleLinks {
    links: Vec<LocaleLink>,
}

impl LocaleLinks {
    /// Catalog codes that are not a valid locale get no link and are logged.
    pub fn for_host(scheme: &str, host: &str, locales: &LocaleCatalog) -> Self {
        let links = locales
            .iter()
            .filter_map(|(code, name)| {
                let mode: TargetMode = match code.parse() {
                    Ok(mode @ TargetMode::Locale(_)) => mode,
                    _ => {
                        tracing::warn!(code, "skipping catalog entry with invalid locale code");
                        return None;
                    }
                };
                Some(LocaleLink {
                    code: code.to_string(),
                    name: name.to_string(),
                    url_base: format!("{}://{}", scheme, resolve_domain(host, &mode, locales)),
                })
            })
            .collect();

        Self { links }
    }

    /// `scheme://host` for a locale
    pub fn url_base(&self, locale: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.code == locale)
            .map(|link| link.url_base.as_str())
    }

    /// Absolute URL of `path` on a locale's subdomain.
    ///
    /// Not every page exists in every language (blogs, embassy directory);
    /// callers only link pages that do.
    pub fn route_locale(&self, locale: &str, path: &str) -> Result<String, LocaleError> {
        let base = self
            .url_base(locale)
            .ok_or_else(|| LocaleError::UnknownLocale(locale.to_string()))?;

        if path.starts_with('/') {
            Ok(format!("{}{}", base, path))
        } else {
            Ok(format!("{}/{}", base, path))
        }
    }

    /// Entries for a language switcher, in locale code order
    pub fn switcher(&self) -> &[LocaleLink] {
        &self.links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales() -> LocaleCatalog {
        LocaleCatalog::from_pairs([("en", "English"), ("es", "Español"), ("fr", "Français")])
    }

    #[test]
    fn test_url_bases_from_language_host() {
        let links = LocaleLinks::for_host("https", "es.ivisa.com", &locales());

        assert_eq!(links.url_base("en"), Some("https://www.ivisa.com"));
        assert_eq!(links.url_base("es"), Some("https://es.ivisa.com"));
        assert_eq!(links.url_base("fr"), Some("https://fr.ivisa.com"));
        assert_eq!(links.url_base("de"), None);
    }

    #[test]
    fn test_url_bases_on_dev_tld() {
        let links = LocaleLinks::for_host("http", "ivisa.test", &locales());

        assert_eq!(links.url_base("en"), Some("http://ivisa.test"));
        assert_eq!(links.url_base("fr"), Some("http://fr.ivisa.test"));
    }

    #[test]
    fn test_route_locale() {
        let links = LocaleLinks::for_host("https", "www.ivisa.com", &locales());

        assert_eq!(
            links.route_locale("fr", "/apply-online").unwrap(),
            "https://fr.ivisa.com/apply-online"
        );
        assert_eq!(
            links.route_locale("en", "faq").unwrap(),
            "https://www.ivisa.com/faq"
        );
        assert_eq!(
            links.route_locale("de", "/"),
            Err(LocaleError::UnknownLocale("de".to_string()))
        );
    }

    #[test]
    fn test_invalid_catalog_codes_are_skipped() {
        let locales = LocaleCatalog::from_pairs([
            ("en", "English"),
            ("eng", "English (long)"),
            ("cookie", "Cookie"),
            ("es", "Español"),
        ]);
        let links = LocaleLinks::for_host("https", "ivisa.com", &locales);

        let codes: Vec<_> = links.switcher().iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["en", "es"]);
        assert_eq!(links.url_base("eng"), None);
        assert_eq!(links.url_base("es"), Some("https://es.ivisa.com"));
    }

    #[test]
    fn test_switcher_order() {
        let links = LocaleLinks::for_host("https", "ivisa.com", &locales());
        let codes: Vec<_> = links.switcher().iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["en", "es", "fr"]);
        assert_eq!(links.switcher()[1].name, "Español");
    }
}
