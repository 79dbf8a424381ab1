//! Locale-aware domain name resolution
//!
//! Rewrites the current hostname into:
//! - a language subdomain: ivisa.com -> es.ivisa.com
//! - the English site: fr.ivisa.com -> www.ivisa.com
//! - a cookie scope: es.ivisa.com -> .ivisa.com
//!
//! IP address hosts are never rewritten.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::DomainError;
use crate::locale::{LocaleCatalog, DEFAULT_LOCALE, WWW_LABEL};

/// Development top-level domain; the English site is never moved to `www` on it
const DEV_TLD: &str = "test";

/// Validated 2-letter locale code, stored lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleCode(String);

impl LocaleCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_LOCALE
    }
}

impl FromStr for LocaleCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(DomainError::InvalidMode(s.to_string()))
        }
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the hostname should be rewritten into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetMode {
    /// Strip any language or `www` prefix
    Cookie,
    /// Move to the given language subdomain
    Locale(LocaleCode),
}

impl FromStr for TargetMode {
    type Err = DomainError;

    /// Accepts `cookie` or a 2-letter locale code (any case)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "cookie" {
            return Ok(TargetMode::Cookie);
        }
        s.parse().map(TargetMode::Locale)
    }
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetMode::Cookie => f.write_str("cookie"),
            TargetMode::Locale(code) => write!(f, "{}", code),
        }
    }
}

/// Check if a host is an IPv4 or IPv6 address literal
pub fn is_ip_literal(host: &str) -> bool {
    host.parse::<IpAddr>().is_ok()
}

/// Rewrite `hostname` for the requested target
pub fn resolve_domain(hostname: &str, mode: &TargetMode, locales: &LocaleCatalog) -> String {
    if is_ip_literal(hostname) {
        return hostname.to_string();
    }

    let mut labels: Vec<&str> = hostname.split('.').collect();
    let is_prefixed = labels
        .first()
        .is_some_and(|first| locales.is_prefix_label(first));

    let target = match mode {
        TargetMode::Cookie => None,
        TargetMode::Locale(code) if code.is_default() => {
            english_label(&labels, is_prefixed)
        }
        TargetMode::Locale(code) => Some(code.as_str()),
    };

    match (is_prefixed, target) {
        (true, Some(label)) => labels[0] = label,
        (true, None) => {
            labels.remove(0);
        }
        (false, Some(label)) => labels.insert(0, label),
        (false, None) => {}
    }

    labels.join(".")
}

/// English lives on `www` only for a top-level site (ivisa.com, es.ivisa.com),
/// and never on the development TLD. Everywhere else it has no subdomain.
fn english_label(labels: &[&str], is_prefixed: bool) -> Option<&'static str> {
    let top_level_len = if is_prefixed { 3 } else { 2 };
    if labels.len() != top_level_len {
        return None;
    }

    match labels.last() {
        Some(&DEV_TLD) => None,
        _ => Some(WWW_LABEL),
    }
}

/// String-typed entry point: `kind` is `cookie` or a 2-letter locale code
pub fn build_domain_name(
    kind: &str,
    hostname: &str,
    locales: &LocaleCatalog,
) -> Result<String, DomainError> {
    let mode: TargetMode = kind.parse()?;
    Ok(resolve_domain(hostname, &mode, locales))
}

/// Domain used for the cookie `Domain=` attribute, valid on every subdomain
pub fn cookie_domain(hostname: &str, locales: &LocaleCatalog) -> String {
    let domain = resolve_domain(hostname, &TargetMode::Cookie, locales);
    if is_ip_literal(&domain) {
        domain
    } else {
        format!(".{}", domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales() -> LocaleCatalog {
        LocaleCatalog::from_pairs([("en", "English"), ("es", "Español"), ("fr", "Français")])
    }

    fn locale(code: &str) -> TargetMode {
        TargetMode::Locale(code.parse().unwrap())
    }

    #[test]
    fn test_target_mode_parse() {
        assert_eq!("cookie".parse::<TargetMode>().unwrap(), TargetMode::Cookie);
        assert_eq!("ES".parse::<TargetMode>().unwrap(), locale("es"));
        assert_eq!("es".parse::<TargetMode>().unwrap().to_string(), "es");

        for bad in ["eng", "e", "", "e1", "COOKIE", "ñe"] {
            assert!(
                matches!(bad.parse::<TargetMode>(), Err(DomainError::InvalidMode(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_ip_hosts_untouched() {
        let locales = locales();
        for host in ["127.0.0.1", "10.0.0.12", "::1", "2001:db8::8a2e:370:7334"] {
            assert_eq!(resolve_domain(host, &TargetMode::Cookie, &locales), host);
            assert_eq!(resolve_domain(host, &locale("es"), &locales), host);
            assert_eq!(resolve_domain(host, &locale("en"), &locales), host);
            assert_eq!(cookie_domain(host, &locales), host);
        }
    }

    #[test]
    fn test_cookie_mode() {
        let locales = locales();
        assert_eq!(
            resolve_domain("fr.ivisa.com", &TargetMode::Cookie, &locales),
            "ivisa.com"
        );
        assert_eq!(
            resolve_domain("www.ivisa.com", &TargetMode::Cookie, &locales),
            "ivisa.com"
        );
        assert_eq!(
            resolve_domain("ivisa.com", &TargetMode::Cookie, &locales),
            "ivisa.com"
        );
        assert_eq!(
            resolve_domain("staging.ivisa.com", &TargetMode::Cookie, &locales),
            "staging.ivisa.com"
        );
    }

    #[test]
    fn test_cookie_mode_idempotent() {
        let locales = locales();
        for host in ["es.ivisa.com", "www.ivisa.test", "es.staging.ivisa.com", "localhost"] {
            let once = resolve_domain(host, &TargetMode::Cookie, &locales);
            let twice = resolve_domain(&once, &TargetMode::Cookie, &locales);
            assert_eq!(once, twice, "cookie mode not idempotent for {host}");
        }
    }

    #[test]
    fn test_english_top_level() {
        let locales = locales();
        assert_eq!(resolve_domain("ivisa.com", &locale("en"), &locales), "www.ivisa.com");
        assert_eq!(resolve_domain("fr.ivisa.com", &locale("en"), &locales), "www.ivisa.com");
        assert_eq!(resolve_domain("www.ivisa.com", &locale("EN"), &locales), "www.ivisa.com");
    }

    #[test]
    fn test_english_dev_tld() {
        let locales = locales();
        assert_eq!(resolve_domain("ivisa.test", &locale("en"), &locales), "ivisa.test");
        assert_eq!(resolve_domain("es.ivisa.test", &locale("en"), &locales), "ivisa.test");
        // case-sensitive on the last label
        assert_eq!(resolve_domain("ivisa.TEST", &locale("en"), &locales), "www.ivisa.TEST");
    }

    #[test]
    fn test_english_nested_domain() {
        let locales = locales();
        assert_eq!(
            resolve_domain("es.staging.ivisa.com", &locale("en"), &locales),
            "staging.ivisa.com"
        );
        assert_eq!(
            resolve_domain("staging.ivisa.com", &locale("en"), &locales),
            "staging.ivisa.com"
        );
        assert_eq!(resolve_domain("localhost", &locale("en"), &locales), "localhost");
    }

    #[test]
    fn test_switch_language() {
        let locales = locales();
        assert_eq!(resolve_domain("es.ivisa.com", &locale("fr"), &locales), "fr.ivisa.com");
        assert_eq!(resolve_domain("www.ivisa.com", &locale("es"), &locales), "es.ivisa.com");
        assert_eq!(resolve_domain("ivisa.com", &locale("es"), &locales), "es.ivisa.com");
        assert_eq!(
            resolve_domain("staging.ivisa.com", &locale("fr"), &locales),
            "fr.staging.ivisa.com"
        );
    }

    #[test]
    fn test_unknown_locale_code_is_not_validated() {
        let locales = locales();
        assert_eq!(resolve_domain("es.ivisa.com", &locale("zz"), &locales), "zz.ivisa.com");
        // "zz" is not a catalog entry, so it is not recognised as a prefix
        assert_eq!(resolve_domain("zz.ivisa.com", &locale("fr"), &locales), "fr.zz.ivisa.com");
    }

    #[test]
    fn test_single_label_host() {
        let locales = locales();
        assert_eq!(resolve_domain("localhost", &locale("fr"), &locales), "fr.localhost");
        assert_eq!(resolve_domain("fr.localhost", &TargetMode::Cookie, &locales), "localhost");
    }

    #[test]
    fn test_build_domain_name() {
        let locales = locales();
        assert_eq!(build_domain_name("cookie", "es.ivisa.com", &locales).unwrap(), "ivisa.com");
        assert_eq!(build_domain_name("Fr", "ivisa.com", &locales).unwrap(), "fr.ivisa.com");

        for host in ["ivisa.com", "127.0.0.1", "es.ivisa.test"] {
            assert!(matches!(
                build_domain_name("esp", host, &locales),
                Err(DomainError::InvalidMode(_))
            ));
        }
    }

    #[test]
    fn test_cookie_domain() {
        let locales = locales();
        assert_eq!(cookie_domain("fr.ivisa.com", &locales), ".ivisa.com");
        assert_eq!(cookie_domain("ivisa.test", &locales), ".ivisa.test");
        assert_eq!(cookie_domain("192.168.1.4", &locales), "192.168.1.4");
    }

    #[test]
    fn test_is_ip_literal() {
        assert!(is_ip_literal("127.0.0.1"));
        assert!(is_ip_literal("fe80::1"));
        assert!(!is_ip_literal("ivisa.com"));
        assert!(!is_ip_literal("[::1]"));
        assert!(!is_ip_literal("127.0.0.1:8000"));
    }
}
