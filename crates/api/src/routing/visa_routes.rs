//! URL helpers for visa category ("learn more") and visa application pages

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use super::cache::{CacheStats, CatalogCache};

/// Index page listing every application form
pub const APPLY_INDEX_PATH: &str = "/apply-online";

/// Countries whose application pages predate code-based URLs and live under
/// `/apply-online/<slug>`
pub const LEGACY_SLUG_COUNTRIES: &[&str] = &[
    "AR", "AU", "AZ", "BH", "BR", "KH", "CA", "CN", "CU", "DO", "EG", "ET", "HK", "IN", "CI", "KE",
    "KW", "KG", "MY", "MX", "MM", "NZ", "OM", "RU", "SG", "LK", "TJ", "TW", "TH", "TR", "AE", "UG",
    "UA", "US", "UZ", "VN", "ZM", "ZW",
];

#[allow(clippy::expect_used)]
static VISA_CATEGORY_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)public\.visa_category\.\d+$").expect("category route regex should compile")
});

#[allow(clippy::expect_used)]
static APPLY_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)public\.apply\.[A-Z]{2}$").expect("apply route regex should compile")
});

/// Visa catalog lookups backed by the product database
pub trait VisaCatalog: Send + Sync {
    /// Country codes with at least one visa on sale
    fn countries_sold(&self) -> HashSet<String>;

    /// URL slug of a country (`IN` -> `india`)
    fn country_slug(&self, country_code: &str) -> Option<String>;

    /// Path of the default visa category page for a country
    fn default_category_url(&self, country_code: &str) -> Option<String>;
}

/// A visa category ("learn more") page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VisaCategory {
    pub url: String,
    /// Applications for this category are handled by a partner site
    #[serde(default)]
    pub affiliate_url: Option<String>,
}

/// Category link target: an explicit category or a country's default one
#[derive(Debug, Clone, Copy)]
pub enum CategoryTarget<'a> {
    Category(&'a VisaCategory),
    Country(&'a str),
}

/// Catalog held in memory, loadable from a JSON document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticVisaCatalog {
    #[serde(default)]
    pub countries_sold: HashSet<String>,
    #[serde(default)]
    pub slugs: HashMap<String, String>,
    #[serde(default)]
    pub default_categories: HashMap<String, String>,
}

impl StaticVisaCatalog {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from_json(&json)?)
    }
}

impl VisaCatalog for StaticVisaCatalog {
    fn countries_sold(&self) -> HashSet<String> {
        self.countries_sold.clone()
    }

    fn country_slug(&self, country_code: &str) -> Option<String> {
        self.slugs.get(country_code).cloned()
    }

    fn default_category_url(&self, country_code: &str) -> Option<String> {
        self.default_categories.get(country_code).cloned()
    }
}

/// Catalog wrapper caching every lookup for a TTL
pub struct CachedVisaCatalog<C> {
    inner: C,
    sold: CatalogCache<HashSet<String>>,
    lookups: CatalogCache<Option<String>>,
}

impl<C: VisaCatalog> CachedVisaCatalog<C> {
    pub fn new(inner: C, ttl: Duration) -> Self {
        Self {
            inner,
            sold: CatalogCache::with_ttl(ttl),
            lookups: CatalogCache::with_ttl(ttl),
        }
    }

    /// Forget every cached lookup
    pub fn invalidate(&self) {
        self.sold.clear();
        self.lookups.clear();
    }

    /// Clear expired entries
    pub fn cleanup(&self) {
        self.sold.cleanup();
        self.lookups.cleanup();
    }

    /// Entry counts across every cached lookup
    pub fn stats(&self) -> CacheStats {
        self.sold.stats() + self.lookups.stats()
    }
}

impl<C: VisaCatalog> VisaCatalog for CachedVisaCatalog<C> {
    fn countries_sold(&self) -> HashSet<String> {
        self.sold
            .get_or_insert_with("countries_sold", || self.inner.countries_sold())
    }

    fn country_slug(&self, country_code: &str) -> Option<String> {
        self.lookups
            .get_or_insert_with(&format!("slug:{}", country_code), || {
                self.inner.country_slug(country_code)
            })
    }

    fn default_category_url(&self, country_code: &str) -> Option<String> {
        self.lookups
            .get_or_insert_with(&format!("category:{}", country_code), || {
                self.inner.default_category_url(country_code)
            })
    }
}

/// Builds visa page links for one site root
#[derive(Clone)]
pub struct VisaRoutes {
    catalog: Arc<dyn VisaCatalog>,
}

impl VisaRoutes {
    pub fn new(catalog: Arc<dyn VisaCatalog>) -> Self {
        Self { catalog }
    }

    /// Number of countries with a visa on sale
    pub fn countries_sold(&self) -> usize {
        self.catalog.countries_sold().len()
    }

    /// Absolute URL of a visa category page; the home page when there is none
    pub fn category_url(&self, base_url: &str, target: CategoryTarget<'_>) -> String {
        let path = match target {
            CategoryTarget::Category(category) => Some(category.url.clone()),
            CategoryTarget::Country(code) if code.len() == 2 => {
                self.catalog.default_category_url(&code.to_ascii_uppercase())
            }
            CategoryTarget::Country(_) => None,
        };

        absolute_url(base_url, path.as_deref().unwrap_or("/"))
    }

    /// Absolute URL of a country's application form.
    ///
    /// Categories sold through a partner link to their category page instead,
    /// and countries without a visa on sale link to the application index.
    pub fn application_url(
        &self,
        base_url: &str,
        country_code: &str,
        params: &[(String, String)],
        category: Option<&VisaCategory>,
    ) -> String {
        if let Some(category) = category.filter(|c| c.affiliate_url.is_some()) {
            return format!(
                "{}?applyAffiliate=1",
                self.category_url(base_url, CategoryTarget::Category(category))
            );
        }

        let code = country_code.to_ascii_uppercase();
        if !self.catalog.countries_sold().contains(&code) {
            return absolute_url(base_url, APPLY_INDEX_PATH);
        }

        let segment = if LEGACY_SLUG_COUNTRIES.contains(&code.as_str()) {
            self.catalog.country_slug(&code).unwrap_or_else(|| code.clone())
        } else {
            code
        };

        let mut url = absolute_url(base_url, &format!("{}/{}", APPLY_INDEX_PATH, segment));
        if !params.is_empty() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

/// Join a site root and a path; absolute URLs are returned unchanged
fn absolute_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Route name used to pick a critical CSS bundle; per-category and per-country
/// routes share one bundle
pub fn critical_route_name(route_name: Option<&str>) -> String {
    let name = route_name.unwrap_or("unknown");
    if VISA_CATEGORY_ROUTE.is_match(name) {
        return "public.visa_category.show".to_string();
    }
    if APPLY_ROUTE.is_match(name) {
        return "public.apply.show".to_string();
    }
    name.to_string()
}

/// Normalize a stored URL: add a missing scheme and lowercase it
pub fn normalize_url(url: Option<&str>) -> Option<String> {
    let url = url.filter(|u| !u.is_empty())?;
    if url.contains("://") {
        Some(url.to_lowercase())
    } else {
        Some(format!("http://{}", url).to_lowercase())
    }
}
