//! Host- and locale-based routing helpers
//!
//! This module turns the incoming Host header into the links a page renders:
//! - Language subdomains: es.ivisa.com, fr.ivisa.com
//! - English on the top-level site: www.ivisa.com
//! - Cookie scope shared by every subdomain: .ivisa.com
//! - Visa category and application pages for a country

mod cache;
mod host;
mod locale_links;
mod visa_routes;

pub use cache::{CacheStats, CatalogCache, DEFAULT_CACHE_TTL};
pub use host::{extract_client_ip, normalize_host, request_hostname, RequestHost};
pub use locale_links::{LocaleLink, LocaleLinks};
pub use visa_routes::{
    critical_route_name, normalize_url, CachedVisaCatalog, CategoryTarget, StaticVisaCatalog,
    VisaCatalog, VisaCategory, VisaRoutes, APPLY_INDEX_PATH, LEGACY_SLUG_COUNTRIES,
};
