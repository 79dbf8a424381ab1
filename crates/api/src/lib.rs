//! visasite API Library
//!
//! Web glue for the multi-country visa storefront: locale subdomain links,
//! cookie scoping, visa page URLs, flash messages and CMS markdown.

pub mod config;
pub mod cookies;
pub mod currency;
pub mod error;
pub mod flash;
pub mod markdown;
pub mod middleware;
pub mod reporting;
pub mod routes;
pub mod routing;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routing::{LocaleLinks, RequestHost, VisaRoutes};
pub use state::AppState;
