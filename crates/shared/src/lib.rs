//! visasite Shared Types and Utilities
//!
//! Framework-free helpers shared by the visasite web crates: the locale
//! catalog, the locale-aware domain name resolver, and the money, date and
//! JSON helpers used by views.

pub mod dates;
pub mod domain;
pub mod error;
pub mod format;
pub mod json;
pub mod locale;

pub use domain::{
    build_domain_name, cookie_domain, is_ip_literal, resolve_domain, LocaleCode, TargetMode,
};
pub use error::*;
pub use locale::LocaleCatalog;
