//! Shared configuration for presswatch.
//!
//! Holds the environment-derived [`AppConfig`] and the YAML-backed
//! [`CompanyProfile`] that drives query planning, metric labels, and report
//! theming.

pub mod app_config;
pub mod config;
pub mod error;
pub mod profile;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use profile::{load_profile, parse_profile, CompanyProfile, ReportTheme, TrackedBrand};
