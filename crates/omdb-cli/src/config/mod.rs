//! Application configuration module.
//!
//! Manages the TOML config file holding API connection settings
//! such as the base URL.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{ApiConfig, AppConfig};
pub use paths::resolve_config_path;
