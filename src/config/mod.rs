//! Configuration module for the harvester.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Resolving credentials and listing filters
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{AccountConfig, Config, DateBound, FiltersConfig, OptionsConfig};
pub use validation::{
    resolve_credentials, resolve_filters, resolve_refresh_token, Credentials,
};
