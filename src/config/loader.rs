//! Configuration structures and loading logic.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Built-in installed-app client id used for the public grant.
pub const DEFAULT_CLIENT_ID: &str = "HcwYRUmoSRcDvA";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub filters: FiltersConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// API credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// OAuth refresh token; absent means the public installed-client grant.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Installed-app client id. Must be overridden together with
    /// `user_agent` or not at all.
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Listing filter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FiltersConfig {
    /// Smallest post id to accept (base-36; a `t3_` prefix is allowed).
    #[serde(default)]
    pub id_min: Option<String>,

    /// Largest post id to accept.
    #[serde(default)]
    pub id_max: Option<String>,

    /// Oldest creation date to accept.
    #[serde(default)]
    pub date_min: Option<DateBound>,

    /// Newest creation date to accept.
    #[serde(default)]
    pub date_max: Option<DateBound>,
}

/// A date bound given either as epoch seconds or as a date string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateBound {
    Epoch(i64),
    Text(String),
}

/// Crawl option configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Maximum number of comments to fetch per post (0 disables comment
    /// fetching entirely).
    #[serde(default)]
    pub comments: u32,

    /// Whether to resolve "more comments" stubs with batched calls.
    #[serde(default)]
    pub morecomments: bool,

    /// Maximum recursion depth when posts link to other posts.
    #[serde(default)]
    pub recursion: u32,
}

fn default_client_id() -> String {
    DEFAULT_CLIENT_ID.to_string()
}

/// Built-in user agent, versioned with the crate.
pub fn default_user_agent() -> String {
    format!(
        "Rust:reddit-harvester:{} (by /u/reddit_harvester)",
        env!("CARGO_PKG_VERSION")
    )
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            refresh_token: None,
            client_id: default_client_id(),
            user_agent: default_user_agent(),
        }
    }
}
