//! Reddit Harvester - outbound link collection for reddit posts.
//!
//! This library walks reddit submissions, subreddit listings, and user
//! feeds, flattens comment trees, and collects every external link found
//! in post bodies and comments.
//!
//! # Features
//!
//! - Submission, subreddit, and user feed targets
//! - Comment tree flattening with "more comments" resolution
//! - Base-36 id and creation-date listing filters
//! - Recursive expansion of links that point at other posts
//! - OAuth token caching and rate-limit aware requests
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use reddit_harvester::config::{resolve_credentials, resolve_filters, resolve_refresh_token};
//! use reddit_harvester::{Config, CrawlEngine, CrawlSource, RedditApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let api = RedditApi::new(
//!         resolve_credentials(&config.account),
//!         resolve_refresh_token(&config.account),
//!         config.options.comments,
//!         config.options.morecomments,
//!     )?;
//!     let filters = resolve_filters(&config.filters)?;
//!
//!     let source = CrawlSource::from_target(&api, "https://www.reddit.com/r/pics/top/", filters)?;
//!     let mut engine = CrawlEngine::new(&api, source, config.options.recursion);
//!     while let Some(record) = engine.next().await? {
//!         println!("{}", record.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod filters;
pub mod output;
pub mod text;

// Re-exports for convenience
pub use api::RedditApi;
pub use config::Config;
pub use crawl::{CrawlEngine, CrawlSource, LinkRecord, Origin};
pub use error::{Error, Result};
pub use filters::FilterSet;
