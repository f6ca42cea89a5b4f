//! Reddit API module.
//!
//! This module provides:
//! - OAuth token acquisition and caching
//! - HTTP client with rate-limit backpressure and error mapping
//! - Paginated listing walker and single-post fetch
//! - Comment tree flattening with batched "more" resolution
//! - API response types

pub mod auth;
pub mod client;
pub mod comments;
pub mod pager;
pub mod types;

pub use client::{RedditApi, MORECHILDREN_BATCH, PAGE_LIMIT};
pub use pager::SubmissionPager;
pub use types::*;
