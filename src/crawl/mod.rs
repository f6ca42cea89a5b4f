//! Link discovery: URL classification and the recursive crawl loop.

pub mod classify;
pub mod engine;

pub use classify::{classify, query_params, RedditLink};
pub use engine::{CrawlEngine, CrawlSource, LinkRecord, Origin};
