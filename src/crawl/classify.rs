//! URL classification for crawl targets and discovered links.

use once_cell::sync::Lazy;
use regex::Regex;

static SUBMISSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:(?:\w+\.)?reddit\.com/r/[^/?&#]+/comments|redd\.it)/([a-z0-9]+)")
        .unwrap()
});

static SUBREDDIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:\w+\.)?reddit\.com/r/([^/?&#]+(?:/[a-z]+)?)/?(?:\?([^#]*))?(?:$|#)")
        .unwrap()
});

static USER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?(?:\w+\.)?reddit\.com/u(?:ser)?/([^/?&#]+(?:/[a-z]+)?)/?(?:\?([^#]*))?")
        .unwrap()
});

/// Structured result of matching a URL against the site's known shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedditLink {
    /// Direct reference to a single post; the only shape allowed to seed
    /// recursive expansion.
    Submission { id: String },
    /// Subreddit listing, keeping its sort segment and query string.
    Subreddit { path: String, query: Option<String> },
    /// User feed, keeping its sort segment and query string.
    User { path: String, query: Option<String> },
    /// Anything else; terminal for the crawl.
    External,
}

/// Classifies a URL. Submissions take precedence over the feed shapes, so
/// `/r/<sub>/comments/<id>` never registers as a subreddit listing.
pub fn classify(url: &str) -> RedditLink {
    if let Some(captures) = SUBMISSION.captures(url) {
        return RedditLink::Submission {
            id: captures[1].to_string(),
        };
    }
    if let Some(captures) = USER.captures(url) {
        return RedditLink::User {
            path: captures[1].to_string(),
            query: captures.get(2).map(|m| m.as_str().to_string()),
        };
    }
    if let Some(captures) = SUBREDDIT.captures(url) {
        return RedditLink::Subreddit {
            path: captures[1].to_string(),
            query: captures.get(2).map(|m| m.as_str().to_string()),
        };
    }
    RedditLink::External
}

/// Splits a captured query string into listing parameters.
pub fn query_params(query: Option<&str>) -> Vec<(String, String)> {
    match query {
        Some(query) => url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect(),
        None => Vec::new(),
    }
}
