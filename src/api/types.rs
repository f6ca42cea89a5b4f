//! API response type definitions.

use serde::{Deserialize, Serialize};

/// A paginated listing wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

/// Body of a listing: child things plus the continuation cursor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub children: Vec<Thing>,
}

/// A single `kind`-tagged entry in a listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Thing {
    #[serde(rename = "t1")]
    Comment(Box<Comment>),
    #[serde(rename = "t3")]
    Submission(Box<Submission>),
    #[serde(rename = "more")]
    More(MoreStub),
    /// Thing kinds this crawler does not process (accounts, subreddits, ...).
    #[serde(other, deserialize_with = "ignore_contents")]
    Other,
}

/// A top-level post as returned by the API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Submission {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub is_self: bool,
    #[serde(default)]
    pub selftext_html: Option<String>,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub score: i64,
}

/// A comment, with any nested replies already parsed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub score: i64,
    /// Direct children. The API sends an empty string instead of a listing
    /// when there are none.
    #[serde(
        default,
        deserialize_with = "replies_listing",
        skip_serializing
    )]
    pub replies: Vec<Thing>,
}

/// Placeholder for comment children not included in the response.
#[derive(Debug, Clone, Deserialize)]
pub struct MoreStub {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub children: Vec<String>,
}

/// Envelope returned by the more-children endpoint.
#[derive(Debug, Deserialize)]
pub struct MoreChildren {
    pub json: MoreChildrenBody,
}

#[derive(Debug, Deserialize)]
pub struct MoreChildrenBody {
    #[serde(default)]
    pub data: MoreChildrenData,
}

#[derive(Debug, Default, Deserialize)]
pub struct MoreChildrenData {
    #[serde(default)]
    pub things: Vec<Thing>,
}

/// Successful token exchange payload.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// One unit yielded by a crawl source: a post with its flattened comments,
/// a bare post, or a lone comment from a user feed.
#[derive(Debug, Clone)]
pub struct SubmissionBundle {
    pub submission: Option<Submission>,
    pub comments: Option<Vec<Comment>>,
}

/// Discards the `data` payload of thing kinds we do not model, so the
/// `other` fallback also accepts entries that carry content.
fn ignore_contents<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde::de::IgnoredAny::deserialize(deserializer).map(|_| ())
}

fn replies_listing<'de, D>(deserializer: D) -> Result<Vec<Thing>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Replies {
        Listing(Listing),
        Empty(serde::de::IgnoredAny),
    }

    Ok(match Replies::deserialize(deserializer)? {
        Replies::Listing(listing) => listing.data.children,
        Replies::Empty(_) => Vec::new(),
    })
}
