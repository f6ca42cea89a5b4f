//! Reddit API HTTP client.

use std::time::Duration;

use reqwest::{header, Client, Method};
use serde_json::Value;

use crate::api::auth::TokenManager;
use crate::api::comments;
use crate::api::pager::SubmissionPager;
use crate::api::types::{Comment, Listing, MoreChildren, SubmissionBundle, Thing};
use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::filters::FilterSet;

/// OAuth API base URL.
const API_BASE: &str = "https://oauth.reddit.com";

/// Token exchange base URL.
const AUTH_BASE: &str = "https://www.reddit.com";

/// Maximum child ids per more-children request.
pub const MORECHILDREN_BATCH: usize = 100;

/// Listing page size requested while paginating.
pub const PAGE_LIMIT: u32 = 100;

/// Quota threshold below which the client waits out the reset window.
const RATELIMIT_FLOOR: f64 = 2.0;

/// Reddit API client with token management and rate-limit backpressure.
pub struct RedditApi {
    http: Client,
    tokens: TokenManager,
    api_base: String,
    comments: u32,
    morecomments: bool,
}

impl RedditApi {
    /// Create a new API client from resolved credentials and options.
    pub fn new(
        credentials: Credentials,
        refresh_token: Option<String>,
        comments: u32,
        morecomments: bool,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(&credentials.user_agent)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        let tokens = TokenManager::new(credentials.client_id, refresh_token, AUTH_BASE.to_string());

        Ok(Self {
            http,
            tokens,
            api_base: API_BASE.to_string(),
            comments,
            morecomments,
        })
    }

    /// Override the API and token-exchange origins (tests run against a
    /// local mock server).
    pub fn with_endpoints(mut self, api_base: &str, auth_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self.tokens
            .set_auth_base(auth_base.trim_end_matches('/').to_string());
        self
    }

    /// Configured comment limit (0 disables comment fetching).
    pub fn comment_limit(&self) -> u32 {
        self.comments
    }

    /// Issue one authenticated GET against a listing or detail endpoint.
    pub async fn call(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value> {
        self.request(Method::GET, endpoint, params).await
    }

    /// Fetch one post and, when enabled, its flattened comment tree.
    pub async fn submission(&self, id: &str) -> Result<SubmissionBundle> {
        let endpoint = format!("/comments/{}/.json", id);
        let params = vec![("limit".to_string(), self.comments.to_string())];
        let body = self.call(&endpoint, &params).await?;

        // The detail endpoint answers with a pair of listings: the post
        // itself, then its comment tree.
        let (submission_listing, comment_listing): (Listing, Listing) =
            serde_json::from_value(body)?;

        let submission = submission_listing
            .data
            .children
            .into_iter()
            .find_map(|thing| match thing {
                Thing::Submission(post) => Some(*post),
                _ => None,
            })
            .ok_or_else(|| Error::Api(format!("no submission in response for '{}'", id)))?;

        let comments = if self.comments > 0 {
            let link_id = self.morecomments.then(|| format!("t3_{}", id));
            Some(comments::flatten(self, comment_listing.data.children, link_id.as_deref()).await?)
        } else {
            None
        };

        Ok(SubmissionBundle {
            submission: Some(submission),
            comments,
        })
    }

    /// Walk a subreddit listing.
    pub fn subreddit<'a>(
        &'a self,
        path: &str,
        params: Vec<(String, String)>,
        filters: FilterSet,
    ) -> SubmissionPager<'a> {
        SubmissionPager::new(self, format!("/r/{}/.json", path), params, filters)
    }

    /// Walk a user feed.
    pub fn user<'a>(
        &'a self,
        path: &str,
        params: Vec<(String, String)>,
        filters: FilterSet,
    ) -> SubmissionPager<'a> {
        SubmissionPager::new(self, format!("/user/{}/.json", path), params, filters)
    }

    /// Resolve "more comments" stubs in batches of [`MORECHILDREN_BATCH`].
    ///
    /// Stubs returned by a batch are appended to the same id list, so the
    /// loop keeps going until every reachable child has been fetched.
    pub async fn morechildren(
        &self,
        link_id: &str,
        mut children: Vec<String>,
    ) -> Result<Vec<Comment>> {
        let mut comments = Vec::new();
        let mut index = 0;
        while index < children.len() {
            let end = usize::min(index + MORECHILDREN_BATCH, children.len());
            let batch = children[index..end].join(",");
            index = end;

            let params = vec![
                ("link_id".to_string(), link_id.to_string()),
                ("api_type".to_string(), "json".to_string()),
                ("children".to_string(), batch),
            ];
            let body = self
                .request(Method::POST, "/api/morechildren", &params)
                .await?;
            let response: MoreChildren = serde_json::from_value(body)?;
            for thing in response.json.data.things {
                match thing {
                    Thing::Comment(comment) => comments.push(*comment),
                    Thing::More(stub) => children.extend(stub.children),
                    _ => {}
                }
            }
        }
        Ok(comments)
    }

    /// Perform one API request and return the parsed body.
    ///
    /// Authenticates first, requests raw JSON, honors the rate-limit
    /// headers by waiting out the announced reset window, and maps
    /// embedded error codes to typed failures.
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Value> {
        let token = self.tokens.authenticate(&self.http).await?;
        let url = format!("{}{}", self.api_base, endpoint);
        tracing::debug!("{} {}", method, url);

        let request = self
            .http
            .request(method.clone(), &url)
            .header(header::AUTHORIZATION, token)
            .query(&[("raw_json", "1")]);
        let request = if method == Method::POST {
            request.form(params)
        } else {
            request.query(params)
        };

        let response = request.send().await?;
        if let Some(duration) = ratelimit_wait(response.headers()) {
            tracing::info!(
                "rate limit almost exhausted, waiting {} seconds",
                duration.as_secs()
            );
            tokio::time::sleep(duration).await;
        }

        let body: Value = response.json().await?;
        match body.get("error") {
            Some(code) if code.as_i64() == Some(403) => Err(Error::Authorization),
            Some(code) if code.as_i64() == Some(404) => Err(Error::NotFound),
            Some(code) => {
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error");
                Err(Error::Api(format!("unexpected error {}: {}", code, message)))
            }
            None => Ok(body),
        }
    }
}

/// Computes the wait imposed by the response's rate-limit headers.
///
/// Returns `None` when either header is absent or the remaining quota is
/// still above the floor.
fn ratelimit_wait(headers: &header::HeaderMap) -> Option<Duration> {
    let remaining: f64 = header_str(headers, "x-ratelimit-remaining")?.parse().ok()?;
    if remaining >= RATELIMIT_FLOOR {
        return None;
    }
    let reset: u64 = header_str(headers, "x-ratelimit-reset")?.parse().ok()?;
    Some(Duration::from_secs(reset))
}

fn header_str<'a>(headers: &'a header::HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok()
}
