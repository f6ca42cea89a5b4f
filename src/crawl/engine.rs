//! Recursive link discovery over posts and their comment trees.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use crate::api::types::{Comment, Submission, SubmissionBundle};
use crate::api::{RedditApi, SubmissionPager};
use crate::crawl::classify::{classify, query_params, RedditLink};
use crate::error::{Error, Result};
use crate::filters::FilterSet;
use crate::text::extract_hrefs;

/// Origin used to resolve root-relative links found in bodies.
const BASE_ORIGIN: &str = "https://www.reddit.com";

/// A discovered terminal URL plus the record that contained it.
#[derive(Debug, Clone, Serialize)]
pub struct LinkRecord {
    pub url: String,
    pub origin: Origin,
}

/// Metadata owner of a discovered link.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Origin {
    Submission(Submission),
    Comment(Comment),
}

/// Where a crawl pulls its bundles from.
pub enum CrawlSource<'a> {
    /// One caller-supplied post.
    Single(Option<String>),
    /// A subreddit or user listing.
    Pager(SubmissionPager<'a>),
    /// Post ids captured during the previous depth level.
    Batch(VecDeque<String>),
}

impl<'a> CrawlSource<'a> {
    /// Builds the initial source for a target URL.
    pub fn from_target(api: &'a RedditApi, url: &str, filters: FilterSet) -> Result<Self> {
        match classify(url) {
            RedditLink::Submission { id } => Ok(CrawlSource::Single(Some(id))),
            RedditLink::Subreddit { path, query } => Ok(CrawlSource::Pager(api.subreddit(
                &path,
                query_params(query.as_deref()),
                filters,
            ))),
            RedditLink::User { path, query } => Ok(CrawlSource::Pager(api.user(
                &path,
                query_params(query.as_deref()),
                filters,
            ))),
            RedditLink::External => Err(Error::UnsupportedUrl(url.to_string())),
        }
    }

    async fn next_bundle(
        &mut self,
        api: &RedditApi,
        visited: &HashSet<String>,
    ) -> Result<Option<SubmissionBundle>> {
        match self {
            CrawlSource::Single(id) => match id.take() {
                Some(id) => Ok(Some(api.submission(&id).await?)),
                None => Ok(None),
            },
            CrawlSource::Pager(pager) => pager.next().await,
            CrawlSource::Batch(ids) => loop {
                let Some(id) = ids.pop_front() else {
                    return Ok(None);
                };
                if visited.contains(&id) {
                    tracing::debug!("post {} already expanded, skipping", id);
                    continue;
                }
                match api.submission(&id).await {
                    Ok(bundle) => return Ok(Some(bundle)),
                    Err(Error::Authorization) => {
                        tracing::debug!("access denied for post {}, skipping", id);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            },
        }
    }
}

/// Drives link discovery from a source, recursively expanding same-site
/// post references up to the configured depth.
///
/// Yields records in discovery order; a post id is expanded at most once
/// per crawl, and feed-shaped links never seed further expansion.
pub struct CrawlEngine<'a> {
    api: &'a RedditApi,
    source: CrawlSource<'a>,
    max_depth: u32,
    depth: u32,
    visited: HashSet<String>,
    pending: Vec<String>,
    ready: VecDeque<LinkRecord>,
}

impl<'a> CrawlEngine<'a> {
    pub fn new(api: &'a RedditApi, source: CrawlSource<'a>, max_depth: u32) -> Self {
        Self {
            api,
            source,
            max_depth,
            depth: 0,
            visited: HashSet::new(),
            pending: Vec::new(),
            ready: VecDeque::new(),
        }
    }

    /// Number of distinct posts processed so far.
    pub fn posts_seen(&self) -> usize {
        self.visited.len()
    }

    /// Recursion depth reached so far.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Yields the next discovered link, or `None` when the crawl is done.
    pub async fn next(&mut self) -> Result<Option<LinkRecord>> {
        loop {
            if let Some(record) = self.ready.pop_front() {
                return Ok(Some(record));
            }

            match self.source.next_bundle(self.api, &self.visited).await? {
                Some(bundle) => self.process(bundle),
                None => {
                    if self.pending.is_empty() || self.depth == self.max_depth {
                        return Ok(None);
                    }
                    self.depth += 1;
                    tracing::debug!(
                        "descending to depth {} with {} pending posts",
                        self.depth,
                        self.pending.len()
                    );
                    self.source = CrawlSource::Batch(std::mem::take(&mut self.pending).into());
                }
            }
        }
    }

    /// Scans one bundle for candidate links and sorts each into a terminal
    /// record or a pending post expansion.
    fn process(&mut self, bundle: SubmissionBundle) {
        if let Some(post) = &bundle.submission {
            self.visited.insert(post.id.clone());
        }
        for (url, origin) in candidates(&bundle) {
            let Some(url) = resolve_candidate(&url) else {
                continue;
            };
            match classify(&url) {
                RedditLink::Submission { id } => {
                    if !self.visited.contains(&id) {
                        self.pending.push(id);
                    }
                }
                // Feed URLs are terminal records like any external link;
                // only a direct post reference seeds expansion.
                _ => self.ready.push_back(LinkRecord { url, origin }),
            }
        }
    }
}

/// Collects candidate URLs from one bundle in discovery order: the post's
/// own URL first, then anchors from its body, then anchors from each
/// comment body.
fn candidates(bundle: &SubmissionBundle) -> Vec<(String, Origin)> {
    let mut found = Vec::new();
    if let Some(post) = &bundle.submission {
        if !post.is_self && !post.url.is_empty() {
            found.push((post.url.clone(), Origin::Submission(post.clone())));
        }
        if let Some(html) = &post.selftext_html {
            for url in extract_hrefs(html) {
                found.push((url, Origin::Submission(post.clone())));
            }
        }
    }
    if let Some(comments) = &bundle.comments {
        for comment in comments {
            if let Some(html) = &comment.body_html {
                for url in extract_hrefs(html) {
                    found.push((url, Origin::Comment(comment.clone())));
                }
            }
        }
    }
    found
}

/// Applies the fragment and root-relative rules to one raw candidate.
fn resolve_candidate(url: &str) -> Option<String> {
    if url.is_empty() || url.starts_with('#') {
        return None;
    }
    if url.starts_with('/') {
        return Some(format!("{}{}", BASE_ORIGIN, url));
    }
    Some(url.to_string())
}
