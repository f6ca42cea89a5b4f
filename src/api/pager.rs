//! Paginated listing walker.

use std::collections::VecDeque;

use crate::api::client::{RedditApi, PAGE_LIMIT};
use crate::api::types::{Listing, SubmissionBundle, Thing};
use crate::error::{Error, Result};
use crate::filters::FilterSet;

/// Walks one listing endpoint page by page, applying the configured id and
/// date filters and fetching full comment data for qualifying posts.
///
/// Not restartable: `next` keeps yielding bundles until the listing cursor
/// runs out, then reports `None` without issuing further calls.
pub struct SubmissionPager<'a> {
    api: &'a RedditApi,
    endpoint: String,
    params: Vec<(String, String)>,
    filters: FilterSet,
    buffer: VecDeque<Thing>,
    after: Option<String>,
    exhausted: bool,
}

impl<'a> SubmissionPager<'a> {
    pub(crate) fn new(
        api: &'a RedditApi,
        endpoint: String,
        params: Vec<(String, String)>,
        filters: FilterSet,
    ) -> Self {
        Self {
            api,
            endpoint,
            params,
            filters,
            buffer: VecDeque::new(),
            after: None,
            exhausted: false,
        }
    }

    /// Yields the next qualifying bundle, or `None` once the listing ends.
    pub async fn next(&mut self) -> Result<Option<SubmissionBundle>> {
        loop {
            while let Some(thing) = self.buffer.pop_front() {
                match thing {
                    Thing::Submission(post) => {
                        if !self.filters.accepts(&post.id, post.created_utc) {
                            continue;
                        }
                        if self.api.comment_limit() > 0 && post.num_comments > 0 {
                            // Re-fetch through the detail endpoint to pick up
                            // the comment tree; posts we may not read are
                            // skipped rather than ending the walk.
                            match self.api.submission(&post.id).await {
                                Ok(bundle) => return Ok(Some(bundle)),
                                Err(Error::Authorization) => {
                                    tracing::debug!(
                                        "access denied for post {}, skipping",
                                        post.id
                                    );
                                    continue;
                                }
                                Err(e) => return Err(e),
                            }
                        }
                        return Ok(Some(SubmissionBundle {
                            submission: Some(*post),
                            comments: None,
                        }));
                    }
                    Thing::Comment(comment) => {
                        if self.api.comment_limit() == 0
                            || !self.filters.accepts(&comment.id, comment.created_utc)
                        {
                            continue;
                        }
                        return Ok(Some(SubmissionBundle {
                            submission: None,
                            comments: Some(vec![*comment]),
                        }));
                    }
                    _ => {}
                }
            }

            if self.exhausted {
                return Ok(None);
            }
            self.fetch_page().await?;
        }
    }

    async fn fetch_page(&mut self) -> Result<()> {
        let mut params = self.params.clone();
        params.push(("limit".to_string(), PAGE_LIMIT.to_string()));
        if let Some(after) = &self.after {
            params.push(("after".to_string(), after.clone()));
        }

        let body = self.api.call(&self.endpoint, &params).await?;
        let listing: Listing = serde_json::from_value(body)?;

        self.after = listing.data.after.filter(|cursor| !cursor.is_empty());
        if self.after.is_none() {
            self.exhausted = true;
        }
        self.buffer = listing.data.children.into();
        Ok(())
    }
}
