//! Comment tree flattening.

use std::collections::VecDeque;

use crate::api::client::RedditApi;
use crate::api::types::{Comment, Thing};
use crate::error::Result;

/// Flattens a comment tree into encounter order.
///
/// Drives an explicit FIFO queue seeded with the tree's direct children:
/// each dequeued comment is emitted, then its replies join the tail of the
/// queue, so siblings come before any sibling's descendants. Stub ids are
/// collected only when `collect_stubs` is set; otherwise the stub is
/// silently dropped.
pub fn flatten_tree(roots: Vec<Thing>, collect_stubs: bool) -> (Vec<Comment>, Vec<String>) {
    let mut queue: VecDeque<Thing> = roots.into();
    let mut comments = Vec::new();
    let mut pending = Vec::new();

    while let Some(thing) = queue.pop_front() {
        match thing {
            Thing::More(stub) => {
                if collect_stubs {
                    pending.extend(stub.children);
                }
            }
            Thing::Comment(comment) => {
                let mut comment = *comment;
                let replies = std::mem::take(&mut comment.replies);
                comments.push(comment);
                queue.extend(replies);
            }
            _ => {}
        }
    }

    (comments, pending)
}

/// Flattens a tree and, when an owning post id is supplied, resolves the
/// collected stubs through the batched more-children endpoint.
pub async fn flatten(
    api: &RedditApi,
    roots: Vec<Thing>,
    link_id: Option<&str>,
) -> Result<Vec<Comment>> {
    let (mut comments, pending) = flatten_tree(roots, link_id.is_some());
    if let Some(link_id) = link_id {
        if !pending.is_empty() {
            comments.extend(api.morechildren(link_id, pending).await?);
        }
    }
    Ok(comments)
}
