//! Integration tests for the crawl engine.
//!
//! These tests use wiremock to mock the API origin and walk full crawls
//! end-to-end: pagination, filtering, comment link discovery, recursion,
//! and visited-post bookkeeping.

use reddit_harvester::api::RedditApi;
use reddit_harvester::config::Credentials;
use reddit_harvester::crawl::{CrawlEngine, CrawlSource, LinkRecord, Origin};
use reddit_harvester::filters::{DateRange, FilterSet, IdRange};
use reddit_harvester::Error;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates an API client pointed at the mock server.
fn test_api(server: &MockServer, comments: u32) -> RedditApi {
    let credentials = Credentials {
        client_id: "testclient".to_string(),
        user_agent: "test-agent/1.0".to_string(),
    };
    RedditApi::new(credentials, None, comments, false)
        .expect("Failed to create API client")
        .with_endpoints(&server.uri(), &server.uri())
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token123",
            "token_type": "bearer",
            "expires_in": 3600,
        })))
        .mount(server)
        .await;
}

fn listing(after: Option<&str>, children: serde_json::Value) -> serde_json::Value {
    json!({"kind": "Listing", "data": {"after": after, "children": children}})
}

fn t3(id: &str, url: &str, num_comments: u64, created_utc: f64) -> serde_json::Value {
    json!({"kind": "t3", "data": {
        "id": id,
        "url": url,
        "num_comments": num_comments,
        "created_utc": created_utc,
    }})
}

async fn collect_links(engine: &mut CrawlEngine<'_>) -> Vec<LinkRecord> {
    let mut records = Vec::new();
    while let Some(record) = engine.next().await.expect("crawl failed") {
        records.push(record);
    }
    records
}

fn urls(records: &[LinkRecord]) -> Vec<&str> {
    records.iter().map(|r| r.url.as_str()).collect()
}

#[tokio::test]
async fn test_single_post_collects_post_and_comment_links() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let detail = json!([
        listing(None, json!([
            {"kind": "t3", "data": {
                "id": "abc",
                "url": "https://i.example.com/full.jpg",
                "is_self": false,
                "selftext_html": "<a href=\"https://example.com/body.png\">body</a>",
                "num_comments": 2,
            }}
        ])),
        listing(None, json!([
            {"kind": "t1", "data": {
                "id": "c1",
                "body_html": "<a href=\"https://example.com/c1.png\">one</a>",
                "replies": {"kind": "Listing", "data": {"children": [
                    {"kind": "t1", "data": {
                        "id": "c1a",
                        "body_html": "<a href=\"https://example.com/c1a.png\">two</a>",
                        "replies": "",
                    }}
                ]}},
            }}
        ])),
    ]);

    Mock::given(method("GET"))
        .and(path("/comments/abc/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server, 500);
    let source = CrawlSource::from_target(
        &api,
        "https://www.reddit.com/r/pics/comments/abc/",
        FilterSet::default(),
    )
    .expect("target rejected");
    let mut engine = CrawlEngine::new(&api, source, 0);

    let records = collect_links(&mut engine).await;
    assert_eq!(
        urls(&records),
        [
            "https://i.example.com/full.jpg",
            "https://example.com/body.png",
            "https://example.com/c1.png",
            "https://example.com/c1a.png",
        ]
    );
    assert!(matches!(records[0].origin, Origin::Submission(_)));
    assert!(matches!(records[2].origin, Origin::Comment(_)));
    assert_eq!(engine.posts_seen(), 1);
}

#[tokio::test]
async fn test_subreddit_pagination_stops_on_empty_cursor() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    // First page carries a cursor, second page ends the listing. The
    // expected call counts prove no request follows the empty cursor.
    Mock::given(method("GET"))
        .and(path("/r/pics/.json"))
        .and(query_param("limit", "100"))
        .and(query_param_is_missing("after"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            Some("t3_bbb"),
            json!([
                t3("aaa", "https://example.com/a.jpg", 0, 1600000000.0),
                t3("bbb", "https://example.com/b.jpg", 0, 1600000000.0),
            ]),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/r/pics/.json"))
        .and(query_param("after", "t3_bbb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            None,
            json!([t3("ccc", "https://example.com/c.jpg", 0, 1600000000.0)]),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server, 0);
    let source = CrawlSource::from_target(
        &api,
        "https://www.reddit.com/r/pics/",
        FilterSet::default(),
    )
    .expect("target rejected");
    let mut engine = CrawlEngine::new(&api, source, 0);

    let records = collect_links(&mut engine).await;
    assert_eq!(
        urls(&records),
        [
            "https://example.com/a.jpg",
            "https://example.com/b.jpg",
            "https://example.com/c.jpg",
        ]
    );
}

#[tokio::test]
async fn test_empty_string_cursor_terminates() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/r/pics/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            Some(""),
            json!([t3("aaa", "https://example.com/a.jpg", 0, 1600000000.0)]),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server, 0);
    let source = CrawlSource::from_target(
        &api,
        "https://www.reddit.com/r/pics/",
        FilterSet::default(),
    )
    .expect("target rejected");
    let mut engine = CrawlEngine::new(&api, source, 0);

    let records = collect_links(&mut engine).await;
    assert_eq!(urls(&records), ["https://example.com/a.jpg"]);
}

#[tokio::test]
async fn test_listing_filters_drop_posts() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/r/pics/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            None,
            json!([
                // In range on both axes.
                t3("b0", "https://example.com/keep.jpg", 0, 1600000000.0),
                // In id range, too old.
                t3("ba", "https://example.com/old.jpg", 0, 100.0),
                // Above the id ceiling.
                t3("zzzz", "https://example.com/big.jpg", 0, 1600000000.0),
            ]),
        )))
        .mount(&server)
        .await;

    let filters = FilterSet {
        ids: IdRange { min: 395, max: 406 },
        dates: DateRange {
            min: 1000,
            ..Default::default()
        },
    };

    let api = test_api(&server, 0);
    let source = CrawlSource::from_target(&api, "https://www.reddit.com/r/pics/", filters)
        .expect("target rejected");
    let mut engine = CrawlEngine::new(&api, source, 0);

    let records = collect_links(&mut engine).await;
    assert_eq!(urls(&records), ["https://example.com/keep.jpg"]);
}

#[tokio::test]
async fn test_recursion_expands_one_level() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    // Post A links to post B in a comment; B links on to C. With depth 1
    // only B is expanded.
    let detail_a = json!([
        listing(None, json!([
            {"kind": "t3", "data": {
                "id": "aaa",
                "url": "https://example.com/a.jpg",
                "num_comments": 1,
            }}
        ])),
        listing(None, json!([
            {"kind": "t1", "data": {
                "id": "c1",
                "body_html": "<a href=\"https://www.reddit.com/r/pics/comments/bbb/\">next</a> \
                              <a href=\"https://example.com/c1.gif\">media</a>",
                "replies": "",
            }}
        ])),
    ]);
    let detail_b = json!([
        listing(None, json!([
            {"kind": "t3", "data": {
                "id": "bbb",
                "url": "https://example.com/b.mp4",
                "num_comments": 1,
            }}
        ])),
        listing(None, json!([
            {"kind": "t1", "data": {
                "id": "c2",
                "body_html": "<a href=\"/r/pics/comments/ccc/\">deeper</a>",
                "replies": "",
            }}
        ])),
    ]);

    Mock::given(method("GET"))
        .and(path("/comments/aaa/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_a))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/comments/bbb/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_b))
        .expect(1)
        .mount(&server)
        .await;

    // Depth 1 must not reach C.
    Mock::given(method("GET"))
        .and(path("/comments/ccc/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let api = test_api(&server, 500);
    let source = CrawlSource::from_target(
        &api,
        "https://www.reddit.com/r/pics/comments/aaa/",
        FilterSet::default(),
    )
    .expect("target rejected");
    let mut engine = CrawlEngine::new(&api, source, 1);

    let records = collect_links(&mut engine).await;
    assert_eq!(
        urls(&records),
        [
            "https://example.com/a.jpg",
            "https://example.com/c1.gif",
            "https://example.com/b.mp4",
        ]
    );
    assert_eq!(engine.posts_seen(), 2);
    assert_eq!(engine.depth(), 1);
}

#[tokio::test]
async fn test_visited_posts_fetched_once() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    // Two comments point at B, and B points back at A. Each post must be
    // fetched exactly once.
    let detail_a = json!([
        listing(None, json!([
            {"kind": "t3", "data": {
                "id": "aaa",
                "url": "https://example.com/a.jpg",
                "num_comments": 2,
            }}
        ])),
        listing(None, json!([
            {"kind": "t1", "data": {
                "id": "c1",
                "body_html": "<a href=\"https://www.reddit.com/r/pics/comments/bbb/\">b</a>",
                "replies": "",
            }},
            {"kind": "t1", "data": {
                "id": "c2",
                "body_html": "<a href=\"https://www.reddit.com/r/pics/comments/bbb/\">b again</a>",
                "replies": "",
            }}
        ])),
    ]);
    let detail_b = json!([
        listing(None, json!([
            {"kind": "t3", "data": {
                "id": "bbb",
                "url": "https://example.com/b.jpg",
                "num_comments": 1,
            }}
        ])),
        listing(None, json!([
            {"kind": "t1", "data": {
                "id": "c3",
                "body_html": "<a href=\"https://www.reddit.com/r/pics/comments/aaa/\">back</a> \
                              <a href=\"https://example.com/c3.png\">media</a>",
                "replies": "",
            }}
        ])),
    ]);

    Mock::given(method("GET"))
        .and(path("/comments/aaa/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_a))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/comments/bbb/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_b))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server, 500);
    let source = CrawlSource::from_target(
        &api,
        "https://www.reddit.com/r/pics/comments/aaa/",
        FilterSet::default(),
    )
    .expect("target rejected");
    let mut engine = CrawlEngine::new(&api, source, 3);

    let records = collect_links(&mut engine).await;
    assert_eq!(
        urls(&records),
        [
            "https://example.com/a.jpg",
            "https://example.com/b.jpg",
            "https://example.com/c3.png",
        ]
    );
    assert_eq!(engine.posts_seen(), 2);
    assert_eq!(engine.depth(), 1);
}

#[tokio::test]
async fn test_user_feed_yields_comment_items() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("GET"))
        .and(path("/user/someone/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(
            None,
            json!([
                {"kind": "t1", "data": {
                    "id": "cc1",
                    "body_html": "<a href=\"https://example.com/u1.png\">pic</a>",
                    "replies": "",
                }},
                t3("ddd", "https://example.com/d.jpg", 0, 1600000000.0),
            ]),
        )))
        .mount(&server)
        .await;

    let api = test_api(&server, 500);
    let source = CrawlSource::from_target(
        &api,
        "https://www.reddit.com/user/someone/",
        FilterSet::default(),
    )
    .expect("target rejected");
    let mut engine = CrawlEngine::new(&api, source, 0);

    let records = collect_links(&mut engine).await;
    assert_eq!(
        urls(&records),
        ["https://example.com/u1.png", "https://example.com/d.jpg"]
    );
    assert!(matches!(records[0].origin, Origin::Comment(_)));
    assert!(matches!(records[1].origin, Origin::Submission(_)));
}

#[tokio::test]
async fn test_feed_links_emitted_but_not_expanded() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let detail = json!([
        listing(None, json!([
            {"kind": "t3", "data": {
                "id": "abc",
                "url": "https://example.com/a.jpg",
                "num_comments": 1,
            }}
        ])),
        listing(None, json!([
            {"kind": "t1", "data": {
                "id": "c1",
                "body_html": "<a href=\"https://www.reddit.com/r/pics/\">sub</a> \
                              <a href=\"https://www.reddit.com/user/someone/\">user</a> \
                              <a href=\"#share\">share</a>",
                "replies": "",
            }}
        ])),
    ]);

    Mock::given(method("GET"))
        .and(path("/comments/abc/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail))
        .expect(1)
        .mount(&server)
        .await;

    // The linked feeds must never be fetched.
    Mock::given(method("GET"))
        .and(path("/r/pics/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(None, json!([]))))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/someone/.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing(None, json!([]))))
        .expect(0)
        .mount(&server)
        .await;

    let api = test_api(&server, 500);
    let source = CrawlSource::from_target(
        &api,
        "https://www.reddit.com/r/pics/comments/abc/",
        FilterSet::default(),
    )
    .expect("target rejected");
    let mut engine = CrawlEngine::new(&api, source, 5);

    // Feed links come out as terminal records without queueing further
    // fetches; the bare fragment is dropped.
    let records = collect_links(&mut engine).await;
    assert_eq!(
        urls(&records),
        [
            "https://example.com/a.jpg",
            "https://www.reddit.com/r/pics/",
            "https://www.reddit.com/user/someone/",
        ]
    );
    assert!(matches!(records[1].origin, Origin::Comment(_)));
    assert_eq!(engine.posts_seen(), 1);
    assert_eq!(engine.depth(), 0);
}

#[tokio::test]
async fn test_unsupported_target_rejected() {
    let server = MockServer::start().await;
    let api = test_api(&server, 0);

    let result = CrawlSource::from_target(&api, "https://example.com/", FilterSet::default());
    assert!(matches!(result, Err(Error::UnsupportedUrl(_))));
}
