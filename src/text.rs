//! HTML helpers for pulling link candidates out of post and comment bodies.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Extracts anchor targets from an HTML fragment in document order.
///
/// Entity references are decoded by the parser, so returned URLs are plain
/// text even when the source was escaped markup.
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    fragment
        .select(&ANCHOR)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}
