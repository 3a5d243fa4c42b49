//! URL extraction and document chunking.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::knowledge::{normalize_url, TrustedSource};

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhttps?://[a-z0-9\-._~%]+(?::\d+)?(?:/[^\s<>"'(){}\[\]|\\^`]*)?"#)
        .expect("valid URL pattern")
});

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid paragraph selector"));

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid blank line pattern"));

/// Extract well-formed http(s) URLs in order of appearance.
///
/// Trailing sentence punctuation is not part of the URL.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| {
            m.as_str()
                .trim_end_matches(['.', ',', ';', ':', '!', '?'])
                .to_string()
        })
        .filter(|candidate| {
            Url::parse(candidate)
                .map(|u| u.host_str().is_some_and(|h| !h.is_empty()))
                .unwrap_or(false)
        })
        .collect()
}

/// First URL in the passage that falls under the source's canonical URL.
pub fn select_target_url(passage: &str, source: &TrustedSource) -> Option<String> {
    let canonical = source.canonical_url();
    if canonical.is_empty() {
        return None;
    }
    extract_urls(passage)
        .into_iter()
        .find(|url| normalize_url(url).contains(&canonical))
}

/// Split a fetched document into paragraph-level text chunks.
///
/// HTML documents are split on `<p>` elements; documents without any
/// paragraph element fall back to blank-line separated blocks. Whitespace is
/// collapsed and chunks shorter than `min_chars` characters are dropped.
pub fn chunk_document(body: &str, min_chars: usize) -> Vec<String> {
    let document = Html::parse_document(body);
    let mut chunks: Vec<String> = document
        .select(&PARAGRAPH)
        .map(|p| collapse_whitespace(&p.text().collect::<Vec<_>>().join(" ")))
        .collect();

    if chunks.is_empty() {
        let text = document.root_element().text().collect::<Vec<_>>().join("");
        chunks = BLANK_LINES
            .split(&text)
            .map(collapse_whitespace)
            .collect();
    }

    chunks
        .into_iter()
        .filter(|chunk| chunk.chars().count() >= min_chars)
        .collect()
}

/// Join chunks into a context string of at most `budget` characters.
///
/// Whole chunks are added while they fit; the first chunk is truncated if it
/// alone exceeds the budget.
pub fn build_context(chunks: &[String], budget: usize) -> String {
    let mut context = String::new();
    let mut used = 0usize;

    for chunk in chunks {
        let separator = if context.is_empty() { 0 } else { 2 };
        let len = chunk.chars().count();

        if used + separator + len <= budget {
            if separator > 0 {
                context.push_str("\n\n");
            }
            context.push_str(chunk);
            used += separator + len;
        } else {
            if context.is_empty() {
                context.extend(chunk.chars().take(budget));
            }
            break;
        }
    }

    context
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
