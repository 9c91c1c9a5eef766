//! Resolution of raw `href` strings against their source page.
//!
//! A raw link is split into path, query and anchor, then resolved the way a
//! browser would resolve it against the page URL:
//!
//! | Raw link (from `/docs/guide`) | Target path | Anchor |
//! |-------------------------------|-------------|--------|
//! | `/blog`                       | `/blog`     | none   |
//! | `intro`                       | `/docs/intro` | none |
//! | `../blog#top`                 | `/blog`     | `top`  |
//! | `#setup`                      | `/docs/guide` | `setup` |
//! | `?tab=npm`                    | `/docs/guide` | none |
//! | `#`                           | `/docs/guide` | empty |
//!
//! Relative links are resolved against the source page's directory, i.e. the
//! page path with its last segment removed. A `..` that would climb above the
//! site root is kept as a literal segment: no route can have that shape, so
//! the link surfaces as broken instead of being silently clamped to `/`.
//!
//! Path segments are percent-decoded before dot segments are collapsed, so
//! `%2E%2E` climbs like `..`. An encoded `/` stays `%2F`: it is part of a
//! segment name, never a separator.
//!
//! Resolution never fails. The query part is kept only for display.

use std::borrow::Cow;

/// Result of resolving one raw link.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLink {
    /// Absolute, dot-free, percent-decoded path.
    pub target_path: String,
    /// Text after the first `#`. `Some("")` for a bare trailing `#`.
    pub anchor: Option<String>,
    pub query: Option<String>,
    /// Serialized resolved form, set only when it differs from the raw link.
    pub display_form: Option<String>,
}

impl ResolvedLink {
    /// `path[?query][#anchor]`.
    pub fn serialized(&self) -> String {
        serialize(
            &self.target_path,
            self.query.as_deref(),
            self.anchor.as_deref(),
        )
    }
}

/// Resolve `raw_link` as written on the page at `source_page`.
pub fn resolve(source_page: &str, raw_link: &str) -> ResolvedLink {
    let (before_anchor, anchor) = match raw_link.split_once('#') {
        Some((rest, anchor)) => (rest, Some(anchor.to_string())),
        None => (raw_link, None),
    };
    let (path_part, query) = match before_anchor.split_once('?') {
        Some((path, query)) => (path, Some(query.to_string())),
        None => (before_anchor, None),
    };

    let absolute = if path_part.is_empty() {
        source_page.to_string()
    } else if path_part.starts_with('/') {
        path_part.to_string()
    } else {
        format!("{}{}", source_directory(source_page), path_part)
    };
    let target_path = normalize_segments(&absolute);

    let serialized = serialize(&target_path, query.as_deref(), anchor.as_deref());
    let display_form = (serialized != raw_link).then_some(serialized);

    ResolvedLink {
        target_path,
        anchor,
        query,
        display_form,
    }
}

/// Decode `%XX` escapes. Input that does not decode to UTF-8 is returned as is.
pub fn percent_decode(text: &str) -> String {
    urlencoding::decode(text)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| text.to_string())
}

/// Percent-decode a path segment by segment, keeping `%2F` encoded.
pub fn decode_path(path: &str) -> String {
    path.split('/')
        .map(decode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn decode_segment(segment: &str) -> String {
    let decoded = percent_decode(segment);
    if decoded.contains('/') {
        decoded.replace('/', "%2F")
    } else {
        decoded
    }
}

/// Directory part of a page path, always ending with `/`.
///
/// `/docs/guide` → `/docs/`, `/docs/` → `/docs/`, `/` → `/`.
fn source_directory(page: &str) -> &str {
    match page.rfind('/') {
        Some(pos) => &page[..=pos],
        None => "/",
    }
}

/// Decode, then collapse `.`, `..` and empty segments of an absolute path.
///
/// A trailing slash (or a trailing `.`/`..` segment) is preserved as a
/// trailing slash. Excess `..` segments stay in the output.
fn normalize_segments(path: &str) -> String {
    let decoded: Vec<String> = path.split('/').map(decode_segment).collect();
    let trailing_slash = matches!(
        decoded.last().map(String::as_str),
        Some("" | "." | "..")
    );

    let mut segments: Vec<&str> = Vec::new();
    for segment in &decoded {
        match segment.as_str() {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&prev) if prev != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let mut normalized = String::with_capacity(path.len() + 1);
    normalized.push('/');
    normalized.push_str(&segments.join("/"));
    if trailing_slash && !segments.is_empty() {
        normalized.push('/');
    }
    normalized
}

fn serialize(path: &str, query: Option<&str>, anchor: Option<&str>) -> String {
    let mut out = path.to_string();
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    if let Some(a) = anchor {
        out.push('#');
        out.push_str(a);
    }
    out
}
