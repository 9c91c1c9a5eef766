//! Flattened lookup of published page paths.
//!
//! The route tree is walked depth-first, preorder, and every route's path is
//! recorded once. Traversal order is kept because it drives the page order of
//! the final report; membership is what the validator asks about.
//!
//! Paths are stored percent-decoded, so `/page%201` and `/page 1` name the
//! same page. An encoded `/` stays `%2F`, so `/a%2Fb` is not `/a/b`.
//! A trailing slash is not significant: `/docs/` and `/docs` match
//! each other.

use crate::resolve::decode_path;
use crate::types::Route;
use std::collections::HashSet;

/// Ordered set of canonical page paths.
#[derive(Debug, Clone, Default)]
pub struct RouteIndex {
    ordered: Vec<String>,
    lookup: HashSet<String>,
}

impl RouteIndex {
    /// Flatten a route tree. An empty tree yields an empty index.
    pub fn build(routes: &[Route]) -> Self {
        let mut index = Self::default();
        index.insert_all(routes);
        index
    }

    fn insert_all(&mut self, routes: &[Route]) {
        for route in routes {
            let path = decode_path(&route.path);
            if self.lookup.insert(path.clone()) {
                self.ordered.push(path);
            }
            self.insert_all(&route.children);
        }
    }

    /// Whether `path` (literal or percent-encoded) is a published page.
    pub fn contains(&self, path: &str) -> bool {
        let decoded = decode_path(path);
        if self.lookup.contains(decoded.as_str()) {
            return true;
        }
        match toggle_trailing_slash(&decoded) {
            Some(alt) => self.lookup.contains(alt.as_str()),
            None => false,
        }
    }

    /// Canonical paths in depth-first route-tree order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// `/a/` ↔ `/a`. The root path has no alternate form.
pub(crate) fn toggle_trailing_slash(path: &str) -> Option<String> {
    if path.is_empty() || path == "/" {
        return None;
    }
    match path.strip_suffix('/') {
        Some(stripped) => Some(stripped.to_string()),
        None => Some(format!("{path}/")),
    }
}
