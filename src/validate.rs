//! Two-stage classification of resolved links.
//!
//! 1. **Path stage**: the target path must be a published route. If it is
//!    not, the link is a broken link and its anchor is never looked at.
//! 2. **Anchor stage**: if the link carries an anchor, the anchor must be
//!    declared on the target page. An empty anchor (`/page#`) can never be
//!    declared, so it is always broken. A published page that collected no
//!    data has no anchors.
//!
//! A raw link is therefore reported at most once: as a broken link or as a
//! broken anchor, never both.

use crate::resolve::{ResolvedLink, decode_path, percent_decode};
use crate::routes::{RouteIndex, toggle_trailing_slash};
use crate::types::{CollectedLinks, PageLinkData};
use std::collections::HashMap;

/// Outcome of validating one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Valid,
    BrokenLink,
    BrokenAnchor,
}

/// Classifies links against the route index and the collected anchor sets.
pub struct Validator<'a> {
    routes: &'a RouteIndex,
    pages: HashMap<String, &'a PageLinkData>,
}

impl<'a> Validator<'a> {
    pub fn new(routes: &'a RouteIndex, collected: &'a CollectedLinks) -> Self {
        let mut pages = HashMap::with_capacity(collected.len());
        for (path, data) in collected {
            pages.entry(decode_path(path)).or_insert(data);
        }
        Self { routes, pages }
    }

    pub fn classify(&self, resolved: &ResolvedLink) -> Classification {
        if !self.routes.contains(&resolved.target_path) {
            return Classification::BrokenLink;
        }
        let Some(anchor) = resolved.anchor.as_deref() else {
            return Classification::Valid;
        };
        if anchor.is_empty() {
            return Classification::BrokenAnchor;
        }
        match self.page(&resolved.target_path) {
            Some(page) if has_anchor(page, anchor) => Classification::Valid,
            _ => Classification::BrokenAnchor,
        }
    }

    fn page(&self, path: &str) -> Option<&'a PageLinkData> {
        if let Some(page) = self.pages.get(path) {
            return Some(*page);
        }
        toggle_trailing_slash(path).and_then(|alt| self.pages.get(&alt).copied())
    }
}

/// Anchors are matched as written, then percent-decoded.
fn has_anchor(page: &PageLinkData, anchor: &str) -> bool {
    page.anchors.contains(anchor) || page.anchors.contains(&percent_decode(anchor))
}
