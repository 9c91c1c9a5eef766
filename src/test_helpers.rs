//! Shared test utilities for the broken-links test suite.
//!
//! Builders for route trees and collected-link maps, plus extractors that
//! turn a [`Report`] into plain string lists for terse assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let routes = vec![route("/docs", vec![leaf("/docs/intro")]), leaf("/blog")];
//! let collected = collected(&[
//!     ("/docs/intro", &["/blog", "/gone"], &["setup"]),
//!     ("/blog", &[], &[]),
//! ]);
//! ```

use crate::aggregate::{PageFindings, Report};
use crate::types::{CollectedLinks, PageLinkData, Route};

// =========================================================================
// Builders
// =========================================================================

pub fn leaf(path: &str) -> Route {
    Route::leaf(path)
}

pub fn route(path: &str, children: Vec<Route>) -> Route {
    Route {
        path: path.to_string(),
        children,
    }
}

/// Leaf routes for every path, in order.
pub fn leaves(paths: &[&str]) -> Vec<Route> {
    paths.iter().map(|p| leaf(p)).collect()
}

/// Build collected links from `(page, links, anchors)` triples.
pub fn collected(pages: &[(&str, &[&str], &[&str])]) -> CollectedLinks {
    pages
        .iter()
        .map(|(page, links, anchors)| {
            (
                page.to_string(),
                PageLinkData {
                    links: links.iter().map(|l| l.to_string()).collect(),
                    anchors: anchors.iter().map(|a| a.to_string()).collect(),
                },
            )
        })
        .collect()
}

// =========================================================================
// Report extractors
// =========================================================================

/// Source pages of the broken-link category, in report order.
pub fn link_pages(report: &Report) -> Vec<&str> {
    report.links.pages.iter().map(|p| p.page.as_str()).collect()
}

/// Source pages of the broken-anchor category, in report order.
pub fn anchor_pages(report: &Report) -> Vec<&str> {
    report.anchors.pages.iter().map(|p| p.page.as_str()).collect()
}

/// Raw links of one page's findings, in document order.
pub fn raw_links(page: &PageFindings) -> Vec<&str> {
    page.findings.iter().map(|f| f.raw_link.as_str()).collect()
}
