//! # Broken Links
//!
//! Validates the internal link graph of a generated multi-page site. Given
//! the published routes and, for every rendered page, the links and anchor
//! ids found in it, the checker reports links to pages that do not exist and
//! `#anchors` that do not exist on their target page, then ignores, logs,
//! warns about, or fails the build on each category.
//!
//! # Pipeline
//!
//! ```text
//! 1. Index      route tree          →  RouteIndex      (flattened page paths)
//! 2. Resolve    page + raw href     →  ResolvedLink    (absolute path, anchor)
//! 3. Validate   ResolvedLink        →  valid | broken link | broken anchor
//! 4. Aggregate  findings            →  Report          (per page, frequent links)
//! 5. Dispatch   Report + policies   →  diagnostics or BrokenLinksError
//! ```
//!
//! Every stage is pure and synchronous; only [`manifest`] and [`config`]
//! touch the filesystem, and only when the CLI asks them to.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`routes`] | Depth-first flattening of the route tree into a lookup index |
//! | [`resolve`] | Raw link parsing and resolution against the source page |
//! | [`validate`] | Two-stage path-then-anchor classification |
//! | [`aggregate`] | Deterministic per-page grouping and frequent-link detection |
//! | [`policy`] | Report text and the ignore/log/warn/throw dispatch |
//! | [`config`] | `config.toml` loading, merging, and validation |
//! | [`manifest`] | JSON link manifest loading |
//! | [`output`] | CLI run summary formatting |
//! | [`types`] | Shared input types (`Route`, `PageLinkData`, `Finding`) |
//!
//! # Design Decisions
//!
//! ## Path Before Anchor
//!
//! A link whose page does not exist is reported once, as a broken link. Its
//! anchor is never checked, so the two reports never describe the same link.
//!
//! ## Deterministic Output
//!
//! Report order follows the route tree, then the document order of links.
//! The same inputs always produce byte-identical report text, which is what
//! makes the messages testable as exact strings.
//!
//! ## Frequent Links
//!
//! A link broken on many pages is almost always in the navbar or footer. Such
//! links are listed once at the top of the report so the fix is obvious
//! before reading the exhaustive list.

pub mod aggregate;
pub mod config;
pub mod manifest;
pub mod output;
pub mod policy;
pub mod resolve;
pub mod routes;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use aggregate::Report;
pub use config::LinkCheckConfig;
pub use policy::{BrokenLinksError, Category, Diagnostic, ReportingSeverity};
pub use types::{CollectedLinks, Finding, PageLinkData, Route};

use aggregate::DEFAULT_FREQUENT_THRESHOLD;
use routes::RouteIndex;

/// Run the full check and return the report without applying any policy.
pub fn find_broken_links(
    routes: &[Route],
    collected_links: &CollectedLinks,
    frequent_threshold: usize,
) -> Report {
    let index = RouteIndex::build(routes);
    let report = aggregate::collect(&index, collected_links, frequent_threshold);
    tracing::debug!(
        routes = index.len(),
        pages = report.pages_checked,
        links = report.links_checked,
        broken_links = report.links.count(),
        broken_anchors = report.anchors.count(),
        "checked site links"
    );
    report
}

/// Check every collected link and apply the two policies.
///
/// Broken links are dispatched first. With `on_broken_links = Throw`, a
/// broken link fails the call before broken anchors are considered.
pub fn handle_broken_links(
    routes: &[Route],
    collected_links: &CollectedLinks,
    on_broken_links: ReportingSeverity,
    on_broken_anchors: ReportingSeverity,
) -> Result<Vec<Diagnostic>, BrokenLinksError> {
    let report = find_broken_links(routes, collected_links, DEFAULT_FREQUENT_THRESHOLD);
    policy::report(&report, on_broken_links, on_broken_anchors)
}

/// Same as [`handle_broken_links`], with policies and threshold from config.
pub fn check_site(
    routes: &[Route],
    collected_links: &CollectedLinks,
    config: &LinkCheckConfig,
) -> Result<Vec<Diagnostic>, BrokenLinksError> {
    let report = find_broken_links(routes, collected_links, config.frequency.threshold);
    policy::report(&report, config.on_broken_links, config.on_broken_anchors)
}
