//! Per-page aggregation of broken links and broken anchors.
//!
//! # Ordering
//!
//! The report order is part of the output contract, so it is built by
//! explicit traversal rather than map iteration:
//!
//! - pages appear in depth-first route-tree order, followed by collected
//!   pages that are not routes (sorted by path);
//! - a page appears in a category only if it has at least one finding there;
//! - within a page, findings keep the document order of the raw links, one
//!   finding per occurrence.
//!
//! # Frequent Links
//!
//! A raw link that is broken on many pages usually comes from a shared
//! layout (navbar, footer). Broken links are grouped by their raw text and
//! counted once per distinct source page; that table is kept on the
//! [`Report`]. A link is *frequent* when its count exceeds the threshold.
//! Both are in first-appearance order.

use crate::resolve::{decode_path, resolve};
use crate::routes::{RouteIndex, toggle_trailing_slash};
use crate::types::{CollectedLinks, Finding, PageLinkData};
use crate::validate::{Classification, Validator};
use std::collections::{HashMap, HashSet};

/// Default frequency threshold: a link broken on more than this many pages
/// is reported as frequent.
pub const DEFAULT_FREQUENT_THRESHOLD: usize = 2;

/// Findings of one category on one source page, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFindings {
    pub page: String,
    pub findings: Vec<Finding>,
}

/// Findings of one category grouped by page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryReport {
    pub pages: Vec<PageFindings>,
}

impl CategoryReport {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of findings across pages.
    pub fn count(&self) -> usize {
        self.pages.iter().map(|p| p.findings.len()).sum()
    }
}

/// Everything one checker run found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub links: CategoryReport,
    pub anchors: CategoryReport,
    /// Distinct-page count per raw broken link, in first-appearance order.
    pub link_frequency: Vec<(String, usize)>,
    /// Raw broken-link strings that recur on many pages.
    pub frequent_links: Vec<String>,
    pub pages_checked: usize,
    pub links_checked: usize,
}

impl Report {
    /// Number of distinct pages on which `raw_link` is a broken link.
    pub fn pages_with_link(&self, raw_link: &str) -> usize {
        self.link_frequency
            .iter()
            .find(|(raw, _)| raw == raw_link)
            .map_or(0, |&(_, count)| count)
    }
}

/// Groups findings by page, preserving first-seen page order.
#[derive(Debug, Default)]
pub struct Aggregator {
    links: Grouped,
    anchors: Grouped,
}

#[derive(Debug, Default)]
struct Grouped {
    pages: Vec<PageFindings>,
    positions: HashMap<String, usize>,
}

impl Grouped {
    fn push(&mut self, finding: Finding) {
        let slot = match self.positions.get(&finding.source_page) {
            Some(&pos) => pos,
            None => {
                self.positions
                    .insert(finding.source_page.clone(), self.pages.len());
                self.pages.push(PageFindings {
                    page: finding.source_page.clone(),
                    findings: Vec::new(),
                });
                self.pages.len() - 1
            }
        };
        self.pages[slot].findings.push(finding);
    }
}

impl Aggregator {
    pub fn push_link(&mut self, finding: Finding) {
        self.links.push(finding);
    }

    pub fn push_anchor(&mut self, finding: Finding) {
        self.anchors.push(finding);
    }

    /// Close the run and compute frequent links.
    pub fn finish(self, frequent_threshold: usize) -> Report {
        let links = CategoryReport {
            pages: self.links.pages,
        };
        let link_frequency = link_frequency(&links);
        let frequent_links = frequent_links(&link_frequency, frequent_threshold);
        Report {
            links,
            anchors: CategoryReport {
                pages: self.anchors.pages,
            },
            link_frequency,
            frequent_links,
            pages_checked: 0,
            links_checked: 0,
        }
    }
}

/// Count the distinct source pages of each raw broken link.
pub fn link_frequency(links: &CategoryReport) -> Vec<(String, usize)> {
    let mut table: Vec<(String, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for page in &links.pages {
        let mut seen_on_page: HashSet<&str> = HashSet::new();
        for finding in &page.findings {
            let raw = finding.raw_link.as_str();
            if !seen_on_page.insert(raw) {
                continue;
            }
            let slot = *slots.entry(raw).or_insert_with(|| {
                table.push((raw.to_string(), 0));
                table.len() - 1
            });
            table[slot].1 += 1;
        }
    }
    table
}

/// Raw links whose page count exceeds `threshold`.
pub fn frequent_links(link_frequency: &[(String, usize)], threshold: usize) -> Vec<String> {
    link_frequency
        .iter()
        .filter(|(_, pages)| *pages > threshold)
        .map(|(raw, _)| raw.clone())
        .collect()
}

/// Resolve and classify every collected link, page by page.
pub fn collect(
    index: &RouteIndex,
    collected: &CollectedLinks,
    frequent_threshold: usize,
) -> Report {
    let validator = Validator::new(index, collected);
    let mut aggregator = Aggregator::default();
    let mut links_checked = 0;

    let pages = page_order(index, collected);
    for (page, data) in &pages {
        for raw_link in &data.links {
            links_checked += 1;
            let resolved = resolve(page, raw_link);
            let classification = validator.classify(&resolved);
            if classification == Classification::Valid {
                continue;
            }
            let finding = Finding {
                source_page: page.to_string(),
                raw_link: raw_link.clone(),
                resolved_path: resolved.target_path,
                anchor: resolved.anchor,
                display_form: resolved.display_form,
            };
            match classification {
                Classification::BrokenLink => aggregator.push_link(finding),
                Classification::BrokenAnchor => aggregator.push_anchor(finding),
                Classification::Valid => {}
            }
        }
    }

    let mut report = aggregator.finish(frequent_threshold);
    report.pages_checked = pages.len();
    report.links_checked = links_checked;
    report
}

/// Collected pages in route-tree order, then the unrouted ones.
fn page_order<'a>(
    index: &RouteIndex,
    collected: &'a CollectedLinks,
) -> Vec<(&'a str, &'a PageLinkData)> {
    let mut by_decoded: HashMap<String, (&'a str, &'a PageLinkData)> = HashMap::new();
    for (path, data) in collected {
        by_decoded
            .entry(decode_path(path))
            .or_insert((path.as_str(), data));
    }

    let mut ordered = Vec::with_capacity(collected.len());
    let mut visited: HashSet<&str> = HashSet::new();
    for route in index.paths() {
        let hit = by_decoded.get(route).or_else(|| {
            toggle_trailing_slash(route).and_then(|alt| by_decoded.get(alt.as_str()))
        });
        if let Some(&(path, data)) = hit {
            if visited.insert(path) {
                ordered.push((path, data));
            }
        }
    }
    for (path, data) in collected {
        if visited.insert(path.as_str()) {
            ordered.push((path.as_str(), data));
        }
    }
    ordered
}
