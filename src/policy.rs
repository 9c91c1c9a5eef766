//! Report formatting and the per-category reporting policy.
//!
//! Broken links and broken anchors are reported independently, links first.
//! Each category has its own [`ReportingSeverity`]:
//!
//! | Severity | Findings present                                   |
//! |----------|----------------------------------------------------|
//! | `ignore` | dropped silently                                   |
//! | `log`    | one `[INFO] ` diagnostic, processing continues     |
//! | `warn`   | one `[WARNING] ` diagnostic, processing continues  |
//! | `throw`  | the whole category fails the build in one message  |
//!
//! When broken links are thrown, the anchor category is never reached.
//!
//! # Message Format
//!
//! ```text
//! Docusaurus found broken links!
//!
//! Please check the pages of your site in the list below, and make sure you don't reference any path that does not exist.
//! Note: it's possible to ignore broken links with the 'onBrokenLinks' Docusaurus configuration, and let the build pass.
//!
//! Exhaustive list of all broken links found:
//! - Broken link on source page path = /page1:
//!    -> linking to /brokenLink
//!    -> linking to ./gone (resolved as: /gone)
//! ```
//!
//! When frequent links exist, a block naming them sits between the note and
//! the exhaustive list.

use crate::aggregate::{CategoryReport, Report};
use crate::types::Finding;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Build failure raised by a `throw` policy. Displays as the full report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrokenLinksError {
    #[error("{0}")]
    BrokenLinks(String),
    #[error("{0}")]
    BrokenAnchors(String),
}

impl BrokenLinksError {
    pub fn category(&self) -> Category {
        match self {
            Self::BrokenLinks(_) => Category::Link,
            Self::BrokenAnchors(_) => Category::Anchor,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BrokenLinks(m) | Self::BrokenAnchors(m) => m,
        }
    }
}

/// What to do with the findings of one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportingSeverity {
    Ignore,
    Log,
    Warn,
    #[default]
    Throw,
}

impl ReportingSeverity {
    /// Parse the lowercase config spelling.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ignore" => Some(Self::Ignore),
            "log" => Some(Self::Log),
            "warn" => Some(Self::Warn),
            "throw" => Some(Self::Throw),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Log => "log",
            Self::Warn => "warn",
            Self::Throw => "throw",
        }
    }
}

impl fmt::Display for ReportingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two independently reported categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Link,
    Anchor,
}

impl Category {
    fn header(self) -> &'static str {
        match self {
            Self::Link => "Docusaurus found broken links!",
            Self::Anchor => "Docusaurus found broken anchors!",
        }
    }

    fn subject(self) -> &'static str {
        match self {
            Self::Link => "path",
            Self::Anchor => "anchor",
        }
    }

    fn plural(self) -> &'static str {
        match self {
            Self::Link => "links",
            Self::Anchor => "anchors",
        }
    }

    fn singular(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Anchor => "anchor",
        }
    }

    fn option_name(self) -> &'static str {
        match self {
            Self::Link => "onBrokenLinks",
            Self::Anchor => "onBrokenAnchors",
        }
    }
}

/// A non-fatal message emitted by a `log` or `warn` policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub category: Category,
    pub severity: ReportingSeverity,
    /// Full message including its `[INFO] ` / `[WARNING] ` prefix.
    pub message: String,
}

// ============================================================================
// Formatting
// ============================================================================

fn finding_line(finding: &Finding) -> String {
    match &finding.display_form {
        Some(resolved) => format!(
            "   -> linking to {} (resolved as: {resolved})",
            finding.raw_link
        ),
        None => format!("   -> linking to {}", finding.raw_link),
    }
}

fn frequent_links_block(frequent: &[String]) -> String {
    let mut block = String::from(
        "It looks like some of the broken links we found appear in many pages of your site.\n\
         Maybe those broken links appear on all pages through your site layout?\n\
         We recommend that you check your theme configuration for such links (particularly, theme navbar and footer).\n\
         Frequent broken links are linking to:\n",
    );
    for link in frequent {
        block.push_str("- ");
        block.push_str(link);
        block.push('\n');
    }
    block.push('\n');
    block
}

/// Render the full report text of one category.
///
/// `frequent` is only ever non-empty for the link category.
pub fn format_report(category: Category, report: &CategoryReport, frequent: &[String]) -> String {
    let mut out = format!(
        "{header}\n\n\
         Please check the pages of your site in the list below, and make sure you don't reference any {subject} that does not exist.\n\
         Note: it's possible to ignore broken {plural} with the '{option}' Docusaurus configuration, and let the build pass.\n\n",
        header = category.header(),
        subject = category.subject(),
        plural = category.plural(),
        option = category.option_name(),
    );

    if !frequent.is_empty() {
        out.push_str(&frequent_links_block(frequent));
    }

    out.push_str(&format!(
        "Exhaustive list of all broken {} found:\n",
        category.plural()
    ));
    for page in &report.pages {
        out.push_str(&format!(
            "- Broken {} on source page path = {}:\n",
            category.singular(),
            page.page
        ));
        for finding in &page.findings {
            out.push_str(&finding_line(finding));
            out.push('\n');
        }
    }
    out
}

// ============================================================================
// Dispatch
// ============================================================================

/// Apply one category's policy.
fn dispatch(
    category: Category,
    severity: ReportingSeverity,
    report: &CategoryReport,
    frequent: &[String],
) -> Result<Option<Diagnostic>, BrokenLinksError> {
    if report.is_empty() || severity == ReportingSeverity::Ignore {
        return Ok(None);
    }
    let message = format_report(category, report, frequent);
    match severity {
        ReportingSeverity::Ignore => Ok(None),
        ReportingSeverity::Log => {
            let message = format!("[INFO] {message}");
            tracing::info!("{message}");
            Ok(Some(Diagnostic {
                category,
                severity,
                message,
            }))
        }
        ReportingSeverity::Warn => {
            let message = format!("[WARNING] {message}");
            tracing::warn!("{message}");
            Ok(Some(Diagnostic {
                category,
                severity,
                message,
            }))
        }
        ReportingSeverity::Throw => Err(match category {
            Category::Link => BrokenLinksError::BrokenLinks(message),
            Category::Anchor => BrokenLinksError::BrokenAnchors(message),
        }),
    }
}

/// Report broken links, then broken anchors, each under its own policy.
///
/// Returns the non-fatal diagnostics emitted along the way.
pub fn report(
    report: &Report,
    on_broken_links: ReportingSeverity,
    on_broken_anchors: ReportingSeverity,
) -> Result<Vec<Diagnostic>, BrokenLinksError> {
    let mut diagnostics = Vec::new();
    if let Some(d) = dispatch(
        Category::Link,
        on_broken_links,
        &report.links,
        &report.frequent_links,
    )? {
        diagnostics.push(d);
    }
    if let Some(d) = dispatch(Category::Anchor, on_broken_anchors, &report.anchors, &[])? {
        diagnostics.push(d);
    }
    Ok(diagnostics)
}
