//! CLI output formatting for a checker run.
//!
//! The full broken-link report text belongs to [`crate::policy`]; this module
//! only renders the short run summary the CLI prints before dispatching it:
//!
//! ```text
//! Checked 6 pages, 18 links
//!     Broken links: 5 on 5 pages
//!     Broken anchors: 3 on 3 pages
//!     Frequent: /community (5 pages)
//! ```
//!
//! Format functions are pure and return `Vec<String>`; `print_*` wrappers
//! write to stdout.

use crate::aggregate::{CategoryReport, Report};

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn category_line(label: &str, category: &CategoryReport) -> String {
    if category.is_empty() {
        format!("{}{label}: none", indent(1))
    } else {
        format!(
            "{}{label}: {} on {}",
            indent(1),
            category.count(),
            plural(category.pages.len(), "page", "pages")
        )
    }
}

/// Format the run summary.
pub fn format_check_summary(report: &Report) -> Vec<String> {
    let mut lines = vec![format!(
        "Checked {}, {}",
        plural(report.pages_checked, "page", "pages"),
        plural(report.links_checked, "link", "links")
    )];
    lines.push(category_line("Broken links", &report.links));
    lines.push(category_line("Broken anchors", &report.anchors));
    for link in &report.frequent_links {
        lines.push(format!(
            "{}Frequent: {link} ({})",
            indent(1),
            plural(report.pages_with_link(link), "page", "pages")
        ));
    }
    lines
}

pub fn print_check_summary(report: &Report) {
    for line in format_check_summary(report) {
        println!("{line}");
    }
}
