//! End-to-end tests for the public checker API.
//!
//! Each test hands a route tree and collected links to
//! `handle_broken_links` / `check_site` and asserts on the exact outcome: no
//! error, the diagnostics emitted, or the text of the build failure.

use broken_links::manifest::load_manifest;
use broken_links::{
    BrokenLinksError, Category, CollectedLinks, Diagnostic, LinkCheckConfig, PageLinkData, Route,
    check_site, handle_broken_links,
};
use std::path::Path;

use broken_links::ReportingSeverity::{Ignore, Throw, Warn};

fn routes(paths: &[&str]) -> Vec<Route> {
    paths.iter().map(|p| Route::leaf(*p)).collect()
}

fn page(links: &[&str], anchors: &[&str]) -> PageLinkData {
    PageLinkData {
        links: links.iter().map(|l| l.to_string()).collect(),
        anchors: anchors.iter().map(|a| a.to_string()).collect(),
    }
}

fn collected(pages: Vec<(&str, PageLinkData)>) -> CollectedLinks {
    pages
        .into_iter()
        .map(|(path, data)| (path.to_string(), data))
        .collect()
}

fn expect_links_error(result: Result<Vec<Diagnostic>, BrokenLinksError>) -> String {
    match result {
        Err(BrokenLinksError::BrokenLinks(message)) => message,
        other => panic!("expected broken links error, got {other:?}"),
    }
}

fn expect_anchors_error(result: Result<Vec<Diagnostic>, BrokenLinksError>) -> String {
    match result {
        Err(BrokenLinksError::BrokenAnchors(message)) => message,
        other => panic!("expected broken anchors error, got {other:?}"),
    }
}

// =========================================================================
// Path stage
// =========================================================================

#[test]
fn valid_links_do_not_throw() {
    let result = handle_broken_links(
        &routes(&["/page1", "/page2"]),
        &collected(vec![
            ("/page1", page(&["/page2"], &[])),
            ("/page2", page(&[], &[])),
        ]),
        Throw,
        Throw,
    );
    assert!(result.unwrap().is_empty());
}

#[test]
fn broken_link_throws_with_single_finding() {
    let message = expect_links_error(handle_broken_links(
        &routes(&["/page1", "/page2"]),
        &collected(vec![
            ("/page1", page(&["/brokenLink"], &[])),
            ("/page2", page(&[], &[])),
        ]),
        Throw,
        Throw,
    ));
    assert_eq!(
        message,
        "Docusaurus found broken links!

Please check the pages of your site in the list below, and make sure you don't reference any path that does not exist.
Note: it's possible to ignore broken links with the 'onBrokenLinks' Docusaurus configuration, and let the build pass.

Exhaustive list of all broken links found:
- Broken link on source page path = /page1:
   -> linking to /brokenLink
"
    );
    assert_eq!(message.matches("-> linking to").count(), 1);
}

#[test]
fn link_to_uncollected_route_is_valid() {
    let result = handle_broken_links(
        &routes(&["/page1", "/page2"]),
        &collected(vec![("/page1", page(&["/page2", "./page2"], &[]))]),
        Throw,
        Throw,
    );
    assert!(result.is_ok());
}

#[test]
fn encoded_and_literal_links_match_literal_route() {
    let result = handle_broken_links(
        &routes(&["/page1", "/page 1"]),
        &collected(vec![("/page1", page(&["/page%201", "/page 1"], &[]))]),
        Throw,
        Throw,
    );
    assert!(result.is_ok());
}

#[test]
fn encoded_dots_climb_and_encoded_slash_stays_in_segment() {
    let result = handle_broken_links(
        &routes(&["/docs/x", "/secret"]),
        &collected(vec![("/docs/x", page(&["/docs/%2E%2E/secret"], &[]))]),
        Throw,
        Throw,
    );
    assert!(result.is_ok());

    let message = expect_links_error(handle_broken_links(
        &routes(&["/a/b"]),
        &collected(vec![("/a/b", page(&["/a%2Fb"], &[]))]),
        Throw,
        Throw,
    ));
    assert!(message.contains("   -> linking to /a%2Fb\n"));
}

#[test]
fn missing_page_with_anchor_is_only_a_broken_link() {
    let message = expect_links_error(handle_broken_links(
        &routes(&["/page1"]),
        &collected(vec![("/page1", page(&["/gone#section"], &[]))]),
        Throw,
        Throw,
    ));
    assert!(message.contains("-> linking to /gone#section\n"));

    let result = handle_broken_links(
        &routes(&["/page1"]),
        &collected(vec![("/page1", page(&["/gone#section"], &[]))]),
        Ignore,
        Throw,
    );
    assert!(result.unwrap().is_empty());
}

#[test]
fn relative_broken_link_shows_resolved_form() {
    let message = expect_links_error(handle_broken_links(
        &routes(&["/docs/intro"]),
        &collected(vec![("/docs/intro", page(&["../missing", "./gone?x=1"], &[]))]),
        Throw,
        Throw,
    ));
    assert!(message.contains("   -> linking to ../missing (resolved as: /missing)\n"));
    assert!(message.contains("   -> linking to ./gone?x=1 (resolved as: /docs/gone?x=1)\n"));
}

// =========================================================================
// Anchor stage
// =========================================================================

#[test]
fn broken_anchor_throws() {
    let message = expect_anchors_error(handle_broken_links(
        &routes(&["/page1"]),
        &collected(vec![("/page1", page(&["/page1#badAnchor"], &[]))]),
        Throw,
        Throw,
    ));
    assert_eq!(
        message,
        "Docusaurus found broken anchors!

Please check the pages of your site in the list below, and make sure you don't reference any anchor that does not exist.
Note: it's possible to ignore broken anchors with the 'onBrokenAnchors' Docusaurus configuration, and let the build pass.

Exhaustive list of all broken anchors found:
- Broken anchor on source page path = /page1:
   -> linking to /page1#badAnchor
"
    );
}

#[test]
fn declared_anchors_do_not_throw() {
    let result = handle_broken_links(
        &routes(&["/page1", "/page2"]),
        &collected(vec![
            ("/page1", page(&["/page2#intro", "#top"], &["top"])),
            ("/page2", page(&[], &["intro"])),
        ]),
        Throw,
        Throw,
    );
    assert!(result.is_ok());
}

#[test]
fn bare_hash_is_always_a_broken_anchor() {
    let message = expect_anchors_error(handle_broken_links(
        &routes(&["/page1", "/page2"]),
        &collected(vec![
            ("/page1", page(&["#", "/page2#"], &["top"])),
            ("/page2", page(&[], &["intro"])),
        ]),
        Throw,
        Throw,
    ));
    assert!(message.contains("   -> linking to # (resolved as: /page1#)\n"));
    assert!(message.contains("   -> linking to /page2#\n"));
}

#[test]
fn anchor_to_uncollected_page_is_broken() {
    let message = expect_anchors_error(handle_broken_links(
        &routes(&["/page1", "/page2"]),
        &collected(vec![("/page1", page(&["/page2#intro"], &[]))]),
        Throw,
        Throw,
    ));
    assert!(message.contains("-> linking to /page2#intro"));
}

// =========================================================================
// Policies
// =========================================================================

#[test]
fn ignore_never_fails() {
    let result = handle_broken_links(
        &routes(&["/page1"]),
        &collected(vec![("/page1", page(&["/gone", "#nope"], &[]))]),
        Ignore,
        Ignore,
    );
    assert!(result.unwrap().is_empty());
}

#[test]
fn warn_emits_one_diagnostic_per_category() {
    let diagnostics = handle_broken_links(
        &routes(&["/page1", "/page2"]),
        &collected(vec![
            ("/page1", page(&["/gone", "#nope"], &[])),
            ("/page2", page(&["/gone2", "#nope2"], &[])),
        ]),
        Warn,
        Warn,
    )
    .unwrap();
    let categories: Vec<Category> = diagnostics.iter().map(|d| d.category).collect();
    assert_eq!(categories, vec![Category::Link, Category::Anchor]);
    assert!(
        diagnostics
            .iter()
            .all(|d| d.message.starts_with("[WARNING] Docusaurus found broken "))
    );
}

#[test]
fn warn_without_findings_is_silent() {
    let diagnostics = handle_broken_links(
        &routes(&["/page1"]),
        &collected(vec![("/page1", page(&["/page1"], &[]))]),
        Warn,
        Warn,
    )
    .unwrap();
    assert!(diagnostics.is_empty());
}

#[test]
fn link_throw_wins_over_anchor_throw() {
    let message = expect_links_error(handle_broken_links(
        &routes(&["/page1"]),
        &collected(vec![("/page1", page(&["/gone", "#nope"], &[]))]),
        Throw,
        Throw,
    ));
    assert!(!message.contains("#nope"));
}

#[test]
fn warned_links_still_reach_anchor_throw() {
    let message = expect_anchors_error(handle_broken_links(
        &routes(&["/page1"]),
        &collected(vec![("/page1", page(&["/gone", "#nope"], &[]))]),
        Warn,
        Throw,
    ));
    assert!(message.contains("-> linking to #nope (resolved as: /page1#nope)"));
}

// =========================================================================
// Frequent links
// =========================================================================

#[test]
fn frequent_broken_links_are_listed_first() {
    let pages = ["/page1", "/page2", "/dir/page1", "/dir/page2", "/dir/page3"];
    let links = &["/frequentBrokenLink", "./relativeFrequentBrokenLink"];
    let message = expect_links_error(handle_broken_links(
        &routes(&pages),
        &collected(pages.iter().map(|p| (*p, page(links, &[]))).collect()),
        Throw,
        Throw,
    ));

    assert!(message.contains(
        "Frequent broken links are linking to:
- /frequentBrokenLink
- ./relativeFrequentBrokenLink

Exhaustive list of all broken links found:
"
    ));
    assert!(message.ends_with(
        "- Broken link on source page path = /page1:
   -> linking to /frequentBrokenLink
   -> linking to ./relativeFrequentBrokenLink (resolved as: /relativeFrequentBrokenLink)
- Broken link on source page path = /page2:
   -> linking to /frequentBrokenLink
   -> linking to ./relativeFrequentBrokenLink (resolved as: /relativeFrequentBrokenLink)
- Broken link on source page path = /dir/page1:
   -> linking to /frequentBrokenLink
   -> linking to ./relativeFrequentBrokenLink (resolved as: /dir/relativeFrequentBrokenLink)
- Broken link on source page path = /dir/page2:
   -> linking to /frequentBrokenLink
   -> linking to ./relativeFrequentBrokenLink (resolved as: /dir/relativeFrequentBrokenLink)
- Broken link on source page path = /dir/page3:
   -> linking to /frequentBrokenLink
   -> linking to ./relativeFrequentBrokenLink (resolved as: /dir/relativeFrequentBrokenLink)
"
    ));
}

#[test]
fn link_on_two_pages_is_not_frequent() {
    let message = expect_links_error(handle_broken_links(
        &routes(&["/a", "/b", "/c"]),
        &collected(vec![
            ("/a", page(&["/gone"], &[])),
            ("/b", page(&["/gone"], &[])),
            ("/c", page(&[], &[])),
        ]),
        Throw,
        Throw,
    ));
    assert!(!message.contains("Frequent broken links"));
}

#[test]
fn config_threshold_controls_frequency() {
    let config = LinkCheckConfig {
        frequency: broken_links::config::FrequencyConfig { threshold: 1 },
        ..LinkCheckConfig::default()
    };
    let result = check_site(
        &routes(&["/a", "/b"]),
        &collected(vec![("/a", page(&["/gone"], &[])), ("/b", page(&["/gone"], &[]))]),
        &config,
    );
    let message = expect_links_error(result);
    assert!(message.contains("Frequent broken links are linking to:\n- /gone\n"));
}

// =========================================================================
// Fixture site
// =========================================================================

fn fixture() -> broken_links::manifest::LinkManifest {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site/links.json");
    load_manifest(&path).unwrap()
}

#[test]
fn fixture_site_reports_layout_link_and_anchors() {
    let site = fixture();
    let config = LinkCheckConfig {
        on_broken_links: Warn,
        on_broken_anchors: Warn,
        ..LinkCheckConfig::default()
    };
    let diagnostics = check_site(&site.routes, &site.collected_links, &config).unwrap();
    assert_eq!(diagnostics.len(), 2);

    let links = &diagnostics[0].message;
    assert!(links.contains("Frequent broken links are linking to:\n- /community\n\n"));
    let pages: Vec<&str> = links
        .lines()
        .filter_map(|l| l.strip_prefix("- Broken link on source page path = "))
        .collect();
    assert_eq!(
        pages,
        vec![
            "/:",
            "/docs/intro:",
            "/docs/guides/setup:",
            "/docs/api:",
            "/blog:"
        ]
    );

    let anchors = &diagnostics[1].message;
    assert!(anchors.ends_with(
        "- Broken anchor on source page path = /docs/intro:
   -> linking to api#missing (resolved as: /docs/api#missing)
- Broken anchor on source page path = /docs/guides/setup:
   -> linking to # (resolved as: /docs/guides/setup#)
- Broken anchor on source page path = /blog/hello world:
   -> linking to ../docs/intro#nope (resolved as: /docs/intro#nope)
"
    ));
}

#[test]
fn fixture_site_report_is_deterministic() {
    let site = fixture();
    let first = handle_broken_links(&site.routes, &site.collected_links, Warn, Warn).unwrap();
    for _ in 0..5 {
        let again = handle_broken_links(&site.routes, &site.collected_links, Warn, Warn).unwrap();
        assert_eq!(again, first);
    }
}
