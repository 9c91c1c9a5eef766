//! Shared types handed to the checker by the build pipeline.
//!
//! These are the already-computed inputs: the route tree and, per rendered
//! page, the links and anchors found in its HTML. They deserialize straight
//! from the JSON link manifest (see [`crate::manifest`]).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One published URL and its nested sub-routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Full path from the site root, e.g. `/docs/intro`.
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Route>,
}

impl Route {
    /// A route without children.
    pub fn leaf(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            children: Vec::new(),
        }
    }
}

/// Links and anchors collected while rendering one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLinkData {
    /// Raw `href` values in document order. Duplicates are kept.
    #[serde(default)]
    pub links: Vec<String>,
    /// Anchor ids defined on the page (heading ids, `id=` targets).
    #[serde(default)]
    pub anchors: BTreeSet<String>,
}

/// Collected data keyed by source page path.
pub type CollectedLinks = BTreeMap<String, PageLinkData>;

/// A broken link or broken anchor found on a source page.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub source_page: String,
    /// The link as written in the page.
    pub raw_link: String,
    /// Canonical absolute target path, percent-decoded.
    pub resolved_path: String,
    pub anchor: Option<String>,
    /// Resolved `path[?query][#anchor]` when it differs from `raw_link`.
    pub display_form: Option<String>,
}
