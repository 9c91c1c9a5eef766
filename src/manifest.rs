//! Link manifest: the JSON document the build hands to the checker.
//!
//! ```json
//! {
//!   "routes": [
//!     { "path": "/docs", "children": [{ "path": "/docs/intro" }] },
//!     { "path": "/blog" }
//!   ],
//!   "collectedLinks": {
//!     "/docs/intro": { "links": ["/blog", "#setup"], "anchors": ["setup"] },
//!     "/blog": { "links": [], "anchors": [] }
//!   }
//! }
//! ```
//!
//! `children`, `links` and `anchors` may be omitted.

use crate::types::{CollectedLinks, Route};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Routes plus the links and anchors collected per page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkManifest {
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub collected_links: CollectedLinks,
}

impl LinkManifest {
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<LinkManifest, ManifestError> {
    let content = fs::read_to_string(path)?;
    let manifest = LinkManifest::from_json(&content)?;
    tracing::debug!(
        path = %path.display(),
        routes = manifest.routes.len(),
        pages = manifest.collected_links.len(),
        "loaded link manifest"
    );
    Ok(manifest)
}
