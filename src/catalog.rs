//! Catalog data model
//!
//! The catalog is the root artifact of the discovery phase: every guide
//! found on the listing pages, every tutorial found inside those guides,
//! and every error met along the way. It is serialized once as
//! `catalog.json` and consumed wholesale by the extraction phase.
//!
//! Field names serialize in camelCase to keep the artifact shape stable
//! for downstream consumers (`extractedAt`, `guideUrl`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tutorial as listed inside a guide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialLink {
    pub url: String,
    pub title: String,
}

/// A named collection of tutorials, one catalog-page entity
///
/// Unique by url; the tutorial list is populated once during discovery
/// and not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guide {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub tutorials: Vec<TutorialLink>,
}

/// Flat-index entry: a tutorial with its owning guide attribution
///
/// Globally unique by url. A tutorial cross-listed in several guides is
/// attributed to its first-seen guide here; the per-guide lists retain
/// the full attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialRef {
    pub url: String,
    pub title: String,
    pub guide: String,
    pub guide_url: String,
}

/// An error collected (not thrown) during discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscoveryError {
    /// A listing page failed to fetch; pagination stopped there.
    GuideList { page: u32, error: String },

    /// A guide page failed to fetch; remaining guides continued.
    GuideFetch { url: String, error: String },
}

/// Complete discovery-phase output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub extracted_at: DateTime<Utc>,
    pub guides: Vec<Guide>,
    pub tutorials: Vec<TutorialRef>,
    pub errors: Vec<DiscoveryError>,
}
