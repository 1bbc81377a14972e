//! Tutorial content extraction
//!
//! Given a catalog entry and its fetched page, the extractor applies a
//! fixed set of DOM-selection heuristics to produce a structured record:
//! body markup and text from the main content region, all video and image
//! sources, and the page's topic and version taxonomy terms. Absent
//! optional fields are not errors; they yield empty strings or lists.
//!
//! Extraction failures are per-item: a tutorial whose fetch fails becomes
//! a minimal failure record in the output stream, never a propagated
//! error, so every catalog entry yields exactly one record.

use crate::catalog::TutorialRef;
use crate::dom::Page;
use crate::fetch::PageFetcher;
use crate::ConfigError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Main content region alternatives, tried in order; first match wins.
const CONTENT_SELECTORS: [&str; 4] = [".tutorial-content", ".node__content", "article", "main"];

/// Video embeds and players; all matches are collected.
const VIDEO_SELECTOR: &str = r#"iframe[src*="vimeo"], iframe[src*="youtube"], video source, [data-video-url], .video-embed iframe"#;

/// Containers carrying a bare video id instead of a full URL.
const VIDEO_ID_SELECTOR: &str = "[data-video-id], [data-vimeo-id]";

/// Images inside the recognized content regions.
const IMAGE_SELECTOR: &str = "article img, .tutorial-content img, .node__content img";

/// Topic taxonomy links.
const TOPIC_SELECTOR: &str = r#".field--name-field-topics a, .taxonomy-term a, [rel="tag"]"#;

/// Version-tag taxonomy links.
const VERSION_SELECTOR: &str = ".field--name-field-drupal-version a, .drupal-version";

/// Structured content extracted from one tutorial page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedContent {
    pub url: String,
    pub title: String,
    pub guide: String,
    pub guide_url: String,
    pub extracted_html: String,
    pub body_text: String,
    pub videos: Vec<String>,
    pub images: Vec<String>,
    pub topics: Vec<String>,
    pub versions: Vec<String>,
}

/// One output record per catalog tutorial: full content or a failure marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TutorialRecord {
    Content(ExtractedContent),
    Failure {
        url: String,
        title: String,
        error: String,
    },
}

impl TutorialRecord {
    /// Returns true for failure records.
    pub fn is_failure(&self) -> bool {
        matches!(self, TutorialRecord::Failure { .. })
    }
}

/// Applies the selection heuristics to tutorial pages
pub struct ContentExtractor {
    origin: Url,
}

impl ContentExtractor {
    /// Creates an extractor rewriting relative media paths against the
    /// given site origin.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let origin = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self { origin })
    }

    /// Fetches a tutorial and extracts its content.
    ///
    /// A fetch failure yields a [`TutorialRecord::Failure`] carrying the
    /// entry's url and title; it is never propagated.
    pub async fn extract(&self, fetcher: &dyn PageFetcher, entry: &TutorialRef) -> TutorialRecord {
        match fetcher.fetch(&entry.url).await {
            Ok(page) => TutorialRecord::Content(self.extract_from_page(entry, &page)),
            Err(e) => {
                tracing::warn!("Extraction failed for {}: {}", entry.url, e);
                TutorialRecord::Failure {
                    url: entry.url.clone(),
                    title: entry.title.clone(),
                    error: e.to_string(),
                }
            }
        }
    }

    /// Runs the selection heuristics over an already-parsed page.
    pub fn extract_from_page(&self, entry: &TutorialRef, page: &Page) -> ExtractedContent {
        let mut content = ExtractedContent {
            url: entry.url.clone(),
            title: entry.title.clone(),
            guide: entry.guide.clone(),
            guide_url: entry.guide_url.clone(),
            ..ExtractedContent::default()
        };

        // Main content region: ordered alternatives, no merging.
        if let Some(region) = page.find_first_of(&CONTENT_SELECTORS) {
            content.extracted_html = region.inner_html();
            content.body_text = region.text();
        }

        // Video sources: every match contributes its raw source string.
        for node in page.find_all(VIDEO_SELECTOR) {
            if let Some(src) = node.attr("src").or_else(|| node.attr("data-video-url")) {
                content.videos.push(src.to_string());
            }
        }

        // Bare video ids are synthesized into canonical player URLs.
        for node in page.find_all(VIDEO_ID_SELECTOR) {
            if let Some(id) = node.attr("data-video-id").or_else(|| node.attr("data-vimeo-id")) {
                content
                    .videos
                    .push(format!("https://player.vimeo.com/video/{id}"));
            }
        }

        for node in page.find_all(IMAGE_SELECTOR) {
            let Some(src) = node.attr("src").or_else(|| node.attr("data-src")) else {
                continue;
            };
            if src.contains("data:image") {
                continue;
            }
            if let Some(absolute) = self.absolutize(src) {
                content.images.push(absolute);
            }
        }

        // Taxonomy terms are collected verbatim, duplicates included.
        for node in page.find_all(TOPIC_SELECTOR) {
            content.topics.push(node.text());
        }
        for node in page.find_all(VERSION_SELECTOR) {
            content.versions.push(node.text());
        }

        content
    }

    /// Rewrites a relative media path to an absolute URL; absolute
    /// http(s) values pass through unchanged.
    fn absolutize(&self, src: &str) -> Option<String> {
        if src.starts_with("http") {
            return Some(src.to_string());
        }
        self.origin.join(src).ok().map(|url| url.to_string())
    }
}
