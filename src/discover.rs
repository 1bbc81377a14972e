//! Guide and tutorial link discovery
//!
//! Phase one of the pipeline. The discoverer paginates the site's
//! listing endpoint collecting guide links, then visits each guide page
//! collecting tutorial links, and assembles the [`Catalog`]: the
//! deduplicated guide list, the per-guide tutorial lists, and a flat
//! tutorial index with first-seen guide attribution.
//!
//! Nothing here throws past an item boundary. A listing-page failure
//! ends pagination; a guide-page failure skips that guide; both are
//! recorded in the catalog's error list.

use crate::catalog::{Catalog, DiscoveryError, Guide, TutorialLink, TutorialRef};
use crate::config::SiteConfig;
use crate::dom::Page;
use crate::fetch::PageFetcher;
use crate::ConfigError;
use chrono::Utc;
use std::collections::HashSet;
use url::Url;

/// Next-page indicators, tried in order.
const NEXT_PAGE_SELECTORS: [&str; 2] = [r#"a[rel="next"]"#, ".pager__item--next a"];

/// Walks the listing and guide pages to build a [`Catalog`]
pub struct LinkDiscoverer<'a> {
    fetcher: &'a dyn PageFetcher,
    site: &'a SiteConfig,
    base: String,
}

impl<'a> LinkDiscoverer<'a> {
    /// Creates a discoverer over an (already rate-limited) fetcher.
    pub fn new(fetcher: &'a dyn PageFetcher, site: &'a SiteConfig) -> Result<Self, ConfigError> {
        // Parsed only to reject a bad origin up front; link absolutization
        // concatenates against the trimmed base string.
        Url::parse(&site.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", site.base_url, e)))?;
        let base = site.base_url.trim_end_matches('/').to_string();

        Ok(Self {
            fetcher,
            site,
            base,
        })
    }

    /// Runs discovery to completion and returns the catalog.
    ///
    /// Errors are collected in the catalog, never returned.
    pub async fn discover(&self) -> Catalog {
        let mut errors = Vec::new();

        let mut guides = self.discover_guides(&mut errors).await;
        tracing::info!("Found {} guides", guides.len());

        let tutorials = self.discover_tutorials(&mut guides, &mut errors).await;
        tracing::info!("Total tutorials found: {}", tutorials.len());
        if !errors.is_empty() {
            tracing::warn!("Discovery finished with {} errors", errors.len());
        }

        Catalog {
            extracted_at: Utc::now(),
            guides,
            tutorials,
            errors,
        }
    }

    /// Paginates the listing endpoint, collecting deduplicated guides.
    ///
    /// State machine: fetch page N; harvest guide links; if a next-page
    /// indicator is present, continue with N+1, otherwise stop. A fetch
    /// failure also stops pagination, after recording the error.
    async fn discover_guides(&self, errors: &mut Vec<DiscoveryError>) -> Vec<Guide> {
        let mut guides = Vec::new();
        let mut seen = HashSet::new();
        let mut page: u32 = 0;

        loop {
            let listing_url = format!("{}{}{}", self.base, self.site.listing_path, page);
            tracing::info!("Fetching listing page {}: {}", page + 1, listing_url);

            let doc = match self.fetcher.fetch(&listing_url).await {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::warn!("Listing page {} failed: {}", page, e);
                    errors.push(DiscoveryError::GuideList {
                        page,
                        error: e.to_string(),
                    });
                    break;
                }
            };

            self.harvest_guides(&doc, &mut guides, &mut seen);

            if !self.has_next_page(&doc) {
                break;
            }
            page += 1;
        }

        guides
    }

    /// Collects guide links from one listing page into `guides`.
    fn harvest_guides(&self, doc: &Page, guides: &mut Vec<Guide>, seen: &mut HashSet<String>) {
        let selector = format!(r#"a[href*="{}"]"#, self.site.guide_prefix);

        for link in doc.find_all(&selector) {
            let Some(href) = link.attr("href") else {
                continue;
            };
            // Guide links are site-relative; anything carrying the
            // tutorial marker is a tutorial teaser, not a guide.
            if !href.starts_with(&self.site.guide_prefix)
                || href.contains(&self.site.tutorial_marker)
            {
                continue;
            }

            let url = format!("{}{}", self.base, href);
            if !seen.insert(url.clone()) {
                continue;
            }

            let text = link.text();
            let title = if text.is_empty() {
                last_segment(href)
            } else {
                text
            };
            guides.push(Guide {
                url,
                title,
                tutorials: Vec::new(),
            });
        }
    }

    /// Returns whether the listing page links to a further page.
    fn has_next_page(&self, doc: &Page) -> bool {
        doc.find_first_of(&NEXT_PAGE_SELECTORS).is_some()
    }

    /// Visits each guide page, filling per-guide tutorial lists and the
    /// flat index.
    async fn discover_tutorials(
        &self,
        guides: &mut [Guide],
        errors: &mut Vec<DiscoveryError>,
    ) -> Vec<TutorialRef> {
        let mut tutorials = Vec::new();
        let mut seen = HashSet::new();
        let total = guides.len();

        for (index, guide) in guides.iter_mut().enumerate() {
            tracing::info!("[{}/{}] {}", index + 1, total, guide.title);

            let doc = match self.fetcher.fetch(&guide.url).await {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::warn!("Guide fetch failed for {}: {}", guide.url, e);
                    errors.push(DiscoveryError::GuideFetch {
                        url: guide.url.clone(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            self.harvest_tutorials(guide, &doc, &mut tutorials, &mut seen);
            tracing::debug!("Found {} tutorials in {}", guide.tutorials.len(), guide.url);
        }

        tutorials
    }

    /// Collects tutorial links from one guide page.
    ///
    /// Dedup happens at two granularities: within the guide's own list,
    /// and against the global flat index, where the first-seen guide
    /// keeps the attribution.
    fn harvest_tutorials(
        &self,
        guide: &mut Guide,
        doc: &Page,
        tutorials: &mut Vec<TutorialRef>,
        seen: &mut HashSet<String>,
    ) {
        let selector = format!(r#"a[href*="{}"]"#, self.site.tutorial_marker);
        let mut seen_in_guide = HashSet::new();

        for link in doc.find_all(&selector) {
            let Some(href) = link.attr("href") else {
                continue;
            };
            if !href.contains(&self.site.tutorial_marker) {
                continue;
            }

            let url = if href.starts_with("http") {
                href.to_string()
            } else {
                format!("{}{}", self.base, href)
            };
            if !seen_in_guide.insert(url.clone()) {
                continue;
            }

            let title = link.text();
            guide.tutorials.push(TutorialLink {
                url: url.clone(),
                title: if title.is_empty() {
                    last_segment(href)
                } else {
                    title.clone()
                },
            });

            if seen.insert(url.clone()) {
                tutorials.push(TutorialRef {
                    url,
                    title,
                    guide: guide.title.clone(),
                    guide_url: guide.url.clone(),
                });
            }
        }
    }
}

/// Returns the last path segment of an href, used as a title fallback.
fn last_segment(href: &str) -> String {
    href.rsplit('/').next().unwrap_or_default().to_string()
}
