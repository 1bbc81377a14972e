//! Pipeline orchestration
//!
//! Wires the two phases together: discovery produces `catalog.json`
//! through the sink, extraction reads it back and streams every tutorial
//! through the extractor into the batch writer. Each phase is invoked as
//! its own manually-triggered run; the catalog artifact is the only
//! hand-off between them.

use crate::batch::BatchWriter;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::discover::LinkDiscoverer;
use crate::extract::ContentExtractor;
use crate::fetch::{PageFetcher, Pacer, RateLimitedFetcher};
use crate::sink::ArtifactSink;
use crate::{HarvestError, Result};
use std::time::Duration;

/// Fixed name of the discovery-phase artifact
pub const CATALOG_FILE: &str = "catalog.json";

/// Counts reported after a discovery run
#[derive(Debug, Clone, Copy)]
pub struct DiscoveryReport {
    pub guides: usize,
    pub tutorials: usize,
    pub errors: usize,
}

/// Counts reported after an extraction run
#[derive(Debug, Clone, Copy)]
pub struct ExtractionReport {
    pub tutorials: usize,
    pub failures: usize,
    pub batches: u32,
}

/// Runs the discovery phase and writes the catalog artifact.
///
/// # Arguments
///
/// * `config` - Site, pacing, and output configuration
/// * `fetcher` - The raw page fetcher; pacing is layered on here
/// * `pacer` - Sleep implementation for the inter-request pauses
/// * `sink` - Destination for the catalog artifact
pub async fn run_discovery(
    config: &Config,
    fetcher: &dyn PageFetcher,
    pacer: &dyn Pacer,
    sink: &dyn ArtifactSink,
) -> Result<DiscoveryReport> {
    let limited = RateLimitedFetcher::new(
        fetcher,
        pacer,
        Duration::from_millis(config.pacing.discovery_delay_ms),
    );
    let discoverer = LinkDiscoverer::new(&limited, &config.site)?;

    tracing::info!("Starting discovery against {}", config.site.base_url);
    let catalog = discoverer.discover().await;

    let bytes = serde_json::to_vec_pretty(&catalog)?;
    sink.write(CATALOG_FILE, &bytes)?;

    let report = DiscoveryReport {
        guides: catalog.guides.len(),
        tutorials: catalog.tutorials.len(),
        errors: catalog.errors.len(),
    };
    tracing::info!(
        "Discovery complete: {} guides, {} tutorials, {} errors -> {}",
        report.guides,
        report.tutorials,
        report.errors,
        CATALOG_FILE
    );
    Ok(report)
}

/// Runs the extraction phase over a previously written catalog.
///
/// The catalog is read through the sink before any network activity; a
/// missing or malformed catalog aborts the run. After that point every
/// failure is per-tutorial: each catalog entry yields exactly one record
/// (content or failure) in the batch output, in catalog order.
pub async fn run_extraction(
    config: &Config,
    fetcher: &dyn PageFetcher,
    pacer: &dyn Pacer,
    sink: &dyn ArtifactSink,
) -> Result<ExtractionReport> {
    let bytes = sink.read(CATALOG_FILE)?;
    let catalog: Catalog =
        serde_json::from_slice(&bytes).map_err(|e| HarvestError::Catalog {
            message: e.to_string(),
        })?;

    let limited = RateLimitedFetcher::new(
        fetcher,
        pacer,
        Duration::from_millis(config.pacing.extraction_delay_ms),
    );
    let extractor = ContentExtractor::new(&config.site.base_url)?;
    let mut writer = BatchWriter::new(sink, config.output.batch_size);

    let total = catalog.tutorials.len();
    let mut failures = 0usize;
    tracing::info!("Starting extraction of {} tutorials", total);

    for (index, entry) in catalog.tutorials.iter().enumerate() {
        tracing::info!("[{}/{}] {}", index + 1, total, entry.title);

        let record = extractor.extract(&limited, entry).await;
        if record.is_failure() {
            failures += 1;
        }
        writer.append(record)?;
    }

    let batches = writer.finish()?;
    let report = ExtractionReport {
        tutorials: total,
        failures,
        batches,
    };
    tracing::info!(
        "Extraction complete: {} tutorials, {} failures, {} batches",
        report.tutorials,
        report.failures,
        report.batches
    );
    Ok(report)
}
