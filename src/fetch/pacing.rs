//! Fixed inter-request pacing
//!
//! The pipeline is polite by construction: after every successful fetch
//! it pauses for a fixed duration before the next request may proceed.
//! This is a flat post-request pause, not a token bucket; it does not
//! adapt to response times or failures. The sleep itself sits behind the
//! [`Pacer`] trait so tests can run the pipeline without wall-clock waits.

use crate::dom::Page;
use crate::fetch::{FetchError, PageFetcher};
use async_trait::async_trait;
use std::time::Duration;

/// Injectable sleep abstraction
#[async_trait(?Send)]
pub trait Pacer {
    /// Suspends the current task for the given duration.
    async fn pause(&self, wait: Duration);
}

/// Production pacer backed by the tokio timer
pub struct TokioPacer;

#[async_trait(?Send)]
impl Pacer for TokioPacer {
    async fn pause(&self, wait: Duration) {
        tokio::time::sleep(wait).await;
    }
}

/// Wraps a [`PageFetcher`] with a fixed post-request pause
///
/// The pause runs after each successful fetch completes and before the
/// result is returned, so no second request can start inside the window.
/// A failed fetch returns immediately; the caller's failure isolation
/// takes over and the next request is not delayed further.
pub struct RateLimitedFetcher<'a> {
    inner: &'a dyn PageFetcher,
    pacer: &'a dyn Pacer,
    delay: Duration,
}

impl<'a> RateLimitedFetcher<'a> {
    pub fn new(inner: &'a dyn PageFetcher, pacer: &'a dyn Pacer, delay: Duration) -> Self {
        Self {
            inner,
            pacer,
            delay,
        }
    }
}

#[async_trait(?Send)]
impl PageFetcher for RateLimitedFetcher<'_> {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        let page = self.inner.fetch(url).await?;
        self.pacer.pause(self.delay).await;
        Ok(page)
    }
}
