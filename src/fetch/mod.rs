//! Fetching module: the crawler's sole point of contact with the network
//!
//! This module contains:
//! - The [`PageFetcher`] capability trait (fetch a URL, get a parsed page)
//! - The reqwest-backed [`HttpFetcher`] implementation
//! - The [`Pacer`] sleep abstraction and the [`RateLimitedFetcher`] wrapper
//!   that enforces a fixed pause after each successful request

mod client;
mod pacing;

pub use client::{build_http_client, FetchError, HttpFetcher, PageFetcher};
pub use pacing::{Pacer, RateLimitedFetcher, TokioPacer};
