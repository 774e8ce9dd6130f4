//! # reddit-things
//!
//! A client for the Reddit "thing" JSON API: rate-limited requests,
//! normalized envelopes and lazy cursor pagination.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::TryStreamExt;
//! use reddit_things::http::{HttpClient, RequestOptions};
//! use reddit_things::pagination::ListingPager;
//!
//! # async fn run() -> reddit_things::Result<()> {
//! let pager = ListingPager::new(HttpClient::new()?);
//!
//! let mut items = pager.paginate("r/rust/new", RequestOptions::new());
//! while let Some(item) = items.try_next().await? {
//!     println!("{:?}", item.get("title"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  ListingPager::paginate(path) → Stream<Item = Normalized> │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │ one page per drained page
//! ┌────────────────────────────┴─────────────────────────────┐
//! │  HttpClient::request_normalized(path, options)            │
//! │    RateLimiter::wait() → GET {base}/{path}.json           │
//! │    → normalize() (Listing / t1 / t3 / t5 envelopes)       │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and API policy constants
pub mod types;

/// Client settings
pub mod config;

/// Rate-limited HTTP client
pub mod http;

/// Envelope normalization
pub mod thing;

/// Cursor pagination over listings
pub mod pagination;

/// Posting-time statistics
pub mod stats;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use http::{HttpClient, HttpClientConfig, RateLimiter, RequestOptions};
pub use pagination::{ListingPager, ListingStream};
pub use thing::{normalize, ItemSequence, Normalized, NormalizedItem, SemanticKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
