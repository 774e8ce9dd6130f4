//! HTTP client module
//!
//! Provides the rate-limited request layer for the thing API.
//!
//! # Features
//!
//! - **Rate Limiting**: Process-wide minimum spacing between requests
//! - **Option Merging**: Caller query parameters and headers override defaults
//! - **Normalization**: Responses can be returned as normalized thing trees

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestOptions};
pub use rate_limit::RateLimiter;
