//! HTTP client module
//!
//! Thin wrapper over `reqwest` used to talk to the hosted content store.
//!
//! # Features
//!
//! - **Base URL joining**: requests are made with store-relative paths
//! - **Default headers**: credentials attached to every request
//! - **Rate Limiting**: optional token bucket rate limiter using governor
//! - **Status classification**: non-2xx responses become `HttpStatus` errors
//!
//! Requests are never retried. A failed request surfaces immediately.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
