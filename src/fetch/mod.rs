//! HTTP fetching module
//!
//! This module contains the network foundation of the engine:
//! - Shared client construction with browser-like headers
//! - GET with timeout, retry and linear backoff
//! - Per-host request throttling
//! - Payload decompression with raw-text fallback

mod client;
mod decode;
mod executor;
mod throttle;

pub use client::{build_http_client, USER_AGENT};
pub use decode::decode_body;
pub use executor::{fetch_with_retry, FetchedResponse};
pub use throttle::HostThrottle;
