//! # crescendo-index
//!
//! HTTP client for the external release index. Implements the
//! [`ReleaseSource`](crescendo_core::traits::ReleaseSource) trait consumed by
//! the release collector.

pub mod client;
pub mod dto;

pub use client::IndexClient;
