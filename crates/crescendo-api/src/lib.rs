//! # crescendo-api
//!
//! Thin HTTP layer over the notification engine: per-channel settings, the
//! Telegram pairing endpoints, and the inbound chat webhook that drives
//! phase 2 of the binding handshake.
//!
//! Authentication lives in the upstream gateway; the acting user arrives as
//! the `x-user-id` header and is turned into an explicit
//! [`RequestContext`](crescendo_service::context::RequestContext) before any
//! service call.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
