//! # crescendo-core
//!
//! Core crate for Crescendo. Contains configuration schemas, shared value
//! types, the collaborator traits every other crate implements or consumes,
//! and the unified error system.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
