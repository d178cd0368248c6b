//! Release collection.

pub mod collector;

pub use collector::ReleaseCollector;
