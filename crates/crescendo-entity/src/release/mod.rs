//! Release DTOs returned by the external release index.

pub mod model;

pub use model::{Release, ReleaseState};
