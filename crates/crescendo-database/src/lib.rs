//! # crescendo-database
//!
//! PostgreSQL persistence for Crescendo. Concrete sqlx repositories
//! implementing the repository traits from `crescendo-core`.

pub mod connection;
pub mod migration;
pub mod repositories;
