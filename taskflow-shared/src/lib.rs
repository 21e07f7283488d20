//! # TaskFlow Shared Library
//!
//! This crate contains the database layer and models shared by the
//! TaskFlow API server and its tooling.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and migration runner
//! - `models`: database models and their CRUD operations

pub mod db;
pub mod models;

/// Current version of the TaskFlow shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
