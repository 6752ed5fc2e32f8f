//! Storage layer (flat-file JSON documents).

pub mod file;

pub use file::{FileStore, StoreError};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TOKENS: &str = "tokens";
    pub const CHECKS: &str = "checks";

    /// All collections, created on disk when the store is opened.
    pub const ALL: &[&str] = &[USERS, TOKENS, CHECKS];
}
