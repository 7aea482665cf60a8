// CardDeck - Rust Implementation
// A windowed card paginator over a queryable record store

#![warn(rust_2018_idioms)]

pub mod config;
pub mod paginator;
pub mod render;
pub mod report;
pub mod store;

// Re-exports for convenience
pub use config::PaginatorConfig;
pub use paginator::{PageWindow, Paginator};
pub use store::{MemoryStore, Query, Record, RecordId, RecordStore, SortSpec, Store};

/// CardDeck error types
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Store error: {0}")]
        Store(String),

        #[error("Schema validation failed: field `{field}` {constraint}")]
        SchemaValidation { field: String, constraint: String },

        #[error("Out of range: {0}")]
        OutOfRange(String),

        #[error("Card error: {0}")]
        Card(String),

        #[error("Internal error: {0}")]
        Internal(String),
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_format() {
        // VERSION is a static string, always valid
        let _version: &str = VERSION;
        // Just ensure the constant is accessible
    }
}
