use thiserror::Error;

/// Core error type shared across hrsim crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller supplied a value outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A record carries a department/position pair the catalog does not know.
    #[error("catalog inconsistency: position '{position}' is not valid for department '{department}'")]
    CatalogInconsistency { department: String, position: String },
    /// The catalog itself violates its invariants.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    /// A record violates a field invariant.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Convenience alias for results returned by hrsim crates.
pub type Result<T> = std::result::Result<T, Error>;
