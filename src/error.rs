//! Error taxonomy for the query engines and the GeoJSON boundary.
//!
//! All engine errors are caller input errors, detected synchronously at the
//! start of an operation; nothing is retried and no partial results are
//! produced.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Errors produced by geoquery operations.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The input is not a recognizable point collection or feature
    /// structure (e.g. not a FeatureCollection, malformed coordinates).
    #[error("invalid input: {0}")]
    InvalidInputKind(String),

    /// A containment-mode string is neither strict nor inclusive.
    #[error("invalid containment mode: {0:?} (expected 'strict'/'contains' or 'inclusive'/'covers')")]
    InvalidMode(String),

    /// A radius-search radius is negative.
    #[error("invalid radius: {0} (must be >= 0)")]
    InvalidRadius(f64),

    /// A KNN `k` is not a positive integer.
    #[error("invalid k: {0} (must be > 0)")]
    InvalidK(i64),

    /// A KNN target is not a single-point geometry.
    #[error("invalid target geometry: {0}")]
    InvalidTargetGeometry(String),

    /// A nearest-neighbor lookup against an empty target collection.
    #[error("target collection is empty")]
    EmptyCollection,

    /// File-boundary I/O failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// GeoJSON (de)serialization failure at the file boundary.
    #[error("serialization error: {0}")]
    Serialization(String),
}
