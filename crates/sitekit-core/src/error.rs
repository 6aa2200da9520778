//! Error types for the SiteKit engine.
//!
//! Each layer gets its own enum so callers can match on what actually went
//! wrong: catalog invariant violations, storage failures, and history clone
//! failures. All types use `thiserror`.

use thiserror::Error;

/// Catalog invariant violation. Produced by `equipment::validate_catalog`;
/// the interactive editor upholds these by construction so this surfaces only
/// when inspecting untrusted stored data.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    /// Two items share an id.
    #[error("duplicate equipment id: {id}")]
    DuplicateId { id: String },

    /// An item carries a negative dimension.
    #[error("negative dimensions on equipment: {id}")]
    NegativeDimensions { id: String },

    /// A cable path has fewer than two points.
    #[error("cable path on {id} has {points} point(s), need at least 2")]
    DegeneratePath { id: String, points: usize },
}

/// Storage failure in the persistence adapter. Read failures are normally
/// swallowed (the adapter falls back to generation); write failures surface
/// through the autosave status rather than aborting the session.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The stored slot could not be read.
    #[error("failed to read stored layout: {0}")]
    Read(#[source] std::io::Error),

    /// The stored slot could not be written.
    #[error("failed to write stored layout: {0}")]
    Write(#[source] std::io::Error),

    /// The stored payload is not a valid catalog.
    #[error("stored layout is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level result alias for engine operations.
pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;
