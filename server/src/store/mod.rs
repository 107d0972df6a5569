//! Owner-scoped reads and writes of recipe documents and photo blobs.
//!
//! Functions take a connection rather than the pool so handlers can run
//! several of them on one checkout.

pub mod photos;
pub mod recipes;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Query(#[from] diesel::result::Error),

    /// A stored JSON column no longer matches the recipe schema.
    #[error("Malformed stored document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Stored value out of range: {0}")]
    OutOfRange(&'static str),
}
