//! Persistence of resolution results
//!
//! - [`catalog`]: writes the resolved repository document
//! - [`options`]: merges top-K version lists into a default-config document

pub mod catalog;
pub mod options;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
