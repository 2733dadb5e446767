//! Form snapshot errors.

use thiserror::Error;

/// Result alias for form operations.
pub type FormResult<T> = Result<T, FormError>;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum FormError {
    /// The snapshot text was not a valid form description.
    #[error("Invalid form snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
