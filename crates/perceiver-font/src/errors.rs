use thiserror::Error;

use fontscope_core_types::InspectError;

/// Errors surfaced by the perception core. Empty outcomes (no fonts found,
/// nothing matched a highlight query) are normal results, not errors.
#[derive(Debug, Error)]
pub enum PerceiverError {
    /// The injected page capability failed mid-pass.
    #[error("page capability failed: {0}")]
    Page(#[from] InspectError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<PerceiverError> for InspectError {
    fn from(err: PerceiverError) -> Self {
        InspectError::new(err.to_string())
    }
}
