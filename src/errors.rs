use page_cdp::PageAdapterError;
use perceiver_font::PerceiverError;
use thiserror::Error;

/// Top-level error surfaced by the fontscope binary.
#[derive(Debug, Error)]
pub enum FontscopeError {
    #[error("browser session failed: {0}")]
    Page(#[from] PageAdapterError),

    #[error("inspection failed: {0}")]
    Perceiver(#[from] PerceiverError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
