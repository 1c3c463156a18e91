use std::fmt;

use fontscope_core_types::InspectError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// High-level error categories surfaced by the page adapter.
#[derive(Clone, Debug, Error, Serialize, Deserialize)]
pub enum PageErrorKind {
    #[error("browser launch failed")]
    Launch,
    #[error("navigation timed out")]
    NavTimeout,
    #[error("cdp i/o failure")]
    CdpIo,
    #[error("script evaluation failed")]
    Evaluate,
    #[error("internal error")]
    Internal,
}

/// Enriched error metadata passed back to the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PageAdapterError {
    pub kind: PageErrorKind,
    pub hint: Option<String>,
    pub retriable: bool,
}

impl fmt::Display for PageAdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(hint) = &self.hint {
            write!(f, ": {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for PageAdapterError {}

impl PageAdapterError {
    pub fn new(kind: PageErrorKind) -> Self {
        Self {
            kind,
            hint: None,
            retriable: false,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn retriable(mut self, flag: bool) -> Self {
        self.retriable = flag;
        self
    }
}

impl From<PageAdapterError> for InspectError {
    fn from(err: PageAdapterError) -> Self {
        InspectError::new(err.to_string())
    }
}
