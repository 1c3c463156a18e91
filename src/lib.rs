//! Fontscope - font usage auditing for live web pages.
//!
//! The library side of the CLI: the messaging-boundary service, runtime
//! configuration, and the terminal rendering of attribution reports.

pub mod cli;
pub mod config;
pub mod errors;
pub mod service;

pub use errors::FontscopeError;
pub use service::{InspectorService, ProbeRequest, ProbeResponse};
