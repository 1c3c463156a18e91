//! Font perception core - attribution scanning and highlight re-resolution
//!
//! This crate decides, for every reportable element on a page, which font in
//! its computed fallback stack is the one actually rendered, aggregates that
//! per (font, tag), and can later re-locate the element set behind any
//! reported pair so a highlight matches what was reported. Both passes run
//! through one shared classification primitive; the page itself is reached
//! only through the injected [`PagePort`] capability.

pub mod api;
pub mod classify;
pub mod errors;
pub mod fixture;
pub mod highlight;
pub mod metrics;
pub mod model;
pub mod ports;
pub mod scan;

pub use api::{FontPerceiver, FontPerceiverBuilder, FontPerceiverImpl};
pub use classify::{parse_font_stack, Classifier};
pub use errors::PerceiverError;
pub use fixture::FixturePage;
pub use highlight::Highlighter;
pub use model::{
    AttributionReport, Classification, ElementFacts, EnumerationScope, ExclusionReason,
    FontReportPayload, HighlightOutcome, HighlightSelection,
};
pub use ports::{PagePort, FONT_PROBE_SAMPLE, FONT_PROBE_SIZE_PX};
