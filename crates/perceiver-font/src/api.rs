use std::sync::Arc;

use async_trait::async_trait;
use fontscope_core_types::RequestId;

use crate::errors::PerceiverError;
use crate::highlight::{self, Highlighter};
use crate::model::{AttributionReport, HighlightOutcome};
use crate::ports::PagePort;
use crate::scan;

/// Font perception surface consumed by the messaging layer.
#[async_trait]
pub trait FontPerceiver: Send + Sync {
    /// One full attribution pass over the page.
    async fn scan_fonts(&self, request: &RequestId)
        -> Result<AttributionReport, PerceiverError>;

    /// Re-resolve one (font, tag) pair and run the highlight side effect.
    async fn highlight_font_and_tag(
        &self,
        request: &RequestId,
        font: &str,
        tag: &str,
    ) -> Result<HighlightOutcome, PerceiverError>;
}

pub struct FontPerceiverBuilder {
    page: Option<Arc<dyn PagePort>>,
}

impl FontPerceiverBuilder {
    pub fn new() -> Self {
        Self { page: None }
    }

    pub fn with_page(mut self, page: Arc<dyn PagePort>) -> Self {
        self.page = Some(page);
        self
    }

    pub fn build(self) -> Arc<dyn FontPerceiver> {
        let page = self.page.expect("page port is required");
        Arc::new(FontPerceiverImpl {
            highlighter: Highlighter::new(page.clone()),
            page,
        })
    }
}

impl Default for FontPerceiverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FontPerceiverImpl {
    page: Arc<dyn PagePort>,
    highlighter: Highlighter,
}

#[async_trait]
impl FontPerceiver for FontPerceiverImpl {
    async fn scan_fonts(
        &self,
        request: &RequestId,
    ) -> Result<AttributionReport, PerceiverError> {
        scan::scan(self.page.as_ref(), request).await
    }

    async fn highlight_font_and_tag(
        &self,
        request: &RequestId,
        font: &str,
        tag: &str,
    ) -> Result<HighlightOutcome, PerceiverError> {
        let selection = highlight::resolve(self.page.as_ref(), request, font, tag).await?;
        self.highlighter.apply(&selection).await
    }
}
