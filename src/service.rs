//! Messaging boundary
//!
//! The request/response pairs the display surface exchanges with the page
//! probe, and the dispatcher serving them. Every request gets exactly one
//! response; empty results (no fonts, nothing matched a highlight query) are
//! normal responses. Only a failed page capability surfaces as an error, and
//! that class belongs to the transport, not this dispatcher.

use std::sync::Arc;

use fontscope_core_types::RequestId;
use perceiver_font::{FontPerceiver, FontReportPayload, PerceiverError};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Requests accepted over the messaging boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ProbeRequest {
    GetFonts,
    HighlightFontAndTag { font: String, tag: String },
}

/// Responses sent back over the messaging boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbeResponse {
    Fonts(FontReportPayload),
    Highlight { success: bool },
}

/// Dispatches probe requests to the font perceiver.
pub struct InspectorService {
    perceiver: Arc<dyn FontPerceiver>,
}

impl InspectorService {
    pub fn new(perceiver: Arc<dyn FontPerceiver>) -> Self {
        Self { perceiver }
    }

    /// Serve one request.
    ///
    /// A highlight request is acknowledged once the side effect was invoked,
    /// even when its selection turned out empty.
    #[instrument(skip_all)]
    pub async fn dispatch(
        &self,
        request: ProbeRequest,
    ) -> Result<ProbeResponse, PerceiverError> {
        let id = RequestId::new();
        match request {
            ProbeRequest::GetFonts => {
                let report = self.perceiver.scan_fonts(&id).await?;
                info!(
                    target: "fontscope",
                    request = %id,
                    fonts = report.tags_by_font.len(),
                    "font report served"
                );
                Ok(ProbeResponse::Fonts(report.to_payload()))
            }
            ProbeRequest::HighlightFontAndTag { font, tag } => {
                let outcome = self
                    .perceiver
                    .highlight_font_and_tag(&id, &font, &tag)
                    .await?;
                info!(
                    target: "fontscope",
                    request = %id,
                    font = %font,
                    tag = %tag,
                    applied = outcome.is_applied(),
                    "highlight request served"
                );
                Ok(ProbeResponse::Highlight { success: true })
            }
        }
    }
}
