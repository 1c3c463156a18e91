//! Highlight re-resolution and the highlight side effect

use std::sync::Arc;
use std::time::Duration;

use fontscope_core_types::{NodeRef, RequestId};
use parking_lot::Mutex;
use tokio::time::sleep;
use tracing::{debug, instrument};

use crate::classify::Classifier;
use crate::errors::PerceiverError;
use crate::metrics;
use crate::model::{
    is_root_scope_tag, Classification, EnumerationScope, HighlightOutcome, HighlightSelection,
};
use crate::ports::PagePort;

/// Delay between marking and scrolling, so the mark's visual transition is
/// underway before the viewport moves.
const SCROLL_DELAY: Duration = Duration::from_millis(100);

/// Re-resolve the element set behind one reported (font, tag) pair.
///
/// Runs the same classification as the attribution scan; on a static page
/// the selection size equals the reported count for the pair. Root-scope
/// tags (`html`, `body`) sweep every element but keep only those without an
/// inline font-family of their own - an element declaring a matching font
/// inline is already attributed under its own tag.
#[instrument(skip_all, fields(request = %request.0, font = %font, tag = %tag))]
pub async fn resolve(
    page: &dyn PagePort,
    request: &RequestId,
    font: &str,
    tag: &str,
) -> Result<HighlightSelection, PerceiverError> {
    metrics::record_highlight_request();
    let tag = tag.to_ascii_lowercase();
    let root_scope = is_root_scope_tag(&tag);
    let scope = if root_scope {
        EnumerationScope::All
    } else {
        EnumerationScope::Tag(tag.clone())
    };

    let elements = page.snapshot(&scope).await?;
    let mut classifier = Classifier::new(page);
    let mut selection = HighlightSelection::default();
    for facts in &elements {
        let Classification::Reportable { font: resolved, .. } =
            classifier.classify(facts).await?
        else {
            continue;
        };
        if resolved != font {
            continue;
        }
        if root_scope && !facts.inline_font_family.trim().is_empty() {
            continue;
        }
        selection.nodes.push(facts.node);
    }
    metrics::record_highlight_matches(selection.len() as u64);

    debug!(
        target: "perceiver-font",
        considered = elements.len(),
        matched = selection.len(),
        "highlight query resolved"
    );
    Ok(selection)
}

/// Applies highlight selections to the page.
///
/// Owns the single active highlight session: every apply clears the previous
/// marks before placing new ones, so overlapping requests degrade to
/// last-request-wins.
pub struct Highlighter {
    page: Arc<dyn PagePort>,
    active: Mutex<Vec<NodeRef>>,
}

impl Highlighter {
    pub fn new(page: Arc<dyn PagePort>) -> Self {
        Self {
            page,
            active: Mutex::new(Vec::new()),
        }
    }

    /// Clear-then-apply transition. An empty selection clears the previous
    /// session and marks nothing; that is a normal outcome.
    pub async fn apply(
        &self,
        selection: &HighlightSelection,
    ) -> Result<HighlightOutcome, PerceiverError> {
        self.page.clear_marks().await?;
        self.active.lock().clear();

        if selection.is_empty() {
            return Ok(HighlightOutcome::NoMatch);
        }

        self.page.mark(&selection.nodes).await?;
        *self.active.lock() = selection.nodes.clone();

        sleep(SCROLL_DELAY).await;
        if let Some(first) = selection.first() {
            self.page.scroll_into_view(first).await?;
        }
        Ok(HighlightOutcome::Applied {
            marked: selection.len(),
        })
    }

    /// Nodes marked by the most recent apply.
    pub fn active_marks(&self) -> Vec<NodeRef> {
        self.active.lock().clone()
    }
}
