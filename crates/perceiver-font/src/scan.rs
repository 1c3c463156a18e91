//! Attribution scanner

use fontscope_core_types::RequestId;
use tracing::{debug, instrument, trace};

use crate::classify::Classifier;
use crate::errors::PerceiverError;
use crate::metrics;
use crate::model::{AttributionReport, Classification, EnumerationScope};
use crate::ports::PagePort;

/// Run one attribution pass over every element of the page.
///
/// Aggregation is count-based and commutative, so enumeration order never
/// affects the result. A page with no reportable text yields an empty
/// report, not an error.
#[instrument(skip_all, fields(request = %request.0))]
pub async fn scan(
    page: &dyn PagePort,
    request: &RequestId,
) -> Result<AttributionReport, PerceiverError> {
    metrics::record_scan();
    let elements = page.snapshot(&EnumerationScope::All).await?;
    metrics::record_elements_scanned(elements.len() as u64);

    let mut classifier = Classifier::new(page);
    let mut report = AttributionReport::default();
    let mut reported = 0u64;
    for facts in &elements {
        match classifier.classify(facts).await? {
            Classification::Reportable { tag, font } => {
                report.record(&font, &tag);
                reported += 1;
            }
            Classification::Excluded(reason) => {
                trace!(
                    target: "perceiver-font",
                    tag = %facts.tag,
                    reason = reason.name(),
                    "element excluded from attribution"
                );
            }
        }
    }
    metrics::record_elements_reported(reported);

    debug!(
        target: "perceiver-font",
        elements = elements.len(),
        reported,
        fonts = report.tags_by_font.len(),
        "attribution scan complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixturePage;
    use crate::model::ElementFacts;

    #[tokio::test]
    async fn empty_page_yields_empty_report() {
        let page = FixturePage::new();
        let report = scan(&page, &RequestId::new()).await.unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn aggregates_counts_per_font_and_tag() {
        let mut page = FixturePage::new()
            .with_available_font("Arial")
            .with_available_font("Georgia");
        page.add(ElementFacts::visible("div", "Arial"));
        page.add(ElementFacts::visible("div", "Arial, serif"));
        page.add(ElementFacts::visible("span", "Arial"));
        page.add(ElementFacts::visible("h1", "Georgia"));
        page.add(ElementFacts::visible("h2", "GhostFont"));

        let report = scan(&page, &RequestId::new()).await.unwrap();
        assert_eq!(report.count("Arial", "div"), 2);
        assert_eq!(report.count("Arial", "span"), 1);
        assert_eq!(report.count("Georgia", "h1"), 1);
        assert_eq!(report.total_for_font("Arial"), 3);
        // The unavailable custom font never appears.
        assert_eq!(report.total_for_font("GhostFont"), 0);
    }
}
