//! End-to-end inspection flows against a canned page: what a scan reports is
//! exactly what a later highlight query re-locates.

use std::sync::Arc;

use fontscope_cli::service::{InspectorService, ProbeRequest, ProbeResponse};
use perceiver_font::{ElementFacts, FixturePage, FontPerceiverBuilder, FontReportPayload};

fn service_for(page: Arc<FixturePage>) -> InspectorService {
    let perceiver = FontPerceiverBuilder::new().with_page(page).build();
    InspectorService::new(perceiver)
}

async fn scan_payload(service: &InspectorService) -> FontReportPayload {
    match service.dispatch(ProbeRequest::GetFonts).await.unwrap() {
        ProbeResponse::Fonts(payload) => payload,
        other => panic!("expected fonts response, got {other:?}"),
    }
}

async fn highlight(service: &InspectorService, font: &str, tag: &str) {
    let response = service
        .dispatch(ProbeRequest::HighlightFontAndTag {
            font: font.to_string(),
            tag: tag.to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response, ProbeResponse::Highlight { success: true });
}

#[tokio::test]
async fn every_reported_pair_highlights_the_reported_count() {
    let mut page = FixturePage::new()
        .with_available_font("Arial")
        .with_available_font("Georgia");
    page.add(ElementFacts::visible("div", "Arial"));
    page.add(ElementFacts::visible("div", "Arial"));
    page.add(ElementFacts::visible("span", "Arial"));
    page.add(ElementFacts::visible("h1", "Georgia"));
    let page = Arc::new(page);
    let service = service_for(page.clone());

    let payload = scan_payload(&service).await;
    for (font, counts) in &payload.counts_by_font_and_tag {
        for (tag, expected) in counts {
            highlight(&service, font, tag).await;
            assert_eq!(
                page.marked().len() as u64,
                *expected,
                "highlight for ({font}, {tag}) must match the reported count"
            );
        }
    }
}

#[tokio::test]
async fn unavailable_custom_font_reports_under_its_fallback() {
    let mut page = FixturePage::new().with_available_font("Georgia");
    page.add(ElementFacts::visible("div", "FancyWebFont, Georgia, serif"));
    let page = Arc::new(page);
    let service = service_for(page.clone());

    let payload = scan_payload(&service).await;
    assert_eq!(payload.tag_by_font["Georgia"], vec!["div"]);
    assert!(!payload.tag_by_font.contains_key("FancyWebFont"));

    highlight(&service, "Georgia", "div").await;
    assert_eq!(page.marked().len(), 1);
}

#[tokio::test]
async fn style_and_collapsed_elements_never_appear() {
    let mut page = FixturePage::new().with_available_font("Arial");
    page.add(ElementFacts::visible("style", "Arial"));
    page.add(ElementFacts::visible("div", "Arial").with_box(0.0, 0.0));
    page.add(ElementFacts::visible("div", "Arial"));
    let page = Arc::new(page);
    let service = service_for(page.clone());

    let payload = scan_payload(&service).await;
    assert_eq!(payload.counts_by_font_and_tag["Arial"]["div"], 1);
    assert!(!payload.tag_by_font["Arial"].contains(&"style".to_string()));

    // The same exclusions hold when the pair is re-resolved.
    highlight(&service, "Arial", "div").await;
    assert_eq!(page.marked().len(), 1);
    highlight(&service, "Arial", "style").await;
    assert!(page.marked().is_empty());
}

#[tokio::test]
async fn two_matching_elements_mark_both_and_scroll_to_the_first() {
    let mut page = FixturePage::new().with_available_font("Arial");
    let first = page.add(ElementFacts::visible("div", "Arial"));
    let second = page.add(ElementFacts::visible("div", "Arial"));
    let page = Arc::new(page);
    let service = service_for(page.clone());

    let payload = scan_payload(&service).await;
    assert_eq!(payload.counts_by_font_and_tag["Arial"]["div"], 2);

    highlight(&service, "Arial", "div").await;
    assert_eq!(page.marked(), vec![first, second]);
    assert_eq!(page.scroll_targets(), vec![first]);
}

#[tokio::test]
async fn root_scope_query_skips_elements_with_inline_overrides() {
    let mut page = FixturePage::new().with_available_font("Arial");
    let body = page.add(ElementFacts::visible("body", "Arial"));
    let inheriting = page.add(ElementFacts::visible("div", "Arial"));
    let overriding =
        page.add(ElementFacts::visible("span", "Arial").with_inline_font("Arial"));
    let page = Arc::new(page);
    let service = service_for(page.clone());

    highlight(&service, "Arial", "body").await;
    let marked = page.marked();
    assert_eq!(marked, vec![body, inheriting]);
    assert!(!marked.contains(&overriding));

    // The overriding element is still reachable under its own tag.
    highlight(&service, "Arial", "span").await;
    assert_eq!(page.marked(), vec![overriding]);
}

#[tokio::test]
async fn stale_pair_still_acknowledges_and_clears_old_marks() {
    let mut page = FixturePage::new().with_available_font("Arial");
    page.add(ElementFacts::visible("div", "Arial"));
    let page = Arc::new(page);
    let service = service_for(page.clone());

    highlight(&service, "Arial", "div").await;
    assert_eq!(page.marked().len(), 1);

    // The pair no longer matches anything, as after a page change.
    highlight(&service, "Georgia", "div").await;
    assert!(page.marked().is_empty());
    assert_eq!(page.clear_count(), 2);
    assert_eq!(page.scroll_targets().len(), 1);
}

#[tokio::test]
async fn successive_highlights_replace_the_previous_marks() {
    let mut page = FixturePage::new().with_available_font("Arial");
    let div = page.add(ElementFacts::visible("div", "Arial"));
    let span = page.add(ElementFacts::visible("span", "Arial"));
    let page = Arc::new(page);
    let service = service_for(page.clone());

    highlight(&service, "Arial", "div").await;
    assert_eq!(page.marked(), vec![div]);

    highlight(&service, "Arial", "span").await;
    assert_eq!(page.marked(), vec![span]);
}

#[tokio::test]
async fn empty_page_reports_empty_mappings() {
    let page = Arc::new(FixturePage::new());
    let service = service_for(page.clone());

    let payload = scan_payload(&service).await;
    assert!(payload.tag_by_font.is_empty());
    assert!(payload.counts_by_font_and_tag.is_empty());
}

#[tokio::test]
async fn rescanning_an_unchanged_page_reproduces_the_report() {
    let mut page = FixturePage::new().with_available_font("Arial");
    page.add(ElementFacts::visible("div", "Arial"));
    page.add(ElementFacts::visible("div", "GhostFont"));
    page.add(ElementFacts::visible("p", "Arial").without_direct_text());
    let page = Arc::new(page);
    let service = service_for(page.clone());

    let first = scan_payload(&service).await;
    let second = scan_payload(&service).await;
    assert_eq!(first, second);
    assert_eq!(first.counts_by_font_and_tag["Arial"]["div"], 1);
}
