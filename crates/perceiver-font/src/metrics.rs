use std::sync::atomic::{AtomicU64, Ordering};

use lazy_static::lazy_static;
use prometheus::{core::Collector, IntCounter, Registry};
use tracing::error;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PerceiverMetricsSnapshot {
    pub scans: u64,
    pub elements_scanned: u64,
    pub elements_reported: u64,
    pub highlight_requests: u64,
    pub highlight_matches: u64,
}

static SCANS: AtomicU64 = AtomicU64::new(0);
static ELEMENTS_SCANNED: AtomicU64 = AtomicU64::new(0);
static ELEMENTS_REPORTED: AtomicU64 = AtomicU64::new(0);
static HIGHLIGHT_REQUESTS: AtomicU64 = AtomicU64::new(0);
static HIGHLIGHT_MATCHES: AtomicU64 = AtomicU64::new(0);

lazy_static! {
    static ref SCANS_TOTAL: IntCounter = IntCounter::new(
        "fontscope_scans_total",
        "Total attribution scans executed"
    )
    .unwrap();
    static ref ELEMENTS_SCANNED_TOTAL: IntCounter = IntCounter::new(
        "fontscope_scan_elements_total",
        "Total elements enumerated by attribution scans"
    )
    .unwrap();
    static ref ELEMENTS_REPORTED_TOTAL: IntCounter = IntCounter::new(
        "fontscope_scan_reported_elements_total",
        "Total elements that contributed to an attribution report"
    )
    .unwrap();
    static ref HIGHLIGHT_REQUESTS_TOTAL: IntCounter = IntCounter::new(
        "fontscope_highlight_requests_total",
        "Total highlight queries resolved"
    )
    .unwrap();
    static ref HIGHLIGHT_MATCHES_TOTAL: IntCounter = IntCounter::new(
        "fontscope_highlight_matches_total",
        "Total elements matched by highlight queries"
    )
    .unwrap();
}

fn register<C>(registry: &Registry, collector: C)
where
    C: Collector + Clone + Send + Sync + 'static,
{
    if let Err(err) = registry.register(Box::new(collector.clone())) {
        if !matches!(err, prometheus::Error::AlreadyReg) {
            error!(?err, "failed to register perceiver metric");
        }
    }
}

pub fn register_metrics(registry: &Registry) {
    register(registry, SCANS_TOTAL.clone());
    register(registry, ELEMENTS_SCANNED_TOTAL.clone());
    register(registry, ELEMENTS_REPORTED_TOTAL.clone());
    register(registry, HIGHLIGHT_REQUESTS_TOTAL.clone());
    register(registry, HIGHLIGHT_MATCHES_TOTAL.clone());
}

pub fn record_scan() {
    SCANS.fetch_add(1, Ordering::Relaxed);
    SCANS_TOTAL.inc();
}

pub fn record_elements_scanned(count: u64) {
    ELEMENTS_SCANNED.fetch_add(count, Ordering::Relaxed);
    ELEMENTS_SCANNED_TOTAL.inc_by(count);
}

pub fn record_elements_reported(count: u64) {
    ELEMENTS_REPORTED.fetch_add(count, Ordering::Relaxed);
    ELEMENTS_REPORTED_TOTAL.inc_by(count);
}

pub fn record_highlight_request() {
    HIGHLIGHT_REQUESTS.fetch_add(1, Ordering::Relaxed);
    HIGHLIGHT_REQUESTS_TOTAL.inc();
}

pub fn record_highlight_matches(count: u64) {
    HIGHLIGHT_MATCHES.fetch_add(count, Ordering::Relaxed);
    HIGHLIGHT_MATCHES_TOTAL.inc_by(count);
}

pub fn snapshot() -> PerceiverMetricsSnapshot {
    PerceiverMetricsSnapshot {
        scans: SCANS.load(Ordering::Relaxed),
        elements_scanned: ELEMENTS_SCANNED.load(Ordering::Relaxed),
        elements_reported: ELEMENTS_REPORTED.load(Ordering::Relaxed),
        highlight_requests: HIGHLIGHT_REQUESTS.load(Ordering::Relaxed),
        highlight_matches: HIGHLIGHT_MATCHES.load(Ordering::Relaxed),
    }
}

pub fn reset() {
    SCANS.store(0, Ordering::Relaxed);
    ELEMENTS_SCANNED.store(0, Ordering::Relaxed);
    ELEMENTS_REPORTED.store(0, Ordering::Relaxed);
    HIGHLIGHT_REQUESTS.store(0, Ordering::Relaxed);
    HIGHLIGHT_MATCHES.store(0, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Delta-based so parallel tests recording metrics cannot interfere.
    #[test]
    fn records_scan_and_highlight_counters() {
        let before = snapshot();
        record_scan();
        record_elements_scanned(12);
        record_elements_reported(7);
        record_highlight_request();
        record_highlight_matches(2);
        let after = snapshot();
        assert!(after.scans >= before.scans + 1);
        assert!(after.elements_scanned >= before.elements_scanned + 12);
        assert!(after.elements_reported >= before.elements_reported + 7);
        assert!(after.highlight_requests >= before.highlight_requests + 1);
        assert!(after.highlight_matches >= before.highlight_matches + 2);
    }
}
