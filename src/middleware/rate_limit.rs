//! Admission control: a process-wide semaphore bounding concurrent analysis
//! submissions, with counters surfaced by the health endpoint.

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Semaphore;
use tracing::info;

static TOTAL_SUBMISSIONS: AtomicU64 = AtomicU64::new(0);
static REJECTED_SUBMISSIONS: AtomicU64 = AtomicU64::new(0);

pub static ANALYSIS_SEMAPHORE: Lazy<Semaphore> = Lazy::new(|| {
    let max_analyses = std::env::var("MAX_CONCURRENT_ANALYSES")
        .unwrap_or_else(|_| "8".to_string())
        .parse::<usize>()
        .unwrap_or(8);

    info!(
        max_concurrent_analyses = max_analyses,
        "Initializing analysis semaphore"
    );
    Semaphore::new(max_analyses)
});

pub fn record_submission() {
    TOTAL_SUBMISSIONS.fetch_add(1, Ordering::Relaxed);
}

pub fn record_rejection() {
    REJECTED_SUBMISSIONS.fetch_add(1, Ordering::Relaxed);
}

/// (total, rejected, available permits) for the health endpoint.
pub fn get_admission_metrics() -> (u64, u64, usize) {
    let total = TOTAL_SUBMISSIONS.load(Ordering::Relaxed);
    let rejected = REJECTED_SUBMISSIONS.load(Ordering::Relaxed);
    let available = ANALYSIS_SEMAPHORE.available_permits();
    (total, rejected, available)
}
