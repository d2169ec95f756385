//! In-process counters for the address book server.
//!
//! Counters are shared atomics, so a cloned tracker reports into the same
//! totals. Each event is also emitted as a tracing record.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Metrics tracker shared by the tool handlers.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    search_queries_total: Arc<AtomicU64>,
    search_results_total: Arc<AtomicU64>,
    store_writes_total: Arc<AtomicU64>,
    store_errors_total: Arc<AtomicU64>,
    contacts_imported_total: Arc<AtomicU64>,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            search_queries_total: Arc::new(AtomicU64::new(0)),
            search_results_total: Arc::new(AtomicU64::new(0)),
            store_writes_total: Arc::new(AtomicU64::new(0)),
            store_errors_total: Arc::new(AtomicU64::new(0)),
            contacts_imported_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Track a search or suggestion query.
    pub fn track_search_query(&self, duration_ms: u128, result_count: usize) {
        self.search_queries_total.fetch_add(1, Ordering::Relaxed);
        self.search_results_total
            .fetch_add(result_count as u64, Ordering::Relaxed);

        tracing::info!(
            duration_ms = duration_ms,
            result_count = result_count,
            "Search query completed"
        );
    }

    /// Track a write to the contact or tag store.
    pub fn track_store_write(&self, operation: &str, success: bool) {
        self.store_writes_total.fetch_add(1, Ordering::Relaxed);

        if success {
            tracing::debug!(operation = %operation, "Store write completed");
        } else {
            self.store_errors_total.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(operation = %operation, "Store write failed");
        }
    }

    /// Track contacts added by an import.
    pub fn track_import(&self, format: &str, imported: usize) {
        self.contacts_imported_total
            .fetch_add(imported as u64, Ordering::Relaxed);

        tracing::info!(format = %format, imported = imported, "Import completed");
    }

    /// Get the total number of search queries.
    pub fn search_queries_total(&self) -> u64 {
        self.search_queries_total.load(Ordering::Relaxed)
    }

    /// Get the total number of results returned across all searches.
    pub fn search_results_total(&self) -> u64 {
        self.search_results_total.load(Ordering::Relaxed)
    }

    /// Get the total number of store writes.
    pub fn store_writes_total(&self) -> u64 {
        self.store_writes_total.load(Ordering::Relaxed)
    }

    /// Get the total number of failed store writes.
    pub fn store_errors_total(&self) -> u64 {
        self.store_errors_total.load(Ordering::Relaxed)
    }

    /// Get the total number of imported contacts.
    pub fn contacts_imported_total(&self) -> u64 {
        self.contacts_imported_total.load(Ordering::Relaxed)
    }

    /// Average results per search (0.0 when nothing was searched).
    pub fn average_results(&self) -> f64 {
        let queries = self.search_queries_total() as f64;
        if queries == 0.0 {
            0.0
        } else {
            self.search_results_total() as f64 / queries
        }
    }

    /// Get the store write error rate (0.0 to 1.0).
    pub fn store_error_rate(&self) -> f64 {
        let errors = self.store_errors_total() as f64;
        let total = self.store_writes_total() as f64;

        if total == 0.0 {
            0.0
        } else {
            errors / total
        }
    }

    /// Print a summary of all metrics.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Search Queries: {}\n\
             Average Results: {:.2}\n\
             Store Writes: {}\n\
             Store Errors: {} ({:.2}% error rate)\n\
             Contacts Imported: {}",
            self.search_queries_total(),
            self.average_results(),
            self.store_writes_total(),
            self.store_errors_total(),
            self.store_error_rate() * 100.0,
            self.contacts_imported_total(),
        )
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Finish the timer and return the elapsed time in milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.start.elapsed().as_millis();

        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_tracker_creation() {
        let tracker = MetricsTracker::new();
        assert_eq!(tracker.search_queries_total(), 0);
        assert_eq!(tracker.store_writes_total(), 0);
        assert_eq!(tracker.contacts_imported_total(), 0);
        assert_eq!(tracker.average_results(), 0.0);
    }

    #[test]
    fn test_track_search_query() {
        let tracker = MetricsTracker::new();

        tracker.track_search_query(3, 4);
        tracker.track_search_query(1, 0);
        assert_eq!(tracker.search_queries_total(), 2);
        assert_eq!(tracker.search_results_total(), 4);
        assert!((tracker.average_results() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_store_error_rate() {
        let tracker = MetricsTracker::new();

        tracker.track_store_write("add_contact", true);
        tracker.track_store_write("add_contact", true);
        tracker.track_store_write("delete_contact", false);

        assert_eq!(tracker.store_writes_total(), 3);
        assert!((tracker.store_error_rate() - 0.3333).abs() < 0.001);
    }

    #[test]
    fn test_clones_share_counters() {
        let tracker = MetricsTracker::new();
        let clone = tracker.clone();

        clone.track_import("csv", 7);
        assert_eq!(tracker.contacts_imported_total(), 7);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::new("test_operation");
        std::thread::sleep(std::time::Duration::from_millis(10));
        assert!(timer.finish() >= 10);
    }

    #[test]
    fn test_summary() {
        let tracker = MetricsTracker::new();
        tracker.track_search_query(1, 2);
        tracker.track_import("json", 3);

        let summary = tracker.summary();
        assert!(summary.contains("Search Queries: 1"));
        assert!(summary.contains("Contacts Imported: 3"));
    }
}
