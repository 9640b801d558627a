//! Handler metrics for observability
//!
//! Counters shared by a handler and every scope derived from it.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for handler observability
///
/// # Example
///
/// ```
/// use rust_attr_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_written();
/// metrics.record_failed();
///
/// assert_eq!(metrics.records_written(), 1);
/// assert_eq!(metrics.records_failed(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records whose line reached the sink
    records_written: AtomicU64,

    /// Records that failed to render or to write
    records_failed: AtomicU64,

    /// Attributes dropped by a hook
    attrs_suppressed: AtomicU64,

    /// Deferred actions executed after the attribute walk
    deferred_run: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            records_written: AtomicU64::new(0),
            records_failed: AtomicU64::new(0),
            attrs_suppressed: AtomicU64::new(0),
            deferred_run: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_written(&self) -> u64 {
        self.records_written.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn records_failed(&self) -> u64 {
        self.records_failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn attrs_suppressed(&self) -> u64 {
        self.attrs_suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn deferred_run(&self) -> u64 {
        self.deferred_run.load(Ordering::Relaxed)
    }

    /// Record a written line, returning the previous count
    #[inline]
    pub fn record_written(&self) -> u64 {
        self.records_written.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a failed record, returning the previous count
    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.records_failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn add_suppressed(&self, count: u64) {
        if count > 0 {
            self.attrs_suppressed.fetch_add(count, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn add_deferred(&self, count: u64) {
        if count > 0 {
            self.deferred_run.fetch_add(count, Ordering::Relaxed);
        }
    }

    /// Failure rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if no records have been handled.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.records_failed() as f64;
        let total = self.records_written() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            records_written: AtomicU64::new(self.records_written()),
            records_failed: AtomicU64::new(self.records_failed()),
            attrs_suppressed: AtomicU64::new(self.attrs_suppressed()),
            deferred_run: AtomicU64::new(self.deferred_run()),
        }
    }
}
