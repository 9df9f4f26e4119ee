//! Bridge metrics for observability
//!
//! Counters for emitted events, how their locations were obtained and what
//! happened at the transport.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for bridge observability
///
/// # Example
///
/// ```
/// use rust_log_bridge::BridgeMetrics;
///
/// let metrics = BridgeMetrics::new();
///
/// metrics.record_emitted();
/// metrics.record_delivered();
///
/// assert_eq!(metrics.emitted(), 1);
/// assert_eq!(metrics.delivered(), 1);
/// ```
#[derive(Debug)]
pub struct BridgeMetrics {
    /// Log calls accepted by a logger
    emitted: AtomicU64,

    /// Events a transport delivered
    delivered: AtomicU64,

    /// Events a latched transport did not attempt
    skipped: AtomicU64,

    /// Delivery attempts that failed
    failed: AtomicU64,

    /// Calls where a caller frame was found
    located: AtomicU64,

    /// Calls sent without location
    unlocated: AtomicU64,

    /// Locations translated through a source map
    source_mapped: AtomicU64,
}

impl BridgeMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            located: AtomicU64::new(0),
            unlocated: AtomicU64::new(0),
            source_mapped: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn located(&self) -> u64 {
        self.located.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn unlocated(&self) -> u64 {
        self.unlocated.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn source_mapped(&self) -> u64 {
        self.source_mapped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_skipped(&self) -> u64 {
        self.skipped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_located(&self) -> u64 {
        self.located.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_unlocated(&self) -> u64 {
        self.unlocated.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_source_mapped(&self) -> u64 {
        self.source_mapped.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of delivery attempts that failed or were skipped, as a percentage.
    ///
    /// Returns 0.0 if nothing reached a transport.
    pub fn loss_rate(&self) -> f64 {
        let lost = (self.failed() + self.skipped()) as f64;
        let total = self.delivered() as f64 + lost;
        if total == 0.0 {
            0.0
        } else {
            (lost / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.skipped.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.located.store(0, Ordering::Relaxed);
        self.unlocated.store(0, Ordering::Relaxed);
        self.source_mapped.store(0, Ordering::Relaxed);
    }
}

impl Default for BridgeMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BridgeMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            emitted: AtomicU64::new(self.emitted()),
            delivered: AtomicU64::new(self.delivered()),
            skipped: AtomicU64::new(self.skipped()),
            failed: AtomicU64::new(self.failed()),
            located: AtomicU64::new(self.located()),
            unlocated: AtomicU64::new(self.unlocated()),
            source_mapped: AtomicU64::new(self.source_mapped()),
        }
    }
}
