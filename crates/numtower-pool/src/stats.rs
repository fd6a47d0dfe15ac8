//! Pool usage counters

use std::sync::atomic::{AtomicUsize, Ordering};

/// Live counters for a pool
#[derive(Debug, Default)]
pub struct PoolStats {
    /// Successful acquisitions
    pub acquisitions: AtomicUsize,

    /// Releases accepted back into the free list
    pub releases: AtomicUsize,

    /// Number of times the pool grew
    pub growth_events: AtomicUsize,

    /// Instances currently handed out
    pub outstanding: AtomicUsize,

    /// Highest value `outstanding` has reached
    pub peak_outstanding: AtomicUsize,

    /// Instances created so far
    pub capacity: AtomicUsize,
}

/// Point-in-time copy of [`PoolStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStatsSnapshot {
    pub acquisitions: usize,
    pub releases: usize,
    pub growth_events: usize,
    pub outstanding: usize,
    pub peak_outstanding: usize,
    pub capacity: usize,
}

impl PoolStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_acquire(&self, outstanding: usize, counted: bool) {
        if counted {
            self.acquisitions.fetch_add(1, Ordering::Relaxed);
        }
        self.outstanding.store(outstanding, Ordering::Relaxed);
        self.peak_outstanding
            .fetch_max(outstanding, Ordering::Relaxed);
    }

    pub(crate) fn record_release(&self, outstanding: usize, counted: bool) {
        if counted {
            self.releases.fetch_add(1, Ordering::Relaxed);
        }
        self.outstanding.store(outstanding, Ordering::Relaxed);
    }

    pub(crate) fn record_growth(&self, capacity: usize) {
        self.growth_events.fetch_add(1, Ordering::Relaxed);
        self.capacity.store(capacity, Ordering::Relaxed);
    }

    pub(crate) fn record_capacity(&self, capacity: usize) {
        self.capacity.store(capacity, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> PoolStatsSnapshot {
        PoolStatsSnapshot {
            acquisitions: self.acquisitions.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            growth_events: self.growth_events.load(Ordering::Relaxed),
            outstanding: self.outstanding.load(Ordering::Relaxed),
            peak_outstanding: self.peak_outstanding.load(Ordering::Relaxed),
            capacity: self.capacity.load(Ordering::Relaxed),
        }
    }

    /// Clear the cumulative counters; gauges are left alone
    pub fn reset(&self) {
        self.acquisitions.store(0, Ordering::Relaxed);
        self.releases.store(0, Ordering::Relaxed);
        self.growth_events.store(0, Ordering::Relaxed);
        self.peak_outstanding.store(
            self.outstanding.load(Ordering::Relaxed),
            Ordering::Relaxed,
        );
    }
}

impl PoolStatsSnapshot {
    /// Free instances available without growing
    pub fn available(&self) -> usize {
        self.capacity.saturating_sub(self.outstanding)
    }

    pub fn summary_report(&self) -> String {
        format!(
            "Pool: {} acquired, {} released, {} outstanding (peak {}), capacity {} after {} growth steps",
            self.acquisitions,
            self.releases,
            self.outstanding,
            self.peak_outstanding,
            self.capacity,
            self.growth_events
        )
    }
}
