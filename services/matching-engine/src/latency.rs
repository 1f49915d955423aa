//! Per-order latency meter
//!
//! Lock-free aggregate of order processing durations, updated once per
//! placement by the matching worker and readable from any thread. Each
//! field is individually coherent; a snapshot is not atomic across fields,
//! which is fine for a human-facing stats dump.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Running latency counters: count, sum, min, max (nanoseconds).
#[derive(Debug)]
pub struct LatencyStats {
    total_orders: AtomicU64,
    total_latency_ns: AtomicU64,
    min_latency_ns: AtomicU64,
    max_latency_ns: AtomicU64,
}

impl LatencyStats {
    /// Create a meter with no samples: min starts at the maximum value
    pub fn new() -> Self {
        Self {
            total_orders: AtomicU64::new(0),
            total_latency_ns: AtomicU64::new(0),
            min_latency_ns: AtomicU64::new(u64::MAX),
            max_latency_ns: AtomicU64::new(0),
        }
    }

    /// Record one order's processing duration
    pub fn record(&self, elapsed: Duration) {
        let ns = elapsed.as_nanos() as u64;
        self.total_orders.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ns.fetch_add(ns, Ordering::Relaxed);
        update_min(&self.min_latency_ns, ns);
        update_max(&self.max_latency_ns, ns);
    }

    /// Read the current counters, field by field
    pub fn snapshot(&self) -> LatencySnapshot {
        LatencySnapshot {
            total_orders: self.total_orders.load(Ordering::Relaxed),
            total_latency_ns: self.total_latency_ns.load(Ordering::Relaxed),
            min_latency_ns: self.min_latency_ns.load(Ordering::Relaxed),
            max_latency_ns: self.max_latency_ns.load(Ordering::Relaxed),
        }
    }
}

impl Default for LatencyStats {
    fn default() -> Self {
        Self::new()
    }
}

fn update_min(cell: &AtomicU64, sample: u64) {
    let mut current = cell.load(Ordering::Relaxed);
    while sample < current {
        match cell.compare_exchange_weak(current, sample, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => break,
            Err(observed) => current = observed,
        }
    }
}

fn update_max(cell: &AtomicU64, sample: u64) {
    let mut current = cell.load(Ordering::Relaxed);
    while sample > current {
        match cell.compare_exchange_weak(current, sample, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => break,
            Err(observed) => current = observed,
        }
    }
}

/// Point-in-time read of the meter with microsecond derived views.
#[derive(Debug, Clone, Copy)]
pub struct LatencySnapshot {
    pub total_orders: u64,
    pub total_latency_ns: u64,
    pub min_latency_ns: u64,
    pub max_latency_ns: u64,
}

impl LatencySnapshot {
    /// Average processing time in microseconds, 0 with no samples
    pub fn avg_us(&self) -> f64 {
        if self.total_orders == 0 {
            return 0.0;
        }
        (self.total_latency_ns as f64 / 1_000.0) / self.total_orders as f64
    }

    /// Fastest order in microseconds, 0 with no samples
    pub fn min_us(&self) -> f64 {
        if self.total_orders == 0 {
            return 0.0;
        }
        self.min_latency_ns as f64 / 1_000.0
    }

    /// Slowest order in microseconds, 0 with no samples
    pub fn max_us(&self) -> f64 {
        if self.total_orders == 0 {
            return 0.0;
        }
        self.max_latency_ns as f64 / 1_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_empty_meter_reads_zero() {
        let stats = LatencyStats::new();
        let snap = stats.snapshot();

        assert_eq!(snap.total_orders, 0);
        assert_eq!(snap.avg_us(), 0.0);
        assert_eq!(snap.min_us(), 0.0);
        assert_eq!(snap.max_us(), 0.0);
    }

    #[test]
    fn test_record_updates_all_fields() {
        let stats = LatencyStats::new();
        stats.record(Duration::from_micros(5));
        stats.record(Duration::from_micros(15));
        stats.record(Duration::from_micros(10));

        let snap = stats.snapshot();
        assert_eq!(snap.total_orders, 3);
        assert_eq!(snap.total_latency_ns, 30_000);
        assert_eq!(snap.min_latency_ns, 5_000);
        assert_eq!(snap.max_latency_ns, 15_000);
        assert_eq!(snap.avg_us(), 10.0);
        assert_eq!(snap.min_us(), 5.0);
        assert_eq!(snap.max_us(), 15.0);
    }

    #[test]
    fn test_concurrent_recording() {
        let stats = Arc::new(LatencyStats::new());
        let handles: Vec<_> = (1..=4u64)
            .map(|scale| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || {
                    for i in 1..=100u64 {
                        stats.record(Duration::from_nanos(scale * i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = stats.snapshot();
        assert_eq!(snap.total_orders, 400);
        assert_eq!(snap.min_latency_ns, 1);
        assert_eq!(snap.max_latency_ns, 400);
    }
}
