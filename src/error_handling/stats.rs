//! Probe failure statistics.
//!
//! Thread-safe counters shared by every request handler.

use std::sync::atomic::{AtomicUsize, Ordering};
use strum::{EnumCount, IntoEnumIterator};

use super::types::ProbeKind;

/// Thread-safe counters for served reports and failed probes.
///
/// One failure slot per probe kind, indexed by the enum discriminant.
/// Shared across handlers behind an `Arc`.
pub struct ProbeStats {
    reports: AtomicUsize,
    failures: [AtomicUsize; ProbeKind::COUNT],
}

impl ProbeStats {
    pub fn new() -> Self {
        ProbeStats {
            reports: AtomicUsize::new(0),
            failures: std::array::from_fn(|_| AtomicUsize::new(0)),
        }
    }

    /// Records one assembled report.
    pub fn increment_reports(&self) {
        self.reports.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one failed probe.
    pub fn increment_failure(&self, kind: ProbeKind) {
        self.failures[kind as usize].fetch_add(1, Ordering::Relaxed);
    }

    pub fn reports(&self) -> usize {
        self.reports.load(Ordering::SeqCst)
    }

    pub fn failure_count(&self, kind: ProbeKind) -> usize {
        self.failures[kind as usize].load(Ordering::SeqCst)
    }

    /// Total failures across all probe kinds.
    pub fn total_failures(&self) -> usize {
        ProbeKind::iter().map(|k| self.failure_count(k)).sum()
    }
}

impl Default for ProbeStats {
    fn default() -> Self {
        Self::new()
    }
}
