//! Pool metrics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Lifetime counters kept on the shared pool state.
#[derive(Debug, Default)]
pub(crate) struct MetricsRecorder {
    pub(crate) resources_created: AtomicU64,
    pub(crate) resources_closed: AtomicU64,
    pub(crate) checkouts_successful: AtomicU64,
    pub(crate) checkouts_failed: AtomicU64,
    pub(crate) checkout_timeouts: AtomicU64,
    pub(crate) validations_performed: AtomicU64,
    pub(crate) validations_failed: AtomicU64,
    pub(crate) idle_evictions: AtomicU64,
    pub(crate) double_releases: AtomicU64,
    pub(crate) leaks_suspected: AtomicU64,
}

impl MetricsRecorder {
    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> PoolMetrics {
        PoolMetrics {
            resources_created: self.resources_created.load(Ordering::Relaxed),
            resources_closed: self.resources_closed.load(Ordering::Relaxed),
            checkouts_successful: self.checkouts_successful.load(Ordering::Relaxed),
            checkouts_failed: self.checkouts_failed.load(Ordering::Relaxed),
            checkout_timeouts: self.checkout_timeouts.load(Ordering::Relaxed),
            validations_performed: self.validations_performed.load(Ordering::Relaxed),
            validations_failed: self.validations_failed.load(Ordering::Relaxed),
            idle_evictions: self.idle_evictions.load(Ordering::Relaxed),
            double_releases: self.double_releases.load(Ordering::Relaxed),
            leaks_suspected: self.leaks_suspected.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of pool activity, returned by `Pool::metrics()`.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct PoolMetrics {
    /// Resources opened over the pool's lifetime.
    pub resources_created: u64,
    /// Resources physically closed over the pool's lifetime.
    pub resources_closed: u64,
    /// Checkouts that handed a resource to a caller.
    pub checkouts_successful: u64,
    /// Checkouts that failed for any reason (includes timeouts).
    pub checkouts_failed: u64,
    /// Checkouts that failed specifically because the wait timed out.
    pub checkout_timeouts: u64,
    /// Validation probes performed (checkout, release and sweep).
    pub validations_performed: u64,
    /// Validation probes that reported a dead resource.
    pub validations_failed: u64,
    /// Idle resources destroyed by the sweep for exceeding the idle timeout.
    pub idle_evictions: u64,
    /// Release calls on an already released handle.
    pub double_releases: u64,
    /// Handles reported as held past the configured leak deadline.
    pub leaks_suspected: u64,
}

impl PoolMetrics {
    /// Fraction of checkouts that succeeded, in `0.0..=1.0`.
    ///
    /// Returns `1.0` when no checkout has been attempted yet.
    #[must_use]
    pub fn checkout_success_rate(&self) -> f64 {
        let attempts = self.checkouts_successful + self.checkouts_failed;
        if attempts == 0 {
            return 1.0;
        }
        self.checkouts_successful as f64 / attempts as f64
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let recorder = MetricsRecorder::default();
        MetricsRecorder::incr(&recorder.resources_created);
        MetricsRecorder::incr(&recorder.checkouts_successful);
        MetricsRecorder::incr(&recorder.checkouts_successful);

        let snap = recorder.snapshot();
        assert_eq!(snap.resources_created, 1);
        assert_eq!(snap.checkouts_successful, 2);
        assert_eq!(snap.checkouts_failed, 0);
    }

    #[test]
    fn test_success_rate_no_attempts() {
        let snap = MetricsRecorder::default().snapshot();
        assert!((snap.checkout_success_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_success_rate_mixed() {
        let recorder = MetricsRecorder::default();
        for _ in 0..9 {
            MetricsRecorder::incr(&recorder.checkouts_successful);
        }
        MetricsRecorder::incr(&recorder.checkouts_failed);

        let snap = recorder.snapshot();
        assert!((snap.checkout_success_rate() - 0.9).abs() < 0.001);
    }
}
