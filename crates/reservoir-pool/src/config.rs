//! Pool configuration.

use std::time::Duration;

/// Configuration for the resource pool.
///
/// This struct is marked `#[non_exhaustive]` to allow adding new fields
/// in future minor versions without breaking changes. Use the builder
/// pattern methods or [`Default::default()`] to construct instances.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct PoolConfig {
    /// Minimum number of resources to maintain.
    ///
    /// The pool prefills to this size at startup and the eviction sweep
    /// backfills toward it whenever resources are destroyed.
    pub min_size: u32,

    /// Maximum number of resources allowed, counting idle, checked-out and
    /// currently-opening resources.
    pub max_size: u32,

    /// Default time `acquire` waits for capacity before timing out.
    pub acquire_timeout: Duration,

    /// Time a resource can sit idle before the sweep destroys it
    /// (never below `min_size`).
    pub idle_timeout: Duration,

    /// How long a validation result stays fresh. Idle resources whose last
    /// validation is older than this are re-validated by the sweep, and on
    /// checkout when `test_on_acquire` is set.
    pub validation_interval: Duration,

    /// Whether to validate a resource at checkout when its validation is due.
    pub test_on_acquire: bool,

    /// How many times `acquire` transparently replaces a pooled resource that
    /// fails checkout validation before surfacing an error.
    pub acquire_retries: u32,

    /// Interval between eviction sweep runs.
    pub sweep_interval: Duration,

    /// If set, handles held longer than this are reported as suspected leaks
    /// by the sweep. Log-only; the resource is never revoked.
    pub leak_deadline: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_size: 1,
            max_size: 10,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            validation_interval: Duration::from_secs(30),
            test_on_acquire: true,
            acquire_retries: 3,
            sweep_interval: Duration::from_secs(5),
            leak_deadline: None,
        }
    }
}

impl PoolConfig {
    /// Create a new pool configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum number of resources.
    #[must_use]
    pub fn min_size(mut self, count: u32) -> Self {
        self.min_size = count;
        self
    }

    /// Set the maximum number of resources.
    #[must_use]
    pub fn max_size(mut self, count: u32) -> Self {
        self.max_size = count;
        self
    }

    /// Set the default acquisition timeout.
    #[must_use]
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Set the idle resource timeout.
    #[must_use]
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the validation interval.
    #[must_use]
    pub fn validation_interval(mut self, interval: Duration) -> Self {
        self.validation_interval = interval;
        self
    }

    /// Enable or disable validating resources at checkout.
    #[must_use]
    pub fn test_on_acquire(mut self, enabled: bool) -> Self {
        self.test_on_acquire = enabled;
        self
    }

    /// Set how many failed-validation resources `acquire` replaces before
    /// giving up.
    #[must_use]
    pub fn acquire_retries(mut self, retries: u32) -> Self {
        self.acquire_retries = retries;
        self
    }

    /// Set the eviction sweep interval.
    #[must_use]
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Set the suspected-leak reporting deadline.
    #[must_use]
    pub fn leak_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.leak_deadline = deadline;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), crate::error::PoolError> {
        if self.max_size == 0 {
            return Err(crate::error::PoolError::Configuration(
                "max_size must be greater than 0".into(),
            ));
        }
        if self.min_size > self.max_size {
            return Err(crate::error::PoolError::Configuration(
                "min_size cannot be greater than max_size".into(),
            ));
        }
        Ok(())
    }
}
