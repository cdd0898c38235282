//! Pool error types.

use thiserror::Error;

/// Errors that can occur during pool operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PoolError {
    /// Failed to open a backend resource.
    ///
    /// Also returned from `acquire` when every pooled resource failed its
    /// checkout validation and the bounded replacement retries were exhausted.
    #[error("failed to open backend resource: {0}")]
    ConnectFailed(String),

    /// Failed to acquire a resource within the timeout.
    #[error("resource acquisition timed out after {0:?}")]
    AcquireTimeout(std::time::Duration),

    /// Pool is closed.
    #[error("pool is closed")]
    PoolClosed,

    /// The handle was released more than once.
    #[error("handle was already released")]
    DoubleRelease,

    /// Operation attempted on a handle after it was released or detached.
    #[error("handle no longer owns a resource")]
    HandleClosed,

    /// Pool configuration error.
    #[error("pool configuration error: {0}")]
    Configuration(String),
}
