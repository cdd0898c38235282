//! # reservoir-pool
//!
//! Bounded async pool for opaque database connections with lifecycle
//! management.
//!
//! The pool does not know what a connection is. It manages opaque resources
//! produced by a caller-supplied [`ResourceFactory`] (open, validate, close),
//! bounds how many exist at once, hands them to concurrent tasks in strict
//! FIFO order under contention, and keeps the set healthy over time: idle
//! resources past their timeout are evicted, aging ones are re-validated, and
//! the pool backfills toward its minimum size.
//!
//! ## Features
//!
//! - Configurable min/max pool sizes with prefill and background backfill
//! - Acquisition timeout with FIFO fairness for blocked acquirers
//! - Checkout validation with bounded transparent replacement
//! - Idle-timeout eviction and periodic re-validation via a background sweep
//! - Release-on-drop handles: a forgotten `release` never leaks a slot
//! - Suspected-leak reporting for handles held past a deadline
//!
//! ## Example
//!
//! ```rust,ignore
//! use reservoir_pool::{Pool, PoolConfig};
//!
//! let pool = Pool::builder(factory)
//!     .min_size(2)
//!     .max_size(20)
//!     .idle_timeout(Duration::from_secs(300))
//!     .build()
//!     .await?;
//!
//! let mut handle = pool.acquire().await?;
//! handle.resource_mut()?.query("...").await?;
//! // Resource returns to the pool when the handle drops.
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod factory;
pub mod handle;
pub mod lifecycle;
pub mod metrics;
pub mod pool;

pub use config::PoolConfig;
pub use error::PoolError;
pub use factory::ResourceFactory;
pub use handle::PooledHandle;
pub use lifecycle::{ResourceMetadata, ResourceState};
pub use metrics::PoolMetrics;
pub use pool::{Pool, PoolBuilder, PoolStatus, ShutdownReport};
