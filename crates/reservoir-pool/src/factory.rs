//! The boundary to the backing database.
//!
//! The pool never speaks a wire protocol itself. Everything it knows about a
//! backend connection goes through a [`ResourceFactory`]: open a resource,
//! probe its liveness, close it. The resource type is opaque to the pool.

use crate::error::PoolError;

/// Creates, validates and destroys the opaque resources managed by the pool.
///
/// `#[async_trait]` keeps the returned futures `Send`, so the eviction sweep
/// can run factory calls from a spawned background task.
///
/// # Contract
///
/// - `create` fails with [`PoolError::ConnectFailed`] on network or
///   authentication errors. The pool does not retry internally; the next
///   `acquire` tries again.
/// - `validate` is a cheap liveness probe (a no-op round trip). It must not
///   error: any failure is reported as `false`.
/// - `destroy` is best-effort. The resource is being discarded regardless, so
///   implementations log their own failures rather than propagate them.
#[async_trait::async_trait]
pub trait ResourceFactory: Send + Sync {
    /// The opaque resource handed out by the pool.
    type Resource: Send + 'static;

    /// Open a physical connection to the backend.
    async fn create(&self) -> Result<Self::Resource, PoolError>;

    /// Probe whether the resource is still live.
    async fn validate(&self, resource: &mut Self::Resource) -> bool;

    /// Physically close the resource.
    async fn destroy(&self, resource: Self::Resource);
}
