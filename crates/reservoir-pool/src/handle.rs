//! The handle issued per acquisition.
//!
//! A [`PooledHandle`] is a thin proxy around exactly one resource. Domain
//! operations go straight through [`PooledHandle::resource_mut`]; the one
//! redefined operation is close: releasing (or dropping) the handle returns
//! the resource to the pool instead of destroying it.

use std::sync::Arc;

use tokio::sync::OwnedSemaphorePermit;

use crate::error::PoolError;
use crate::factory::ResourceFactory;
use crate::lifecycle::ResourceMetadata;
use crate::metrics::MetricsRecorder;
use crate::pool::{Entry, PoolInner, spawn_destroy};

/// A resource checked out from the pool.
///
/// Dropping the handle returns the resource, so release happens on every exit
/// path of the holding task, including panics and early returns. Call
/// [`release`](Self::release) instead when the pool should health-check a
/// [suspect](Self::mark_suspect) resource inline, or when release errors
/// matter.
///
/// After a release the handle is inert: every accessor fails with
/// [`PoolError::HandleClosed`] and a second release with
/// [`PoolError::DoubleRelease`].
pub struct PooledHandle<F: ResourceFactory + 'static> {
    inner: Arc<PoolInner<F>>,
    entry: Option<Entry<F::Resource>>,
    permit: Option<OwnedSemaphorePermit>,
    suspect: bool,
}

impl<F: ResourceFactory + 'static> PooledHandle<F> {
    pub(crate) fn new(
        inner: Arc<PoolInner<F>>,
        entry: Entry<F::Resource>,
        permit: OwnedSemaphorePermit,
    ) -> Self {
        Self {
            inner,
            entry: Some(entry),
            permit: Some(permit),
            suspect: false,
        }
    }

    /// Borrow the underlying resource.
    pub fn resource(&self) -> Result<&F::Resource, PoolError> {
        self.entry
            .as_ref()
            .map(|e| &e.resource)
            .ok_or(PoolError::HandleClosed)
    }

    /// Mutably borrow the underlying resource.
    pub fn resource_mut(&mut self) -> Result<&mut F::Resource, PoolError> {
        self.entry
            .as_mut()
            .map(|e| &mut e.resource)
            .ok_or(PoolError::HandleClosed)
    }

    /// The pool's metadata for this resource.
    pub fn metadata(&self) -> Result<&ResourceMetadata, PoolError> {
        self.entry
            .as_ref()
            .map(|e| &e.meta)
            .ok_or(PoolError::HandleClosed)
    }

    /// Flag the resource as possibly broken (a domain operation failed
    /// mid-use). A suspect resource is health-checked on release and
    /// destroyed instead of pooled when the check fails.
    pub fn mark_suspect(&mut self) {
        self.suspect = true;
    }

    /// Check if the handle has already given its resource back.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.entry.is_none()
    }

    /// Return the resource to the pool.
    ///
    /// Succeeds from the caller's perspective even when the pool internally
    /// destroys the resource (suspect check failed, or the pool has closed).
    /// A second call fails with [`PoolError::DoubleRelease`]; pool state is
    /// not touched.
    pub async fn release(&mut self) -> Result<(), PoolError> {
        let Some(mut entry) = self.entry.take() else {
            MetricsRecorder::incr(&self.inner.metrics.double_releases);
            tracing::warn!("release called on an already released handle");
            return Err(PoolError::DoubleRelease);
        };
        let permit = self.permit.take();
        let inner = Arc::clone(&self.inner);

        if self.suspect && !inner.state.lock().closed {
            // Lightweight post-use check; a broken resource is destroyed here
            // and the sweep backfills toward min_size.
            MetricsRecorder::incr(&inner.metrics.validations_performed);
            if inner.factory.validate(&mut entry.resource).await {
                entry.meta.mark_validated();
                self.suspect = false;
            } else {
                MetricsRecorder::incr(&inner.metrics.validations_failed);
                tracing::warn!(
                    resource = entry.meta.id,
                    "suspect resource failed validation on release, discarding"
                );
                inner.forget_in_use(entry.meta.id);
                inner.destroy_entry(entry).await;
                drop(permit);
                inner.drain.notify_waiters();
                return Ok(());
            }
        }

        // On a closed pool, checkin hands the entry back when no close call
        // is left to destroy it; this path can await, so destroy inline.
        if let Some(permit) = permit {
            if let Some(entry) = inner.checkin(entry, permit, false) {
                inner.destroy_entry(entry).await;
            }
        }
        Ok(())
    }

    /// Remove the resource from pool accounting and hand it to the caller.
    ///
    /// The freed slot becomes available to other acquirers; closing the
    /// detached resource is the caller's responsibility from here on.
    pub fn detach(mut self) -> Result<F::Resource, PoolError> {
        let entry = self.entry.take().ok_or(PoolError::HandleClosed)?;
        let permit = self.permit.take();
        tracing::debug!(resource = entry.meta.id, "detaching resource from pool");
        self.inner.forget_in_use(entry.meta.id);
        drop(permit);
        self.inner.drain.notify_waiters();
        Ok(entry.resource)
    }
}

impl<F: ResourceFactory + 'static> Drop for PooledHandle<F> {
    fn drop(&mut self) {
        if let (Some(entry), Some(permit)) = (self.entry.take(), self.permit.take()) {
            tracing::trace!(
                resource = entry.meta.id,
                suspect = self.suspect,
                "returning resource to pool on drop"
            );
            // Drop cannot await, so a suspect resource is condemned here and
            // destroyed by the sweep rather than health-checked inline. An
            // entry handed back on a closed pool goes to a detached destroy
            // task for the same reason.
            if let Some(entry) = self.inner.checkin(entry, permit, self.suspect) {
                spawn_destroy(&self.inner, entry);
            }
        }
    }
}
