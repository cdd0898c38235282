//! The pool manager: acquisition, release, eviction sweep and shutdown.
//!
//! All shared state (idle queue, in-use set, condemned list, counters) lives
//! behind one `parking_lot::Mutex`; capacity and FIFO ordering of blocked
//! acquirers are enforced by a fair tokio semaphore whose permits travel with
//! checked-out handles. The lock is never held across an `.await`.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::{Notify, OwnedSemaphorePermit, Semaphore, TryAcquireError};
use tokio::task::JoinHandle;

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::factory::ResourceFactory;
use crate::handle::PooledHandle;
use crate::lifecycle::{ResourceMetadata, ResourceState};
use crate::metrics::{MetricsRecorder, PoolMetrics};

/// A bounded pool of reusable backend resources.
///
/// The pool hands out [`PooledHandle`]s, reclaims the underlying resource when
/// the handle is released or dropped, and runs a background sweep that evicts
/// stale idle resources, re-validates aging ones and backfills toward
/// `min_size`.
///
/// `Pool` is cheap to clone; clones share the same state. Construct it once at
/// startup and pass clones (or an `Arc`) into worker tasks.
pub struct Pool<F: ResourceFactory> {
    inner: Arc<PoolInner<F>>,
}

impl<F: ResourceFactory> Clone for Pool<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// A resource together with its pool-side bookkeeping.
pub(crate) struct Entry<R> {
    pub(crate) resource: R,
    pub(crate) meta: ResourceMetadata,
}

/// Checkout record for a resource currently held by a handle.
pub(crate) struct Lease {
    pub(crate) acquired_at: Instant,
    pub(crate) leak_logged: bool,
}

pub(crate) struct PoolState<R> {
    /// Idle resources, least recently returned at the front.
    pub(crate) idle: VecDeque<Entry<R>>,
    /// Resources checked out to live handles, keyed by resource id.
    pub(crate) in_use: HashMap<u64, Lease>,
    /// Resources awaiting destruction by the sweep (returned suspect, or
    /// returned after the pool closed).
    pub(crate) condemned: Vec<Entry<R>>,
    /// Idle + in-use + currently-opening resources.
    pub(crate) total: u32,
    pub(crate) closed: bool,
    /// Number of `close` calls currently waiting out their grace period.
    /// While nonzero, late returns are condemned for `close` to destroy and
    /// count; once it drops to zero they destroy themselves.
    pub(crate) drain_active: u32,
}

pub(crate) struct PoolInner<F: ResourceFactory> {
    pub(crate) config: PoolConfig,
    pub(crate) factory: F,
    pub(crate) state: Mutex<PoolState<F::Resource>>,
    pub(crate) semaphore: Arc<Semaphore>,
    pub(crate) metrics: MetricsRecorder,
    pub(crate) waiting: AtomicU32,
    /// Signalled whenever an in-use resource leaves the in-use set; `close`
    /// waits on this while draining.
    pub(crate) drain: Notify,
    next_id: AtomicU64,
    sweep: Mutex<Option<JoinHandle<()>>>,
}

impl<F: ResourceFactory> PoolInner<F> {
    pub(crate) fn new_entry(&self, resource: F::Resource) -> Entry<F::Resource> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut meta = ResourceMetadata::new(id);
        // A freshly opened resource counts as validated.
        meta.mark_validated();
        MetricsRecorder::incr(&self.metrics.resources_created);
        tracing::debug!(resource = id, "opened backend resource");
        Entry { resource, meta }
    }

    pub(crate) async fn destroy_entry(&self, mut entry: Entry<F::Resource>) {
        entry.meta.state = ResourceState::Closed;
        tracing::debug!(
            resource = entry.meta.id,
            checkouts = entry.meta.checkout_count,
            "closing backend resource"
        );
        self.factory.destroy(entry.resource).await;
        MetricsRecorder::incr(&self.metrics.resources_closed);
    }

    /// Remove a checked-out resource from pool accounting without returning
    /// it (destroy and detach paths). The caller still holds the permit.
    pub(crate) fn forget_in_use(&self, id: u64) {
        let mut state = self.state.lock();
        state.in_use.remove(&id);
        state.total -= 1;
    }

    /// Return a checked-out resource to the pool.
    ///
    /// A suspect return condemns the resource for the sweep to destroy. On a
    /// closed pool the resource is condemned while a `close` call is still
    /// draining (it destroys and counts it); otherwise it is handed back to
    /// the caller, who must destroy it.
    #[must_use]
    pub(crate) fn checkin(
        &self,
        mut entry: Entry<F::Resource>,
        permit: OwnedSemaphorePermit,
        suspect: bool,
    ) -> Option<Entry<F::Resource>> {
        let mut state = self.state.lock();
        state.in_use.remove(&entry.meta.id);
        let orphan = if state.closed {
            entry.meta.state = ResourceState::Invalid;
            state.total -= 1;
            if state.drain_active > 0 {
                state.condemned.push(entry);
                None
            } else {
                Some(entry)
            }
        } else if suspect {
            entry.meta.state = ResourceState::Invalid;
            state.total -= 1;
            state.condemned.push(entry);
            None
        } else {
            entry.meta.mark_checkin();
            tracing::trace!(resource = entry.meta.id, "returned resource to idle set");
            state.idle.push_back(entry);
            None
        };
        // Free the capacity slot only after the resource is back in the
        // shared sets, so a woken waiter always finds either the idle entry
        // or room to create.
        drop(permit);
        drop(state);
        self.drain.notify_waiters();
        orphan
    }

    /// Put an entry back in the idle set. Returns the entry when the pool
    /// closed in the meantime; the caller destroys it outside the lock.
    fn readmit(&self, entry: Entry<F::Resource>) -> Option<Entry<F::Resource>> {
        let mut state = self.state.lock();
        if state.closed {
            state.total -= 1;
            Some(entry)
        } else {
            state.idle.push_back(entry);
            None
        }
    }

    /// One pass of the eviction sweep. Never touches in-use resources.
    pub(crate) async fn sweep_once(&self) {
        let cfg = &self.config;
        let (expired, due, condemned, backfill, leaks) = {
            let mut state = self.state.lock();
            if state.closed {
                return;
            }

            // Idle-timeout eviction, oldest first, floored at min_size.
            let mut expired = Vec::new();
            while state.total > cfg.min_size
                && state
                    .idle
                    .front()
                    .is_some_and(|e| e.meta.is_idle_expired(cfg.idle_timeout))
            {
                if let Some(entry) = state.idle.pop_front() {
                    state.total -= 1;
                    expired.push(entry);
                }
            }

            // Pull idle resources whose validation is due; they are probed
            // outside the lock and either returned or replaced. Each pulled
            // entry takes a capacity permit so acquirers cannot open a
            // replacement while the original is still live. A permit is
            // always available for an idle entry unless an acquirer grabbed
            // it first, in which case the entry stays put and gets validated
            // at checkout instead.
            let mut due = Vec::new();
            let mut keep = VecDeque::with_capacity(state.idle.len());
            while let Some(mut entry) = state.idle.pop_front() {
                if entry.meta.needs_validation(cfg.validation_interval) {
                    match self.semaphore.clone().try_acquire_owned() {
                        Ok(permit) => {
                            entry.meta.state = ResourceState::Checking;
                            due.push((entry, permit));
                        }
                        Err(_) => keep.push_back(entry),
                    }
                } else {
                    keep.push_back(entry);
                }
            }
            state.idle = keep;

            let condemned: Vec<_> = state.condemned.drain(..).collect();

            // `total` still counts the entries pulled for validation, so the
            // deficit is computed against real resources only. Each backfill
            // slot is backed by a permit so a backfill create cannot race an
            // acquirer past max_size; when no permit is free the acquirers
            // are opening resources themselves and no deficit remains.
            let mut backfill = Vec::new();
            for _ in 0..cfg.min_size.saturating_sub(state.total) {
                match self.semaphore.clone().try_acquire_owned() {
                    Ok(permit) => {
                        state.total += 1;
                        backfill.push(permit);
                    }
                    Err(_) => break,
                }
            }

            let mut leaks = Vec::new();
            if let Some(deadline) = cfg.leak_deadline {
                for (id, lease) in state.in_use.iter_mut() {
                    if !lease.leak_logged && lease.acquired_at.elapsed() > deadline {
                        lease.leak_logged = true;
                        leaks.push(*id);
                    }
                }
            }

            (expired, due, condemned, backfill, leaks)
        };

        for id in leaks {
            MetricsRecorder::incr(&self.metrics.leaks_suspected);
            tracing::warn!(
                resource = id,
                "handle held past the leak deadline; possible resource leak"
            );
        }

        for entry in expired {
            MetricsRecorder::incr(&self.metrics.idle_evictions);
            tracing::debug!(resource = entry.meta.id, "evicting idle resource");
            self.destroy_entry(entry).await;
        }

        for entry in condemned {
            self.destroy_entry(entry).await;
        }

        for (mut entry, permit) in due {
            MetricsRecorder::incr(&self.metrics.validations_performed);
            if self.factory.validate(&mut entry.resource).await {
                entry.meta.mark_validated();
                entry.meta.state = ResourceState::Idle;
                if let Some(entry) = self.readmit(entry) {
                    self.destroy_entry(entry).await;
                }
            } else {
                MetricsRecorder::incr(&self.metrics.validations_failed);
                tracing::warn!(
                    resource = entry.meta.id,
                    "idle resource failed validation, replacing"
                );
                self.state.lock().total -= 1;
                self.destroy_entry(entry).await;
            }
            // Slot stays reserved until the entry is back in the idle set or
            // the physical close finished.
            drop(permit);
        }

        // Backfill toward min_size. One attempt per slot per tick; a down
        // backend is retried on the next tick rather than hot-looped.
        for permit in backfill {
            match self.factory.create().await {
                Ok(resource) => {
                    let entry = self.new_entry(resource);
                    tracing::debug!(resource = entry.meta.id, "backfilled toward min_size");
                    if let Some(entry) = self.readmit(entry) {
                        self.destroy_entry(entry).await;
                    }
                }
                Err(err) => {
                    self.state.lock().total -= 1;
                    tracing::debug!(error = %err, "backfill create failed, deferring to next sweep");
                }
            }
            drop(permit);
        }
    }
}

/// Destroy an entry from a detached task.
///
/// Used for resources returned after `close` has finished draining: the sweep
/// is gone by then and the drop path cannot await. Without a runtime the
/// resource's own `Drop` is the last resort.
pub(crate) fn spawn_destroy<F>(inner: &Arc<PoolInner<F>>, entry: Entry<F::Resource>)
where
    F: ResourceFactory + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(rt) => {
            let inner = Arc::clone(inner);
            rt.spawn(async move { inner.destroy_entry(entry).await });
        }
        Err(_) => drop(entry),
    }
}

fn spawn_sweep<F>(inner: &Arc<PoolInner<F>>) -> JoinHandle<()>
where
    F: ResourceFactory + 'static,
{
    let weak = Arc::downgrade(inner);
    let period = inner.config.sweep_interval;
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(period);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick of `interval` fires immediately; skip it so a fresh
        // pool is not swept before it has done anything.
        tick.tick().await;
        loop {
            tick.tick().await;
            let Some(inner) = weak.upgrade() else { break };
            if inner.state.lock().closed {
                break;
            }
            inner.sweep_once().await;
        }
    })
}

impl<F> Pool<F>
where
    F: ResourceFactory + 'static,
{
    /// Create a pool from a factory and configuration.
    ///
    /// Prefills the idle set to `min_size` (open failures during prefill are
    /// logged and retried by the sweep, not surfaced) and spawns the eviction
    /// sweep, so this must run inside a tokio runtime.
    pub async fn new(factory: F, config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let inner = Arc::new(PoolInner {
            semaphore: Arc::new(Semaphore::new(config.max_size as usize)),
            factory,
            state: Mutex::new(PoolState {
                idle: VecDeque::with_capacity(config.max_size as usize),
                in_use: HashMap::new(),
                condemned: Vec::new(),
                total: 0,
                closed: false,
                drain_active: 0,
            }),
            metrics: MetricsRecorder::default(),
            waiting: AtomicU32::new(0),
            drain: Notify::new(),
            next_id: AtomicU64::new(0),
            sweep: Mutex::new(None),
            config,
        });

        for _ in 0..inner.config.min_size {
            inner.state.lock().total += 1;
            match inner.factory.create().await {
                Ok(resource) => {
                    let entry = inner.new_entry(resource);
                    inner.state.lock().idle.push_back(entry);
                }
                Err(err) => {
                    inner.state.lock().total -= 1;
                    tracing::warn!(
                        error = %err,
                        "failed to prefill pool to min_size, will retry in background"
                    );
                    break;
                }
            }
        }

        *inner.sweep.lock() = Some(spawn_sweep(&inner));
        tracing::info!(
            min = inner.config.min_size,
            max = inner.config.max_size,
            "resource pool started"
        );
        Ok(Self { inner })
    }

    /// Start building a pool around `factory`.
    pub fn builder(factory: F) -> PoolBuilder<F> {
        PoolBuilder {
            factory,
            config: PoolConfig::default(),
        }
    }

    /// Acquire a resource, waiting up to the configured `acquire_timeout`.
    pub async fn acquire(&self) -> Result<PooledHandle<F>, PoolError> {
        self.acquire_timeout(self.inner.config.acquire_timeout).await
    }

    /// Acquire a resource, waiting up to `timeout` for capacity.
    ///
    /// Hands out an idle resource when one exists, opens a new one when the
    /// pool is below `max_size`, and otherwise joins a strictly FIFO wait for
    /// the next release. A pooled resource whose checkout validation fails is
    /// destroyed and transparently replaced up to `acquire_retries` times.
    pub async fn acquire_timeout(&self, timeout: Duration) -> Result<PooledHandle<F>, PoolError> {
        let inner = &self.inner;
        if inner.state.lock().closed {
            MetricsRecorder::incr(&inner.metrics.checkouts_failed);
            return Err(PoolError::PoolClosed);
        }
        let deadline = tokio::time::Instant::now() + timeout;

        let permit = match inner.semaphore.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(TryAcquireError::Closed) => {
                MetricsRecorder::incr(&inner.metrics.checkouts_failed);
                return Err(PoolError::PoolClosed);
            }
            Err(TryAcquireError::NoPermits) => {
                // The semaphore queue is FIFO, so waiters are served strictly
                // in arrival order. A timed-out or cancelled waiter falls out
                // of the queue without consuming a slot.
                self.inner.waiting.fetch_add(1, Ordering::Relaxed);
                let waited =
                    tokio::time::timeout_at(deadline, inner.semaphore.clone().acquire_owned())
                        .await;
                self.inner.waiting.fetch_sub(1, Ordering::Relaxed);
                match waited {
                    Ok(Ok(permit)) => permit,
                    Ok(Err(_)) => {
                        MetricsRecorder::incr(&inner.metrics.checkouts_failed);
                        return Err(PoolError::PoolClosed);
                    }
                    Err(_) => {
                        MetricsRecorder::incr(&inner.metrics.checkout_timeouts);
                        MetricsRecorder::incr(&inner.metrics.checkouts_failed);
                        tracing::trace!(?timeout, "acquisition timed out waiting for capacity");
                        return Err(PoolError::AcquireTimeout(timeout));
                    }
                }
            }
        };

        let mut replaced = 0u32;
        loop {
            let candidate = {
                let mut state = inner.state.lock();
                if state.closed {
                    MetricsRecorder::incr(&inner.metrics.checkouts_failed);
                    return Err(PoolError::PoolClosed);
                }
                match state.idle.pop_front() {
                    Some(entry) => Some(entry),
                    None => {
                        // The permit guarantees a free slot; reserve it in
                        // `total` while the factory call runs unlocked.
                        state.total += 1;
                        None
                    }
                }
            };

            let entry = match candidate {
                Some(mut entry) => {
                    if inner.config.test_on_acquire
                        && entry.meta.needs_validation(inner.config.validation_interval)
                    {
                        MetricsRecorder::incr(&inner.metrics.validations_performed);
                        if inner.factory.validate(&mut entry.resource).await {
                            entry.meta.mark_validated();
                            entry
                        } else {
                            MetricsRecorder::incr(&inner.metrics.validations_failed);
                            tracing::warn!(
                                resource = entry.meta.id,
                                "pooled resource failed checkout validation, discarding"
                            );
                            inner.state.lock().total -= 1;
                            inner.destroy_entry(entry).await;
                            replaced += 1;
                            if replaced > inner.config.acquire_retries {
                                MetricsRecorder::incr(&inner.metrics.checkouts_failed);
                                return Err(PoolError::ConnectFailed(format!(
                                    "{replaced} pooled resources failed validation at checkout"
                                )));
                            }
                            continue;
                        }
                    } else {
                        entry
                    }
                }
                None => match inner.factory.create().await {
                    Ok(resource) => inner.new_entry(resource),
                    Err(err) => {
                        inner.state.lock().total -= 1;
                        MetricsRecorder::incr(&inner.metrics.checkouts_failed);
                        return Err(err);
                    }
                },
            };

            MetricsRecorder::incr(&inner.metrics.checkouts_successful);
            return Ok(self.finish_checkout(entry, permit));
        }
    }

    /// Acquire an idle resource without waiting.
    ///
    /// Returns `Ok(None)` when no idle resource is available; never opens a
    /// new resource and never validates (this path is synchronous).
    pub fn try_acquire(&self) -> Result<Option<PooledHandle<F>>, PoolError> {
        let inner = &self.inner;
        let permit = match inner.semaphore.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(TryAcquireError::Closed) => return Err(PoolError::PoolClosed),
            Err(TryAcquireError::NoPermits) => return Ok(None),
        };
        let entry = {
            let mut state = inner.state.lock();
            if state.closed {
                return Err(PoolError::PoolClosed);
            }
            state.idle.pop_front()
        };
        match entry {
            Some(entry) => {
                MetricsRecorder::incr(&inner.metrics.checkouts_successful);
                Ok(Some(self.finish_checkout(entry, permit)))
            }
            None => Ok(None),
        }
    }

    fn finish_checkout(
        &self,
        mut entry: Entry<F::Resource>,
        permit: OwnedSemaphorePermit,
    ) -> PooledHandle<F> {
        entry.meta.mark_checkout();
        self.inner.state.lock().in_use.insert(
            entry.meta.id,
            Lease {
                acquired_at: Instant::now(),
                leak_logged: false,
            },
        );
        tracing::trace!(resource = entry.meta.id, "checked out resource");
        PooledHandle::new(Arc::clone(&self.inner), entry, permit)
    }

    /// Shut the pool down.
    ///
    /// New acquisitions fail with [`PoolError::PoolClosed`] immediately and
    /// queued waiters are woken with the same error. Idle resources are closed
    /// right away; in-use resources are closed as their handles come back
    /// (released or dropped), for up to `grace`. Whatever is still held after
    /// the grace period is reported as force-closed and destroyed whenever its
    /// handle finally comes back.
    pub async fn close(&self, grace: Duration) -> ShutdownReport {
        let inner = &self.inner;
        let (first_close, idle, condemned) = {
            let mut state = inner.state.lock();
            let first = !state.closed;
            state.closed = true;
            state.drain_active += 1;
            let idle: Vec<_> = state.idle.drain(..).collect();
            state.total -= idle.len() as u32;
            let condemned: Vec<_> = state.condemned.drain(..).collect();
            (first, idle, condemned)
        };
        inner.semaphore.close();
        if first_close {
            if let Some(sweep) = inner.sweep.lock().take() {
                sweep.abort();
            }
            tracing::info!("pool closing, new acquisitions rejected");
        }

        let mut closed = 0u32;
        for entry in idle {
            inner.destroy_entry(entry).await;
            closed += 1;
        }
        for entry in condemned {
            inner.destroy_entry(entry).await;
            closed += 1;
        }

        let deadline = tokio::time::Instant::now() + grace;
        loop {
            let notified = inner.drain.notified();
            tokio::pin!(notified);
            // Register for the wakeup before sampling the in-use set, so a
            // release landing between the two is not missed.
            notified.as_mut().enable();

            let (condemned, remaining) = {
                let mut state = inner.state.lock();
                let condemned: Vec<_> = state.condemned.drain(..).collect();
                (condemned, state.in_use.len())
            };
            for entry in condemned {
                inner.destroy_entry(entry).await;
                closed += 1;
            }
            if remaining == 0 {
                break;
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                break;
            }
        }

        // Handles returned between the last drain and here were condemned
        // while this call was still registered as draining; sweep them up.
        // Later returns destroy themselves.
        let (leftover, force_closed) = {
            let mut state = inner.state.lock();
            state.drain_active -= 1;
            let leftover: Vec<_> = state.condemned.drain(..).collect();
            (leftover, state.in_use.len() as u32)
        };
        for entry in leftover {
            inner.destroy_entry(entry).await;
            closed += 1;
        }

        tracing::info!(closed, force_closed, "pool closed");
        ShutdownReport {
            closed,
            force_closed,
        }
    }

    /// Check if the pool has been shut down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().closed
    }

    /// Get the current pool status.
    #[must_use]
    pub fn status(&self) -> PoolStatus {
        let state = self.inner.state.lock();
        PoolStatus {
            idle: state.idle.len() as u32,
            in_use: state.in_use.len() as u32,
            total: state.total,
            max: self.inner.config.max_size,
            waiting: self.inner.waiting.load(Ordering::Relaxed),
        }
    }

    /// Get a snapshot of the pool's lifetime metrics.
    #[must_use]
    pub fn metrics(&self) -> PoolMetrics {
        self.inner.metrics.snapshot()
    }

    /// Get the pool configuration.
    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.inner.config
    }
}

/// Builder for [`Pool`], mirroring the [`PoolConfig`] setters.
pub struct PoolBuilder<F> {
    factory: F,
    config: PoolConfig,
}

impl<F> PoolBuilder<F>
where
    F: ResourceFactory + 'static,
{
    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: PoolConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the minimum pool size.
    #[must_use]
    pub fn min_size(mut self, count: u32) -> Self {
        self.config.min_size = count;
        self
    }

    /// Set the maximum pool size.
    #[must_use]
    pub fn max_size(mut self, count: u32) -> Self {
        self.config.max_size = count;
        self
    }

    /// Set the default acquisition timeout.
    #[must_use]
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.config.acquire_timeout = timeout;
        self
    }

    /// Set the idle resource timeout.
    #[must_use]
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    /// Set the validation interval.
    #[must_use]
    pub fn validation_interval(mut self, interval: Duration) -> Self {
        self.config.validation_interval = interval;
        self
    }

    /// Enable or disable validating resources at checkout.
    #[must_use]
    pub fn test_on_acquire(mut self, enabled: bool) -> Self {
        self.config.test_on_acquire = enabled;
        self
    }

    /// Set the checkout validation retry bound.
    #[must_use]
    pub fn acquire_retries(mut self, retries: u32) -> Self {
        self.config.acquire_retries = retries;
        self
    }

    /// Set the eviction sweep interval.
    #[must_use]
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.config.sweep_interval = interval;
        self
    }

    /// Set the suspected-leak reporting deadline.
    #[must_use]
    pub fn leak_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.config.leak_deadline = deadline;
        self
    }

    /// Validate the configuration and start the pool.
    pub async fn build(self) -> Result<Pool<F>, PoolError> {
        Pool::new(self.factory, self.config).await
    }
}

/// Status information about the pool.
#[derive(Debug, Clone, Copy)]
pub struct PoolStatus {
    /// Number of idle resources available.
    pub idle: u32,
    /// Number of resources currently checked out.
    pub in_use: u32,
    /// Total resources, including ones currently being opened.
    pub total: u32,
    /// Maximum allowed resources.
    pub max: u32,
    /// Callers currently blocked waiting for capacity.
    pub waiting: u32,
}

impl PoolStatus {
    /// Checked-out share of capacity as a percentage.
    #[must_use]
    pub fn utilization(&self) -> f64 {
        if self.max == 0 {
            return 0.0;
        }
        f64::from(self.in_use) / f64::from(self.max) * 100.0
    }
}

/// Outcome of [`Pool::close`].
#[derive(Debug, Clone, Copy)]
pub struct ShutdownReport {
    /// Resources destroyed by this call: idle at close time, or returned
    /// during the grace period, whether released or dropped.
    pub closed: u32,
    /// Resources still held by callers when the grace period expired. They
    /// are destroyed later, as their handles come back.
    pub force_closed: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_utilization() {
        let status = PoolStatus {
            idle: 3,
            in_use: 5,
            total: 8,
            max: 10,
            waiting: 0,
        };
        assert!((status.utilization() - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_status_utilization_zero_max() {
        let status = PoolStatus {
            idle: 0,
            in_use: 0,
            total: 0,
            max: 0,
            waiting: 0,
        };
        assert!((status.utilization() - 0.0).abs() < f64::EPSILON);
    }
}
