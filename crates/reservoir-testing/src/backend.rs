//! In-memory mock backend.
//!
//! Simulates the backing database from the pool's point of view: it opens
//! connections, knows which ones are still alive, and counts physical opens
//! and closes. Knobs inject the failure modes the pool has to survive:
//! refused connects, killed connections and slow opens.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;

/// Error type for mock backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend refused the connection attempt.
    #[error("connection refused by mock backend")]
    Refused,

    /// The connection was killed out from under the caller.
    #[error("connection lost")]
    Gone,
}

struct BackendState {
    fail_next: u32,
    fail_all: bool,
    connect_delay: Option<Duration>,
    alive: HashSet<u64>,
    next_id: u64,
}

struct BackendShared {
    state: Mutex<BackendState>,
    opened: AtomicU64,
    closed: AtomicU64,
}

/// A shared in-memory backend that mock connections point back to.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct MockBackend {
    shared: Arc<BackendShared>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a healthy backend that accepts every connect.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(BackendShared {
                state: Mutex::new(BackendState {
                    fail_next: 0,
                    fail_all: false,
                    connect_delay: None,
                    alive: HashSet::new(),
                    next_id: 0,
                }),
                opened: AtomicU64::new(0),
                closed: AtomicU64::new(0),
            }),
        }
    }

    /// Open a connection, honoring the configured failure knobs.
    pub async fn connect(&self) -> Result<MockConnection, BackendError> {
        let delay = self.shared.state.lock().connect_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.shared.state.lock();
        if state.fail_all {
            return Err(BackendError::Refused);
        }
        if state.fail_next > 0 {
            state.fail_next -= 1;
            return Err(BackendError::Refused);
        }
        let id = state.next_id;
        state.next_id += 1;
        state.alive.insert(id);
        drop(state);

        self.shared.opened.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(connection = id, "mock backend opened connection");
        Ok(MockConnection {
            id,
            backend: self.clone(),
        })
    }

    /// Refuse the next `n` connect attempts.
    pub fn fail_next_connects(&self, n: u32) {
        self.shared.state.lock().fail_next = n;
    }

    /// Refuse every connect attempt until turned off again.
    pub fn fail_all_connects(&self, enabled: bool) {
        self.shared.state.lock().fail_all = enabled;
    }

    /// Delay every connect by `delay` before it resolves.
    pub fn set_connect_delay(&self, delay: Option<Duration>) {
        self.shared.state.lock().connect_delay = delay;
    }

    /// Kill a live connection so its liveness probe starts failing.
    pub fn kill(&self, id: u64) {
        if self.shared.state.lock().alive.remove(&id) {
            self.shared.closed.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(connection = id, "mock backend killed connection");
        }
    }

    /// Kill every live connection.
    pub fn kill_all(&self) {
        let ids: Vec<u64> = self.shared.state.lock().alive.iter().copied().collect();
        for id in ids {
            self.kill(id);
        }
    }

    /// Physical connections opened over the backend's lifetime.
    #[must_use]
    pub fn opened(&self) -> u64 {
        self.shared.opened.load(Ordering::Relaxed)
    }

    /// Physical connections closed (or killed) over the backend's lifetime.
    #[must_use]
    pub fn closed(&self) -> u64 {
        self.shared.closed.load(Ordering::Relaxed)
    }

    /// Connections currently live on the backend.
    #[must_use]
    pub fn live(&self) -> usize {
        self.shared.state.lock().alive.len()
    }

    fn is_alive(&self, id: u64) -> bool {
        self.shared.state.lock().alive.contains(&id)
    }

    fn close(&self, id: u64) {
        if self.shared.state.lock().alive.remove(&id) {
            self.shared.closed.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(connection = id, "mock backend closed connection");
        }
    }
}

/// An opaque connection produced by [`MockBackend::connect`].
///
/// Closes itself on drop; close is idempotent, so a connection killed by the
/// backend is not double-counted.
pub struct MockConnection {
    id: u64,
    backend: MockBackend,
}

impl MockConnection {
    /// The backend-assigned connection id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Check liveness without a round trip.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.backend.is_alive(self.id)
    }

    /// The stand-in domain operation: a no-op round trip that fails once the
    /// connection has been killed.
    pub async fn ping(&self) -> Result<(), BackendError> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(BackendError::Gone)
        }
    }
}

impl Drop for MockConnection {
    fn drop(&mut self) {
        self.backend.close(self.id);
    }
}
