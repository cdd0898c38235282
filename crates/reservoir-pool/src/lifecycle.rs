//! Per-resource lifecycle bookkeeping.
//!
//! The pool tracks every resource's state and timestamps so the eviction
//! sweep can decide what to retire, what to re-validate and what to leave
//! alone. In-use resources are never touched by the sweep.

/// State of a resource as tracked by the pool.
///
/// Resources move `Idle ⇄ InUse`, pass through `Checking` while the sweep
/// validates them, and end in `Closed`. `Invalid` marks a resource condemned
/// for destruction (failed validation or returned suspect).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource is idle and available for checkout.
    Idle,
    /// Resource is checked out to exactly one handle.
    InUse,
    /// Resource is being validated by the sweep.
    Checking,
    /// Resource failed validation or was returned suspect; awaiting destroy.
    Invalid,
    /// Resource is closed. Terminal.
    Closed,
}

impl ResourceState {
    /// Check if the resource is available for checkout.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if the resource is currently held or being inspected.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::InUse | Self::Checking)
    }

    /// Check if the resource must be removed from the pool.
    #[must_use]
    pub fn should_remove(&self) -> bool {
        matches!(self, Self::Invalid | Self::Closed)
    }
}

/// Metadata about a pooled resource.
#[derive(Debug, Clone)]
pub struct ResourceMetadata {
    /// Unique identifier for this resource within the pool.
    pub id: u64,
    /// When the resource was created.
    pub created_at: std::time::Instant,
    /// When the resource was last checked out or returned.
    pub last_used_at: std::time::Instant,
    /// When the resource last passed validation.
    pub last_validated_at: Option<std::time::Instant>,
    /// Number of times the resource has been checked out.
    pub checkout_count: u64,
    /// Current state of the resource.
    pub state: ResourceState,
}

impl ResourceMetadata {
    /// Create metadata for a new resource.
    pub fn new(id: u64) -> Self {
        let now = std::time::Instant::now();
        Self {
            id,
            created_at: now,
            last_used_at: now,
            last_validated_at: None,
            checkout_count: 0,
            state: ResourceState::Idle,
        }
    }

    /// Check if the resource has been idle longer than `idle_timeout`.
    #[must_use]
    pub fn is_idle_expired(&self, idle_timeout: std::time::Duration) -> bool {
        self.last_used_at.elapsed() > idle_timeout
    }

    /// Check if a validation is due.
    #[must_use]
    pub fn needs_validation(&self, interval: std::time::Duration) -> bool {
        match self.last_validated_at {
            Some(last) => last.elapsed() > interval,
            None => true,
        }
    }

    /// Mark the resource as checked out.
    pub fn mark_checkout(&mut self) {
        self.last_used_at = std::time::Instant::now();
        self.checkout_count += 1;
        self.state = ResourceState::InUse;
    }

    /// Mark the resource as returned to idle.
    pub fn mark_checkin(&mut self) {
        self.last_used_at = std::time::Instant::now();
        self.state = ResourceState::Idle;
    }

    /// Mark the resource as freshly validated.
    pub fn mark_validated(&mut self) {
        self.last_validated_at = Some(std::time::Instant::now());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_resource_state_availability() {
        assert!(ResourceState::Idle.is_available());
        assert!(!ResourceState::InUse.is_available());
        assert!(!ResourceState::Checking.is_available());
        assert!(!ResourceState::Closed.is_available());
    }

    #[test]
    fn test_resource_state_busy() {
        assert!(!ResourceState::Idle.is_busy());
        assert!(ResourceState::InUse.is_busy());
        assert!(ResourceState::Checking.is_busy());
    }

    #[test]
    fn test_resource_state_should_remove() {
        assert!(!ResourceState::Idle.should_remove());
        assert!(!ResourceState::InUse.should_remove());
        assert!(ResourceState::Invalid.should_remove());
        assert!(ResourceState::Closed.should_remove());
    }

    #[test]
    fn test_resource_metadata_new() {
        let meta = ResourceMetadata::new(1);
        assert_eq!(meta.id, 1);
        assert_eq!(meta.checkout_count, 0);
        assert_eq!(meta.state, ResourceState::Idle);
        assert!(meta.last_validated_at.is_none());
    }

    #[test]
    fn test_resource_metadata_checkout_checkin() {
        let mut meta = ResourceMetadata::new(1);
        meta.mark_checkout();
        assert_eq!(meta.checkout_count, 1);
        assert_eq!(meta.state, ResourceState::InUse);

        meta.mark_checkin();
        assert_eq!(meta.state, ResourceState::Idle);
    }

    #[test]
    fn test_validation_due_when_never_validated() {
        let meta = ResourceMetadata::new(1);
        assert!(meta.needs_validation(Duration::from_secs(3600)));
    }

    #[test]
    fn test_validation_fresh_after_mark() {
        let mut meta = ResourceMetadata::new(1);
        meta.mark_validated();
        assert!(!meta.needs_validation(Duration::from_secs(3600)));
        assert!(meta.needs_validation(Duration::ZERO));
    }

    #[test]
    fn test_idle_expiry() {
        let meta = ResourceMetadata::new(1);
        assert!(!meta.is_idle_expired(Duration::from_secs(3600)));
        assert!(meta.is_idle_expired(Duration::ZERO));
    }
}
