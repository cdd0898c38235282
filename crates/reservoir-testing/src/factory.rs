//! [`ResourceFactory`] implementation over the mock backend.

use reservoir_pool::{PoolError, ResourceFactory};

use crate::backend::{MockBackend, MockConnection};

/// Factory that opens [`MockConnection`]s against a [`MockBackend`].
#[derive(Clone)]
pub struct MockFactory {
    backend: MockBackend,
}

impl MockFactory {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: MockBackend) -> Self {
        Self { backend }
    }

    /// The backend this factory opens connections against.
    #[must_use]
    pub fn backend(&self) -> &MockBackend {
        &self.backend
    }
}

#[async_trait::async_trait]
impl ResourceFactory for MockFactory {
    type Resource = MockConnection;

    async fn create(&self) -> Result<MockConnection, PoolError> {
        self.backend
            .connect()
            .await
            .map_err(|err| PoolError::ConnectFailed(err.to_string()))
    }

    async fn validate(&self, resource: &mut MockConnection) -> bool {
        resource.ping().await.is_ok()
    }

    async fn destroy(&self, resource: MockConnection) {
        tracing::trace!(connection = resource.id(), "destroying mock connection");
        drop(resource);
    }
}
