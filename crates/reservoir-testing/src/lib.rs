//! # reservoir-testing
//!
//! Test infrastructure for reservoir-pool development.
//!
//! Provides an in-memory mock backend so the pool's integration tests and
//! examples run without any real database. The backend exposes the failure
//! knobs a pool has to survive: refused connects, connections killed mid-life
//! and slow opens, plus open/close counters to assert against.
//!
//! ## Example
//!
//! ```rust,ignore
//! use reservoir_pool::Pool;
//! use reservoir_testing::{MockBackend, MockFactory};
//!
//! #[tokio::test]
//! async fn test_pool_against_mock() {
//!     let backend = MockBackend::new();
//!     let pool = Pool::builder(MockFactory::new(backend.clone()))
//!         .max_size(5)
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let handle = pool.acquire().await.unwrap();
//!     assert_eq!(backend.opened(), 1);
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod backend;
pub mod factory;

pub use backend::{BackendError, MockBackend, MockConnection};
pub use factory::MockFactory;
