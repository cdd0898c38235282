//! Worker tasks sharing a pool.
//!
//! This example runs the pool against the in-memory mock backend from
//! `reservoir-testing`: a set of worker tasks each acquires a handle, runs a
//! domain operation through it, and relies on drop to return the resource on
//! every exit path.
//!
//! # Running
//!
//! ```bash
//! cargo run --example worker_tasks
//! ```

// Allow common patterns in example code
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use reservoir_pool::{Pool, PoolError};
use reservoir_testing::{MockBackend, MockFactory};
use tokio::time::Instant;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("=== Pooled Worker Tasks Example ===\n");

    let backend = MockBackend::new();
    let pool = Arc::new(
        Pool::builder(MockFactory::new(backend.clone()))
            .min_size(2)
            .max_size(5)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sweep_interval(Duration::from_secs(1))
            .build()
            .await?,
    );

    println!("Pool configuration:");
    println!("  Min size: {}", pool.config().min_size);
    println!("  Max size: {}", pool.config().max_size);
    println!("  Idle timeout: {:?}", pool.config().idle_timeout);
    println!();

    print_pool_status(&pool);

    // Example 1: one worker, scoped acquisition
    println!("\n1. Scoped acquisition:");
    {
        let handle = pool.acquire().await?;
        handle.resource()?.ping().await?;
        println!("  Pinged through resource {}", handle.metadata()?.id);
        // Resource returns to the pool when the handle drops here.
    }

    // Example 2: 20 concurrent workers over 5 resources
    println!("\n2. Concurrent workers (20 tasks, max 5 resources):");
    let start = Instant::now();
    let mut workers = vec![];

    for i in 0..20 {
        let pool: Arc<Pool<MockFactory>> = Arc::clone(&pool);
        workers.push(tokio::spawn(async move {
            let mut handle = pool.acquire().await?;
            // Simulate some work against the backend.
            tokio::time::sleep(Duration::from_millis(50)).await;
            if handle.resource()?.ping().await.is_err() {
                // A failed domain operation: flag the resource so the pool
                // health-checks it instead of pooling it blindly.
                handle.mark_suspect();
            }
            handle.release().await?;
            Ok::<_, PoolError>(i)
        }));
    }

    let mut completed = 0;
    for worker in workers {
        if worker.await?.is_ok() {
            completed += 1;
        }
    }
    println!("  Completed {} tasks in {:?}", completed, start.elapsed());
    print_pool_status(&pool);
    print_pool_metrics(&pool);

    // Example 3: pool health
    println!("\n3. Pool health:");
    let status = pool.status();
    let utilization = status.utilization();
    let health = if utilization < 70.0 {
        "HEALTHY"
    } else if utilization < 90.0 {
        "WARNING"
    } else {
        "CRITICAL"
    };
    println!("  Pool health: {health}");
    println!("  Utilization: {utilization:.1}%");

    // Example 4: graceful shutdown
    println!("\n4. Graceful shutdown:");
    let report = pool.close(Duration::from_secs(5)).await;
    println!(
        "  Closed {} resources ({} force-closed)",
        report.closed, report.force_closed
    );
    println!("  Backend live connections: {}", backend.live());

    Ok(())
}

fn print_pool_status(pool: &Pool<MockFactory>) {
    let status = pool.status();
    println!(
        "  Status: {}/{} in use, {} idle, {} waiting ({:.1}% utilization)",
        status.in_use,
        status.max,
        status.idle,
        status.waiting,
        status.utilization()
    );
}

fn print_pool_metrics(pool: &Pool<MockFactory>) {
    let metrics = pool.metrics();
    println!("  Metrics:");
    println!("    Resources created: {}", metrics.resources_created);
    println!("    Resources closed: {}", metrics.resources_closed);
    println!(
        "    Checkout success rate: {:.2}%",
        metrics.checkout_success_rate() * 100.0
    );
    println!(
        "    Validations: {} performed, {} failed",
        metrics.validations_performed, metrics.validations_failed
    );
    println!(
        "    Idle evictions: {}, suspected leaks: {}",
        metrics.idle_evictions, metrics.leaks_suspected
    );
}
