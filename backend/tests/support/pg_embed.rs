//! Embedded PostgreSQL bootstrap for executor integration tests.
//!
//! All suites in one test binary share a single cluster; each test gets its
//! own database so procedure definitions never collide. Set
//! `SKIP_TEST_CLUSTER=1` where the cluster cannot start (no network for the
//! binary download, sandboxed `/var/tmp`).

use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;
use uuid::Uuid;

const SHARED_CLUSTER_RETRIES: usize = 5;
const SHARED_CLUSTER_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip marker when skipping is allowed, otherwise a loud failure.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Keeps the superuser password stable when a data directory is reused by a
/// later test binary; `initdb` only runs the first time.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster bootstrap spawns any threads.
        unsafe {
            std::env::set_var("PG_PASSWORD", "clinica_embedded_test");
        }
    }
}

/// Process-wide cluster handle, retrying transient bootstrap failures.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt >= SHARED_CLUSTER_RETRIES => return Err(format!("{error:?}")),
            Err(_) => {
                std::thread::sleep(SHARED_CLUSTER_RETRY_DELAY);
                attempt += 1;
            }
        }
    }
}

/// Creates an empty database and returns its connection URL.
pub fn fresh_database(cluster: &ClusterHandle) -> Result<String, String> {
    let name = format!("clinica_{}", Uuid::new_v4().simple());
    cluster
        .create_database(name.as_str())
        .map_err(|err| format!("create database {name}: {err:?}"))?;
    Ok(cluster.connection().database_url(&name))
}

/// Renders a driver error with SQLSTATE and detail for CI logs.
pub fn format_postgres_error(error: &tokio_postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(where_) = db_error.where_() {
        summary.push_str("; where: ");
        summary.push_str(where_);
    }
    summary
}
