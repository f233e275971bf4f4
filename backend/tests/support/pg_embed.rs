//! Embedded PostgreSQL databases for the Diesel adapter tests.
//!
//! Every test gets a fresh temporary database on one shared cluster.
//! `pg-embed-setup-unpriv` installs under `/var/tmp` by default, so when
//! `PG_RUNTIME_DIR` or `PG_DATA_DIR` is missing both are pointed into the
//! target directory for the duration of the bootstrap.
//!
//! Set `SKIP_TEST_CLUSTER=1` where the cluster cannot start.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use uuid::Uuid;

static PG_EMBED_BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn pg_embed_target_dir() -> PathBuf {
    if let Some(target_dir) = std::env::var_os("CARGO_TARGET_DIR") {
        return PathBuf::from(target_dir).join("pg-embed");
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("pg-embed")
}

fn create_unique_pg_embed_dirs() -> Result<(PathBuf, PathBuf), std::io::Error> {
    let base = pg_embed_target_dir().join(format!(
        "bootstrap-{}-{}",
        std::process::id(),
        Uuid::new_v4()
    ));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((runtime_dir, data_dir))
}

/// Create an empty temporary database on the shared cluster.
pub fn temporary_database() -> Result<TemporaryDatabase, String> {
    let cluster = {
        let _bootstrap_guard = PG_EMBED_BOOTSTRAP_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());

        let needs_override = std::env::var_os("PG_RUNTIME_DIR").is_none()
            || std::env::var_os("PG_DATA_DIR").is_none();
        let _env_guard = if needs_override {
            let (runtime_dir, data_dir) =
                create_unique_pg_embed_dirs().map_err(|err| err.to_string())?;
            Some(env_lock::lock_env([
                ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
                ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
            ]))
        } else {
            None
        };

        shared_cluster_handle().map_err(|err| format!("{err:?}"))?
    };

    cluster
        .temporary_database(format!("test_{}", Uuid::new_v4()))
        .map_err(|err| format!("{err:?}"))
}

/// Whether `SKIP_TEST_CLUSTER` holds a truthy value (`1`, `true`, `yes`).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when `SKIP_TEST_CLUSTER` is set, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
