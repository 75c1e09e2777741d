pub mod migrations;
pub mod models;
pub mod queries;

pub use queries::CreateUser;

use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// How long a per-request connection waits on SQLite's file lock before
/// giving up with SQLITE_BUSY.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the registry database file.
///
/// Holds only the path. Every operation opens its own connection through
/// [`Database::with_conn`] and closes it before returning, so no connection
/// is ever shared between requests.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection, creating the file if it does not exist yet.
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Run `f` against a connection that lives exactly as long as the call.
    /// The connection is dropped (and closed) on every exit path.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.connect()?;
        f(&conn)
    }

    /// Create the schema and seed the sample users when the table is empty.
    /// Must be called once before the server starts accepting requests.
    /// Returns how many rows were seeded.
    pub fn initialize(&self) -> Result<usize> {
        let seeded = self.with_conn(migrations::run)?;
        info!("Database initialized at {} ({} users seeded)", self.path.display(), seeded);
        Ok(seeded)
    }
}

#[cfg(any(test, feature = "test-util"))]
pub mod test_util {
    use super::Database;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// A database file in the temp dir, removed on drop.
    #[derive(Debug)]
    pub struct TempDb {
        pub db: Database,
        path: PathBuf,
    }

    impl TempDb {
        pub fn new() -> Self {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("system time before UNIX_EPOCH")
                .as_nanos();
            let mut path = std::env::temp_dir();
            path.push(format!(
                "registry-db-test-{}-{}-{}.sqlite",
                std::process::id(),
                nanos,
                COUNTER.fetch_add(1, Ordering::Relaxed)
            ));
            Self { db: Database::new(&path), path }
        }
    }

    impl Default for TempDb {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Drop for TempDb {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
