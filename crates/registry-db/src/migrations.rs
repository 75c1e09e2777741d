use anyhow::Result;
use rusqlite::Connection;
use tracing::{debug, info};

/// Usernames inserted, in this order, into a freshly created table.
pub const SEED_USERNAMES: [&str; 4] = ["toms", "alice", "bob", "charlie"];

pub fn run(conn: &Connection) -> Result<usize> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL UNIQUE,
            created_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        ",
    )?;
    debug!("users table ready");

    seed(conn)
}

/// Insert the sample users if the table has no rows. Runs as one transaction
/// so a failure part-way leaves the table empty and the next start retries.
fn seed(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(0);
    }

    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare("INSERT INTO users (username) VALUES (?1)")?;
        for username in SEED_USERNAMES {
            stmt.execute([username])?;
        }
    }
    tx.commit()?;

    info!("Seeded {} sample users", SEED_USERNAMES.len());
    Ok(SEED_USERNAMES.len())
}
