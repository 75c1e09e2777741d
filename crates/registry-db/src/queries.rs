use crate::Database;
use crate::models::UserRow;
use anyhow::Result;
use rusqlite::ffi;

/// Outcome of an insert. A duplicate username is an expected result, not an
/// error; anything else SQLite rejects is returned as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateUser {
    Created,
    AlreadyExists,
}

impl Database {
    pub fn count_users(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(count)
        })
    }

    /// Exact, case-sensitive lookup.
    pub fn user_exists(&self, username: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)",
                [username],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    pub fn list_users(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, username, created_at FROM users ORDER BY id")?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(UserRow {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn create_user(&self, username: &str) -> Result<CreateUser> {
        self.with_conn(|conn| {
            match conn.execute("INSERT INTO users (username) VALUES (?1)", [username]) {
                Ok(_) => Ok(CreateUser::Created),
                Err(e) if is_unique_violation(&e) => Ok(CreateUser::AlreadyExists),
                Err(e) => Err(e.into()),
            }
        })
    }

    /// Delete by username in a single statement. Returns whether a row was
    /// removed, so concurrent deletes of the same user see exactly one `true`.
    pub fn delete_user(&self, username: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM users WHERE username = ?1", [username])?;
            Ok(removed > 0)
        })
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::TempDb;

    fn empty_db() -> TempDb {
        let tmp = TempDb::new();
        tmp.db.initialize().unwrap();
        tmp.db
            .with_conn(|conn| {
                conn.execute("DELETE FROM users", [])?;
                Ok(())
            })
            .unwrap();
        tmp
    }

    #[test]
    fn empty_table_lists_nothing() {
        let tmp = empty_db();
        assert!(tmp.db.list_users().unwrap().is_empty());
        assert_eq!(tmp.db.count_users().unwrap(), 0);
    }

    #[test]
    fn duplicate_insert_is_reported() {
        let tmp = empty_db();
        assert_eq!(tmp.db.create_user("dave").unwrap(), CreateUser::Created);
        assert_eq!(tmp.db.create_user("dave").unwrap(), CreateUser::AlreadyExists);

        let daves = tmp
            .db
            .list_users()
            .unwrap()
            .into_iter()
            .filter(|u| u.username == "dave")
            .count();
        assert_eq!(daves, 1);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let tmp = TempDb::new();
        tmp.db.initialize().unwrap();
        assert!(tmp.db.user_exists("alice").unwrap());
        assert!(!tmp.db.user_exists("Alice").unwrap());
        assert_eq!(tmp.db.create_user("Alice").unwrap(), CreateUser::Created);
    }

    #[test]
    fn delete_reports_whether_a_row_went() {
        let tmp = TempDb::new();
        tmp.db.initialize().unwrap();
        assert!(tmp.db.delete_user("bob").unwrap());
        assert!(!tmp.db.delete_user("bob").unwrap());
        assert!(!tmp.db.user_exists("bob").unwrap());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let tmp = TempDb::new();
        tmp.db.initialize().unwrap();
        tmp.db.delete_user("charlie").unwrap();
        tmp.db.create_user("dave").unwrap();

        let last = tmp.db.list_users().unwrap().pop().unwrap();
        assert_eq!(last.username, "dave");
        assert_eq!(last.id, 5);
    }

    #[test]
    fn created_at_uses_sqlite_timestamp_format() {
        let tmp = TempDb::new();
        tmp.db.initialize().unwrap();
        let row = &tmp.db.list_users().unwrap()[0];
        // YYYY-MM-DD HH:MM:SS
        assert_eq!(row.created_at.len(), 19);
        assert_eq!(&row.created_at[10..11], " ");
    }
}
