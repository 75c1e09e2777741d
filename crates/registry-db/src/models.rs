/// A row of the `users` table as SQLite returns it.
/// `created_at` is left in SQLite's `YYYY-MM-DD HH:MM:SS` form; the API layer
/// converts it to a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub created_at: String,
}
