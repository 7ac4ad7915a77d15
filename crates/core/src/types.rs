/// Note primary keys are SQLite `INTEGER PRIMARY KEY AUTOINCREMENT` values.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
