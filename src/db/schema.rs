//! SQL DDL for initializing the flatshare storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `flats.flat_name` UNIQUE so concurrent signups cannot both win
/// - `password` holding an Argon2id PHC string
/// - `members` unique per `(flat_id, member_name)`
/// - `bills.created_time` assigned by the store
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS flats (
    flat_id INTEGER PRIMARY KEY AUTOINCREMENT,
    flat_name TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    country TEXT NULL
);

CREATE TABLE IF NOT EXISTS members (
    member_id INTEGER PRIMARY KEY AUTOINCREMENT,
    member_name TEXT NOT NULL,
    flat_id INTEGER NOT NULL REFERENCES flats(flat_id),
    UNIQUE (flat_id, member_name)
);

CREATE TABLE IF NOT EXISTS bills (
    bill_id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT NOT NULL,
    amount INTEGER NOT NULL,
    created_time TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
    member_id INTEGER NOT NULL REFERENCES members(member_id)
);

CREATE INDEX IF NOT EXISTS idx_bills_member_id ON bills(member_id);
"#;
