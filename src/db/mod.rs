//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: `FlatStore`, the query layer over a sqlx pool

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{BillEntry, DbFlat, DbMember};
pub use schema::SQLITE_INIT;
pub use sqlite::{FlatStore, SqlitePool};
