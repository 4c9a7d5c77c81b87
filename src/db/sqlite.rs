use crate::db::models::{BillEntry, DbFlat, DbMember};
use crate::db::schema::SQLITE_INIT;
use crate::error::FlatshareError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct FlatStore {
    pool: SqlitePool,
}

impl FlatStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `database_url` and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self, FlatshareError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        if let Some(parent) = connect_opts.get_filename().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), FlatshareError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a new flat with no country. Returns the flat id.
    pub async fn create_flat(
        &self,
        flat_name: &str,
        password_hash: &str,
    ) -> Result<i64, FlatshareError> {
        let rec: (i64,) = sqlx::query_as(
            "INSERT INTO flats (flat_name, password) VALUES (?, ?) RETURNING flat_id",
        )
        .bind(flat_name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_or(e, FlatshareError::DuplicateFlatName))?;
        Ok(rec.0)
    }

    pub async fn find_flat(&self, flat_name: &str) -> Result<Option<DbFlat>, FlatshareError> {
        let flat = sqlx::query_as::<_, DbFlat>(
            "SELECT flat_id, flat_name, password, country FROM flats WHERE flat_name = ?",
        )
        .bind(flat_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(flat)
    }

    pub async fn set_country(&self, flat_id: i64, country: &str) -> Result<(), FlatshareError> {
        sqlx::query("UPDATE flats SET country = ? WHERE flat_id = ?")
            .bind(country)
            .bind(flat_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list_members(&self, flat_id: i64) -> Result<Vec<DbMember>, FlatshareError> {
        let members = sqlx::query_as::<_, DbMember>(
            "SELECT member_id, member_name, flat_id FROM members WHERE flat_id = ? ORDER BY member_id",
        )
        .bind(flat_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    /// Insert a member; the `(flat_id, member_name)` index rejects duplicates.
    pub async fn add_member(
        &self,
        flat_id: i64,
        member_name: &str,
    ) -> Result<DbMember, FlatshareError> {
        let member = sqlx::query_as::<_, DbMember>(
            r#"INSERT INTO members (member_name, flat_id) VALUES (?, ?)
               RETURNING member_id, member_name, flat_id"#,
        )
        .bind(member_name)
        .bind(flat_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_or(e, FlatshareError::DuplicateMemberName))?;
        Ok(member)
    }

    /// Insert a bill for `member_id` only if that member belongs to `flat_id`.
    /// Returns the new bill id.
    pub async fn add_bill(
        &self,
        flat_id: i64,
        content: &str,
        amount: i64,
        member_id: i64,
    ) -> Result<i64, FlatshareError> {
        let rec: Option<(i64,)> = sqlx::query_as(
            r#"INSERT INTO bills (content, amount, member_id)
               SELECT ?, ?, member_id FROM members WHERE member_id = ? AND flat_id = ?
               RETURNING bill_id"#,
        )
        .bind(content)
        .bind(amount)
        .bind(member_id)
        .bind(flat_id)
        .fetch_optional(&self.pool)
        .await?;
        rec.map(|r| r.0).ok_or(FlatshareError::UnknownMember)
    }

    /// Bills of every member in the flat, newest first.
    pub async fn list_bills(&self, flat_id: i64) -> Result<Vec<BillEntry>, FlatshareError> {
        let bills = sqlx::query_as::<_, BillEntry>(
            r#"SELECT bills.bill_id, bills.content, bills.amount, bills.created_time,
                      bills.member_id, members.member_name
               FROM bills INNER JOIN members ON bills.member_id = members.member_id
               WHERE members.flat_id = ?
               ORDER BY bills.bill_id DESC"#,
        )
        .bind(flat_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(bills)
    }

    /// Delete every bill owned by a member of the flat. Returns rows removed.
    pub async fn clear_bills(&self, flat_id: i64) -> Result<u64, FlatshareError> {
        let res = sqlx::query(
            "DELETE FROM bills WHERE member_id IN (SELECT member_id FROM members WHERE flat_id = ?)",
        )
        .bind(flat_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }

    /// Delete the flat's bills and then its members in a single transaction.
    pub async fn reset_flat(&self, flat_id: i64) -> Result<(), FlatshareError> {
        let mut tx = self.pool.begin().await?;

        let bills = sqlx::query(
            "DELETE FROM bills WHERE member_id IN (SELECT member_id FROM members WHERE flat_id = ?)",
        )
        .bind(flat_id)
        .execute(&mut *tx)
        .await?;

        let members = sqlx::query("DELETE FROM members WHERE flat_id = ?")
            .bind(flat_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(
            flat_id,
            bills = bills.rows_affected(),
            members = members.rows_affected(),
            "flat reset"
        );
        Ok(())
    }
}

fn unique_or(e: sqlx::Error, duplicate: FlatshareError) -> FlatshareError {
    match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => duplicate,
        other => FlatshareError::DatabaseError(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    async fn temp_store(tag: &str) -> (FlatStore, std::path::PathBuf) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "flatshare-store-{tag}-{}-{nanos}.sqlite",
            std::process::id()
        ));
        let store = FlatStore::connect(&format!("sqlite:{}", path.display()))
            .await
            .expect("failed to open store");
        (store, path)
    }

    #[tokio::test]
    async fn duplicate_flat_name_hits_unique_index() {
        let (store, path) = temp_store("dupflat").await;
        store.create_flat("A", "hash").await.unwrap();
        let err = store.create_flat("A", "other").await.unwrap_err();
        assert!(matches!(err, FlatshareError::DuplicateFlatName));
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn member_names_are_unique_per_flat_only() {
        let (store, path) = temp_store("dupmember").await;
        let a = store.create_flat("A", "h").await.unwrap();
        let b = store.create_flat("B", "h").await.unwrap();

        store.add_member(a, "Alice").await.unwrap();
        let err = store.add_member(a, "Alice").await.unwrap_err();
        assert!(matches!(err, FlatshareError::DuplicateMemberName));

        // case-sensitive, and scoped to the flat
        store.add_member(a, "alice").await.unwrap();
        store.add_member(b, "Alice").await.unwrap();
        assert_eq!(store.list_members(a).await.unwrap().len(), 2);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn bills_are_scoped_to_the_flat() {
        let (store, path) = temp_store("scope").await;
        let a = store.create_flat("A", "h").await.unwrap();
        let b = store.create_flat("B", "h").await.unwrap();
        let alice = store.add_member(a, "Alice").await.unwrap();
        let bob = store.add_member(b, "Bob").await.unwrap();

        store.add_bill(a, "rent", 30, alice.member_id).await.unwrap();
        let err = store.add_bill(a, "sneaky", 5, bob.member_id).await.unwrap_err();
        assert!(matches!(err, FlatshareError::UnknownMember));

        assert_eq!(store.list_bills(a).await.unwrap().len(), 1);
        assert!(store.list_bills(b).await.unwrap().is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn bills_list_newest_first() {
        let (store, path) = temp_store("order").await;
        let a = store.create_flat("A", "h").await.unwrap();
        let alice = store.add_member(a, "Alice").await.unwrap();
        store.add_bill(a, "first", 1, alice.member_id).await.unwrap();
        store.add_bill(a, "second", 2, alice.member_id).await.unwrap();

        let bills = store.list_bills(a).await.unwrap();
        let contents: Vec<_> = bills.iter().map(|b| b.content.as_str()).collect();
        assert_eq!(contents, ["second", "first"]);
        assert_eq!(bills[0].member_name, "Alice");
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn clear_keeps_members_and_reset_removes_them() {
        let (store, path) = temp_store("reset").await;
        let a = store.create_flat("A", "h").await.unwrap();
        let alice = store.add_member(a, "Alice").await.unwrap();
        store.add_bill(a, "rent", 30, alice.member_id).await.unwrap();

        assert_eq!(store.clear_bills(a).await.unwrap(), 1);
        assert!(store.list_bills(a).await.unwrap().is_empty());
        assert_eq!(store.list_members(a).await.unwrap().len(), 1);

        store.add_bill(a, "food", 12, alice.member_id).await.unwrap();
        store.reset_flat(a).await.unwrap();
        assert!(store.list_bills(a).await.unwrap().is_empty());
        assert!(store.list_members(a).await.unwrap().is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn country_round_trips_through_flat_row() {
        let (store, path) = temp_store("country").await;
        let a = store.create_flat("A", "h").await.unwrap();
        let flat = store.find_flat("A").await.unwrap().unwrap();
        assert_eq!(flat.country(), None);

        store.set_country(a, "cn").await.unwrap();
        let flat = store.find_flat("A").await.unwrap().unwrap();
        assert_eq!(flat.country, Some("cn".to_string()));
        assert!(store.find_flat("missing").await.unwrap().is_none());
        let _ = std::fs::remove_file(&path);
    }
}
