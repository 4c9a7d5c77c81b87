use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::types::country::Country;

#[derive(Debug, Clone, FromRow)]
pub struct DbFlat {
    pub flat_id: i64,
    pub flat_name: String,
    pub password: String,
    pub country: Option<String>,
}

impl DbFlat {
    /// Codes written before input validation existed decode as unset.
    pub fn country(&self) -> Option<Country> {
        self.country.as_deref().and_then(|c| c.parse().ok())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct DbMember {
    pub member_id: i64,
    pub member_name: String,
    pub flat_id: i64,
}

/// A bill joined with the name of the member who paid it.
#[derive(Debug, Clone, Serialize, PartialEq, FromRow)]
pub struct BillEntry {
    pub bill_id: i64,
    pub content: String,
    pub amount: i64,
    pub created_time: NaiveDateTime,
    pub member_id: i64,
    pub member_name: String,
}
