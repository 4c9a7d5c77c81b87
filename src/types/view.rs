//! Page documents returned by every handler. A template layer renders these;
//! the server itself only emits them as JSON.

use serde::Serialize;

use crate::db::models::{BillEntry, DbMember};
use crate::types::country::Country;
use crate::types::session::FlatSession;

pub const NO_MEMBERS_ADVISORY: &str = "Please add a member in manage page first";

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub view: &'static str,
    pub session: Option<SessionView>,
    pub flashes: Vec<String>,
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub flat_name: String,
    pub country: Option<Country>,
    pub currency: Option<&'static str>,
}

impl From<&FlatSession> for SessionView {
    fn from(s: &FlatSession) -> Self {
        Self {
            flat_name: s.flat_name.clone(),
            country: s.country,
            currency: s.currency(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BillsView {
    pub members: Vec<DbMember>,
    pub bills: Vec<BillEntry>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct CountryOption {
    pub code: &'static str,
    pub currency: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ManageView {
    pub members: Vec<DbMember>,
    pub member_number: usize,
    pub countries: Vec<CountryOption>,
}

impl ManageView {
    pub fn new(members: Vec<DbMember>) -> Self {
        let countries = Country::ALL
            .into_iter()
            .map(|c| CountryOption {
                code: c.code(),
                currency: c.currency(),
            })
            .collect();
        Self {
            member_number: members.len(),
            members,
            countries,
        }
    }
}
