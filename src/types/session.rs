use serde::{Deserialize, Serialize};

use crate::types::country::Country;

/// Identity copied into the session cookie at login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatSession {
    pub flat_id: i64,
    pub flat_name: String,
    pub country: Option<Country>,
}

impl FlatSession {
    pub fn currency(&self) -> Option<&'static str> {
        self.country.map(Country::currency)
    }
}
