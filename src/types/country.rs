use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlatshareError;

/// Locations a flat can pick; each maps to the currency symbol shown next to amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Uk,
    Cn,
}

impl Country {
    pub const ALL: [Country; 2] = [Country::Uk, Country::Cn];

    pub fn code(self) -> &'static str {
        match self {
            Country::Uk => "uk",
            Country::Cn => "cn",
        }
    }

    pub fn currency(self) -> &'static str {
        match self {
            Country::Uk => "\u{00A3}",
            Country::Cn => "\u{00A5}",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = FlatshareError;

    /// Codes are matched exactly; anything else is rejected before it reaches storage.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Country::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| FlatshareError::UnrecognizedCountryCode(s.to_string()))
    }
}
