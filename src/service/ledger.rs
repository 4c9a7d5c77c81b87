use std::collections::HashMap;

use serde::Serialize;

use crate::db::models::{BillEntry, DbMember};
use crate::error::FlatshareError;

/// Largest single bill accepted. Millions of such bills still sum inside `i64`.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Parse a bill amount. Only non-empty runs of ASCII digits up to
/// [`MAX_AMOUNT`] are accepted.
pub fn parse_amount(raw: &str) -> Result<i64, FlatshareError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FlatshareError::InvalidAmount);
    }
    match raw.parse::<i64>() {
        Ok(amount) if amount <= MAX_AMOUNT => Ok(amount),
        _ => Err(FlatshareError::InvalidAmount),
    }
}

/// Sum of amounts, saturating so rows stored before the cap cannot wrap.
pub fn bills_total(bills: &[BillEntry]) -> i64 {
    bills.iter().fold(0i64, |acc, b| acc.saturating_add(b.amount))
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MemberBalance {
    pub member_id: i64,
    pub member_name: String,
    pub paid: i64,
    /// Positive when the member paid more than an even share.
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Analysis {
    pub results: Vec<MemberBalance>,
    pub total: i64,
    pub average: f64,
}

/// Compare what each member paid against an even split of the flat total.
///
/// With no members the average degenerates to the total and no balances are
/// produced.
pub fn analyze(members: &[DbMember], bills: &[BillEntry]) -> Analysis {
    let mut paid: HashMap<i64, i64> = HashMap::with_capacity(members.len());
    for bill in bills {
        let sum = paid.entry(bill.member_id).or_default();
        *sum = sum.saturating_add(bill.amount);
    }
    let total = bills_total(bills);

    let average = if members.is_empty() {
        total as f64
    } else {
        round2(total as f64 / members.len() as f64)
    };

    let results = members
        .iter()
        .map(|m| {
            let member_paid = paid.get(&m.member_id).copied().unwrap_or(0);
            MemberBalance {
                member_id: m.member_id,
                member_name: m.member_name.clone(),
                paid: member_paid,
                balance: round2(member_paid as f64 - average),
            }
        })
        .collect();

    Analysis {
        results,
        total,
        average,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
