pub mod flat_ops;
pub mod ledger;
pub mod password;
