pub mod catalog;
pub mod ledger;
pub mod query;
pub mod stats;
