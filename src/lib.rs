//! Custodial savings ledger with a CSV replay front end.

pub mod config;
pub mod dlq;
pub mod domain;
pub mod engine;
pub mod ingestion;
pub mod ledger;
pub mod network;
pub mod store;

pub use ledger::Ledger;
pub use network::Network;
pub use store::InMemoryStore;
