//! Ledger interfaces for the bounty economy
//!
//! The bounty ledger is the single choke-point every balance mutation
//! passes through. External game subsystems (combat, plunder,
//! gambling, gifting, loans, prediction markets) only ever call
//! `BountyLedger::apply`; taxation, deductions, audit, garnishment and
//! crew revenue sharing happen behind it in a fixed order.

mod bounty;

pub use bounty::*;

use async_trait::async_trait;

/// Ledger query options
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub limit: Option<u32>,
    pub order_desc: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        // Newest first unless the caller asks otherwise
        Self {
            limit: None,
            order_desc: true,
        }
    }
}

/// Base trait for all ledger implementations
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Get the ledger name
    fn name(&self) -> &'static str;
}
