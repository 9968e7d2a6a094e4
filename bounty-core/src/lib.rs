//! Bounty Core - Ledger types and taxation engine
//!
//! This crate provides the core types and interfaces for the bounty
//! economy. Every balance mutation in the game flows through the
//! `BountyLedger` contract defined here:
//! - Progressive (marginal) taxation across lifetime-gain brackets
//! - Stacked percentage deductions that never exceed 100%
//! - Loan garnishment planning for expired loans
//! - Crew chest revenue sharing and contest attribution
//!
//! Pure calculation lives in this crate; persistence and the service
//! implementations live in `bounty-db`.

pub mod config;
pub mod constants;
pub mod deduction;
pub mod error;
pub mod garnish;
pub mod ledger;
pub mod logging;
pub mod tax;
pub mod types;

pub use config::EconomyConfig;
pub use constants::*;
pub use error::*;
pub use tax::TaxSchedule;
pub use types::*;
