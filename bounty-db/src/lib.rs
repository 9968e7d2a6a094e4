//! Bounty Ledger persistence and services
//!
//! Storage entities, repositories and the transaction-processing
//! services behind the `bounty_core::ledger` contracts. The bundled
//! backend is an in-memory store with unit-of-work semantics; the
//! repository seam is where a SQL backend would plug in.

pub mod entities;
pub mod error;
pub mod repos;
pub mod services;
pub mod store;

pub use error::{BountyDbError, BountyDbResult};
pub use services::{ContestContributionWorker, LedgerService};
pub use store::{MemoryStore, UnitOfWork};
