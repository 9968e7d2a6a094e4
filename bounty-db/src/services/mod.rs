//! Ledger services
//!
//! `LedgerService` is the transaction processor external callers use;
//! the audit, crew chest and loan services are its injected
//! collaborators and stage their writes into the same unit of work.
//! `ContestContributionWorker` drains the outbox after commit.

mod contest_service;
mod crew_service;
mod ledger_service;
mod loan_service;
mod tax_audit_service;

pub use contest_service::ContestContributionWorker;
pub use crew_service::{CrewChest, CrewChestService};
pub use ledger_service::LedgerService;
pub use loan_service::{LoanBook, LoanService};
pub use tax_audit_service::{TaxAudit, TaxAuditService};
