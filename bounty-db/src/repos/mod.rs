//! Read/registration repositories over the datastore
//!
//! Repositories serve reads and row registration outside the unit of
//! work; everything the ledger mutates during `apply` flows through
//! `UnitOfWork` instead.

mod account_repo;
mod crew_repo;
mod loan_repo;
mod outbox_repo;
mod tax_event_repo;

pub use account_repo::AccountRepo;
pub use crew_repo::CrewRepo;
pub use loan_repo::LoanRepo;
pub use outbox_repo::OutboxRepo;
pub use tax_event_repo::TaxEventRepo;
