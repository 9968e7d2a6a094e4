//! Stored row types for the bounty economy

mod account;
mod crew;
mod loan;
mod outbox;
mod tax_event;

pub use account::*;
pub use crew::*;
pub use loan::*;
pub use outbox::*;
pub use tax_event::*;

/// Minimal entity contract: a table name and a primary row id
pub trait Entity {
    const TABLE: &'static str;

    fn id(&self) -> &str;
}
