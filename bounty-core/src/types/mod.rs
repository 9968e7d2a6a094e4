//! Core type definitions for the bounty economy
//!
//! All types follow these naming conventions:
//! - snake_case for field names
//! - *_id suffix for primary keys
//! - *_percentage suffix for integer percentages (0..=100)
//! - amounts are signed integer currency units

mod account;
mod crew;
mod loan;
mod tax;

pub use account::*;
pub use crew::*;
pub use loan::*;
pub use tax::*;
