//! Pure domain models: expenses, the ledger, goals, profile, and badges.
//! No I/O, no storage. Only data types and core invariants.

pub mod badge;
pub mod expense;
pub mod goal;
pub mod ledger;
pub mod profile;

pub use badge::*;
pub use expense::*;
pub use goal::*;
pub use ledger::*;
pub use profile::*;
