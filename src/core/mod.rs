//! Stateless services over ledger snapshots plus the tracker facade that
//! binds them to a persistence backend and a clock.

pub mod services;
pub mod time;
pub mod tracker;

pub use time::{Clock, SystemClock};
pub use tracker::ExpenseTracker;
