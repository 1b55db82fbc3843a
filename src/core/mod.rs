//! Core store state and transition logic.
//!
//! This module contains the pure functional core of the store:
//! - The `State` trait tying a state type to its commands
//! - The user list and counter states
//! - `Transition` / `Outcome` describing what a command did
//!
//! All logic in this module is pure (no side effects). Locking, logging
//! and subscriber notification live in [`crate::store`].

mod counter;
mod state;
mod user;

pub use counter::{CounterState, FIXED_INCREMENT};
pub use state::{Outcome, State, Transition};
pub use user::{UserId, UserListState, UserRecord};
