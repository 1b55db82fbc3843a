//! The imperative shell around the pure core.
//!
//! [`AppStore`] holds the current [`Snapshot`], applies commands through
//! the pure transitions in [`crate::core`], publishes the result and
//! notifies subscribers.
//!
//! # Example
//!
//! ```rust
//! use roster::command::Command;
//! use roster::core::UserRecord;
//! use roster::store::AppStore;
//!
//! let store = AppStore::default();
//! store.dispatch(Command::add_user(UserRecord::new(1, "Ann", 30, "http://x/a.png")));
//!
//! assert_eq!(store.snapshot().users.len(), 1);
//! ```

mod snapshot;
mod store;

pub use snapshot::Snapshot;
pub use store::{AppStore, Dispatched, SubscriptionId};
