//! Roster: a pure functional user-list store
//!
//! Roster follows a "pure core, imperative shell" layout. Every state
//! change is a pure function from (state, command) to a new state; the
//! store wrapped around those functions only serializes dispatches,
//! publishes snapshots and notifies subscribers.
//!
//! # Core Concepts
//!
//! - **Commands**: a closed set of typed commands (`AddUser`, `RemoveUser`,
//!   `EditUser`, `Increment`, `Decrement`, `AddFixed`)
//! - **State**: the user list and a counter, each with a total transition
//!   function
//! - **Snapshot**: the immutable value published after every applied command
//! - **Validation**: field rules checked before a command is ever built
//!
//! # Example
//!
//! ```rust
//! use roster::command::Command;
//! use roster::core::{Outcome, UserId, UserRecord};
//! use roster::store::AppStore;
//!
//! let store = AppStore::default();
//!
//! store.dispatch(Command::add_user(UserRecord::new(1, "Ann", 30, "http://x/a.png")));
//! store.dispatch(Command::add_user(UserRecord::new(2, "Bob", 25, "http://x/b.png")));
//! store.dispatch(Command::edit_user(UserRecord::new(1, "Annie", 31, "http://x/a.png")));
//!
//! let removed = store.dispatch(Command::remove_user(UserId(2)));
//! assert_eq!(removed.outcome, Outcome::Applied);
//!
//! let missing = store.dispatch(Command::remove_user(UserId(2)));
//! assert_eq!(missing.outcome, Outcome::NoMatch);
//!
//! let names: Vec<_> = store.users().iter().map(|u| u.name.clone()).collect();
//! assert_eq!(names, ["Annie"]);
//! ```

pub mod builder;
pub mod command;
pub mod core;
pub mod form;
pub mod ids;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, StoreBuilder};
pub use command::{Command, CounterCommand, UserCommand, WireError};
pub use crate::core::{CounterState, Outcome, State, Transition, UserId, UserListState, UserRecord};
pub use form::{FormController, FormError, FormMode};
pub use ids::{ClockIds, IdGenerator, RandomIds, SequentialIds};
pub use store::{AppStore, Dispatched, Snapshot, SubscriptionId};
pub use validation::{UserDraft, ValidationError, ValidationRules};
