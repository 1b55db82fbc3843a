//! Form controller sitting between user input and the store.
//!
//! The controller owns the in-progress [`UserDraft`](crate::validation::UserDraft),
//! knows whether it is creating or editing, and turns a successful submit
//! into an AddUser or EditUser command.

mod controller;
mod error;

pub use controller::{FormController, FormMode};
pub use error::FormError;
