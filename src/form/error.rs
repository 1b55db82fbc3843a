//! Form controller errors.

use crate::core::UserId;
use crate::validation::{errors_by_field, Field, ValidationError};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors surfaced to the person filling in the form.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormError {
    /// One or more fields failed validation; nothing was dispatched
    #[error("Form has {} invalid field(s)", .errors.len())]
    Invalid { errors: Vec<ValidationError> },

    /// Edit requested for a user that is not in the list
    #[error("No user with id {0}")]
    UnknownUser(UserId),
}

impl FormError {
    /// Field-level messages, for rendering next to each input.
    pub fn field_errors(&self) -> BTreeMap<Field, Vec<ValidationError>> {
        match self {
            Self::Invalid { errors } => errors_by_field(errors),
            Self::UnknownUser(_) => BTreeMap::new(),
        }
    }
}
