//! Build errors for the store builder.

use crate::core::UserId;
use crate::validation::ValidationError;
use thiserror::Error;

/// Errors that can occur when building a store.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    #[error("Seed user {id} is invalid: {}", join(.errors))]
    InvalidSeed {
        id: UserId,
        errors: Vec<ValidationError>,
    },

    #[error("Seed user id {0} appears more than once")]
    DuplicateSeedId(UserId),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
