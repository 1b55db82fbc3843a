//! Validation-based checks for user form input.
//!
//! Input is validated before any command reaches the store. This module
//! uses Stillwater's `Validation` type to accumulate ALL field errors
//! instead of stopping at the first one, so a form can show every
//! message in a single pass.
//!
//! # Example
//!
//! ```rust
//! use roster::core::UserId;
//! use roster::validation::{UserDraft, ValidationRules};
//!
//! let rules = ValidationRules::default();
//! let draft = UserDraft::new("Bo", "", "not a url");
//!
//! let check = rules.validate(&draft, UserId(1));
//! assert!(check.is_failure());
//! ```

pub mod builder;
pub mod draft;
pub mod errors;
pub mod rules;

use std::collections::BTreeMap;

// Re-export commonly used types
pub use builder::ValidationRulesBuilder;
pub use draft::UserDraft;
pub use errors::{Field, ValidationError};
pub use rules::{FieldCheck, ValidationRules};

/// Group errors by the field they belong to, keeping their order.
pub fn errors_by_field<'a, I>(errors: I) -> BTreeMap<Field, Vec<ValidationError>>
where
    I: IntoIterator<Item = &'a ValidationError>,
{
    let mut grouped: BTreeMap<Field, Vec<ValidationError>> = BTreeMap::new();
    for error in errors {
        grouped.entry(error.field()).or_default().push(error.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_grouped_per_field() {
        let errors = vec![
            ValidationError::AgeRequired,
            ValidationError::NameRequired,
            ValidationError::AvatarRequired,
        ];

        let grouped = errors_by_field(&errors);

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[&Field::Age], vec![ValidationError::AgeRequired]);
        assert_eq!(grouped[&Field::Name], vec![ValidationError::NameRequired]);
    }
}
