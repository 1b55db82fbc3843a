//! Field-level validation errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Form field an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Age,
    Avatar,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Avatar => "avatar",
        };
        f.write_str(name)
    }
}

/// Errors raised when user input breaks a field rule
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Name must be at least {min} characters")]
    NameTooShort { min: usize, actual: usize },

    #[error("Age is required")]
    AgeRequired,

    #[error("Age must be a whole number")]
    AgeNotANumber { input: String },

    #[error("{}", age_floor_message(.min))]
    AgeTooSmall { min: u32, actual: i64 },

    #[error("Avatar URL is required")]
    AvatarRequired,

    #[error("Enter a valid URL")]
    AvatarInvalid { input: String, reason: String },
}

fn age_floor_message(min: &u32) -> String {
    match *min {
        0 => "Age must not be negative".to_string(),
        min => format!("Age must be greater than {}", min - 1),
    }
}

impl ValidationError {
    /// The field this error should be shown next to.
    pub fn field(&self) -> Field {
        match self {
            Self::NameRequired | Self::NameTooShort { .. } => Field::Name,
            Self::AgeRequired | Self::AgeNotANumber { .. } | Self::AgeTooSmall { .. } => {
                Field::Age
            }
            Self::AvatarRequired | Self::AvatarInvalid { .. } => Field::Avatar,
        }
    }
}
