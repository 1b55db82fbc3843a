//! Raw form input awaiting validation.

use crate::core::UserRecord;
use serde::{Deserialize, Serialize};

/// Text exactly as typed into the user form.
///
/// Every field is a string, including `age`; parsing happens during
/// validation so that a bad number is reported like any other field error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub age: String,
    pub avatar: String,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, age: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            avatar: avatar.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.age.is_empty() && self.avatar.is_empty()
    }
}

impl From<&UserRecord> for UserDraft {
    /// Pre-fill a draft from an existing record, for editing.
    fn from(record: &UserRecord) -> Self {
        Self {
            name: record.name.clone(),
            age: record.age.to_string(),
            avatar: record.avatar.clone(),
        }
    }
}
