//! User records and the user list state.

use super::state::{State, Transition};
use crate::command::UserCommand;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a user record.
///
/// Serialized as a bare integer.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A single user entry.
///
/// Records reaching the store are expected to be validated already; the
/// store itself never inspects the field values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub age: u32,
    pub avatar: String,
}

impl UserRecord {
    pub fn new(id: u64, name: impl Into<String>, age: u32, avatar: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            name: name.into(),
            age,
            avatar: avatar.into(),
        }
    }

    /// Same record under a different id.
    pub fn with_id(self, id: UserId) -> Self {
        Self { id, ..self }
    }
}

/// Ordered list of user records.
///
/// Insertion order is kept; edits replace in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListState {
    pub users: Vec<UserRecord>,
}

impl UserListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_users(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    /// First record with the given id.
    pub fn find(&self, id: UserId) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.users.iter()
    }

    /// Append a record. Duplicate ids are kept.
    pub fn add(&self, record: UserRecord) -> Transition<Self> {
        let mut users = Vec::with_capacity(self.users.len() + 1);
        users.extend(self.users.iter().cloned());
        users.push(record);
        Transition::applied(Self { users })
    }

    /// Drop every record carrying `id`.
    pub fn remove(&self, id: UserId) -> Transition<Self> {
        if !self.contains(id) {
            return Transition::no_match(self.clone());
        }

        let users = self
            .users
            .iter()
            .filter(|user| user.id != id)
            .cloned()
            .collect();
        Transition::applied(Self { users })
    }

    /// Replace every record carrying `record.id`, keeping positions.
    pub fn edit(&self, record: UserRecord) -> Transition<Self> {
        if !self.contains(record.id) {
            return Transition::no_match(self.clone());
        }

        let users = self
            .users
            .iter()
            .map(|user| {
                if user.id == record.id {
                    record.clone()
                } else {
                    user.clone()
                }
            })
            .collect();
        Transition::applied(Self { users })
    }
}

impl State for UserListState {
    type Command = UserCommand;

    fn name(&self) -> &str {
        "users"
    }

    fn apply(&self, command: &UserCommand) -> Transition<Self> {
        match command {
            UserCommand::AddUser(record) => self.add(record.clone()),
            UserCommand::RemoveUser(id) => self.remove(*id),
            UserCommand::EditUser(record) => self.edit(record.clone()),
        }
    }
}
