//! Typed commands accepted by the store.
//!
//! Commands form a closed set: user-list commands and counter commands.
//! On the wire each command is an object with a `type` tag and a
//! `payload`:
//!
//! ```json
//! {"type": "ADD_USER", "payload": {"id": 1, "name": "Ann", "age": 30, "avatar": "http://x/a.png"}}
//! {"type": "REMOVE_USER", "payload": 1}
//! {"type": "HUNDRED"}
//! ```
//!
//! `HUNDRED` may omit its payload. Unknown tags fail to decode instead of
//! being ignored.

mod error;

pub use error::WireError;

use crate::core::{UserId, UserRecord};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Commands for the user list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserCommand {
    /// Append a record to the end of the list.
    AddUser(UserRecord),

    /// Remove every record with this id.
    RemoveUser(UserId),

    /// Replace the record with the same id.
    EditUser(UserRecord),
}

/// Commands for the counter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterCommand {
    Increment(i64),
    Decrement(i64),

    /// Add [`crate::core::FIXED_INCREMENT`]. The payload is ignored and
    /// may be left out on the wire.
    #[serde(rename = "HUNDRED")]
    AddFixed(i64),
}

#[derive(Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum CounterKind {
    Increment,
    Decrement,
    #[serde(rename = "HUNDRED")]
    AddFixed,
}

#[derive(Deserialize)]
struct RawCounterCommand {
    #[serde(rename = "type")]
    kind: CounterKind,
    #[serde(default)]
    payload: Option<i64>,
}

impl<'de> Deserialize<'de> for CounterCommand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawCounterCommand { kind, payload } = RawCounterCommand::deserialize(deserializer)?;
        match (kind, payload) {
            (CounterKind::Increment, Some(amount)) => Ok(Self::Increment(amount)),
            (CounterKind::Decrement, Some(amount)) => Ok(Self::Decrement(amount)),
            (CounterKind::AddFixed, payload) => Ok(Self::AddFixed(payload.unwrap_or_default())),
            (CounterKind::Increment | CounterKind::Decrement, None) => {
                Err(D::Error::missing_field("payload"))
            }
        }
    }
}

/// Any command the store can dispatch.
///
/// Decoding looks at the `type` tag first, so an unknown or missing tag
/// is reported as such rather than as a payload mismatch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Command {
    User(UserCommand),
    Counter(CounterCommand),
}

impl Command {
    pub fn add_user(record: UserRecord) -> Self {
        Self::User(UserCommand::AddUser(record))
    }

    pub fn remove_user(id: UserId) -> Self {
        Self::User(UserCommand::RemoveUser(id))
    }

    pub fn edit_user(record: UserRecord) -> Self {
        Self::User(UserCommand::EditUser(record))
    }

    pub fn increment(amount: i64) -> Self {
        Self::Counter(CounterCommand::Increment(amount))
    }

    pub fn decrement(amount: i64) -> Self {
        Self::Counter(CounterCommand::Decrement(amount))
    }

    pub fn add_fixed() -> Self {
        Self::Counter(CounterCommand::AddFixed(0))
    }

    /// Wire tag of the command, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::User(UserCommand::AddUser(_)) => "ADD_USER",
            Self::User(UserCommand::RemoveUser(_)) => "REMOVE_USER",
            Self::User(UserCommand::EditUser(_)) => "EDIT_USER",
            Self::Counter(CounterCommand::Increment(_)) => "INCREMENT",
            Self::Counter(CounterCommand::Decrement(_)) => "DECREMENT",
            Self::Counter(CounterCommand::AddFixed(_)) => "HUNDRED",
        }
    }

    /// Decode a command from its JSON wire form.
    pub fn from_json(input: &str) -> Result<Self, WireError> {
        let value: Value =
            serde_json::from_str(input).map_err(|e| WireError::Decode(e.to_string()))?;
        Self::try_from(value)
    }

    /// Encode a command to its JSON wire form.
    pub fn to_json(&self) -> Result<String, WireError> {
        serde_json::to_string(self).map_err(|e| WireError::Encode(e.to_string()))
    }
}

impl TryFrom<Value> for Command {
    type Error = WireError;

    fn try_from(value: Value) -> Result<Self, WireError> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(WireError::MissingType)?
            .to_owned();

        let decoded = match kind.as_str() {
            "ADD_USER" | "REMOVE_USER" | "EDIT_USER" => serde_json::from_value(value).map(Self::User),
            "INCREMENT" | "DECREMENT" | "HUNDRED" => serde_json::from_value(value).map(Self::Counter),
            _ => return Err(WireError::UnknownType(kind)),
        };

        decoded.map_err(|e| WireError::Decode(format!("{kind}: {e}")))
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(D::Error::custom)
    }
}

impl From<UserCommand> for Command {
    fn from(command: UserCommand) -> Self {
        Self::User(command)
    }
}

impl From<CounterCommand> for Command {
    fn from(command: CounterCommand) -> Self {
        Self::Counter(command)
    }
}
