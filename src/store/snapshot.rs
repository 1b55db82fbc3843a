//! Immutable view of everything the store holds.

use crate::command::{Command, WireError};
use crate::core::{CounterState, State, Transition, UserListState};
use serde::{Deserialize, Serialize};

/// Combined store state at one point in the command sequence.
///
/// `revision` counts commands that changed something; commands that
/// matched nothing leave it alone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: UserListState,
    pub counter: CounterState,
    #[serde(default)]
    pub revision: u64,
}

impl Snapshot {
    pub fn new(users: UserListState, counter: CounterState) -> Self {
        Self {
            users,
            counter,
            revision: 0,
        }
    }

    pub fn to_json(&self) -> Result<String, WireError> {
        serde_json::to_string(self).map_err(|e| WireError::Encode(e.to_string()))
    }

    pub fn from_json(input: &str) -> Result<Self, WireError> {
        serde_json::from_str(input).map_err(|e| WireError::Decode(e.to_string()))
    }
}

impl State for Snapshot {
    type Command = Command;

    fn name(&self) -> &str {
        "snapshot"
    }

    /// Route the command to the sub-state that owns it.
    fn apply(&self, command: &Command) -> Transition<Self> {
        let (next, outcome) = match command {
            Command::User(command) => {
                let Transition { state, outcome } = self.users.apply(command);
                (
                    Self {
                        users: state,
                        ..self.clone()
                    },
                    outcome,
                )
            }
            Command::Counter(command) => {
                let Transition { state, outcome } = self.counter.apply(command);
                (
                    Self {
                        counter: state,
                        ..self.clone()
                    },
                    outcome,
                )
            }
        };

        if outcome.is_applied() {
            Transition::applied(Self {
                revision: self.revision.wrapping_add(1),
                ..next
            })
        } else {
            Transition::no_match(self.clone())
        }
    }
}
