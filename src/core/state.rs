//! Core State trait for store sub-states.
//!
//! Every piece of state owned by the store implements this trait, which
//! ties the state type to the commands it understands and exposes a pure
//! transition function.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Whether a command changed anything.
///
/// Remove and edit commands that name an id the state does not contain
/// leave the state untouched. The returned state is still valid and equal
/// to the input; `Outcome` only lets callers tell the two cases apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The command matched and produced a new state.
    Applied,

    /// Nothing matched; the state is unchanged.
    NoMatch,

    /// The store refused to run the command at all. Pure transitions never
    /// produce this; see [`crate::store::AppStore::dispatch`].
    Rejected,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Result of applying a command to a state.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<S> {
    pub state: S,
    pub outcome: Outcome,
}

impl<S> Transition<S> {
    pub fn applied(state: S) -> Self {
        Self {
            state,
            outcome: Outcome::Applied,
        }
    }

    pub fn no_match(state: S) -> Self {
        Self {
            state,
            outcome: Outcome::NoMatch,
        }
    }
}

/// Trait for store sub-states.
///
/// All methods are pure - no side effects. `apply` never mutates `self`;
/// it returns a fresh value, so any snapshot handed out earlier stays valid.
///
/// # Required Traits
///
/// - `Clone`: states are copied into new snapshots
/// - `PartialEq`: the no-op law is stated as equality
/// - `Default`: the initial state of a fresh store
/// - `Serialize` + `Deserialize`: snapshots are part of the wire contract
///
/// # Example
///
/// ```rust
/// use roster::core::{State, Transition};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
/// struct Toggle {
///     on: bool,
/// }
///
/// struct Flip;
///
/// impl State for Toggle {
///     type Command = Flip;
///
///     fn name(&self) -> &str {
///         "toggle"
///     }
///
///     fn apply(&self, _command: &Flip) -> Transition<Self> {
///         Transition::applied(Toggle { on: !self.on })
///     }
/// }
///
/// let next = Toggle::default().apply(&Flip);
/// assert!(next.state.on);
/// ```
pub trait State:
    Clone + PartialEq + Debug + Default + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Commands this state responds to.
    type Command;

    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Apply one command, producing the next state.
    ///
    /// Must be total: every command yields a valid state.
    fn apply(&self, command: &Self::Command) -> Transition<Self>;
}
