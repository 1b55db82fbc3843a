//! Counter state.

use super::state::{State, Transition};
use crate::command::CounterCommand;
use serde::{Deserialize, Serialize};

/// Amount added by [`CounterCommand::AddFixed`], whatever its payload.
pub const FIXED_INCREMENT: i64 = 100;

/// A single signed counter, starting at zero.
///
/// Arithmetic wraps on overflow so every command stays total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    pub counter: i64,
}

impl CounterState {
    pub fn new(counter: i64) -> Self {
        Self { counter }
    }
}

impl State for CounterState {
    type Command = CounterCommand;

    fn name(&self) -> &str {
        "counter"
    }

    fn apply(&self, command: &CounterCommand) -> Transition<Self> {
        let counter = match command {
            CounterCommand::Increment(amount) => self.counter.wrapping_add(*amount),
            CounterCommand::Decrement(amount) => self.counter.wrapping_sub(*amount),
            CounterCommand::AddFixed(_) => self.counter.wrapping_add(FIXED_INCREMENT),
        };
        Transition::applied(Self { counter })
    }
}
