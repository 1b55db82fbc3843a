//! Id generators for new user records.
//!
//! The store never invents ids; whoever builds an AddUser command asks an
//! [`IdGenerator`] for one. Injecting the generator keeps tests
//! deterministic.

use crate::core::UserId;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of fresh user ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> UserId;
}

/// Hands out 1, 2, 3, ...
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> UserId {
        UserId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

/// Millisecond timestamps, bumped by one when two calls share a millisecond.
#[derive(Debug, Default)]
pub struct ClockIds {
    last: AtomicU64,
}

impl ClockIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for ClockIds {
    fn next_id(&self) -> UserId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let previous = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                Some(now.max(last.wrapping_add(1)))
            })
            .unwrap_or_else(|last| last);
        UserId(now.max(previous.wrapping_add(1)))
    }
}

/// Random v4 UUIDs folded down to 64 bits.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> UserId {
        let value = Uuid::new_v4().as_u128();
        UserId((value >> 64) as u64 ^ value as u64)
    }
}
