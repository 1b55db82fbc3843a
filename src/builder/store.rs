//! Builder for constructing stores.

use crate::builder::error::BuildError;
use crate::core::{CounterState, UserListState, UserRecord};
use crate::form::FormController;
use crate::ids::{IdGenerator, SequentialIds};
use crate::store::{AppStore, Snapshot};
use crate::validation::ValidationRules;
use std::collections::HashSet;
use std::sync::Arc;
use stillwater::validation::Validation;

/// Builder for constructing a store with a fluent API.
///
/// Seeded users are checked against the configured rules before the
/// store exists, so a store never starts out holding a record the form
/// would have rejected. [`StoreBuilder::build_form`] hands the same rules
/// and id generator to a [`FormController`] over the new store.
pub struct StoreBuilder {
    users: Vec<UserRecord>,
    counter: i64,
    rules: ValidationRules,
    ids: Option<Arc<dyn IdGenerator>>,
}

impl StoreBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            counter: 0,
            rules: ValidationRules::default(),
            ids: None,
        }
    }

    /// Seed one user.
    pub fn user(mut self, record: UserRecord) -> Self {
        self.users.push(record);
        self
    }

    /// Seed several users, in order.
    pub fn users(mut self, records: impl IntoIterator<Item = UserRecord>) -> Self {
        self.users.extend(records);
        self
    }

    /// Set the starting counter value.
    pub fn counter(mut self, value: i64) -> Self {
        self.counter = value;
        self
    }

    /// Rules used to check seeded users and form submissions.
    pub fn rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    /// Id generator for users created through [`StoreBuilder::build_form`].
    ///
    /// Defaults to [`SequentialIds`] starting one past the largest seed id.
    pub fn ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Some(Arc::new(ids));
        self
    }

    /// Build the store and a form controller bound to it.
    ///
    /// The form validates with the builder's rules and takes new ids from
    /// the builder's generator.
    pub fn build_form(mut self) -> Result<FormController, BuildError> {
        let ids = self.ids.take().unwrap_or_else(|| {
            let next = self
                .users
                .iter()
                .map(|record| record.id.0)
                .max()
                .map_or(1, |max| max.wrapping_add(1));
            Arc::new(SequentialIds::starting_at(next))
        });
        let rules = self.rules.clone();
        let store = self.build()?;

        Ok(FormController::with_shared_ids(store, rules, ids))
    }

    /// Build the store.
    /// Returns an error if a seed is invalid or two seeds share an id.
    pub fn build(self) -> Result<AppStore, BuildError> {
        let mut seen = HashSet::new();
        for record in &self.users {
            if !seen.insert(record.id) {
                return Err(BuildError::DuplicateSeedId(record.id));
            }

            if let Validation::Failure(errors) = self.rules.check_record(record) {
                return Err(BuildError::InvalidSeed {
                    id: record.id,
                    errors: errors.iter().cloned().collect(),
                });
            }
        }

        tracing::debug!(
            "building store with {} seed users, counter {}",
            self.users.len(),
            self.counter
        );

        let snapshot = Snapshot::new(
            UserListState::from_users(self.users),
            CounterState::new(self.counter),
        );
        Ok(AppStore::new(snapshot))
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
