//! Controller behind the user form.

use crate::command::Command;
use crate::core::{Outcome, UserId};
use crate::form::error::FormError;
use crate::ids::IdGenerator;
use crate::store::{AppStore, Dispatched};
use crate::validation::{Field, UserDraft, ValidationRules};
use std::sync::Arc;
use stillwater::validation::Validation;

/// Whether a submit creates a new user or updates an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Creating,
    Editing(UserId),
}

/// Drives the user form: holds the draft, validates it on submit and
/// dispatches the matching command.
///
/// New users get their id from the injected [`IdGenerator`]; edits keep
/// the id of the user being edited.
pub struct FormController {
    store: AppStore,
    rules: ValidationRules,
    ids: Arc<dyn IdGenerator>,
    draft: UserDraft,
    mode: FormMode,
}

impl FormController {
    pub fn new(store: AppStore, rules: ValidationRules, ids: impl IdGenerator + 'static) -> Self {
        Self::with_shared_ids(store, rules, Arc::new(ids))
    }

    /// Like [`FormController::new`], for a generator that is already shared.
    pub fn with_shared_ids(store: AppStore, rules: ValidationRules, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            rules,
            ids,
            draft: UserDraft::default(),
            mode: FormMode::Creating,
        }
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    pub fn draft(&self) -> &UserDraft {
        &self.draft
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Replace one field of the draft.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.draft.name = value,
            Field::Age => self.draft.age = value,
            Field::Avatar => self.draft.avatar = value,
        }
    }

    pub fn set_draft(&mut self, draft: UserDraft) {
        self.draft = draft;
    }

    /// Label for the submit button.
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Creating => "Save",
            FormMode::Editing(_) => "Update",
        }
    }

    /// Validate the draft and dispatch AddUser or EditUser.
    ///
    /// On validation failure nothing is dispatched and the draft is kept.
    /// The draft is also kept when the store rejects the dispatch.
    /// On success the draft is cleared and the form returns to creating.
    pub fn submit(&mut self) -> Result<Dispatched, FormError> {
        let target = match self.mode {
            FormMode::Creating => None,
            FormMode::Editing(id) => Some(id),
        };

        let record = match self.rules.validate(&self.draft, target.unwrap_or_default()) {
            Validation::Success(record) => record,
            Validation::Failure(errors) => {
                let errors: Vec<_> = errors.iter().cloned().collect();
                tracing::debug!("form rejected with {} errors", errors.len());
                return Err(FormError::Invalid { errors });
            }
        };

        let command = match target {
            Some(id) => Command::edit_user(record.with_id(id)),
            None => Command::add_user(record.with_id(self.ids.next_id())),
        };

        let dispatched = self.store.dispatch(command);
        if let (Some(id), Outcome::NoMatch) = (target, dispatched.outcome) {
            tracing::warn!("user {} was removed while being edited", id);
        }

        if dispatched.outcome != Outcome::Rejected {
            self.reset();
        }
        Ok(dispatched)
    }

    /// Load an existing user into the draft for editing.
    pub fn begin_edit(&mut self, id: UserId) -> Result<(), FormError> {
        let snapshot = self.store.snapshot();
        let record = snapshot.users.find(id).ok_or(FormError::UnknownUser(id))?;

        self.draft = UserDraft::from(record);
        self.mode = FormMode::Editing(id);
        Ok(())
    }

    /// Drop the draft and go back to creating.
    pub fn cancel_edit(&mut self) {
        self.reset();
    }

    /// Remove a user from the list.
    ///
    /// Removing the user currently being edited also cancels the edit.
    pub fn remove(&mut self, id: UserId) -> Outcome {
        let outcome = self.store.dispatch(Command::remove_user(id)).outcome;
        if self.mode == FormMode::Editing(id) {
            self.reset();
        }
        outcome
    }

    fn reset(&mut self) {
        self.draft = UserDraft::default();
        self.mode = FormMode::Creating;
    }
}
