//! Field rules for user input using Validation.

use crate::core::{UserId, UserRecord};
use crate::validation::draft::UserDraft;
use crate::validation::errors::ValidationError;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use url::Url;

/// Outcome of checking one or more fields.
pub type FieldCheck<T> = Validation<T, NonEmptyVec<ValidationError>>;

pub const DEFAULT_MIN_NAME_LEN: usize = 3;
pub const DEFAULT_MIN_AGE: u32 = 1;

fn default_min_name_len() -> usize {
    DEFAULT_MIN_NAME_LEN
}

fn default_min_age() -> u32 {
    DEFAULT_MIN_AGE
}

fn default_schemes() -> Vec<String> {
    vec!["http".to_string(), "https".to_string(), "ftp".to_string()]
}

/// Validation rules for the user form.
/// Uses Validation to accumulate ALL field errors.
///
/// Deserializable so the limits can come from a config file; missing keys
/// fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    #[serde(default = "default_min_name_len")]
    pub(crate) min_name_len: usize,

    #[serde(default = "default_min_age")]
    pub(crate) min_age: u32,

    /// URL schemes accepted for avatars.
    #[serde(default = "default_schemes")]
    pub(crate) allowed_schemes: Vec<String>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_name_len: DEFAULT_MIN_NAME_LEN,
            min_age: DEFAULT_MIN_AGE,
            allowed_schemes: default_schemes(),
        }
    }
}

impl ValidationRules {
    pub fn min_name_len(&self) -> usize {
        self.min_name_len
    }

    pub fn min_age(&self) -> u32 {
        self.min_age
    }

    pub fn allowed_schemes(&self) -> &[String] {
        &self.allowed_schemes
    }

    /// Validate raw form input, accumulating ALL field errors.
    ///
    /// On success the draft becomes a record carrying `id`, with the name
    /// and avatar trimmed.
    pub fn validate(&self, draft: &UserDraft, id: UserId) -> FieldCheck<UserRecord> {
        let name = draft.name.trim();
        let avatar = draft.avatar.trim();
        let age = parse_age(&draft.age);

        let age_check = match &age {
            Ok(value) => self.check_age(*value),
            Err(error) => Validation::fail(error.clone()),
        };

        let checks = vec![self.check_name(name), age_check, self.check_avatar(avatar)];

        // The age check fails whenever parsing did, so `age` is Ok here.
        let age = age.ok().and_then(|value| u32::try_from(value).ok()).unwrap_or_default();
        let record = UserRecord {
            id,
            name: name.to_string(),
            age,
            avatar: avatar.to_string(),
        };

        Validation::all_vec(checks).map(move |_| record)
    }

    /// Check an already-typed record against the same rules.
    pub fn check_record(&self, record: &UserRecord) -> FieldCheck<()> {
        let checks = vec![
            self.check_name(&record.name),
            self.check_age(i64::from(record.age)),
            self.check_avatar(&record.avatar),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    fn check_name(&self, name: &str) -> FieldCheck<()> {
        if name.is_empty() {
            return Validation::fail(ValidationError::NameRequired);
        }

        let actual = name.chars().count();
        if actual < self.min_name_len {
            Validation::fail(ValidationError::NameTooShort {
                min: self.min_name_len,
                actual,
            })
        } else {
            Validation::success(())
        }
    }

    fn check_age(&self, age: i64) -> FieldCheck<()> {
        if age < i64::from(self.min_age) {
            return Validation::fail(ValidationError::AgeTooSmall {
                min: self.min_age,
                actual: age,
            });
        }

        if u32::try_from(age).is_err() {
            return Validation::fail(ValidationError::AgeNotANumber {
                input: age.to_string(),
            });
        }

        Validation::success(())
    }

    fn check_avatar(&self, avatar: &str) -> FieldCheck<()> {
        if avatar.is_empty() {
            return Validation::fail(ValidationError::AvatarRequired);
        }

        let invalid = |reason: String| ValidationError::AvatarInvalid {
            input: avatar.to_string(),
            reason,
        };

        let url = match Url::parse(avatar) {
            Ok(url) => url,
            Err(error) => return Validation::fail(invalid(error.to_string())),
        };

        if !self
            .allowed_schemes
            .iter()
            .any(|scheme| scheme.eq_ignore_ascii_case(url.scheme()))
        {
            return Validation::fail(invalid(format!(
                "scheme '{}' is not allowed",
                url.scheme()
            )));
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Validation::fail(invalid("missing host".to_string()));
        }

        Validation::success(())
    }
}

fn parse_age(input: &str) -> Result<i64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::AgeRequired);
    }

    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::AgeNotANumber {
            input: trimmed.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::builder::ValidationRulesBuilder;
    use crate::validation::errors::Field;

    fn errors_of<T>(check: FieldCheck<T>) -> Vec<ValidationError> {
        match check {
            Validation::Failure(errors) => errors.iter().cloned().collect(),
            Validation::Success(_) => Vec::new(),
        }
    }

    #[test]
    fn valid_draft_becomes_record() {
        let rules = ValidationRules::default();
        let draft = UserDraft::new("  Ann  ", "30", "http://x/a.png");

        match rules.validate(&draft, UserId(1)) {
            Validation::Success(record) => {
                assert_eq!(record, UserRecord::new(1, "Ann", 30, "http://x/a.png"));
            }
            Validation::Failure(_) => panic!("Expected success"),
        }
    }

    #[test]
    fn empty_draft_reports_every_field() {
        let rules = ValidationRules::default();
        let mut errors = errors_of(rules.validate(&UserDraft::default(), UserId(1)));
        errors.sort_by_key(ValidationError::field);

        assert_eq!(
            errors,
            vec![
                ValidationError::NameRequired,
                ValidationError::AgeRequired,
                ValidationError::AvatarRequired,
            ]
        );
    }

    #[test]
    fn short_name_is_rejected() {
        let rules = ValidationRules::default();
        let errors = errors_of(rules.validate(&UserDraft::new("Bo", "25", "http://x/b.png"), UserId(2)));

        assert_eq!(errors, vec![ValidationError::NameTooShort { min: 3, actual: 2 }]);
    }

    #[test]
    fn name_length_counts_characters() {
        let rules = ValidationRules::default();
        let check = rules.validate(&UserDraft::new("Zoë", "25", "http://x/z.png"), UserId(3));

        assert!(check.is_success());
    }

    #[test]
    fn age_must_be_positive_whole_number() {
        let rules = ValidationRules::default();

        let zero = errors_of(rules.validate(&UserDraft::new("Ann", "0", "http://x/a.png"), UserId(1)));
        assert_eq!(zero, vec![ValidationError::AgeTooSmall { min: 1, actual: 0 }]);

        let negative = errors_of(rules.validate(&UserDraft::new("Ann", "-4", "http://x/a.png"), UserId(1)));
        assert!(matches!(negative[0], ValidationError::AgeTooSmall { actual: -4, .. }));

        let text = errors_of(rules.validate(&UserDraft::new("Ann", "old", "http://x/a.png"), UserId(1)));
        assert!(matches!(text[0], ValidationError::AgeNotANumber { .. }));
    }

    #[test]
    fn avatar_must_be_absolute_url() {
        let rules = ValidationRules::default();

        for bad in ["not a url", "/relative/path.png", "mailto:ann@example.com"] {
            let errors = errors_of(rules.validate(&UserDraft::new("Ann", "30", bad), UserId(1)));
            assert_eq!(errors.len(), 1, "input: {bad}");
            assert_eq!(errors[0].field(), Field::Avatar);
        }

        assert!(rules
            .validate(&UserDraft::new("Ann", "30", "https://cdn.example.com/a.png"), UserId(1))
            .is_success());
    }

    #[test]
    fn custom_rules_are_respected() {
        let rules = ValidationRulesBuilder::new()
            .min_name_len(1)
            .min_age(18)
            .allowed_schemes(["https"])
            .build();

        let errors = errors_of(rules.validate(&UserDraft::new("A", "17", "http://x/a.png"), UserId(1)));

        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::AgeTooSmall { min: 18, .. })));
        assert!(errors.iter().any(|e| e.field() == Field::Avatar));
    }

    #[test]
    fn zero_minimum_accepts_zero_and_rejects_negatives() {
        let rules = ValidationRulesBuilder::new().min_age(0).build();

        assert!(rules
            .validate(&UserDraft::new("Ann", "0", "http://x/a.png"), UserId(1))
            .is_success());

        let errors = errors_of(rules.validate(&UserDraft::new("Ann", "-1", "http://x/a.png"), UserId(1)));
        assert_eq!(errors, vec![ValidationError::AgeTooSmall { min: 0, actual: -1 }]);
        assert_eq!(errors[0].to_string(), "Age must not be negative");
    }

    #[test]
    fn check_record_uses_same_rules() {
        let rules = ValidationRules::default();

        assert!(rules
            .check_record(&UserRecord::new(1, "Ann", 30, "http://x/a.png"))
            .is_success());
        assert!(rules
            .check_record(&UserRecord::new(1, "Ann", 0, "http://x/a.png"))
            .is_failure());
    }

    #[test]
    fn rules_deserialize_with_defaults() {
        let rules: ValidationRules = serde_json::from_str(r#"{"min_age": 21}"#).unwrap();

        assert_eq!(rules.min_age(), 21);
        assert_eq!(rules.min_name_len(), DEFAULT_MIN_NAME_LEN);
        assert_eq!(rules.allowed_schemes().len(), 3);
    }
}
