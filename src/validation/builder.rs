//! Builder API for creating validation rules.

use crate::validation::rules::ValidationRules;

/// Builder for creating validation rules
pub struct ValidationRulesBuilder {
    rules: ValidationRules,
}

impl ValidationRulesBuilder {
    pub fn new() -> Self {
        Self {
            rules: ValidationRules::default(),
        }
    }

    /// Set minimum name length, counted in characters
    pub fn min_name_len(mut self, n: usize) -> Self {
        self.rules.min_name_len = n;
        self
    }

    /// Set smallest accepted age
    pub fn min_age(mut self, age: u32) -> Self {
        self.rules.min_age = age;
        self
    }

    /// Replace the accepted avatar URL schemes
    pub fn allowed_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules.allowed_schemes = schemes.into_iter().map(Into::into).collect();
        self
    }

    /// Build the validation rules
    pub fn build(self) -> ValidationRules {
        self.rules
    }
}

impl Default for ValidationRulesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
