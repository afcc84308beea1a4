//! Declarative per-field validation schema
//!
//! A schema lists fields in display order. Each field runs its filters over
//! the raw value, then its validators in declaration order; the first
//! failing validator provides the single message reported for that field.

use crate::core::error::FieldValidationError;
use std::collections::BTreeMap;

type FilterFn = Box<dyn Fn(&str) -> String + Send + Sync>;
type ValidatorFn = Box<dyn Fn(&str, &str) -> Result<(), String> + Send + Sync>;

/// Filters and validators for one field
#[derive(Default)]
pub struct FieldRules {
    filters: Vec<FilterFn>,
    validators: Vec<ValidatorFn>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter applied before validation
    pub fn filter(mut self, f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.filters.push(Box::new(f));
        self
    }

    /// Add a validator
    pub fn validate(
        mut self,
        v: impl Fn(&str, &str) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Box::new(v));
        self
    }

    fn apply(&self, field: &str, raw: &str) -> (String, Option<String>) {
        let value = self
            .filters
            .iter()
            .fold(raw.to_string(), |value, filter| filter(&value));

        let error = self
            .validators
            .iter()
            .find_map(|validator| validator(field, &value).err());

        (value, error)
    }
}

/// Validation schema for a whole form
#[derive(Default)]
pub struct FormSchema {
    fields: Vec<(&'static str, FieldRules)>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field
    pub fn field(mut self, name: &'static str, rules: FieldRules) -> Self {
        self.fields.push((name, rules));
        self
    }

    /// Filter every declared field and collect one error per invalid field
    ///
    /// Fields missing from `values` are validated as empty strings. Values
    /// for undeclared fields are dropped from the output.
    pub fn validate_and_filter(
        &self,
        values: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, Vec<FieldValidationError>> {
        let mut filtered = BTreeMap::new();
        let mut errors = Vec::new();

        for (name, rules) in &self.fields {
            let raw = values.get(*name).map(String::as_str).unwrap_or("");
            let (value, error) = rules.apply(name, raw);

            if let Some(message) = error {
                errors.push(FieldValidationError {
                    field: name.to_string(),
                    message,
                });
            }
            filtered.insert(name.to_string(), value);
        }

        if errors.is_empty() {
            Ok(filtered)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{filters, validators};

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn schema() -> FormSchema {
        FormSchema::new()
            .field(
                "holder",
                FieldRules::new()
                    .filter(filters::trim())
                    .validate(validators::required("required"))
                    .validate(validators::min_length(4, "too short")),
            )
            .field(
                "cvv",
                FieldRules::new()
                    .filter(filters::digits())
                    .validate(validators::required("cvv required")),
            )
    }

    #[test]
    fn test_valid_values_are_filtered() {
        let out = schema()
            .validate_and_filter(&values(&[("holder", "  Jane Doe "), ("cvv", "1-2-3")]))
            .unwrap();
        assert_eq!(out["holder"], "Jane Doe");
        assert_eq!(out["cvv"], "123");
    }

    #[test]
    fn test_first_failing_validator_wins() {
        let errors = schema()
            .validate_and_filter(&values(&[("holder", ""), ("cvv", "123")]))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "holder");
        assert_eq!(errors[0].message, "required");
    }

    #[test]
    fn test_missing_fields_are_empty() {
        let errors = schema().validate_and_filter(&BTreeMap::new()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["holder", "cvv"]);
    }

    #[test]
    fn test_undeclared_fields_are_dropped() {
        let out = schema()
            .validate_and_filter(&values(&[
                ("holder", "Jane Doe"),
                ("cvv", "123"),
                ("admin", "true"),
            ]))
            .unwrap();
        assert!(!out.contains_key("admin"));
    }
}
