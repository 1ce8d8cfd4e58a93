//! Field schema layer
//!
//! A [`Schema`] is a static table of [`FieldSpec`] records. Validation of a
//! submission runs in a fixed order: every required field is checked for
//! presence first, then undeclared keys are rejected, then each declared field
//! gets its default (optional fields only), is coerced to its kind and finally
//! checked against its constraint. The first failure wins and is always
//! attributed to a single field.

mod field;
pub mod places;

pub use field::{Constraint, FieldKind, FieldSpec, FieldValue};

use crate::error::{SchemaDefinitionError, SchemaError};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Raw values from one form submission, keyed by field name
pub type SubmittedValues = BTreeMap<String, Value>;

/// Values after coercion and default substitution, keyed by field name
pub type NormalizedValues = BTreeMap<String, FieldValue>;

/// An ordered, invariant-checked collection of field specs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Build a schema, checking that names are unique, required fields carry
    /// no default and every default satisfies its own field
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, SchemaDefinitionError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaDefinitionError::DuplicateField(field.name.clone()));
            }
            match &field.default {
                Some(_) if field.required => {
                    return Err(SchemaDefinitionError::RequiredWithDefault(field.name.clone()));
                }
                Some(default) if !field.accepts(default) => {
                    return Err(SchemaDefinitionError::InvalidDefault(field.name.clone()));
                }
                _ => {}
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Declared defaults, as shown on the first display of the form
    pub fn defaults(&self) -> NormalizedValues {
        self.fields
            .iter()
            .filter_map(|f| f.default.clone().map(|d| (f.name.clone(), d)))
            .collect()
    }

    /// Validate and normalize one submission
    pub fn validate(&self, input: &SubmittedValues) -> Result<NormalizedValues, SchemaError> {
        let present = |name: &str| input.get(name).is_some_and(|v| !v.is_null());

        if let Some(missing) = self.fields.iter().find(|f| f.required && !present(&f.name)) {
            return Err(SchemaError::missing(&missing.name));
        }

        if let Some(extra) = input.keys().find(|k| self.field(k).is_none()) {
            return Err(SchemaError::invalid(extra));
        }

        let mut normalized = NormalizedValues::new();
        for field in &self.fields {
            let value = match input.get(&field.name).filter(|v| !v.is_null()) {
                Some(raw) => field.coerce(raw)?,
                None => match &field.default {
                    Some(default) => default.clone(),
                    None => continue,
                },
            };
            normalized.insert(field.name.clone(), value);
        }

        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn submission(value: Value) -> SubmittedValues {
        serde_json::from_value(value).unwrap()
    }

    fn sample_schema() -> Schema {
        Schema::new(vec![
            FieldSpec::required("name", FieldKind::Text),
            FieldSpec::optional("note", FieldKind::Text),
            FieldSpec::optional("level", FieldKind::Integer)
                .with_default(3_i64)
                .with_constraint(Constraint::Range { min: 1, max: 5 }),
            FieldSpec::optional("flag", FieldKind::Boolean).with_default(false),
        ])
        .unwrap()
    }

    mod definition {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_duplicate_names_rejected() {
            let result = Schema::new(vec![
                FieldSpec::required("name", FieldKind::Text),
                FieldSpec::optional("name", FieldKind::Text),
            ]);
            assert_eq!(
                result,
                Err(SchemaDefinitionError::DuplicateField("name".to_string()))
            );
        }

        #[test]
        fn test_required_with_default_rejected() {
            let result = Schema::new(vec![
                FieldSpec::required("name", FieldKind::Text).with_default("x")
            ]);
            assert_eq!(
                result,
                Err(SchemaDefinitionError::RequiredWithDefault("name".to_string()))
            );
        }

        #[test]
        fn test_default_of_wrong_type_rejected() {
            let result = Schema::new(vec![
                FieldSpec::optional("level", FieldKind::Integer).with_default("3")
            ]);
            assert_eq!(
                result,
                Err(SchemaDefinitionError::InvalidDefault("level".to_string()))
            );
        }

        #[test]
        fn test_default_outside_constraint_rejected() {
            let result = Schema::new(vec![FieldSpec::optional("level", FieldKind::Integer)
                .with_default(9_i64)
                .with_constraint(Constraint::Range { min: 1, max: 5 })]);
            assert_eq!(
                result,
                Err(SchemaDefinitionError::InvalidDefault("level".to_string()))
            );
        }

        #[test]
        fn test_defaults_lists_only_fields_with_default() {
            let defaults = sample_schema().defaults();
            let expected: NormalizedValues = [
                ("flag".to_string(), FieldValue::Bool(false)),
                ("level".to_string(), FieldValue::Integer(3)),
            ]
            .into_iter()
            .collect();
            assert_eq!(defaults, expected);
        }
    }

    mod validate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_fills_defaults_and_omits_unset_optionals() {
            let out = sample_schema()
                .validate(&submission(json!({"name": "Home"})))
                .unwrap();

            assert_eq!(out.get("name"), Some(&FieldValue::from("Home")));
            assert_eq!(out.get("level"), Some(&FieldValue::Integer(3)));
            assert_eq!(out.get("flag"), Some(&FieldValue::Bool(false)));
            assert!(!out.contains_key("note"));
        }

        #[test]
        fn test_missing_required_reported_before_coercion() {
            // level is also invalid, but the missing name must win
            let err = sample_schema()
                .validate(&submission(json!({"level": "abc"})))
                .unwrap_err();
            assert_eq!(err, SchemaError::missing("name"));
            assert_eq!(err.kind, ErrorKind::MissingRequired);
        }

        #[test]
        fn test_null_counts_as_absent() {
            let schema = sample_schema();
            let err = schema
                .validate(&submission(json!({"name": null})))
                .unwrap_err();
            assert_eq!(err, SchemaError::missing("name"));

            let out = schema
                .validate(&submission(json!({"name": "a", "level": null})))
                .unwrap();
            assert_eq!(out.get("level"), Some(&FieldValue::Integer(3)));
        }

        #[test]
        fn test_undeclared_key_rejected() {
            let err = sample_schema()
                .validate(&submission(json!({"name": "a", "host": "x"})))
                .unwrap_err();
            assert_eq!(err, SchemaError::invalid("host"));
        }

        #[test]
        fn test_out_of_range_names_field() {
            let err = sample_schema()
                .validate(&submission(json!({"name": "a", "level": 6})))
                .unwrap_err();
            assert_eq!(err, SchemaError::invalid("level"));
        }

        #[test]
        fn test_range_bounds_are_inclusive() {
            let schema = sample_schema();
            for level in [1, 5] {
                let out = schema
                    .validate(&submission(json!({"name": "a", "level": level})))
                    .unwrap();
                assert_eq!(out.get("level"), Some(&FieldValue::Integer(level)));
            }
            for level in [0, 6] {
                assert!(schema
                    .validate(&submission(json!({"name": "a", "level": level})))
                    .is_err());
            }
        }

        #[test]
        fn test_validation_is_deterministic() {
            let schema = sample_schema();
            let input = submission(json!({"name": "a", "level": "2", "flag": "on"}));
            assert_eq!(schema.validate(&input), schema.validate(&input));
        }

        #[test]
        fn test_default_equals_explicit_default() {
            let schema = sample_schema();
            let omitted = schema.validate(&submission(json!({"name": "a"}))).unwrap();
            let explicit = schema
                .validate(&submission(json!({"name": "a", "level": 3, "flag": false})))
                .unwrap();
            assert_eq!(omitted, explicit);
        }
    }

    #[test]
    fn test_schema_serializes_as_field_list() {
        let schema = Schema::new(vec![FieldSpec::optional("level", FieldKind::Integer)
            .with_default(2_i64)
            .with_constraint(Constraint::Range { min: 1, max: 5 })])
        .unwrap();

        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!([{
                "name": "level",
                "required": false,
                "kind": "integer",
                "default": 2,
                "constraint": {"range": {"min": 1, "max": 5}}
            }])
        );
    }
}
