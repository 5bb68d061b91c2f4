//! Configurable eligibility checks for voter records.
//!
//! [`create_vote_validator`] turns a set of rules into a standalone checking
//! function that owns its rules and shares no state with any election.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MISSING_FIELDS: &str = "missing required field(s)";
pub const AGE_BELOW_MINIMUM: &str = "age below minimum";
pub const AGE_NOT_A_NUMBER: &str = "age is not a number";
pub const NOT_A_RECORD: &str = "record is not an object";
pub const INVALID_RULES: &str = "invalid validation rules";
pub const ELIGIBLE: &str = "voter is eligible";

/// Outcome of checking one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub valid: bool,
    pub reason: String,
}

impl Validation {
    fn accepted() -> Self {
        Self {
            valid: true,
            reason: ELIGIBLE.to_string(),
        }
    }

    fn rejected(reason: &str) -> Self {
        Self {
            valid: false,
            reason: reason.to_string(),
        }
    }
}

/// Rules a voter record must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteRules {
    /// Youngest acceptable age, inclusive. No floor when absent.
    pub min_age: Option<f64>,
    /// Fields that must be present in the record, checked before the age.
    pub required_fields: Vec<String>,
}

impl Default for VoteRules {
    fn default() -> Self {
        Self {
            min_age: Some(crate::model::voter::MIN_VOTER_AGE),
            required_fields: vec!["id".to_string(), "name".to_string(), "age".to_string()],
        }
    }
}

impl VoteRules {
    /// Read rules from a JSON object with `minAge` and `requiredFields`.
    ///
    /// Only a non-object is unusable. Within an object, a missing or non-numeric
    /// `minAge` means no age floor, and a missing `requiredFields` means none are
    /// required; non-string field names are skipped.
    pub fn from_value(rules: &Value) -> Option<Self> {
        let fields = rules.as_object()?;

        let min_age = match fields.get("minAge") {
            None | Some(Value::Null) => None,
            Some(min_age) => {
                let min_age = min_age.as_f64();
                if min_age.is_none() {
                    warn!("Ignoring non-numeric `minAge` in validation rules");
                }
                min_age
            }
        };

        let required_fields = match fields.get("requiredFields") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(names)) => names
                .iter()
                .filter_map(|name| {
                    let name = name.as_str().map(str::to_string);
                    if name.is_none() {
                        warn!("Ignoring non-string entry in `requiredFields`");
                    }
                    name
                })
                .collect(),
            Some(_) => {
                warn!("Ignoring `requiredFields` in validation rules: not a list");
                Vec::new()
            }
        };

        Some(Self {
            min_age,
            required_fields,
        })
    }

    /// Check a single record against these rules.
    pub fn validate(&self, record: &Value) -> Validation {
        let Some(fields) = record.as_object() else {
            return Validation::rejected(NOT_A_RECORD);
        };

        if self
            .required_fields
            .iter()
            .any(|field| !fields.contains_key(field))
        {
            return Validation::rejected(MISSING_FIELDS);
        }

        // An absent age is only a problem if it was required, which is caught above.
        if let Some(age) = fields.get("age") {
            match age.as_f64() {
                Some(age) if self.min_age.is_some_and(|min_age| age < min_age) => {
                    return Validation::rejected(AGE_BELOW_MINIMUM)
                }
                Some(_) => {}
                None => return Validation::rejected(AGE_NOT_A_NUMBER),
            }
        }

        Validation::accepted()
    }

    /// Consume the rules, producing a standalone validation function.
    pub fn validator(self) -> impl Fn(&Value) -> Validation {
        move |record| self.validate(record)
    }
}

/// Build a validation function from loosely-shaped rules.
///
/// If the rules are not an object, the returned function rejects every record
/// with [`INVALID_RULES`] instead of failing here.
pub fn create_vote_validator(rules: &Value) -> impl Fn(&Value) -> Validation {
    let rules = VoteRules::from_value(rules);
    if rules.is_none() {
        warn!("Validation rules are not an object, every record will be rejected");
    }

    move |record| match &rules {
        Some(rules) => rules.validate(record),
        None => Validation::rejected(INVALID_RULES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn standard_rules() -> Value {
        json!({"minAge": 18, "requiredFields": ["id", "name", "age"]})
    }

    #[test]
    fn standard_rules_behaviour() {
        let validate = create_vote_validator(&standard_rules());

        let missing_age = validate(&json!({"id": "v1", "name": "A"}));
        assert!(!missing_age.valid);
        assert_eq!(missing_age.reason, MISSING_FIELDS);

        let too_young = validate(&json!({"id": "v1", "name": "A", "age": 10}));
        assert!(!too_young.valid);
        assert_eq!(too_young.reason, AGE_BELOW_MINIMUM);

        let fine = validate(&json!({"id": "v1", "name": "A", "age": 20}));
        assert!(fine.valid);
        assert_eq!(fine.reason, ELIGIBLE);

        // Boundary is inclusive.
        assert!(validate(&json!({"id": "v1", "name": "A", "age": 18})).valid);
    }

    #[test]
    fn missing_fields_reported_before_age() {
        let validate = create_vote_validator(&standard_rules());
        let result = validate(&json!({"name": "A", "age": 3}));
        assert_eq!(result.reason, MISSING_FIELDS);
    }

    #[test]
    fn configured_minimum_is_authoritative() {
        let validate = create_vote_validator(&json!({"minAge": 21, "requiredFields": []}));
        assert_eq!(validate(&json!({"age": 19})).reason, AGE_BELOW_MINIMUM);
        assert!(validate(&json!({"age": 21})).valid);

        let validate = VoteRules {
            min_age: Some(16.0),
            required_fields: vec!["id".into()],
        }
        .validator();
        assert!(validate(&json!({"id": "v2", "age": 16})).valid);
        assert!(!validate(&json!({"id": "v2", "age": 15})).valid);
    }

    #[test]
    fn optional_age() {
        let validate = create_vote_validator(&json!({"minAge": 18, "requiredFields": ["id"]}));
        assert!(validate(&json!({"id": "v3"})).valid);
        assert_eq!(
            validate(&json!({"id": "v3", "age": "eighteen"})).reason,
            AGE_NOT_A_NUMBER
        );
    }

    #[test]
    fn non_object_records() {
        let validate = VoteRules::default().validator();
        assert_eq!(validate(&json!(null)).reason, NOT_A_RECORD);
        assert_eq!(validate(&json!(["id", "name", "age"])).reason, NOT_A_RECORD);
    }

    #[test]
    fn non_object_rules_always_fail() {
        for rules in [json!(null), json!("rules"), json!(42), json!(["id"])] {
            let validate = create_vote_validator(&rules);
            let result = validate(&json!({"id": "v1", "name": "A", "age": 20}));
            assert_eq!(result, Validation::rejected(INVALID_RULES));
        }
    }

    #[test]
    fn partial_rules_objects() {
        // Fractional minimum.
        let validate = create_vote_validator(&json!({"minAge": 18.5, "requiredFields": ["id"]}));
        assert!(validate(&json!({"id": "v1", "age": 30})).valid);
        assert_eq!(
            validate(&json!({"id": "v1", "age": 18})).reason,
            AGE_BELOW_MINIMUM
        );

        // No floor without a usable minimum.
        for rules in [
            json!({"requiredFields": ["id"]}),
            json!({"minAge": "eighteen", "requiredFields": ["id"]}),
        ] {
            let validate = create_vote_validator(&rules);
            assert!(validate(&json!({"id": "v1", "age": 3})).valid);
            assert_eq!(validate(&json!({"age": 30})).reason, MISSING_FIELDS);
        }

        // Nothing required without a usable field list.
        for rules in [
            json!({"minAge": 18}),
            json!({"minAge": 18, "requiredFields": "id"}),
        ] {
            let validate = create_vote_validator(&rules);
            assert!(validate(&json!({})).valid);
            assert_eq!(validate(&json!({"age": 10})).reason, AGE_BELOW_MINIMUM);
        }

        assert_eq!(
            VoteRules::from_value(&json!({"minAge": 21, "requiredFields": ["id", 7, "age"]})),
            Some(VoteRules {
                min_age: Some(21.0),
                required_fields: vec!["id".into(), "age".into()],
            })
        );
        assert_eq!(
            VoteRules::from_value(&json!({})),
            Some(VoteRules {
                min_age: None,
                required_fields: vec![],
            })
        );
    }

    #[test]
    fn validators_are_independent() {
        let strict = create_vote_validator(&json!({"minAge": 30, "requiredFields": []}));
        let lenient = create_vote_validator(&json!({"minAge": 0, "requiredFields": []}));
        let record = json!({"age": 25});
        assert!(!strict(&record).valid);
        assert!(lenient(&record).valid);
        // Repeated calls give fresh, unchanged answers.
        assert!(!strict(&record).valid);
    }
}
