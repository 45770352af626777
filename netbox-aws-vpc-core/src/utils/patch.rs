//! Partial-update field support.
//!
//! Every PATCH field is `Option<Option<T>>` with
//! `#[serde(default, deserialize_with = "crate::utils::patch::nullable")]`:
//! absent (keep), `null` and a value (set). `null` clears a nullable field;
//! on any other field it is reported through `reject_null`.

use serde::{Deserialize, Deserializer};

use crate::error::ValidationErrors;

pub const NULL_NOT_ALLOWED: &str = "This field may not be null.";

pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Record `field` when a non-nullable field was sent as an explicit `null`.
pub fn reject_null<T>(errors: &mut ValidationErrors, field: &str, value: Option<&Option<T>>) {
    if matches!(value, Some(None)) {
        errors.add(field, NULL_NOT_ALLOWED);
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "super::nullable")]
        region: Option<Option<i64>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Body = serde_json::from_str("{}").unwrap();
        let null: Body = serde_json::from_str(r#"{"region": null}"#).unwrap();
        let value: Body = serde_json::from_str(r#"{"region": 3}"#).unwrap();

        assert_eq!(absent.region, None);
        assert_eq!(null.region, Some(None));
        assert_eq!(value.region, Some(Some(3)));
    }

    #[test]
    fn only_explicit_null_is_rejected() {
        let mut errors = ValidationErrors::new();
        reject_null::<i64>(&mut errors, "absent", None);
        reject_null(&mut errors, "value", Some(&Some(3)));
        reject_null::<i64>(&mut errors, "status", Some(&None));

        assert!(!errors.has("absent"));
        assert!(!errors.has("value"));
        assert_eq!(errors.messages("status"), [NULL_NOT_ALLOWED]);
    }
}
