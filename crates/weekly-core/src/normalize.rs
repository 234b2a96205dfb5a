use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::task::Task;

/// Custom field name the provider uses for blocker annotations.
pub const BLOCKER_FIELD: &str = "Blockers";

/// Date format the provider uses for `due_on`.
const DUE_ON_FORMAT: &str = "%Y-%m-%d";

/// Raw task record as returned by the task source.
///
/// This is the typed boundary between provider JSON and the core: any
/// shape mismatch fails at deserialization or in [`normalize`], never
/// inside classification.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTask {
    pub name: String,
    #[serde(default)]
    pub due_on: Option<String>,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

/// A provider custom-field entry attached to a raw task.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomField {
    pub name: String,
    #[serde(default)]
    pub text_value: Option<String>,
}

/// Normalization failure.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("task {name:?} has malformed due date {value:?} (expected YYYY-MM-DD)")]
    MalformedDate {
        name: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Convert a raw provider record into a normalized [`Task`].
///
/// The blocker annotation comes from the first custom field named
/// [`BLOCKER_FIELD`] with non-empty text. A `due_on` string that does
/// not parse as a calendar date is an error; there is no skip-and-log
/// fallback, so one malformed record aborts the whole invocation.
///
/// # Errors
///
/// Returns [`NormalizeError::MalformedDate`] if `due_on` is present but
/// not a valid `YYYY-MM-DD` date.
pub fn normalize(raw: RawTask) -> Result<Task, NormalizeError> {
    let due_on = match raw.due_on {
        Some(value) if !value.is_empty() => Some(
            NaiveDate::parse_from_str(&value, DUE_ON_FORMAT).map_err(|source| {
                NormalizeError::MalformedDate {
                    name: raw.name.clone(),
                    value,
                    source,
                }
            })?,
        ),
        _ => None,
    };

    // A match requires both the field name and non-empty text, so an
    // empty "Blockers" field does not shadow a later populated one.
    let blocker = raw
        .custom_fields
        .into_iter()
        .find(|field| {
            field.name == BLOCKER_FIELD
                && field
                    .text_value
                    .as_deref()
                    .is_some_and(|text| !text.is_empty())
        })
        .and_then(|field| field.text_value);

    Ok(Task {
        name: raw.name,
        due_on,
        blocker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, due_on: Option<&str>, fields: Vec<CustomField>) -> RawTask {
        RawTask {
            name: name.to_string(),
            due_on: due_on.map(String::from),
            custom_fields: fields,
        }
    }

    fn field(name: &str, text_value: Option<&str>) -> CustomField {
        CustomField {
            name: name.to_string(),
            text_value: text_value.map(String::from),
        }
    }

    #[test]
    fn parses_due_date() {
        let task = normalize(raw("Design doc", Some("2024-06-05"), vec![])).unwrap();
        assert_eq!(
            task.due_on,
            Some(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap())
        );
        assert_eq!(task.blocker, None);
    }

    #[test]
    fn missing_due_date_is_none() {
        let task = normalize(raw("Design doc", None, vec![])).unwrap();
        assert_eq!(task.due_on, None);
    }

    #[test]
    fn malformed_due_date_is_an_error() {
        let err = normalize(raw("Design doc", Some("not-a-date"), vec![])).unwrap_err();
        assert!(matches!(err, NormalizeError::MalformedDate { .. }));
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn extracts_blocker_from_custom_field() {
        let task = normalize(raw(
            "Launch",
            None,
            vec![
                field("Priority", Some("High")),
                field("Blockers", Some("waiting on legal")),
            ],
        ))
        .unwrap();
        assert_eq!(task.blocker.as_deref(), Some("waiting on legal"));
    }

    #[test]
    fn empty_blocker_field_is_ignored() {
        let task = normalize(raw("Launch", None, vec![field("Blockers", Some(""))])).unwrap();
        assert_eq!(task.blocker, None);
    }

    #[test]
    fn empty_blocker_field_does_not_shadow_a_later_one() {
        let task = normalize(raw(
            "Launch",
            None,
            vec![
                field("Blockers", Some("")),
                field("Blockers", Some("waiting on legal")),
            ],
        ))
        .unwrap();
        assert_eq!(task.blocker.as_deref(), Some("waiting on legal"));
    }

    #[test]
    fn blocker_field_without_text_is_ignored() {
        let task = normalize(raw("Launch", None, vec![field("Blockers", None)])).unwrap();
        assert_eq!(task.blocker, None);
    }

    #[test]
    fn other_custom_fields_are_not_blockers() {
        let task = normalize(raw("Launch", None, vec![field("Notes", Some("ship it"))])).unwrap();
        assert_eq!(task.blocker, None);
    }

    #[test]
    fn deserializes_provider_record() {
        let json = r#"{
            "name": "Launch",
            "due_on": "2024-06-15",
            "custom_fields": [
                {"name": "Blockers", "text_value": "waiting on legal"}
            ]
        }"#;
        let raw: RawTask = serde_json::from_str(json).unwrap();
        let task = normalize(raw).unwrap();
        assert_eq!(task.name, "Launch");
        assert_eq!(task.blocker.as_deref(), Some("waiting on legal"));
    }

    #[test]
    fn deserializes_record_with_null_due_date() {
        let json = r#"{"name": "Launch", "due_on": null, "custom_fields": []}"#;
        let raw: RawTask = serde_json::from_str(json).unwrap();
        assert_eq!(raw.due_on, None);
    }
}
