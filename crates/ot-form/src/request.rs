//! The overtime request record

use crate::{FormError, Result};
use serde::{Deserialize, Serialize};

/// Placeholder written as the issue date ("today").
///
/// This is a literal, not derived from the system clock.
pub const ISSUE_DATE_TODAY: &str = "วันนี้";

/// One of the seven fields of an overtime request, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Department,
    ProjectName,
    OtDate,
    OtTime,
    Hours,
    Reason,
}

impl Field {
    /// All fields in the order they appear in commands and on the form
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Department,
        Field::ProjectName,
        Field::OtDate,
        Field::OtTime,
        Field::Hours,
        Field::Reason,
    ];

    /// Key used in JSON payloads
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Department => "department",
            Field::ProjectName => "project_name",
            Field::OtDate => "ot_date",
            Field::OtTime => "ot_time",
            Field::Hours => "hours",
            Field::Reason => "reason",
        }
    }
}

/// A complete overtime request, ready to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRequest {
    pub name: String,
    pub department: String,
    pub project_name: String,
    pub ot_date: String,
    pub ot_time: String,
    pub hours: String,
    pub reason: String,
    #[serde(default = "default_issue_date")]
    pub issue_date: String,
}

fn default_issue_date() -> String {
    ISSUE_DATE_TODAY.to_string()
}

impl OvertimeRequest {
    /// Build a request from the seven field values in [`Field::ALL`] order
    pub fn from_fields(fields: [String; 7]) -> Self {
        let [name, department, project_name, ot_date, ot_time, hours, reason] = fields;
        Self {
            name,
            department,
            project_name,
            ot_date,
            ot_time,
            hours,
            reason,
            issue_date: default_issue_date(),
        }
    }

    /// Build a request from a loose JSON object
    ///
    /// Every field must be present as a string; a missing key is reported
    /// rather than rendered as a blank line.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| FormError::InvalidRecord("expected a JSON object".to_string()))?;

        let mut fields: [String; 7] = Default::default();
        for (slot, field) in fields.iter_mut().zip(Field::ALL) {
            *slot = object
                .get(field.key())
                .and_then(|v| v.as_str())
                .ok_or(FormError::MissingField(field.key()))?
                .to_string();
        }

        let mut request = Self::from_fields(fields);
        if let Some(issue_date) = object.get("issue_date").and_then(|v| v.as_str()) {
            request.issue_date = issue_date.to_string();
        }
        Ok(request)
    }

    /// Value of a field
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Department => &self.department,
            Field::ProjectName => &self.project_name,
            Field::OtDate => &self.ot_date,
            Field::OtTime => &self.ot_time,
            Field::Hours => &self.hours,
            Field::Reason => &self.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_json() -> serde_json::Value {
        json!({
            "name": "สมชาย ใจดี",
            "department": "Engineering",
            "project_name": "Project X",
            "ot_date": "2024-05-01",
            "ot_time": "18:00-21:00",
            "hours": "3",
            "reason": "Release"
        })
    }

    #[test]
    fn test_from_fields_keeps_order() {
        let request = OvertimeRequest::from_fields(
            ["a", "b", "c", "d", "e", "f", "g"].map(String::from),
        );

        let values: Vec<&str> = Field::ALL.iter().map(|f| request.value(*f)).collect();
        assert_eq!(values, vec!["a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(request.issue_date, ISSUE_DATE_TODAY);
    }

    #[test]
    fn test_from_json() {
        let request = OvertimeRequest::from_json(&sample_json()).unwrap();
        assert_eq!(request.name, "สมชาย ใจดี");
        assert_eq!(request.ot_time, "18:00-21:00");
        assert_eq!(request.issue_date, ISSUE_DATE_TODAY);
    }

    #[test]
    fn test_from_json_keeps_explicit_issue_date() {
        let mut value = sample_json();
        value["issue_date"] = json!("2024-05-02");
        let request = OvertimeRequest::from_json(&value).unwrap();
        assert_eq!(request.issue_date, "2024-05-02");
    }

    #[test]
    fn test_from_json_missing_field() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove("hours");

        match OvertimeRequest::from_json(&value) {
            Err(FormError::MissingField(key)) => assert_eq!(key, "hours"),
            other => panic!("Expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(matches!(
            OvertimeRequest::from_json(&json!(["a"])),
            Err(FormError::InvalidRecord(_))
        ));
    }

    #[test]
    fn test_field_keys_match_serde_names() {
        let request = OvertimeRequest::from_json(&sample_json()).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        for field in Field::ALL {
            assert_eq!(value[field.key()], json!(request.value(field)));
        }
    }
}
