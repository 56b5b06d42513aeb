//! Issue domain entity, severity and field validation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    MAX_DESCRIPTION_LENGTH, MAX_RESPONSIBLE_LENGTH, MAX_STATUS_LENGTH, MAX_TITLE_LENGTH,
};
use crate::error::{DomainResult, InvalidInput, IssueField};

/// Issue severity. Defaults to `Low`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    Major,
    Critical,
}

impl Severity {
    /// Normalize a caller-supplied severity.
    ///
    /// Case-insensitive; absent, empty or unrecognized input is `Low`.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Severity::Low;
        };

        match raw.to_uppercase().as_str() {
            "MEDIUM" => Severity::Medium,
            "MAJOR" => Severity::Major,
            "CRITICAL" => Severity::Critical,
            _ => Severity::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::Major => "MAJOR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue fields as supplied by a caller, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IssueDraft {
    #[cfg_attr(feature = "openapi", schema(example = "Login page crashes"))]
    pub title: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Submitting an empty form returns 500"))]
    pub description: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "OPEN"))]
    pub status: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "alice"))]
    pub responsible: Option<String>,
    /// LOW, MEDIUM, MAJOR or CRITICAL (any casing); anything else is LOW
    #[cfg_attr(feature = "openapi", schema(example = "major"))]
    pub severity: Option<String>,
}

/// Validated issue fields, ready to be applied to an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueFields {
    pub title: String,
    pub description: String,
    pub status: String,
    pub responsible: String,
    pub severity: Severity,
}

impl IssueDraft {
    fn value(&self, field: IssueField) -> Option<&str> {
        match field {
            IssueField::Title => self.title.as_deref(),
            IssueField::Description => self.description.as_deref(),
            IssueField::Status => self.status.as_deref(),
            IssueField::Responsible => self.responsible.as_deref(),
        }
    }

    /// Validate the draft.
    ///
    /// Every required field is checked for presence first, in the order
    /// title, description, status, responsible; length caps are checked
    /// afterwards in the same order. The first violation is returned.
    pub fn validate(self) -> DomainResult<IssueFields> {
        for field in IssueField::ALL {
            if self.value(field).map_or(true, str::is_empty) {
                return Err(InvalidInput::Missing(field).into());
            }
        }

        for field in IssueField::ALL {
            let max = max_length(field);
            let len = self.value(field).map_or(0, |v| v.chars().count());
            if len > max {
                return Err(InvalidInput::TooLong { field, max }.into());
            }
        }

        let severity = Severity::parse(self.severity.as_deref());

        Ok(IssueFields {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            responsible: self.responsible.unwrap_or_default(),
            severity,
        })
    }
}

/// Length cap for a required field
pub fn max_length(field: IssueField) -> usize {
    match field {
        IssueField::Title => MAX_TITLE_LENGTH,
        IssueField::Description => MAX_DESCRIPTION_LENGTH,
        IssueField::Status => MAX_STATUS_LENGTH,
        IssueField::Responsible => MAX_RESPONSIBLE_LENGTH,
    }
}

/// Issue domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Issue {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: String,
    pub responsible: String,
    pub severity: Severity,
    /// Identity that created the issue
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Create a new issue owned by `owner_id`
    pub fn new(fields: IssueFields, owner_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            description: fields.description,
            status: fields.status,
            responsible: fields.responsible,
            severity: fields.severity,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the mutable fields. Id and owner are never touched.
    pub fn apply(&mut self, fields: IssueFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.status = fields.status;
        self.responsible = fields.responsible;
        self.severity = fields.severity;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn draft() -> IssueDraft {
        IssueDraft {
            title: Some("Crash on login".to_string()),
            description: Some("Stack trace attached".to_string()),
            status: Some("OPEN".to_string()),
            responsible: Some("bob".to_string()),
            severity: Some("major".to_string()),
        }
    }

    fn missing(err: DomainError) -> Option<IssueField> {
        match err {
            DomainError::InvalidInput(InvalidInput::Missing(field)) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_severity_is_case_insensitive() {
        let cases = [
            (["low", "Low", "LOW"], Severity::Low),
            (["medium", "Medium", "MEDIUM"], Severity::Medium),
            (["major", "Major", "MAJOR"], Severity::Major),
            (["critical", "Critical", "CRITICAL"], Severity::Critical),
        ];

        for (inputs, expected) in cases {
            for input in inputs {
                assert_eq!(Severity::parse(Some(input)), expected, "input {input}");
            }
        }
    }

    #[test]
    fn test_severity_defaults_to_low() {
        assert_eq!(Severity::parse(None), Severity::Low);
        assert_eq!(Severity::parse(Some("")), Severity::Low);
        assert_eq!(Severity::parse(Some("blocker")), Severity::Low);
        assert_eq!(Severity::parse(Some(" major")), Severity::Low);
    }

    #[test]
    fn test_validate_keeps_fields() {
        let fields = draft().validate().unwrap();
        assert_eq!(fields.title, "Crash on login");
        assert_eq!(fields.description, "Stack trace attached");
        assert_eq!(fields.status, "OPEN");
        assert_eq!(fields.responsible, "bob");
        assert_eq!(fields.severity, Severity::Major);
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut d = draft();
        d.title = Some(String::new());
        d.description = None;
        assert_eq!(missing(d.validate().unwrap_err()), Some(IssueField::Title));

        let mut d = draft();
        d.description = Some(String::new());
        d.responsible = None;
        assert_eq!(
            missing(d.validate().unwrap_err()),
            Some(IssueField::Description)
        );

        let mut d = draft();
        d.status = None;
        assert_eq!(missing(d.validate().unwrap_err()), Some(IssueField::Status));

        let mut d = draft();
        d.responsible = Some(String::new());
        assert_eq!(
            missing(d.validate().unwrap_err()),
            Some(IssueField::Responsible)
        );
    }

    #[test]
    fn test_missing_field_reported_before_length() {
        let mut d = draft();
        d.title = Some("t".repeat(MAX_TITLE_LENGTH + 1));
        d.status = None;
        assert_eq!(missing(d.validate().unwrap_err()), Some(IssueField::Status));
    }

    #[test]
    fn test_length_caps() {
        let mut d = draft();
        d.title = Some("t".repeat(MAX_TITLE_LENGTH));
        d.description = Some("d".repeat(MAX_DESCRIPTION_LENGTH));
        assert!(d.clone().validate().is_ok());

        d.description = Some("d".repeat(MAX_DESCRIPTION_LENGTH + 1));
        let err = d.validate().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidInput(InvalidInput::TooLong {
                field: IssueField::Description,
                max: MAX_DESCRIPTION_LENGTH,
            })
        );
    }

    #[test]
    fn test_missing_severity_is_low() {
        let mut d = draft();
        d.severity = None;
        assert_eq!(d.validate().unwrap().severity, Severity::Low);
    }

    #[test]
    fn test_apply_keeps_id_and_owner() {
        let owner = Uuid::new_v4();
        let mut issue = Issue::new(draft().validate().unwrap(), owner);
        let id = issue.id;

        let mut d = draft();
        d.title = Some("Renamed".to_string());
        d.severity = Some("critical".to_string());
        issue.apply(d.validate().unwrap());

        assert_eq!(issue.id, id);
        assert_eq!(issue.owner_id, owner);
        assert_eq!(issue.title, "Renamed");
        assert_eq!(issue.severity, Severity::Critical);
    }
}
