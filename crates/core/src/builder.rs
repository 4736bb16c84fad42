//! Projection of flat form values onto a typed entry draft.
//!
//! The entry form keeps one flat record holding every field of every kind, plus the selected
//! kind. [`build_entry`] is the single place that knows which fields each kind requires: it
//! copies the shared fields, attaches exactly the fields of the selected kind, and drops
//! everything else even when the user filled it in before switching kind.

use crate::entry::{
    Discharge, EntryDetails, EntryDraft, EntryKind, HealthCheckDetails, HealthCheckRating,
    HospitalDetails, OccupationalHealthcareDetails, SickLeave,
};
use crate::{EntryResult, ValidationError};
use patientor_types::{CalendarDate, NonEmptyText, TextError};
use std::fmt;

/// Every input the entry form can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Description,
    Date,
    Specialist,
    DiagnosisCodes,
    HealthCheckRating,
    EmployerName,
    SickLeaveStartDate,
    SickLeaveEndDate,
    DischargeDate,
    DischargeCriteria,
}

/// Inputs shown for every kind, in display order.
pub const SHARED_FIELDS: [FormField; 4] = [
    FormField::Description,
    FormField::Date,
    FormField::Specialist,
    FormField::DiagnosisCodes,
];

impl FormField {
    /// Path of the field in the wire payload, used in error messages.
    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::Description => "description",
            FormField::Date => "date",
            FormField::Specialist => "specialist",
            FormField::DiagnosisCodes => "diagnosisCodes",
            FormField::HealthCheckRating => "healthCheckRating",
            FormField::EmployerName => "employerName",
            FormField::SickLeaveStartDate => "sickLeave.startDate",
            FormField::SickLeaveEndDate => "sickLeave.endDate",
            FormField::DischargeDate => "discharge.date",
            FormField::DischargeCriteria => "discharge.criteria",
        }
    }

    /// Input label.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Description => "Description",
            FormField::Date => "Date",
            FormField::Specialist => "Specialist",
            FormField::DiagnosisCodes => "Diagnosis Codes",
            FormField::HealthCheckRating => "Health Check Rating",
            FormField::EmployerName => "Employer Name",
            FormField::SickLeaveStartDate => "Start Date",
            FormField::SickLeaveEndDate => "End Date",
            FormField::DischargeDate => "Discharge Date",
            FormField::DischargeCriteria => "Discharge Criteria",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl EntryKind {
    /// Inputs specific to this kind, in display order.
    pub fn fields(self) -> &'static [FormField] {
        match self {
            EntryKind::HealthCheck => &[FormField::HealthCheckRating],
            EntryKind::OccupationalHealthcare => &[
                FormField::EmployerName,
                FormField::SickLeaveStartDate,
                FormField::SickLeaveEndDate,
            ],
            EntryKind::Hospital => &[FormField::DischargeDate, FormField::DischargeCriteria],
        }
    }
}

/// Raw values as typed into the form widgets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryFormValues {
    pub description: String,
    pub date: String,
    pub specialist: String,
    pub diagnosis_codes: Vec<String>,
    pub health_check_rating: String,
    pub employer_name: String,
    pub sick_leave_start: String,
    pub sick_leave_end: String,
    pub discharge_date: String,
    pub discharge_criteria: String,
}

impl EntryFormValues {
    /// Current text of a single-value field. `None` for the diagnosis code list.
    pub fn get(&self, field: FormField) -> Option<&str> {
        let value = match field {
            FormField::Description => &self.description,
            FormField::Date => &self.date,
            FormField::Specialist => &self.specialist,
            FormField::DiagnosisCodes => return None,
            FormField::HealthCheckRating => &self.health_check_rating,
            FormField::EmployerName => &self.employer_name,
            FormField::SickLeaveStartDate => &self.sick_leave_start,
            FormField::SickLeaveEndDate => &self.sick_leave_end,
            FormField::DischargeDate => &self.discharge_date,
            FormField::DischargeCriteria => &self.discharge_criteria,
        };
        Some(value.as_str())
    }

    /// Replace a field's text. For [`FormField::DiagnosisCodes`] the value is split on commas.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Description => self.description = value,
            FormField::Date => self.date = value,
            FormField::Specialist => self.specialist = value,
            FormField::DiagnosisCodes => {
                self.diagnosis_codes = value.split(',').map(str::to_string).collect();
            }
            FormField::HealthCheckRating => self.health_check_rating = value,
            FormField::EmployerName => self.employer_name = value,
            FormField::SickLeaveStartDate => self.sick_leave_start = value,
            FormField::SickLeaveEndDate => self.sick_leave_end = value,
            FormField::DischargeDate => self.discharge_date = value,
            FormField::DischargeCriteria => self.discharge_criteria = value,
        }
    }
}

/// Build a typed draft of the given kind from the form values.
///
/// # Errors
///
/// Returns [`crate::EntryError::Validation`] naming the first field that is blank or
/// malformed. Shared fields are checked before kind fields.
pub fn build_entry(kind: EntryKind, values: &EntryFormValues) -> EntryResult<EntryDraft> {
    let description = required(FormField::Description, &values.description)?;
    let date = required_date(FormField::Date, &values.date)?;
    let specialist = required(FormField::Specialist, &values.specialist)?;
    let diagnosis_codes = diagnosis_codes(&values.diagnosis_codes);

    let details = match kind {
        EntryKind::HealthCheck => EntryDetails::HealthCheck(HealthCheckDetails {
            health_check_rating: rating(&values.health_check_rating)?,
        }),
        EntryKind::OccupationalHealthcare => {
            EntryDetails::OccupationalHealthcare(OccupationalHealthcareDetails {
                employer_name: required(FormField::EmployerName, &values.employer_name)?,
                sick_leave: sick_leave(&values.sick_leave_start, &values.sick_leave_end)?,
            })
        }
        EntryKind::Hospital => EntryDetails::Hospital(HospitalDetails {
            discharge: Discharge {
                date: required_date(FormField::DischargeDate, &values.discharge_date)?,
                criteria: required(FormField::DischargeCriteria, &values.discharge_criteria)?,
            },
        }),
    };

    tracing::debug!(kind = %kind, "built entry draft");

    Ok(EntryDraft {
        description,
        date,
        specialist,
        diagnosis_codes,
        details,
    })
}

/// Like [`build_entry`] but for an untyped kind tag.
///
/// # Errors
///
/// Returns [`crate::EntryError::UnknownKind`] for a tag outside the three kinds.
pub fn build_entry_from_tag(tag: &str, values: &EntryFormValues) -> EntryResult<EntryDraft> {
    let kind: EntryKind = tag.parse()?;
    build_entry(kind, values)
}

fn required(field: FormField, value: &str) -> Result<String, ValidationError> {
    NonEmptyText::new(value)
        .map(NonEmptyText::into_inner)
        .map_err(|_| ValidationError::Missing(field))
}

fn parse_date(field: FormField, value: &str) -> Result<CalendarDate, ValidationError> {
    CalendarDate::parse(value).map_err(|e| match e {
        TextError::Empty => ValidationError::Missing(field),
        other => ValidationError::Invalid {
            field,
            reason: other.to_string(),
        },
    })
}

fn required_date(field: FormField, value: &str) -> Result<String, ValidationError> {
    parse_date(field, value).map(|date| date.to_string())
}

fn rating(value: &str) -> Result<HealthCheckRating, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing(FormField::HealthCheckRating));
    }
    value
        .parse()
        .map_err(|reason| ValidationError::Invalid {
            field: FormField::HealthCheckRating,
            reason,
        })
}

fn sick_leave(start: &str, end: &str) -> Result<Option<SickLeave>, ValidationError> {
    match (start.trim().is_empty(), end.trim().is_empty()) {
        (true, true) => Ok(None),
        (true, false) => Err(ValidationError::Missing(FormField::SickLeaveStartDate)),
        (false, true) => Err(ValidationError::Missing(FormField::SickLeaveEndDate)),
        (false, false) => {
            let start = parse_date(FormField::SickLeaveStartDate, start)?;
            let end = parse_date(FormField::SickLeaveEndDate, end)?;
            if end < start {
                return Err(ValidationError::Invalid {
                    field: FormField::SickLeaveEndDate,
                    reason: format!("sick leave ends ({end}) before it starts ({start})"),
                });
            }
            Ok(Some(SickLeave {
                start_date: start.to_string(),
                end_date: end.to_string(),
            }))
        }
    }
}

fn diagnosis_codes(codes: &[String]) -> Option<Vec<String>> {
    let codes: Vec<String> = codes
        .iter()
        .map(|code| code.trim())
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect();
    (!codes.is_empty()).then_some(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntryError;
    use serde_json::json;

    /// Every field of every kind populated, as if the user had visited all three layouts.
    fn filled_values() -> EntryFormValues {
        EntryFormValues {
            description: "Annual check".into(),
            date: "2024-01-10".into(),
            specialist: "Dr. A".into(),
            diagnosis_codes: vec![],
            health_check_rating: "1".into(),
            employer_name: "Acme".into(),
            sick_leave_start: "2024-01-10".into(),
            sick_leave_end: "2024-01-20".into(),
            discharge_date: "2024-02-01".into(),
            discharge_criteria: "stable".into(),
        }
    }

    fn to_json(draft: &EntryDraft) -> serde_json::Value {
        serde_json::to_value(draft).expect("draft should serialize")
    }

    fn missing(err: EntryError) -> FormField {
        match err {
            EntryError::Validation(ValidationError::Missing(field)) => field,
            other => panic!("expected missing-field error, got {other:?}"),
        }
    }

    #[test]
    fn test_health_check_scenario() {
        let draft = build_entry(EntryKind::HealthCheck, &filled_values())
            .expect("health check should build");

        assert_eq!(
            to_json(&draft),
            json!({
                "type": "HealthCheck",
                "description": "Annual check",
                "date": "2024-01-10",
                "specialist": "Dr. A",
                "healthCheckRating": 1
            })
        );
    }

    #[test]
    fn test_hospital_nests_discharge() {
        let draft =
            build_entry(EntryKind::Hospital, &filled_values()).expect("hospital should build");
        let value = to_json(&draft);

        assert_eq!(value["type"], "Hospital");
        assert_eq!(
            value["discharge"],
            json!({ "date": "2024-02-01", "criteria": "stable" })
        );
        assert!(value.get("healthCheckRating").is_none());
        assert!(value.get("employerName").is_none());
        assert!(value.get("sickLeave").is_none());
    }

    #[test]
    fn test_occupational_carries_employer_and_sick_leave_only() {
        let draft = build_entry(EntryKind::OccupationalHealthcare, &filled_values())
            .expect("occupational should build");

        assert_eq!(
            to_json(&draft),
            json!({
                "type": "OccupationalHealthcare",
                "description": "Annual check",
                "date": "2024-01-10",
                "specialist": "Dr. A",
                "employerName": "Acme",
                "sickLeave": { "startDate": "2024-01-10", "endDate": "2024-01-20" }
            })
        );
    }

    #[test]
    fn test_every_kind_emits_only_its_own_keys() {
        let shared = ["type", "description", "date", "specialist"];
        for kind in EntryKind::ALL {
            let draft = build_entry(kind, &filled_values()).expect("filled form should build");
            let value = to_json(&draft);
            let mut keys: Vec<&str> = value
                .as_object()
                .expect("draft is an object")
                .keys()
                .map(String::as_str)
                .collect();
            keys.sort_unstable();

            let mut expected: Vec<&str> = shared.to_vec();
            expected.extend(match kind {
                EntryKind::HealthCheck => vec!["healthCheckRating"],
                EntryKind::OccupationalHealthcare => vec!["employerName", "sickLeave"],
                EntryKind::Hospital => vec!["discharge"],
            });
            expected.sort_unstable();

            assert_eq!(keys, expected, "unexpected keys for {kind}");
        }
    }

    #[test]
    fn test_health_check_without_rating_fails() {
        let mut values = filled_values();
        values.health_check_rating = String::new();
        let err = build_entry(EntryKind::HealthCheck, &values).expect_err("rating is required");
        assert_eq!(missing(err), FormField::HealthCheckRating);
    }

    #[test]
    fn test_health_check_with_out_of_range_rating_fails() {
        let mut values = filled_values();
        values.health_check_rating = "5".into();
        let err = build_entry(EntryKind::HealthCheck, &values).expect_err("5 is not a rating");
        assert!(matches!(
            err,
            EntryError::Validation(ValidationError::Invalid {
                field: FormField::HealthCheckRating,
                ..
            })
        ));
    }

    #[test]
    fn test_hospital_without_discharge_date_fails() {
        let mut values = filled_values();
        values.discharge_date = " ".into();
        let err = build_entry(EntryKind::Hospital, &values).expect_err("discharge date required");
        assert_eq!(missing(err), FormField::DischargeDate);
    }

    #[test]
    fn test_hospital_without_discharge_criteria_fails() {
        let mut values = filled_values();
        values.discharge_criteria = String::new();
        let err = build_entry(EntryKind::Hospital, &values).expect_err("criteria required");
        assert_eq!(missing(err), FormField::DischargeCriteria);
    }

    #[test]
    fn test_occupational_without_employer_fails() {
        let mut values = filled_values();
        values.employer_name = String::new();
        let err = build_entry(EntryKind::OccupationalHealthcare, &values)
            .expect_err("employer required");
        assert_eq!(missing(err), FormField::EmployerName);
    }

    #[test]
    fn test_occupational_sick_leave_is_optional() {
        let mut values = filled_values();
        values.sick_leave_start = String::new();
        values.sick_leave_end = String::new();
        let draft = build_entry(EntryKind::OccupationalHealthcare, &values)
            .expect("sick leave may be omitted");
        assert!(to_json(&draft).get("sickLeave").is_none());
    }

    #[test]
    fn test_half_filled_sick_leave_fails() {
        let mut values = filled_values();
        values.sick_leave_end = String::new();
        let err = build_entry(EntryKind::OccupationalHealthcare, &values)
            .expect_err("end date required once start is given");
        assert_eq!(missing(err), FormField::SickLeaveEndDate);
    }

    #[test]
    fn test_sick_leave_ending_before_start_fails() {
        let mut values = filled_values();
        values.sick_leave_start = "2024-01-20".into();
        values.sick_leave_end = "2024-01-10".into();
        let err = build_entry(EntryKind::OccupationalHealthcare, &values)
            .expect_err("inverted window should fail");
        assert_eq!(
            err,
            EntryError::Validation(ValidationError::Invalid {
                field: FormField::SickLeaveEndDate,
                reason: "sick leave ends (2024-01-10) before it starts (2024-01-20)".into(),
            })
        );
    }

    #[test]
    fn test_blank_shared_fields_fail_in_order() {
        let mut values = filled_values();
        values.description = String::new();
        values.date = String::new();
        let err = build_entry(EntryKind::Hospital, &values).expect_err("description required");
        assert_eq!(missing(err), FormField::Description);

        values.description = "Fall".into();
        let err = build_entry(EntryKind::Hospital, &values).expect_err("date required");
        assert_eq!(missing(err), FormField::Date);
    }

    #[test]
    fn test_malformed_date_is_invalid_not_missing() {
        let mut values = filled_values();
        values.date = "yesterday".into();
        let err = build_entry(EntryKind::HealthCheck, &values).expect_err("bad date");
        assert_eq!(
            err.to_string(),
            "invalid entry: date is invalid: 'yesterday' is not a valid date (expected YYYY-MM-DD)"
        );
    }

    #[test]
    fn test_diagnosis_codes_are_trimmed_and_blanks_dropped() {
        let mut values = filled_values();
        values.diagnosis_codes = vec![" M24.2 ".into(), "".into(), "J10.1".into()];
        let draft = build_entry(EntryKind::HealthCheck, &values).expect("should build");
        assert_eq!(
            draft.diagnosis_codes,
            Some(vec!["M24.2".to_string(), "J10.1".to_string()])
        );
    }

    #[test]
    fn test_unknown_tag_does_not_default() {
        let err = build_entry_from_tag("Dental", &filled_values())
            .expect_err("unknown tag must fail");
        assert_eq!(err, EntryError::UnknownKind("Dental".into()));
    }

    #[test]
    fn test_set_splits_diagnosis_codes_on_commas() {
        let mut values = EntryFormValues::default();
        values.set(FormField::DiagnosisCodes, "M24.2, J10.1");
        assert_eq!(values.diagnosis_codes, vec!["M24.2", " J10.1"]);
        assert_eq!(values.get(FormField::DiagnosisCodes), None);

        values.set(FormField::DischargeCriteria, "stable");
        assert_eq!(values.get(FormField::DischargeCriteria), Some("stable"));
    }
}
