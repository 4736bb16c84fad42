//! Patient records as served by the API.
//!
//! A [`Patient`] is replaced wholesale whenever the server returns a newer version; nothing in
//! the client patches it in place.

use crate::entry::Entry;
use patientor_types::{CalendarDate, NonEmptyText, TextError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Glyph shown next to the patient name.
    pub fn symbol(self) -> char {
        match self {
            Gender::Male => '♂',
            Gender::Female => '♀',
            Gender::Other => '⚧',
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("'{other}' is not one of male, female, other")),
        }
    }
}

/// A full patient record, including entries in server order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub ssn: String,
    pub occupation: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Element of the patient list. Sensitive fields are not served here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub id: String,
    pub name: String,
    pub occupation: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

impl From<&Patient> for PatientSummary {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            name: patient.name.clone(),
            occupation: patient.occupation.clone(),
            gender: patient.gender,
            date_of_birth: patient.date_of_birth.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatientFormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("dateOfBirth is invalid: {0}")]
    InvalidDateOfBirth(TextError),
}

/// Body of `POST /patients`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientFormValues {
    pub name: String,
    pub ssn: String,
    pub date_of_birth: String,
    pub occupation: String,
    pub gender: Gender,
}

impl PatientFormValues {
    /// Trim and check every field, returning the values to send.
    ///
    /// # Errors
    ///
    /// Returns `PatientFormError::Missing` naming the first blank field, or
    /// `PatientFormError::InvalidDateOfBirth` when the birth date is not `YYYY-MM-DD`.
    pub fn validated(&self) -> Result<Self, PatientFormError> {
        let required = |value: &str, field: &'static str| {
            NonEmptyText::new(value)
                .map(NonEmptyText::into_inner)
                .map_err(|_| PatientFormError::Missing(field))
        };

        let name = required(&self.name, "name")?;
        let ssn = required(&self.ssn, "ssn")?;
        let date_of_birth = match CalendarDate::parse(&self.date_of_birth) {
            Ok(date) => date.to_string(),
            Err(TextError::Empty) => return Err(PatientFormError::Missing("dateOfBirth")),
            Err(e) => return Err(PatientFormError::InvalidDateOfBirth(e)),
        };
        let occupation = required(&self.occupation, "occupation")?;

        Ok(Self {
            name,
            ssn,
            date_of_birth,
            occupation,
            gender: self.gender,
        })
    }
}
