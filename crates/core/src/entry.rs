//! Medical entry model.
//!
//! An entry is one dated record on a patient, in exactly one of three kinds. The kind is the
//! `type` key on the wire and a closed enum here, so an entry can never carry the fields of
//! another kind.
//!
//! Wire shape (JSON, camelCase):
//!
//! ```text
//! { "id": "..", "type": "Hospital", "description": "..", "date": "2024-02-01",
//!   "specialist": "..", "diagnosisCodes": [".."],
//!   "discharge": { "date": "2024-02-03", "criteria": "stable" } }
//! ```

use crate::EntryError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Entry kind
// ============================================================================

/// Discriminator selecting which shape an entry has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum EntryKind {
    #[default]
    HealthCheck,
    OccupationalHealthcare,
    Hospital,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [
        EntryKind::HealthCheck,
        EntryKind::OccupationalHealthcare,
        EntryKind::Hospital,
    ];

    /// The `type` tag used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::HealthCheck => "HealthCheck",
            EntryKind::OccupationalHealthcare => "OccupationalHealthcare",
            EntryKind::Hospital => "Hospital",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = EntryError;

    /// Accepts the wire tag and its kebab/snake spellings, ignoring case.
    ///
    /// Anything else is [`EntryError::UnknownKind`]; there is no fallback kind.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalised.as_str() {
            "healthcheck" => Ok(EntryKind::HealthCheck),
            "occupationalhealthcare" => Ok(EntryKind::OccupationalHealthcare),
            "hospital" => Ok(EntryKind::Hospital),
            _ => Err(EntryError::UnknownKind(s.to_string())),
        }
    }
}

// ============================================================================
// Health check rating
// ============================================================================

/// Outcome of a general health check. Serialised as its integer value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HealthCheckRating {
    Healthy = 0,
    LowRisk = 1,
    HighRisk = 2,
    CriticalRisk = 3,
}

impl HealthCheckRating {
    pub const ALL: [HealthCheckRating; 4] = [
        HealthCheckRating::Healthy,
        HealthCheckRating::LowRisk,
        HealthCheckRating::HighRisk,
        HealthCheckRating::CriticalRisk,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HealthCheckRating::Healthy => "Healthy",
            HealthCheckRating::LowRisk => "Low Risk",
            HealthCheckRating::HighRisk => "High Risk",
            HealthCheckRating::CriticalRisk => "Critical Risk",
        }
    }
}

impl From<HealthCheckRating> for u8 {
    fn from(rating: HealthCheckRating) -> Self {
        rating as u8
    }
}

impl TryFrom<u8> for HealthCheckRating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HealthCheckRating::Healthy),
            1 => Ok(HealthCheckRating::LowRisk),
            2 => Ok(HealthCheckRating::HighRisk),
            3 => Ok(HealthCheckRating::CriticalRisk),
            other => Err(format!("health check rating must be 0-3, got {other}")),
        }
    }
}

impl FromStr for HealthCheckRating {
    type Err = String;

    /// Parses either the integer value (`"1"`) or the rating name (`"Low Risk"`, `"low-risk"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u8>() {
            return HealthCheckRating::try_from(value);
        }

        let normalised: String = trimmed
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        HealthCheckRating::ALL
            .into_iter()
            .find(|rating| format!("{rating:?}").to_lowercase() == normalised)
            .ok_or_else(|| format!("'{trimmed}' is not a health check rating"))
    }
}

impl fmt::Display for HealthCheckRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Kind-specific payloads
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeave {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discharge {
    pub date: String,
    pub criteria: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckDetails {
    pub health_check_rating: HealthCheckRating,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationalHealthcareDetails {
    pub employer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sick_leave: Option<SickLeave>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalDetails {
    pub discharge: Discharge,
}

/// The kind-specific half of an entry, tagged by `type`.
///
/// Decoding rejects an entry that carries a key belonging to another kind, such as a
/// `HealthCheck` with `employerName`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum EntryDetails {
    HealthCheck(HealthCheckDetails),
    OccupationalHealthcare(OccupationalHealthcareDetails),
    Hospital(HospitalDetails),
}

impl EntryDetails {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryDetails::HealthCheck(_) => EntryKind::HealthCheck,
            EntryDetails::OccupationalHealthcare(_) => EntryKind::OccupationalHealthcare,
            EntryDetails::Hospital(_) => EntryKind::Hospital,
        }
    }
}

/// Every kind-specific key an entry may carry, before the `type` tag is checked against them.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDetails {
    #[serde(rename = "type")]
    tag: String,
    health_check_rating: Option<HealthCheckRating>,
    employer_name: Option<String>,
    sick_leave: Option<SickLeave>,
    discharge: Option<Discharge>,
}

impl WireDetails {
    fn into_details(self) -> Result<EntryDetails, String> {
        let kind = EntryKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == self.tag)
            .ok_or_else(|| format!("unknown entry type `{}`", self.tag))?;

        let present = [
            ("healthCheckRating", self.health_check_rating.is_some()),
            ("employerName", self.employer_name.is_some()),
            ("sickLeave", self.sick_leave.is_some()),
            ("discharge", self.discharge.is_some()),
        ];
        let allowed: &[&str] = match kind {
            EntryKind::HealthCheck => &["healthCheckRating"],
            EntryKind::OccupationalHealthcare => &["employerName", "sickLeave"],
            EntryKind::Hospital => &["discharge"],
        };
        if let Some((key, _)) = present
            .iter()
            .find(|(key, is_set)| *is_set && !allowed.contains(key))
        {
            return Err(format!("{kind} entry must not carry `{key}`"));
        }

        let missing = |key: &str| format!("{kind} entry is missing `{key}`");
        Ok(match kind {
            EntryKind::HealthCheck => EntryDetails::HealthCheck(HealthCheckDetails {
                health_check_rating: self
                    .health_check_rating
                    .ok_or_else(|| missing("healthCheckRating"))?,
            }),
            EntryKind::OccupationalHealthcare => {
                EntryDetails::OccupationalHealthcare(OccupationalHealthcareDetails {
                    employer_name: self.employer_name.ok_or_else(|| missing("employerName"))?,
                    sick_leave: self.sick_leave,
                })
            }
            EntryKind::Hospital => EntryDetails::Hospital(HospitalDetails {
                discharge: self.discharge.ok_or_else(|| missing("discharge"))?,
            }),
        })
    }
}

impl<'de> Deserialize<'de> for EntryDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        WireDetails::deserialize(deserializer)?
            .into_details()
            .map_err(de::Error::custom)
    }
}

// ============================================================================
// Drafts and persisted entries
// ============================================================================

/// An entry before the server has assigned it an id. This is the `POST` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub description: String,
    pub date: String,
    pub specialist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_codes: Option<Vec<String>>,
    #[serde(flatten)]
    pub details: EntryDetails,
}

impl EntryDraft {
    pub fn kind(&self) -> EntryKind {
        self.details.kind()
    }

    /// Attach a server-assigned id.
    pub fn into_entry(self, id: impl Into<String>) -> Entry {
        Entry {
            id: id.into(),
            draft: self,
        }
    }
}

/// A persisted entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    #[serde(flatten)]
    pub draft: EntryDraft,
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        self.draft.kind()
    }

    pub fn details(&self) -> &EntryDetails {
        &self.draft.details
    }

    /// Diagnosis codes, empty when the entry has none.
    pub fn diagnosis_codes(&self) -> &[String] {
        self.draft.diagnosis_codes.as_deref().unwrap_or_default()
    }
}
