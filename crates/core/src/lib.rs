//! # Patientor Core
//!
//! Domain model and pure logic for the Patientor patient-records client:
//! - the entry model, a closed tagged union of three entry kinds
//! - the entry builder projecting flat form values onto a typed draft
//! - add-entry form state
//! - the entry/patient renderer and the diagnosis lookup it uses
//! - startup configuration
//!
//! **No transport concerns**: HTTP calls and page orchestration live in `patientor-client`.

pub mod builder;
pub mod config;
pub mod constants;
pub mod diagnosis;
pub mod entry;
pub mod error;
pub mod form;
pub mod patient;
pub mod render;

pub use builder::{build_entry, build_entry_from_tag, EntryFormValues, FormField};
pub use config::ClientConfig;
pub use diagnosis::{Diagnosis, DiagnosisLookup, Resolution};
pub use entry::{
    Discharge, Entry, EntryDetails, EntryDraft, EntryKind, HealthCheckDetails, HealthCheckRating,
    HospitalDetails, OccupationalHealthcareDetails, SickLeave,
};
pub use error::{ConfigError, ConfigResult, EntryError, EntryResult, ValidationError};
pub use form::EntryForm;
pub use patient::{Gender, Patient, PatientFormError, PatientFormValues, PatientSummary};
pub use render::{render_entry, render_patient, EntryView, KindIcon, PatientView};

// Re-export validated primitives so downstream crates need only one dependency.
pub use patientor_types::{CalendarDate, NonEmptyText, TextError};
