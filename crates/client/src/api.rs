//! The remote API as the pages see it.
//!
//! Pages depend on [`PatientApi`] rather than on the HTTP client so the backend can be
//! substituted, for example by an in-memory fake in tests.

use crate::ClientResult;
use async_trait::async_trait;
use patientor_core::{Diagnosis, EntryDraft, Patient, PatientFormValues, PatientSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Outcome of appending an entry, as handed to the UI layer.
///
/// Serialises as `{"status":"OK","patient":{..}}` or `{"status":"Error","error":".."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum AddEntryResult {
    #[serde(rename = "OK")]
    Ok { patient: Patient },
    Error { error: String },
}

#[async_trait]
pub trait PatientApi: Send + Sync {
    /// `GET /patients`
    async fn list_patients(&self) -> ClientResult<Vec<PatientSummary>>;

    /// `POST /patients`
    async fn create_patient(&self, values: &PatientFormValues) -> ClientResult<Patient>;

    /// `GET /patients/{id}`
    async fn get_patient(&self, id: &str) -> ClientResult<Patient>;

    /// `GET /diagnoses`
    async fn get_diagnoses(&self) -> ClientResult<Vec<Diagnosis>>;

    /// `POST /patients/{id}/entries`
    ///
    /// Never fails: transport and server errors are folded into [`AddEntryResult::Error`].
    async fn add_entry(&self, patient_id: &str, entry: &EntryDraft) -> AddEntryResult;
}

#[async_trait]
impl<T: PatientApi + ?Sized> PatientApi for Arc<T> {
    async fn list_patients(&self) -> ClientResult<Vec<PatientSummary>> {
        (**self).list_patients().await
    }

    async fn create_patient(&self, values: &PatientFormValues) -> ClientResult<Patient> {
        (**self).create_patient(values).await
    }

    async fn get_patient(&self, id: &str) -> ClientResult<Patient> {
        (**self).get_patient(id).await
    }

    async fn get_diagnoses(&self) -> ClientResult<Vec<Diagnosis>> {
        (**self).get_diagnoses().await
    }

    async fn add_entry(&self, patient_id: &str, entry: &EntryDraft) -> AddEntryResult {
        (**self).add_entry(patient_id, entry).await
    }
}
