//! Patient list page.
//!
//! Holds the summaries from `GET /patients` and appends patients created through the form.
//! Request failures go on the page's error banner and leave the list as it was.

use crate::api::PatientApi;
use crate::banner::ErrorBanner;
use crate::ClientResult;
use patientor_core::{ClientConfig, Patient, PatientFormValues, PatientSummary};

/// The patient list and its "add patient" form.
pub struct PatientListPage<A> {
    api: A,
    patients: Vec<PatientSummary>,
    banner: ErrorBanner,
}

impl<A: PatientApi> PatientListPage<A> {
    pub fn new(api: A, cfg: &ClientConfig) -> Self {
        Self {
            api,
            patients: Vec::new(),
            banner: ErrorBanner::new(cfg.error_banner_duration()),
        }
    }

    /// Fetch the list. On failure the list stays as it was and the error goes on the banner.
    pub async fn load(&mut self) -> ClientResult<&[PatientSummary]> {
        match self.api.list_patients().await {
            Ok(patients) => {
                tracing::debug!(count = patients.len(), "loaded patient list");
                self.patients = patients;
                Ok(&self.patients)
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching patient list");
                self.banner.show(e.banner_message());
                Err(e)
            }
        }
    }

    /// Submit the new-patient form and append the created patient to the list.
    pub async fn create_patient(&mut self, values: &PatientFormValues) -> ClientResult<Patient> {
        match self.api.create_patient(values).await {
            Ok(patient) => {
                tracing::info!(patient_id = %patient.id, "patient added to list");
                self.patients.push(PatientSummary::from(&patient));
                self.banner.clear();
                Ok(patient)
            }
            Err(e) => {
                tracing::warn!(error = %e, "patient not created");
                self.banner.show(e.banner_message());
                Err(e)
            }
        }
    }

    pub fn patients(&self) -> &[PatientSummary] {
        &self.patients
    }

    pub fn error_message(&self) -> Option<&str> {
        self.banner.message()
    }
}
