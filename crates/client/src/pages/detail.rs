//! Patient detail page orchestration.
//!
//! On mount the page fetches the patient and the diagnosis table concurrently. Either request
//! may fail independently; a failure is logged and the slot keeps its initial value, so the page
//! shows a loading state (patient) or `Loading...` annotations (diagnoses). Nothing is retried.
//!
//! Submitting the add-entry form never patches the patient locally: on success the page swaps in
//! the patient the server returned, on failure the previous patient and the draft both stay.

use crate::api::{AddEntryResult, PatientApi};
use crate::banner::ErrorBanner;
use patientor_core::{
    render_patient, ClientConfig, DiagnosisLookup, EntryError, EntryForm, Patient, PatientView,
};
use std::fmt;

/// What the page shows in its main area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageView<'a> {
    Loading,
    Patient(PatientView<'a>),
}

impl fmt::Display for PageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageView::Loading => f.write_str("Loading..."),
            PageView::Patient(view) => view.fmt(f),
        }
    }
}

/// Result of [`PatientDetailPage::submit_entry`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server accepted the entry; the form has closed.
    Added,
    /// The draft did not validate. Nothing was sent and the error is shown on the form.
    Invalid(EntryError),
    /// The server or transport rejected the entry. The message is on the banner.
    Failed(String),
    /// There was no open form to submit.
    FormClosed,
}

pub struct PatientDetailPage<A> {
    api: A,
    patient_id: String,
    patient: Option<Patient>,
    diagnoses: DiagnosisLookup,
    entry_form: Option<EntryForm>,
    banner: ErrorBanner,
}

impl<A: PatientApi> PatientDetailPage<A> {
    pub fn new(api: A, patient_id: impl Into<String>, cfg: &ClientConfig) -> Self {
        Self {
            api,
            patient_id: patient_id.into(),
            patient: None,
            diagnoses: DiagnosisLookup::default(),
            entry_form: None,
            banner: ErrorBanner::new(cfg.error_banner_duration()),
        }
    }

    /// Fetch the patient and the diagnosis table concurrently.
    pub async fn mount(&mut self) {
        let (patient, diagnoses) = tokio::join!(
            self.api.get_patient(&self.patient_id),
            self.api.get_diagnoses()
        );

        match patient {
            Ok(patient) => self.patient = Some(patient),
            Err(e) => {
                tracing::error!(
                    patient_id = %self.patient_id,
                    error = %e,
                    "error fetching patient"
                );
            }
        }

        match diagnoses {
            Ok(diagnoses) => self.diagnoses = DiagnosisLookup::loaded(diagnoses),
            Err(e) => tracing::error!(error = %e, "error fetching diagnoses"),
        }
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn patient(&self) -> Option<&Patient> {
        self.patient.as_ref()
    }

    pub fn diagnoses(&self) -> &DiagnosisLookup {
        &self.diagnoses
    }

    pub fn view(&self) -> PageView<'_> {
        match &self.patient {
            None => PageView::Loading,
            Some(patient) => PageView::Patient(render_patient(patient, &self.diagnoses)),
        }
    }

    /// Open the add-entry modal with an empty draft. An already open form is kept as is.
    pub fn open_entry_form(&mut self) -> &mut EntryForm {
        self.entry_form.get_or_insert_with(EntryForm::new)
    }

    /// Close the modal, discarding the draft.
    pub fn close_entry_form(&mut self) {
        self.entry_form = None;
    }

    pub fn entry_form(&self) -> Option<&EntryForm> {
        self.entry_form.as_ref()
    }

    /// Build the open draft and send it to the server.
    pub async fn submit_entry(&mut self) -> SubmitOutcome {
        let Some(form) = self.entry_form.as_mut() else {
            return SubmitOutcome::FormClosed;
        };
        let draft = match form.build() {
            Ok(draft) => draft,
            Err(e) => return SubmitOutcome::Invalid(e),
        };

        match self.api.add_entry(&self.patient_id, &draft).await {
            AddEntryResult::Ok { patient } => {
                self.patient = Some(patient);
                self.entry_form = None;
                self.banner.clear();
                SubmitOutcome::Added
            }
            AddEntryResult::Error { error } => {
                self.banner.show(error.clone());
                SubmitOutcome::Failed(error)
            }
        }
    }

    /// The request error currently on the banner, if it has not expired.
    pub fn error_message(&self) -> Option<&str> {
        self.banner.message()
    }
}
