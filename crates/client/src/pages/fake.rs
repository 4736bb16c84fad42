//! In-memory [`PatientApi`] for page tests.

use crate::api::{AddEntryResult, PatientApi};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use patientor_core::{
    Diagnosis, Discharge, EntryDetails, EntryDraft, Gender, HospitalDetails, Patient,
    PatientFormValues, PatientSummary,
};
use std::sync::Mutex;

pub(crate) fn sample_patient() -> Patient {
    let entry = EntryDraft {
        description: "Twisted knee".into(),
        date: "2019-10-20".into(),
        specialist: "MD House".into(),
        diagnosis_codes: Some(vec!["M24.2".into()]),
        details: EntryDetails::Hospital(HospitalDetails {
            discharge: Discharge {
                date: "2019-10-25".into(),
                criteria: "Knee has healed".into(),
            },
        }),
    }
    .into_entry("e1");

    Patient {
        id: "p1".into(),
        name: "John McClane".into(),
        ssn: "090786-122X".into(),
        occupation: "New york city cop".into(),
        gender: Gender::Male,
        date_of_birth: Some("1986-07-09".into()),
        entries: vec![entry],
    }
}

fn not_found() -> ClientError {
    ClientError::Status {
        status: 404,
        message: "Not Found".into(),
    }
}

#[derive(Default)]
struct State {
    patients: Vec<Patient>,
    submitted: Vec<(String, EntryDraft)>,
}

pub(crate) struct FakeApi {
    state: Mutex<State>,
    diagnoses: Option<Vec<Diagnosis>>,
    reject_entries_with: Option<String>,
    list_fails: bool,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(State {
                patients: vec![sample_patient()],
                submitted: Vec::new(),
            }),
            diagnoses: Some(vec![Diagnosis {
                code: "M24.2".into(),
                name: "Disorder of ligament".into(),
                latin: None,
            }]),
            reject_entries_with: None,
            list_fails: false,
        }
    }

    pub(crate) fn without_patient(self) -> Self {
        self.state.lock().expect("state lock").patients.clear();
        self
    }

    pub(crate) fn without_diagnoses(mut self) -> Self {
        self.diagnoses = None;
        self
    }

    pub(crate) fn failing_list(mut self) -> Self {
        self.list_fails = true;
        self
    }

    pub(crate) fn rejecting_entries(mut self, error: &str) -> Self {
        self.reject_entries_with = Some(error.to_string());
        self
    }

    pub(crate) fn submitted(&self) -> Vec<(String, EntryDraft)> {
        self.state.lock().expect("state lock").submitted.clone()
    }
}

#[async_trait]
impl PatientApi for FakeApi {
    async fn list_patients(&self) -> ClientResult<Vec<PatientSummary>> {
        if self.list_fails {
            return Err(ClientError::Status {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }
        let state = self.state.lock().expect("state lock");
        Ok(state.patients.iter().map(PatientSummary::from).collect())
    }

    async fn create_patient(&self, values: &PatientFormValues) -> ClientResult<Patient> {
        let values = values.validated()?;
        let mut state = self.state.lock().expect("state lock");
        let patient = Patient {
            id: format!("p{}", state.patients.len() + 1),
            name: values.name,
            ssn: values.ssn,
            occupation: values.occupation,
            gender: values.gender,
            date_of_birth: Some(values.date_of_birth),
            entries: Vec::new(),
        };
        state.patients.push(patient.clone());
        Ok(patient)
    }

    async fn get_patient(&self, id: &str) -> ClientResult<Patient> {
        let state = self.state.lock().expect("state lock");
        state
            .patients
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn get_diagnoses(&self) -> ClientResult<Vec<Diagnosis>> {
        self.diagnoses.clone().ok_or_else(not_found)
    }

    async fn add_entry(&self, patient_id: &str, entry: &EntryDraft) -> AddEntryResult {
        let mut state = self.state.lock().expect("state lock");
        state.submitted.push((patient_id.to_string(), entry.clone()));

        if let Some(error) = &self.reject_entries_with {
            return AddEntryResult::Error {
                error: error.clone(),
            };
        }

        let next_id = format!("e{}", state.submitted.len() + 1);
        match state.patients.iter_mut().find(|p| p.id == patient_id) {
            Some(patient) => {
                patient.entries.push(entry.clone().into_entry(next_id));
                AddEntryResult::Ok {
                    patient: patient.clone(),
                }
            }
            None => AddEntryResult::Error {
                error: "Not Found".into(),
            },
        }
    }
}
