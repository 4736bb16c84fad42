//! `reqwest` implementation of [`PatientApi`].

use crate::api::{AddEntryResult, PatientApi};
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use patientor_core::constants::{ADD_ENTRY_FAILED, DIAGNOSES_PATH, ENTRIES_PATH, PATIENTS_PATH};
use patientor_core::{
    ClientConfig, Diagnosis, EntryDraft, Patient, PatientFormValues, PatientSummary,
};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// JSON client for the patient records API.
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
}

/// Error body returned by the API on failures.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl HttpClient {
    /// Build a client from startup configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidBaseUrl` if the configured base URL does not parse or cannot
    /// have paths appended, and `ClientError::Transport` if the HTTP client cannot be built.
    pub fn new(cfg: &ClientConfig) -> ClientResult<Self> {
        let raw = cfg.api_base_url();
        let base_url = Url::parse(raw).map_err(|e| ClientError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: raw.to_string(),
                reason: "url cannot have paths appended".into(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(cfg.request_timeout())
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let url = self.endpoint(segments);
        tracing::debug!(%url, "GET");
        let response = self.http.get(url).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json().await?)
    } else {
        Err(ClientError::Status {
            status: status.as_u16(),
            message: error_message(response).await,
        })
    }
}

/// The server's error text: a JSON body's `error` field, otherwise a non-blank plain-text body,
/// otherwise the status reason.
async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    message_from_body(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    })
}

fn message_from_body(body: &str) -> Option<String> {
    let text = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error }) => error?,
        Err(_) => body.to_string(),
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[async_trait]
impl PatientApi for HttpClient {
    async fn list_patients(&self) -> ClientResult<Vec<PatientSummary>> {
        self.get_json(&[PATIENTS_PATH]).await
    }

    async fn create_patient(&self, values: &PatientFormValues) -> ClientResult<Patient> {
        let values = values.validated()?;
        let url = self.endpoint(&[PATIENTS_PATH]);
        tracing::debug!(%url, "POST");
        let response = self.http.post(url).json(&values).send().await?;
        let patient: Patient = decode(response).await?;
        tracing::info!(patient_id = %patient.id, "patient created");
        Ok(patient)
    }

    async fn get_patient(&self, id: &str) -> ClientResult<Patient> {
        self.get_json(&[PATIENTS_PATH, id]).await
    }

    async fn get_diagnoses(&self) -> ClientResult<Vec<Diagnosis>> {
        self.get_json(&[DIAGNOSES_PATH]).await
    }

    async fn add_entry(&self, patient_id: &str, entry: &EntryDraft) -> AddEntryResult {
        let url = self.endpoint(&[PATIENTS_PATH, patient_id, ENTRIES_PATH]);
        tracing::debug!(%url, kind = %entry.kind(), "POST");

        let response = match self.http.post(url).json(entry).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(patient_id, error = %e, "add entry request failed");
                return AddEntryResult::Error {
                    error: ADD_ENTRY_FAILED.into(),
                };
            }
        };

        let status = response.status();
        if status != StatusCode::CREATED {
            let error = if status.is_success() {
                format!("unexpected response status {status}")
            } else {
                error_message(response).await
            };
            tracing::warn!(patient_id, %status, %error, "add entry rejected");
            return AddEntryResult::Error { error };
        }

        match response.json::<Patient>().await {
            Ok(patient) => {
                tracing::info!(patient_id, entries = patient.entries.len(), "entry added");
                AddEntryResult::Ok { patient }
            }
            Err(e) => {
                tracing::error!(patient_id, error = %e, "add entry response unreadable");
                AddEntryResult::Error {
                    error: ADD_ENTRY_FAILED.into(),
                }
            }
        }
    }
}
