//! # Patientor Client
//!
//! Talks to the patient-records JSON API and keeps the state of the pages built on it.
//!
//! - [`HttpClient`]: the reqwest-backed [`PatientApi`] implementation
//! - [`pages`]: patient list and patient detail orchestration, generic over any [`PatientApi`]
//! - [`ErrorBanner`]: the transient request-error message shown on a page

pub mod api;
pub mod banner;
pub mod error;
pub mod http;
pub mod pages;

pub use api::{AddEntryResult, PatientApi};
pub use banner::ErrorBanner;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use pages::{PageView, PatientDetailPage, PatientListPage, SubmitOutcome};
