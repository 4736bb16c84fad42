//! Constants used throughout the Patientor crates.
//!
//! Wire paths, display placeholders and configuration defaults live here so the client,
//! the renderer and the CLI agree on them.

/// API base URL used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

/// How long a request error stays visible on a page.
pub const DEFAULT_ERROR_BANNER_SECS: u64 = 5;

/// Per-request timeout for the HTTP client.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding the API base URL.
pub const API_BASE_URL_ENV: &str = "PATIENTOR_API_BASE_URL";

/// Environment variable overriding the error banner duration.
pub const ERROR_BANNER_SECS_ENV: &str = "PATIENTOR_ERROR_BANNER_SECS";

/// Environment variable overriding the request timeout.
pub const REQUEST_TIMEOUT_SECS_ENV: &str = "PATIENTOR_REQUEST_TIMEOUT_SECS";

/// Collection path for patients.
pub const PATIENTS_PATH: &str = "patients";

/// Collection path for diagnoses.
pub const DIAGNOSES_PATH: &str = "diagnoses";

/// Sub-collection path for a patient's entries.
pub const ENTRIES_PATH: &str = "entries";

/// Shown for a diagnosis code missing from the loaded lookup table.
pub const UNKNOWN_DIAGNOSIS: &str = "Unknown";

/// Shown for a diagnosis code while the lookup table has not arrived.
pub const LOADING_DIAGNOSIS: &str = "Loading...";

/// Banner text when an entry submission fails without a server message.
pub const ADD_ENTRY_FAILED: &str = "Failed to add entry";
