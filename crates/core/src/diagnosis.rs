//! Diagnosis codes and the lookup table used to annotate entries.
//!
//! The full diagnosis set is fetched once per page visit. Until it arrives every code resolves
//! to [`Resolution::Loading`], which is deliberately distinct from [`Resolution::Unknown`].

use crate::constants::{LOADING_DIAGNOSIS, UNKNOWN_DIAGNOSIS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin: Option<String>,
}

/// Result of resolving a diagnosis code against the lookup table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution<'a> {
    Name(&'a Diagnosis),
    /// The table is loaded but does not contain the code.
    Unknown,
    /// The table has not arrived yet.
    Loading,
}

impl Resolution<'_> {
    /// Text to show next to the code.
    pub fn text(&self) -> &str {
        match self {
            Resolution::Name(diagnosis) => &diagnosis.name,
            Resolution::Unknown => UNKNOWN_DIAGNOSIS,
            Resolution::Loading => LOADING_DIAGNOSIS,
        }
    }
}

impl fmt::Display for Resolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Read-only code → diagnosis table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DiagnosisLookup {
    #[default]
    Loading,
    Loaded {
        diagnoses: Vec<Diagnosis>,
        by_code: HashMap<String, usize>,
    },
}

impl DiagnosisLookup {
    /// Build a loaded table. Server order is kept; on duplicate codes the first one wins.
    pub fn loaded(diagnoses: impl IntoIterator<Item = Diagnosis>) -> Self {
        let diagnoses: Vec<Diagnosis> = diagnoses.into_iter().collect();
        let mut by_code = HashMap::with_capacity(diagnoses.len());
        for (index, diagnosis) in diagnoses.iter().enumerate() {
            by_code.entry(diagnosis.code.clone()).or_insert(index);
        }
        DiagnosisLookup::Loaded { diagnoses, by_code }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, DiagnosisLookup::Loaded { .. })
    }

    pub fn resolve(&self, code: &str) -> Resolution<'_> {
        match self {
            DiagnosisLookup::Loading => Resolution::Loading,
            DiagnosisLookup::Loaded { diagnoses, by_code } => by_code
                .get(code)
                .map(|&index| Resolution::Name(&diagnoses[index]))
                .unwrap_or(Resolution::Unknown),
        }
    }

    /// All diagnoses in server order; empty while loading.
    pub fn diagnoses(&self) -> &[Diagnosis] {
        match self {
            DiagnosisLookup::Loading => &[],
            DiagnosisLookup::Loaded { diagnoses, .. } => diagnoses,
        }
    }
}
