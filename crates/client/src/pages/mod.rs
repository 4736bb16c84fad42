//! Page-level state machines driven by a [`PatientApi`](crate::PatientApi).

pub mod detail;
pub mod list;

#[cfg(test)]
pub(crate) mod fake;

pub use detail::{PageView, PatientDetailPage, SubmitOutcome};
pub use list::PatientListPage;
