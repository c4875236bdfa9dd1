//! Actions — the only way state changes.

use kardex_core::{
  diagnosis::Diagnosis,
  patient::{Patient, PatientSummary},
};
use serde::{Deserialize, Serialize};

/// An instruction to the reducer.
///
/// Actions are plain serializable values. A producer newer than this build
/// may emit kinds we do not know; those deserialize to [`Action::Unknown`]
/// and apply as a no-op rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
  /// Merge a freshly-listed page of patients into the summary cache.
  /// Already-cached patients win over incoming ones with the same id — the
  /// list adds newly-seen patients but never overwrites.
  SetPatientList(Vec<PatientSummary>),
  /// Insert or overwrite one patient summary. Unlike
  /// [`Action::SetPatientList`], the incoming patient wins.
  AddPatient(PatientSummary),
  /// Insert or overwrite one full record in the detail cache.
  UpdatePatientDetails(Patient),
  /// Upsert diagnoses into the code table.
  SetDiagnoses(Vec<Diagnosis>),
  /// An action kind this build does not understand; applied as a no-op.
  #[serde(other)]
  Unknown,
}

impl Action {
  /// The discriminant string, for logging.
  /// Must match the `rename_all` serde tags above.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::SetPatientList(_) => "SET_PATIENT_LIST",
      Self::AddPatient(_) => "ADD_PATIENT",
      Self::UpdatePatientDetails(_) => "UPDATE_PATIENT_DETAILS",
      Self::SetDiagnoses(_) => "SET_DIAGNOSES",
      Self::Unknown => "UNKNOWN",
    }
  }
}
