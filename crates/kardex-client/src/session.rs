//! Session wiring — the explicit store plus the fetch and submit flows.

use kardex_core::{patient::Patient, validate};
use kardex_store::{Action, Store};
use serde_json::Value;

use crate::{
  ApiClient, Result,
  payload::{EntryFormValues, PatientFormValues, build_entry_payload},
};

/// One user session: the HTTP client plus the normalized store.
///
/// Handed by reference to whatever drives it. All cache mutation funnels
/// through [`kardex_store::Store::dispatch`]; nothing here (or anywhere
/// else) writes to the state directly.
pub struct Session {
  client: ApiClient,
  store: Store,
}

impl Session {
  /// A fresh session with an empty store.
  pub fn new(client: ApiClient) -> Self {
    Self {
      client,
      store: Store::new(),
    }
  }

  pub fn store(&self) -> &Store {
    &self.store
  }

  // ── Read path ─────────────────────────────────────────────────────────────

  /// Fetch the patient list and merge it into the summary cache. Patients
  /// already cached win over the fresh listing (see
  /// [`Action::SetPatientList`]).
  pub async fn load_patient_list(&mut self) -> Result<()> {
    let patients = self.client.list_patients().await?;
    self.store.dispatch(Action::SetPatientList(patients));
    Ok(())
  }

  /// The full record for `id`, fetched on first use.
  ///
  /// The cache check happens before the await and nothing marks a fetch as
  /// in flight, so two consumers asking for the same uncached id
  /// concurrently will both fetch; the second `UpdatePatientDetails` simply
  /// overwrites the first with the same record.
  pub async fn patient_details(&mut self, id: &str) -> Result<Patient> {
    if let Some(patient) = self.store.state().patient_details.get(id) {
      return Ok(patient.clone());
    }

    let raw = self.client.get_patient(id).await?;
    // The endpoint answers with an array; the record is its first element.
    let first = raw.get(0).cloned().unwrap_or(Value::Null);
    let patient = validate::parse_patient(first)?;
    self
      .store
      .dispatch(Action::UpdatePatientDetails(patient.clone()));
    Ok(patient)
  }

  /// Fetch the diagnosis code table if it has not been loaded yet.
  ///
  /// Same in-flight caveat as [`Session::patient_details`]: the emptiness
  /// guard runs before the await, so concurrent callers can double-fetch.
  /// A failed fetch is logged and swallowed — diagnosis names degrade to
  /// bare codes until someone asks again.
  pub async fn ensure_diagnoses(&mut self) {
    if !self.store.state().diagnoses.is_empty() {
      return;
    }
    match self.client.list_diagnoses().await {
      Ok(diagnoses) => self.store.dispatch(Action::SetDiagnoses(diagnoses)),
      Err(error) => tracing::warn!(%error, "diagnoses fetch failed"),
    }
  }

  // ── Write path ────────────────────────────────────────────────────────────

  /// Create a patient and cache its public projection.
  pub async fn add_patient(&mut self, form: &PatientFormValues) -> Result<Patient> {
    let patient = self.client.create_patient(form).await?;
    self.store.dispatch(Action::AddPatient((&patient).into()));
    Ok(patient)
  }

  /// Build the minimal payload for `form`, submit it, and reconcile the
  /// returned record into the detail cache. On failure the store is left
  /// unchanged — no partial update.
  pub async fn add_entry(
    &mut self,
    patient_id: &str,
    form: &EntryFormValues,
  ) -> Result<Patient> {
    let payload = build_entry_payload(form);
    let patient = self.client.create_entry(patient_id, &payload).await?;
    self
      .store
      .dispatch(Action::UpdatePatientDetails(patient.clone()));
    Ok(patient)
  }
}
