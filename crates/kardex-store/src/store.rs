//! State, the pure reducer, and the [`Store`] owner.

use std::collections::HashMap;

use kardex_core::{
  diagnosis::Diagnosis,
  patient::{Patient, PatientSummary},
};

use crate::action::Action;

/// The normalized session cache. All three maps are keyed by entity id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
  /// Public projections, populated on list load.
  pub patients: HashMap<String, PatientSummary>,
  /// Full records, populated lazily on first detail view. Not required to
  /// mirror the key set of `patients`.
  pub patient_details: HashMap<String, Patient>,
  /// Diagnosis code table, populated lazily once.
  pub diagnoses: HashMap<String, Diagnosis>,
}

/// Apply `action` to `state`, returning the next state.
///
/// Pure: the input state is never touched. Every branch works on an
/// independent copy, so callers may keep reading the old value across a
/// dispatch.
pub fn apply(state: &State, action: Action) -> State {
  let mut next = state.clone();
  match action {
    Action::SetPatientList(patients) => {
      for patient in patients {
        next.patients.entry(patient.id.clone()).or_insert(patient);
      }
    }
    Action::AddPatient(patient) => {
      next.patients.insert(patient.id.clone(), patient);
    }
    Action::UpdatePatientDetails(patient) => {
      next.patient_details.insert(patient.id.clone(), patient);
    }
    Action::SetDiagnoses(diagnoses) => {
      for diagnosis in diagnoses {
        next.diagnoses.insert(diagnosis.code.clone(), diagnosis);
      }
    }
    Action::Unknown => {}
  }
  next
}

/// Owner of the session state.
///
/// Handed by reference to whatever needs it: reads are plain lookups on
/// [`Store::state`], writes go only through [`Store::dispatch`]. Dispatches
/// apply strictly in call order; there is no coalescing.
#[derive(Debug, Clone, Default)]
pub struct Store {
  state: State,
}

impl Store {
  /// An empty store, created once at session start.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> &State {
    &self.state
  }

  /// Apply `action` and replace the held state with the result.
  pub fn dispatch(&mut self, action: Action) {
    tracing::debug!(kind = action.kind(), "dispatch");
    self.state = apply(&self.state, action);
  }
}
