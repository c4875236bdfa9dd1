//! Patient records and their public projection.

use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Administrative gender, as the service reports it.
///
/// The shallow payload check (see [`crate::validate`]) never restricts this
/// field to its domain, so the read path must tolerate values outside it.
/// Those carry through as [`Gender::Unrecognized`] and render without a
/// marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
  Other,
  /// A value outside the known domain, preserved verbatim.
  #[serde(untagged)]
  Unrecognized(String),
}

/// A person with a medical record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
  pub id: String,
  pub name: String,
  pub occupation: String,
  pub gender: Gender,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ssn: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date_of_birth: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub entries: Option<Vec<Entry>>,
}

/// The public projection of a patient — no `ssn`, no `entries`.
///
/// List views and the `patients` side of the store hold this shape, so the
/// type system keeps sensitive fields out of the summary cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
  pub id: String,
  pub name: String,
  pub occupation: String,
  pub gender: Gender,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date_of_birth: Option<String>,
}

impl From<&Patient> for PatientSummary {
  fn from(patient: &Patient) -> Self {
    Self {
      id: patient.id.clone(),
      name: patient.name.clone(),
      occupation: patient.occupation.clone(),
      gender: patient.gender.clone(),
      date_of_birth: patient.date_of_birth.clone(),
    }
  }
}
