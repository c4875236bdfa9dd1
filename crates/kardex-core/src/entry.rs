//! Entry types — one medical visit, tagged by kind.
//!
//! An entry is a discriminated union over the `type` field of its wire form.
//! Two paths build one:
//!
//! - [`Entry::parse`] is the strict per-variant validator: the tag selects
//!   exactly one variant, an unknown tag is an error, and fields belonging
//!   to a different variant are rejected by name.
//! - The [`serde::Deserialize`] impl is the read path for server data. Known
//!   tags go through the same strict variant parse, but an unknown tag is
//!   carried as [`Entry::Unrecognized`] so the mismatch surfaces at the
//!   dispatch site (see [`crate::describe`]) instead of dropping the entry
//!   from the record.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{Error, Result};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The discriminant selecting which shape of entry (or form) is in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
  Hospital,
  OccupationalHealthcare,
  HealthCheck,
}

impl EntryKind {
  /// The wire tag carried in the `type` field.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Hospital => "Hospital",
      Self::OccupationalHealthcare => "OccupationalHealthcare",
      Self::HealthCheck => "HealthCheck",
    }
  }

  /// Map a wire tag back to its kind. Total over the known tags; anything
  /// else is `None`, never a default.
  pub fn from_tag(tag: &str) -> Option<Self> {
    match tag {
      "Hospital" => Some(Self::Hospital),
      "OccupationalHealthcare" => Some(Self::OccupationalHealthcare),
      "HealthCheck" => Some(Self::HealthCheck),
      _ => None,
    }
  }
}

impl fmt::Display for EntryKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Shared fields ───────────────────────────────────────────────────────────

/// Fields every entry variant carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryBase {
  /// Unique within a patient's record.
  pub id: String,
  /// ISO date string. Deliberately not parsed — see [`crate::validate`].
  pub date: String,
  pub specialist: String,
  pub description: String,
  /// References into the diagnosis code table. Order-preserving; duplicates
  /// allowed.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub diagnosis_codes: Option<Vec<String>>,
}

// ─── Variant payloads ────────────────────────────────────────────────────────

/// Discharge terms of a hospital stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discharge {
  pub date: String,
  pub criteria: String,
}

/// A sick-leave period. Both ends or neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeave {
  pub start_date: String,
  pub end_date: String,
}

/// Outcome grade of a health check. Serialized through its integer value;
/// 0 is healthy, 3 is critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HealthCheckRating {
  Healthy,
  LowRisk,
  HighRisk,
  Critical,
}

impl HealthCheckRating {
  pub fn label(&self) -> &'static str {
    match self {
      Self::Healthy => "Healthy 💚",
      Self::LowRisk => "Low Risk 💛",
      Self::HighRisk => "High Risk ❤️",
      Self::Critical => "Critical 🖤",
    }
  }
}

impl From<HealthCheckRating> for u8 {
  fn from(rating: HealthCheckRating) -> Self {
    match rating {
      HealthCheckRating::Healthy => 0,
      HealthCheckRating::LowRisk => 1,
      HealthCheckRating::HighRisk => 2,
      HealthCheckRating::Critical => 3,
    }
  }
}

impl TryFrom<u8> for HealthCheckRating {
  type Error = Error;

  fn try_from(value: u8) -> Result<Self> {
    match value {
      0 => Ok(Self::Healthy),
      1 => Ok(Self::LowRisk),
      2 => Ok(Self::HighRisk),
      3 => Ok(Self::Critical),
      other => Err(Error::RatingOutOfRange(i64::from(other))),
    }
  }
}

// ─── Variants ────────────────────────────────────────────────────────────────

/// An inpatient stay, closed by a discharge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalEntry {
  #[serde(flatten)]
  pub base: EntryBase,
  pub discharge: Discharge,
}

/// A visit arranged through the patient's employer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationalHealthcareEntry {
  #[serde(flatten)]
  pub base: EntryBase,
  pub employer_name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sick_leave: Option<SickLeave>,
}

/// A routine check with a graded outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckEntry {
  #[serde(flatten)]
  pub base: EntryBase,
  pub health_check_rating: HealthCheckRating,
}

// ─── Entry ───────────────────────────────────────────────────────────────────

/// One medical-visit record.
///
/// Variant-only fields are unreachable without first narrowing on the
/// variant, so a hospital discharge can never be read off a health check.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
  Hospital(HospitalEntry),
  OccupationalHealthcare(OccupationalHealthcareEntry),
  HealthCheck(HealthCheckEntry),
  /// An entry whose `type` tag this build has no variant for. Carries the
  /// raw value so a client/server model mismatch is caught loudly at the
  /// dispatch site rather than silently dropped from the record.
  Unrecognized(Value),
}

const BASE_FIELDS: [&str; 6] = [
  "id",
  "date",
  "type",
  "specialist",
  "description",
  "diagnosisCodes",
];

impl Entry {
  /// Strict per-variant constructor.
  ///
  /// The `type` tag selects exactly one variant parser; a missing or
  /// unrecognized tag fails rather than defaulting, and any field belonging
  /// to another variant (or to no variant at all) is rejected by name.
  pub fn parse(value: &Value) -> Result<Entry> {
    let obj = value.as_object().ok_or(Error::EntryNotAnObject)?;
    let tag = obj
      .get("type")
      .and_then(Value::as_str)
      .ok_or(Error::MissingEntryType)?;
    let kind =
      EntryKind::from_tag(tag).ok_or_else(|| Error::UnknownEntryType(tag.to_owned()))?;
    Self::parse_variant(kind, value)
  }

  fn parse_variant(kind: EntryKind, value: &Value) -> Result<Entry> {
    let obj = value.as_object().ok_or(Error::EntryNotAnObject)?;

    let own_fields: &[&str] = match kind {
      EntryKind::Hospital => &["discharge"],
      EntryKind::OccupationalHealthcare => &["employerName", "sickLeave"],
      EntryKind::HealthCheck => &["healthCheckRating"],
    };
    for key in obj.keys() {
      if !BASE_FIELDS.contains(&key.as_str()) && !own_fields.contains(&key.as_str()) {
        return Err(Error::ForeignEntryField {
          kind: kind.as_str(),
          field: key.clone(),
        });
      }
    }

    match kind {
      EntryKind::Hospital => Ok(Entry::Hospital(serde_json::from_value(value.clone())?)),
      EntryKind::OccupationalHealthcare => {
        if let Some(leave) = obj.get("sickLeave") {
          let both = leave.get("startDate").is_some() && leave.get("endDate").is_some();
          if !both {
            return Err(Error::PartialSickLeave);
          }
        }
        Ok(Entry::OccupationalHealthcare(serde_json::from_value(
          value.clone(),
        )?))
      }
      EntryKind::HealthCheck => {
        if let Some(rating) = obj.get("healthCheckRating").and_then(Value::as_i64) {
          if !(0..=3).contains(&rating) {
            return Err(Error::RatingOutOfRange(rating));
          }
        }
        Ok(Entry::HealthCheck(serde_json::from_value(value.clone())?))
      }
    }
  }

  /// Wire form: the variant's fields plus its `type` tag. The unrecognized
  /// carrier round-trips verbatim.
  pub fn to_value(&self) -> Result<Value> {
    let (kind, mut value) = match self {
      Entry::Hospital(entry) => (EntryKind::Hospital, serde_json::to_value(entry)?),
      Entry::OccupationalHealthcare(entry) => (
        EntryKind::OccupationalHealthcare,
        serde_json::to_value(entry)?,
      ),
      Entry::HealthCheck(entry) => (EntryKind::HealthCheck, serde_json::to_value(entry)?),
      Entry::Unrecognized(raw) => return Ok(raw.clone()),
    };
    if let Some(obj) = value.as_object_mut() {
      obj.insert("type".to_owned(), Value::from(kind.as_str()));
    }
    Ok(value)
  }

  fn from_lenient_value(value: Value) -> Result<Entry> {
    let tag = value
      .as_object()
      .and_then(|obj: &Map<String, Value>| obj.get("type"))
      .and_then(Value::as_str);
    match tag.and_then(EntryKind::from_tag) {
      // A known tag must carry its variant's shape.
      Some(kind) => Self::parse_variant(kind, &value),
      // No tag, or one this build does not know: carry the raw value.
      None => Ok(Entry::Unrecognized(value)),
    }
  }
}

impl Serialize for Entry {
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    self
      .to_value()
      .map_err(serde::ser::Error::custom)?
      .serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for Entry {
  fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let value = Value::deserialize(deserializer)?;
    Entry::from_lenient_value(value).map_err(serde::de::Error::custom)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
