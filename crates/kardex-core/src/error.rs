//! Error types for `kardex-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid patient object")]
  NotAnObject,

  #[error("invalid key on patient: {0:?}")]
  UnexpectedKey(String),

  #[error("missing or invalid value: {0}")]
  InvalidValue(String),

  #[error("entry is not an object")]
  EntryNotAnObject,

  #[error("entry has no type tag")]
  MissingEntryType,

  #[error("unknown entry type: {0:?}")]
  UnknownEntryType(String),

  #[error("field {field:?} does not belong on a {kind} entry")]
  ForeignEntryField { kind: &'static str, field: String },

  #[error("sick leave must carry both startDate and endDate")]
  PartialSickLeave,

  #[error("health check rating out of range: {0}")]
  RatingOutOfRange(i64),

  #[error("malformed record: {0}")]
  Malformed(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
