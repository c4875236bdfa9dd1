//! Diagnosis codes.

use serde::{Deserialize, Serialize};

/// One diagnosis from the service's code list, keyed by `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
  pub code: String,
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub latin: Option<String>,
}
