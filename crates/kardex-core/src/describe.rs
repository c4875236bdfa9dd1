//! Read-side dispatch over entry variants.

use std::collections::HashMap;

use crate::{diagnosis::Diagnosis, entry::Entry};

/// A renderable summary of one entry, ready for whatever display layer sits
/// on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDescription {
  /// Variant marker glyph.
  pub marker: &'static str,
  /// The visit date.
  pub heading: String,
  /// Variant-appropriate detail lines.
  pub body: Vec<String>,
  /// One line per diagnosis code, resolved against the code table.
  pub diagnoses: Vec<String>,
}

/// Produce the renderable description for `entry`.
///
/// Dispatch is exhaustive over the known variants at compile time, and the
/// unrecognized carrier aborts at runtime: an entry tagged with a kind this
/// build has no branch for means the client and server disagree about the
/// model, and dropping such an entry from a medical record silently is worse
/// than crashing.
///
/// # Panics
///
/// Panics on [`Entry::Unrecognized`].
pub fn describe(entry: &Entry, diagnoses: &HashMap<String, Diagnosis>) -> EntryDescription {
  match entry {
    Entry::Hospital(entry) => EntryDescription {
      marker: "🏥",
      heading: entry.base.date.clone(),
      body: vec![
        entry.base.description.clone(),
        entry.discharge.criteria.clone(),
      ],
      diagnoses: resolve_codes(entry.base.diagnosis_codes.as_deref(), diagnoses),
    },
    Entry::OccupationalHealthcare(entry) => EntryDescription {
      marker: "💼",
      heading: entry.base.date.clone(),
      body: vec![
        entry.base.description.clone(),
        entry.employer_name.clone(),
      ],
      diagnoses: resolve_codes(entry.base.diagnosis_codes.as_deref(), diagnoses),
    },
    Entry::HealthCheck(entry) => EntryDescription {
      marker: "🤒",
      heading: entry.base.date.clone(),
      body: vec![
        entry.base.description.clone(),
        entry.health_check_rating.label().to_owned(),
      ],
      diagnoses: resolve_codes(entry.base.diagnosis_codes.as_deref(), diagnoses),
    },
    Entry::Unrecognized(raw) => panic!("unhandled entry variant: {raw}"),
  }
}

/// `code  name` lines for display; a code missing from the table degrades to
/// the bare code.
fn resolve_codes(
  codes: Option<&[String]>,
  diagnoses: &HashMap<String, Diagnosis>,
) -> Vec<String> {
  codes
    .unwrap_or_default()
    .iter()
    .map(|code| match diagnoses.get(code) {
      Some(diagnosis) => format!("{code} {}", diagnosis.name),
      None => code.clone(),
    })
    .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::entry::{
    Discharge, EntryBase, HealthCheckEntry, HealthCheckRating, HospitalEntry,
    OccupationalHealthcareEntry,
  };

  fn base(date: &str) -> EntryBase {
    EntryBase {
      id: "e1".into(),
      date: date.into(),
      specialist: "Dr. House".into(),
      description: "fractured wrist".into(),
      diagnosis_codes: Some(vec!["S62.5".into(), "X99".into()]),
    }
  }

  fn code_table() -> HashMap<String, Diagnosis> {
    let mut table = HashMap::new();
    table.insert(
      "S62.5".to_owned(),
      Diagnosis {
        code: "S62.5".into(),
        name: "Fracture of thumb".into(),
        latin: None,
      },
    );
    table
  }

  #[test]
  fn hospital_description() {
    let entry = Entry::Hospital(HospitalEntry {
      base: base("2024-01-01"),
      discharge: Discharge {
        date: "2024-01-09".into(),
        criteria: "cast removed".into(),
      },
    });
    let description = describe(&entry, &code_table());
    assert_eq!(description.marker, "🏥");
    assert_eq!(description.heading, "2024-01-01");
    assert_eq!(description.body, vec!["fractured wrist", "cast removed"]);
    // Known codes resolve to names; unknown ones degrade to the bare code.
    assert_eq!(description.diagnoses, vec!["S62.5 Fracture of thumb", "X99"]);
  }

  #[test]
  fn occupational_description_names_employer() {
    let entry = Entry::OccupationalHealthcare(OccupationalHealthcareEntry {
      base: base("2024-02-02"),
      employer_name: "Acme Oy".into(),
      sick_leave: None,
    });
    let description = describe(&entry, &HashMap::new());
    assert_eq!(description.marker, "💼");
    assert!(description.body.contains(&"Acme Oy".to_owned()));
  }

  #[test]
  fn health_check_description_grades_the_rating() {
    let entry = Entry::HealthCheck(HealthCheckEntry {
      base: base("2024-03-03"),
      health_check_rating: HealthCheckRating::Healthy,
    });
    let description = describe(&entry, &HashMap::new());
    assert_eq!(description.marker, "🤒");
    assert!(description.body.contains(&"Healthy 💚".to_owned()));
  }

  #[test]
  #[should_panic(expected = "unhandled entry variant")]
  fn unrecognized_entry_aborts() {
    let entry = Entry::Unrecognized(json!({ "type": "Spa" }));
    describe(&entry, &HashMap::new());
  }
}
