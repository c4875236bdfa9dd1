//! Form values and write-request payload building.

use kardex_core::{
  entry::{Discharge, EntryKind, HealthCheckRating, SickLeave},
  patient::Gender,
};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// What the entry form carries.
///
/// The form keeps a single set of controls regardless of the selected
/// variant, so every variant's fields are present here; `kind` decides which
/// of them make it into the payload.
#[derive(Debug, Clone)]
pub struct EntryFormValues {
  pub kind: EntryKind,
  pub date: String,
  pub specialist: String,
  pub description: String,
  pub diagnosis_codes: Vec<String>,
  pub discharge: Discharge,
  pub employer_name: String,
  pub sick_leave: SickLeave,
  pub health_check_rating: Option<HealthCheckRating>,
}

/// What the add-patient form carries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientFormValues {
  pub name: String,
  pub occupation: String,
  pub gender: Gender,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub ssn: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date_of_birth: Option<String>,
}

/// Project form values into the minimal write-request body.
///
/// Whitespace is trimmed from the shared text fields, the variant tag picks
/// which extra fields are carried, and any top-level field the user left
/// blank is dropped — except that zero values survive the blank filter (see
/// [`retained`]).
pub fn build_entry_payload(values: &EntryFormValues) -> Map<String, Value> {
  let mut payload = Map::new();
  payload.insert("type".into(), Value::from(values.kind.as_str()));
  payload.insert("date".into(), Value::from(values.date.trim()));
  payload.insert("specialist".into(), Value::from(values.specialist.trim()));
  payload.insert(
    "description".into(),
    Value::from(values.description.trim()),
  );
  payload.insert(
    "diagnosisCodes".into(),
    Value::from(values.diagnosis_codes.clone()),
  );

  match values.kind {
    EntryKind::Hospital => {
      payload.insert(
        "discharge".into(),
        json!({
          "date": values.discharge.date,
          "criteria": values.discharge.criteria,
        }),
      );
    }
    EntryKind::OccupationalHealthcare => {
      payload.insert(
        "employerName".into(),
        Value::from(values.employer_name.clone()),
      );
      payload.insert(
        "sickLeave".into(),
        json!({
          "startDate": values.sick_leave.start_date,
          "endDate": values.sick_leave.end_date,
        }),
      );
    }
    EntryKind::HealthCheck => {
      payload.insert(
        "healthCheckRating".into(),
        json!(values.health_check_rating),
      );
    }
  }

  payload.retain(|_, value| retained(value));
  payload
}

/// Should `value` survive the blank filter?
///
/// Blank means falsy: null, false, the empty string, the empty array, zero.
/// The one exemption: a zero is data, not absence — a "Healthy" rating is
/// the number 0 — so zero numbers and zero-valued strings are retained. The
/// string side of the exemption matches any string that reads as zero, not
/// only the rating field. Sub-objects always survive; the filter never
/// recurses into them.
fn retained(value: &Value) -> bool {
  if is_zero_valued(value) {
    return true;
  }
  match value {
    Value::Null => false,
    Value::Bool(flag) => *flag,
    Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
    Value::String(text) => !text.is_empty(),
    Value::Array(items) => !items.is_empty(),
    Value::Object(_) => true,
  }
}

/// Zero numbers, and strings whose leading integer part reads as zero
/// ("0", "00", "0.9") — the set a `parseInt`-style read accepts.
fn is_zero_valued(value: &Value) -> bool {
  match value {
    Value::Number(number) => number.as_f64() == Some(0.0),
    Value::String(text) => {
      let text = text.trim_start();
      let text = text.strip_prefix(['+', '-']).unwrap_or(text);
      let digits_end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
      let digits = &text[..digits_end];
      !digits.is_empty() && digits.bytes().all(|b| b == b'0')
    }
    _ => false,
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn blank_form(kind: EntryKind) -> EntryFormValues {
    EntryFormValues {
      kind,
      date: String::new(),
      specialist: String::new(),
      description: String::new(),
      diagnosis_codes: Vec::new(),
      discharge: Discharge {
        date: String::new(),
        criteria: String::new(),
      },
      employer_name: String::new(),
      sick_leave: SickLeave {
        start_date: String::new(),
        end_date: String::new(),
      },
      health_check_rating: None,
    }
  }

  #[test]
  fn zero_rating_survives_the_blank_filter() {
    let mut form = blank_form(EntryKind::HealthCheck);
    form.date = "2024-01-01".into();
    form.specialist = "Dr. X".into();
    form.health_check_rating = Some(HealthCheckRating::Healthy);

    let payload = build_entry_payload(&form);

    assert_eq!(payload.get("healthCheckRating"), Some(&json!(0)));
    assert_eq!(payload.get("specialist"), Some(&json!("Dr. X")));
    assert_eq!(payload.get("date"), Some(&json!("2024-01-01")));
    // Blank shared fields are dropped.
    assert!(!payload.contains_key("description"));
    assert!(!payload.contains_key("diagnosisCodes"));
  }

  #[test]
  fn hospital_payload_carries_only_its_variant_fields() {
    let mut form = blank_form(EntryKind::Hospital);
    form.date = "2024-01-01".into();
    form.specialist = "Dr. House".into();
    form.description = "fractured wrist".into();
    form.discharge = Discharge {
      date: "2024-01-01".into(),
      criteria: "recovered".into(),
    };
    // Noise in the unselected controls must not leak into the payload.
    form.employer_name = "Acme Oy".into();
    form.health_check_rating = Some(HealthCheckRating::Critical);

    let payload = build_entry_payload(&form);

    assert_eq!(
      payload.get("discharge"),
      Some(&json!({ "date": "2024-01-01", "criteria": "recovered" }))
    );
    assert!(!payload.contains_key("employerName"));
    assert!(!payload.contains_key("sickLeave"));
    assert!(!payload.contains_key("healthCheckRating"));
  }

  #[test]
  fn shared_text_fields_are_trimmed() {
    let mut form = blank_form(EntryKind::HealthCheck);
    form.date = " 2024-01-01 ".into();
    form.specialist = "  Dr. X".into();
    form.description = "check \n".into();
    form.health_check_rating = Some(HealthCheckRating::LowRisk);

    let payload = build_entry_payload(&form);

    assert_eq!(payload.get("date"), Some(&json!("2024-01-01")));
    assert_eq!(payload.get("specialist"), Some(&json!("Dr. X")));
    assert_eq!(payload.get("description"), Some(&json!("check")));
  }

  #[test]
  fn partially_filled_sick_leave_passes_through_unfiltered() {
    // The blank filter is top-level only: a sub-object survives as-is, even
    // half empty. Pinned deliberately; see DESIGN.md.
    let mut form = blank_form(EntryKind::OccupationalHealthcare);
    form.date = "2024-02-02".into();
    form.specialist = "Dr. Wilson".into();
    form.employer_name = "Acme Oy".into();
    form.sick_leave = SickLeave {
      start_date: "2024-02-02".into(),
      end_date: String::new(),
    };

    let payload = build_entry_payload(&form);

    assert_eq!(
      payload.get("sickLeave"),
      Some(&json!({ "startDate": "2024-02-02", "endDate": "" }))
    );
  }

  #[test]
  fn blank_employer_is_dropped_but_empty_sick_leave_object_is_not() {
    let mut form = blank_form(EntryKind::OccupationalHealthcare);
    form.date = "2024-02-02".into();
    form.specialist = "Dr. Wilson".into();

    let payload = build_entry_payload(&form);

    assert!(!payload.contains_key("employerName"));
    assert_eq!(
      payload.get("sickLeave"),
      Some(&json!({ "startDate": "", "endDate": "" }))
    );
  }

  // ── The blank filter itself ────────────────────────────────────────────────

  #[test]
  fn zero_valued_strings_are_exempt() {
    // Any zero-reading string is exempt, not only the rating field.
    assert!(retained(&json!("0")));
    assert!(retained(&json!("00")));
    assert!(retained(&json!("0.9")));
    assert!(retained(&json!("-0")));
  }

  #[test]
  fn blanks_are_dropped() {
    assert!(!retained(&json!("")));
    assert!(!retained(&json!([])));
    assert!(!retained(&Value::Null));
    assert!(!retained(&json!(false)));
  }

  #[test]
  fn zero_number_and_nonblank_values_are_retained() {
    assert!(retained(&json!(0)));
    assert!(retained(&json!(3)));
    assert!(retained(&json!("recovered")));
    assert!(retained(&json!(["S62.5"])));
    assert!(retained(&json!({})));
  }
}
