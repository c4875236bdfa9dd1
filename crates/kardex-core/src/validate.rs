//! Runtime validation of untrusted patient payloads.
//!
//! [`validate_patient`] is the shape check the service's responses go
//! through before anything trusts them. It is deliberately shallow — see its
//! docs — and [`parse_patient`] layers typed deserialization on top.

use serde_json::{Map, Value};

use crate::{Error, Result, patient::Patient};

/// The full key set a patient payload may carry.
const PATIENT_KEYS: [&str; 7] = [
  "id",
  "name",
  "occupation",
  "gender",
  "ssn",
  "dateOfBirth",
  "entries",
];

/// Shallow shape check over a raw patient payload.
///
/// Accepts an object whose keys all fall inside the expected set and whose
/// present values are all strings or arrays, and returns it unmodified. All
/// keys are vetted before any value, so an unexpected key is reported even
/// when an earlier value is also bad.
///
/// The check is shallow on purpose: it does not look inside `entries`, does
/// not restrict `gender` to its enum domain, and does not parse dates. That
/// is the contract list pages and detail pages were built against;
/// [`parse_patient`] is where the typed model tightens things.
pub fn validate_patient(raw: &Value) -> Result<&Map<String, Value>> {
  let obj = raw.as_object().ok_or(Error::NotAnObject)?;

  for key in obj.keys() {
    if !PATIENT_KEYS.contains(&key.as_str()) {
      return Err(Error::UnexpectedKey(key.clone()));
    }
  }

  for (key, value) in obj {
    if !value.is_string() && !value.is_array() {
      return Err(Error::InvalidValue(key.clone()));
    }
  }

  Ok(obj)
}

/// Validate `raw` and deserialize it into a typed [`Patient`].
///
/// The typed step is stricter than the shallow check for entries whose
/// `type` tag is known: their variant shape is enforced here, so a malformed
/// hospital entry fails at the fetch boundary instead of at render. Entries
/// with an unknown tag and out-of-domain gender strings still pass through
/// as carrier values — the dispatcher, not this function, is the backstop
/// for those.
pub fn parse_patient(raw: Value) -> Result<Patient> {
  validate_patient(&raw)?;
  Ok(serde_json::from_value(raw)?)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::{entry::Entry, patient::Gender};

  #[test]
  fn shallow_valid_object_passes_unmodified() {
    let raw = json!({
      "id": "p1",
      "name": "Alice Liddell",
      "occupation": "welder",
      // Shallow check only: the gender domain is not inspected,
      "gender": "banana",
      // and entry contents are not inspected either.
      "entries": [{ "what": "ever" }],
    });
    let validated = validate_patient(&raw).unwrap();
    assert_eq!(raw.as_object(), Some(validated));
  }

  #[test]
  fn unexpected_key_is_named() {
    let raw = json!({ "id": "p1", "nickname": "Al" });
    let err = validate_patient(&raw).unwrap_err();
    assert_eq!(err.to_string(), r#"invalid key on patient: "nickname""#);
  }

  #[test]
  fn non_string_non_array_value_is_named() {
    let raw = json!({ "id": "p1", "name": 42 });
    let err = validate_patient(&raw).unwrap_err();
    assert_eq!(err.to_string(), "missing or invalid value: name");
  }

  #[test]
  fn keys_vetted_before_values() {
    // `gender` carries a bad value, but the foreign key wins.
    let raw = json!({ "gender": 5, "zodiac": "libra" });
    let err = validate_patient(&raw).unwrap_err();
    assert!(matches!(err, Error::UnexpectedKey(key) if key == "zodiac"));
  }

  #[test]
  fn non_object_fails() {
    assert!(matches!(
      validate_patient(&json!("p1")),
      Err(Error::NotAnObject)
    ));
    assert!(matches!(
      validate_patient(&Value::Null),
      Err(Error::NotAnObject)
    ));
  }

  #[test]
  fn parse_patient_types_known_entries() {
    let raw = json!({
      "id": "p1",
      "name": "Alice Liddell",
      "occupation": "welder",
      "gender": "female",
      "ssn": "010101-123A",
      "entries": [{
        "id": "e1",
        "type": "Hospital",
        "date": "2024-01-01",
        "specialist": "Dr. House",
        "description": "fractured wrist",
        "discharge": { "date": "2024-01-09", "criteria": "cast removed" },
      }],
    });
    let patient = parse_patient(raw).unwrap();
    assert_eq!(patient.gender, Gender::Female);
    let entries = patient.entries.unwrap();
    assert!(matches!(entries[0], Entry::Hospital(_)));
  }

  #[test]
  fn parse_patient_carries_unknown_entry_tag() {
    let raw = json!({
      "id": "p1",
      "name": "Alice Liddell",
      "occupation": "welder",
      "gender": "female",
      "entries": [{ "id": "e1", "type": "Spa", "date": "2024-01-01" }],
    });
    let patient = parse_patient(raw).unwrap();
    let entries = patient.entries.unwrap();
    assert!(matches!(entries[0], Entry::Unrecognized(_)));
  }

  #[test]
  fn parse_patient_rejects_malformed_known_entry() {
    let raw = json!({
      "id": "p1",
      "name": "Alice Liddell",
      "occupation": "welder",
      "gender": "female",
      "entries": [{ "id": "e1", "type": "Hospital", "date": "2024-01-01",
                    "specialist": "x", "description": "y" }],
    });
    assert!(matches!(parse_patient(raw), Err(Error::Malformed(_))));
  }

  #[test]
  fn out_of_domain_gender_is_carried() {
    let raw = json!({
      "id": "p1",
      "name": "Alice Liddell",
      "occupation": "welder",
      "gender": "banana",
    });
    let patient = parse_patient(raw).unwrap();
    assert_eq!(patient.gender, Gender::Unrecognized("banana".to_owned()));
  }
}
