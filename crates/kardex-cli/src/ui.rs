//! Line-oriented output for patients and entries.

use std::collections::HashMap;

use kardex_core::{
  describe::describe,
  diagnosis::Diagnosis,
  patient::{Gender, Patient},
};
use kardex_store::State;

/// Marker glyph for a gender value; values outside the domain get none.
fn gender_marker(gender: &Gender) -> &'static str {
  match gender {
    Gender::Male => "♂",
    Gender::Female => "♀",
    Gender::Other => "◯",
    Gender::Unrecognized(_) => "",
  }
}

/// Print the summary cache as a list, one patient per line.
pub fn print_patient_list(state: &State) {
  let mut patients: Vec<_> = state.patients.values().collect();
  patients.sort_by(|a, b| a.name.cmp(&b.name));
  for patient in patients {
    println!(
      "{}  {} {}  {}",
      patient.id,
      patient.name,
      gender_marker(&patient.gender),
      patient.occupation
    );
  }
}

/// Print one full patient record, entries included.
pub fn print_patient(patient: &Patient, diagnoses: &HashMap<String, Diagnosis>) {
  println!("{} {}", patient.name, gender_marker(&patient.gender));
  if let Some(ssn) = &patient.ssn {
    println!("ssn: {ssn}");
  }
  println!("occupation: {}", patient.occupation);
  println!();
  println!("entries");
  for entry in patient.entries.as_deref().unwrap_or_default() {
    let description = describe(entry, diagnoses);
    println!();
    println!("{} {}", description.marker, description.heading);
    for line in &description.body {
      println!("  {line}");
    }
    for line in &description.diagnoses {
      println!("  - {line}");
    }
  }
}
