//! `kardex` — terminal front-end for the visit-record service.
//!
//! # Usage
//!
//! ```text
//! kardex list
//! kardex show <patient-id>
//! kardex add-patient --name "Alice Liddell" --occupation welder --gender female
//! kardex add-entry <patient-id> --kind health-check --specialist "Dr. X" \
//!   --description "annual check" --rating 0
//! ```

mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kardex_client::{
  ApiClient, ApiConfig, Session,
  payload::{EntryFormValues, PatientFormValues},
};
use kardex_core::{
  entry::{Discharge, EntryKind, HealthCheckRating, SickLeave},
  patient::Gender,
};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "kardex", about = "Terminal front-end for the kardex visit-record service")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the record service (default: http://localhost:3001/api).
  #[arg(long, env = "KARDEX_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List all patients (public projection).
  List,
  /// Show one patient with their entries.
  Show {
    /// Patient id.
    id: String,
  },
  /// Create a patient.
  AddPatient {
    #[arg(long)]
    name: String,
    #[arg(long)]
    occupation: String,
    /// male, female or other.
    #[arg(long, value_parser = parse_gender)]
    gender: Gender,
    #[arg(long)]
    ssn: Option<String>,
    #[arg(long)]
    date_of_birth: Option<String>,
  },
  /// Record a new visit entry for a patient.
  AddEntry {
    /// Patient id.
    id: String,
    /// hospital, occupational-healthcare or health-check.
    #[arg(long, value_parser = parse_kind)]
    kind: EntryKind,
    /// Visit date (defaults to today).
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "")]
    specialist: String,
    #[arg(long, default_value = "")]
    description: String,
    /// Diagnosis code; repeat for several.
    #[arg(long = "diagnosis")]
    diagnoses: Vec<String>,
    /// Hospital: discharge date (defaults to today).
    #[arg(long)]
    discharge_date: Option<String>,
    /// Hospital: discharge criteria.
    #[arg(long, default_value = "")]
    discharge_criteria: String,
    /// Occupational healthcare: employer name.
    #[arg(long, default_value = "")]
    employer: String,
    /// Occupational healthcare: sick leave start (defaults to today).
    #[arg(long)]
    sick_leave_start: Option<String>,
    /// Occupational healthcare: sick leave end (defaults to today).
    #[arg(long)]
    sick_leave_end: Option<String>,
    /// Health check: rating 0-3 (0 = healthy).
    #[arg(long)]
    rating: Option<u8>,
  },
}

fn parse_gender(raw: &str) -> Result<Gender, String> {
  match raw {
    "male" => Ok(Gender::Male),
    "female" => Ok(Gender::Female),
    "other" => Ok(Gender::Other),
    other => Err(format!(
      "unknown gender: {other:?} (expected male, female or other)"
    )),
  }
}

fn parse_kind(raw: &str) -> Result<EntryKind, String> {
  match raw {
    "hospital" => Ok(EntryKind::Hospital),
    "occupational-healthcare" => Ok(EntryKind::OccupationalHealthcare),
    "health-check" => Ok(EntryKind::HealthCheck),
    other => Err(format!(
      "unknown entry kind: {other:?} (expected hospital, \
       occupational-healthcare or health-check)"
    )),
  }
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  let args = Args::parse();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override the config file, which overrides the default.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| "http://localhost:3001/api".to_string());

  let client = ApiClient::new(ApiConfig { base_url }).context("building HTTP client")?;
  let mut session = Session::new(client);

  match args.command {
    Command::List => run_list(&mut session).await,
    Command::Show { id } => run_show(&mut session, &id).await,
    Command::AddPatient {
      name,
      occupation,
      gender,
      ssn,
      date_of_birth,
    } => {
      let form = PatientFormValues {
        name,
        occupation,
        gender,
        ssn,
        date_of_birth,
      };
      run_add_patient(&mut session, &form).await
    }
    Command::AddEntry {
      id,
      kind,
      date,
      specialist,
      description,
      diagnoses,
      discharge_date,
      discharge_criteria,
      employer,
      sick_leave_start,
      sick_leave_end,
      rating,
    } => {
      // The form defaults every date control to today.
      let today = chrono::Local::now().date_naive().to_string();
      let form = EntryFormValues {
        kind,
        date: date.unwrap_or_else(|| today.clone()),
        specialist,
        description,
        diagnosis_codes: diagnoses,
        discharge: Discharge {
          date: discharge_date.unwrap_or_else(|| today.clone()),
          criteria: discharge_criteria,
        },
        employer_name: employer,
        sick_leave: SickLeave {
          start_date: sick_leave_start.unwrap_or_else(|| today.clone()),
          end_date: sick_leave_end.unwrap_or(today),
        },
        health_check_rating: rating
          .map(HealthCheckRating::try_from)
          .transpose()
          .context("health check rating")?,
      };
      run_add_entry(&mut session, &id, &form).await
    }
  }
}

// ─── Commands ─────────────────────────────────────────────────────────────────

async fn run_list(session: &mut Session) -> Result<()> {
  session
    .load_patient_list()
    .await
    .context("loading patient list")?;
  ui::print_patient_list(session.store().state());
  Ok(())
}

async fn run_show(session: &mut Session, id: &str) -> Result<()> {
  session.ensure_diagnoses().await;
  match session.patient_details(id).await {
    Ok(patient) => {
      ui::print_patient(&patient, &session.store().state().diagnoses);
      Ok(())
    }
    // Malformed server data is not retried; the page degrades.
    Err(kardex_client::Error::Domain(error)) => {
      tracing::warn!(%error, "patient payload failed validation");
      println!("Patient record not found");
      Ok(())
    }
    Err(error) => Err(error).context("fetching patient"),
  }
}

async fn run_add_patient(session: &mut Session, form: &PatientFormValues) -> Result<()> {
  match session.add_patient(form).await {
    Ok(patient) => {
      println!("added {} ({})", patient.name, patient.id);
      Ok(())
    }
    Err(error) => Err(submission_error(error)),
  }
}

async fn run_add_entry(
  session: &mut Session,
  id: &str,
  form: &EntryFormValues,
) -> Result<()> {
  session.ensure_diagnoses().await;
  match session.add_entry(id, form).await {
    Ok(patient) => {
      ui::print_patient(&patient, &session.store().state().diagnoses);
      Ok(())
    }
    Err(error) => Err(submission_error(error)),
  }
}

/// The user-facing message for a failed write: the service's own words when
/// it sent any, otherwise the generic fallback.
fn submission_error(error: kardex_client::Error) -> anyhow::Error {
  match error {
    kardex_client::Error::Server(message) => anyhow::anyhow!(message),
    other => {
      tracing::debug!(%other, "submission failed");
      anyhow::anyhow!("unknown error")
    }
  }
}
