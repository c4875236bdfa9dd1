//! Async HTTP client wrapping the visit-record JSON API.

use std::time::Duration;

use kardex_core::{
  diagnosis::Diagnosis,
  patient::{Patient, PatientSummary},
};
use reqwest::Client;
use serde_json::{Map, Value};

use crate::{Error, Result, payload::PatientFormValues};

/// Connection settings for the record service.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the visit-record REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// `GET /patients`
  pub async fn list_patients(&self) -> Result<Vec<PatientSummary>> {
    let resp = self.client.get(self.url("/patients")).send().await?;
    Ok(resp.error_for_status()?.json().await?)
  }

  /// `GET /patients/{id}`
  ///
  /// The service answers with an array containing the patient; the first
  /// element is the record. Returned raw — the caller runs the domain
  /// validator over it.
  pub async fn get_patient(&self, id: &str) -> Result<Value> {
    let resp = self
      .client
      .get(self.url(&format!("/patients/{id}")))
      .send()
      .await?;
    Ok(resp.error_for_status()?.json().await?)
  }

  /// `GET /diagnoses`
  pub async fn list_diagnoses(&self) -> Result<Vec<Diagnosis>> {
    let resp = self.client.get(self.url("/diagnoses")).send().await?;
    Ok(resp.error_for_status()?.json().await?)
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// `POST /patients`
  pub async fn create_patient(&self, form: &PatientFormValues) -> Result<Patient> {
    let resp = self
      .client
      .post(self.url("/patients"))
      .json(form)
      .send()
      .await?;
    Self::read_write_response(resp).await
  }

  /// `POST /patients/{id}/entries`
  pub async fn create_entry(
    &self,
    id: &str,
    payload: &Map<String, Value>,
  ) -> Result<Patient> {
    let resp = self
      .client
      .post(self.url(&format!("/patients/{id}/entries")))
      .json(payload)
      .send()
      .await?;
    Self::read_write_response(resp).await
  }

  /// On success the service answers with the full updated patient. On
  /// failure it answers `{"error": message}` when it can say why; surface
  /// that message, else the generic unknown error.
  async fn read_write_response(resp: reqwest::Response) -> Result<Patient> {
    if resp.status().is_success() {
      return Ok(resp.json().await?);
    }

    let status = resp.status();
    let message = resp
      .json::<Value>()
      .await
      .ok()
      .as_ref()
      .and_then(|body| body.get("error"))
      .map(|reason| match reason {
        Value::String(text) => text.clone(),
        other => other.to_string(),
      });
    match message {
      Some(message) => Err(Error::Server(message)),
      None => {
        tracing::error!(%status, "write failed without a structured error body");
        Err(Error::Unknown)
      }
    }
  }
}
