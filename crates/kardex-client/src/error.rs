//! Error types for `kardex-client`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The service rejected a write and said why.
  #[error("{0}")]
  Server(String),

  /// The service failed without a structured error body.
  #[error("unknown error")]
  Unknown,

  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error(transparent)]
  Domain(#[from] kardex_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
