//! Core types for the kardex visit-record client.
//!
//! This crate holds the typed domain model (patients, diagnoses, the entry
//! sum type), the runtime validation of untrusted server payloads, and the
//! variant dispatcher that turns entries into renderable descriptions. It is
//! deliberately free of HTTP dependencies; the client and store crates build
//! on it.

pub mod describe;
pub mod diagnosis;
pub mod entry;
pub mod error;
pub mod patient;
pub mod validate;

pub use error::{Error, Result};
