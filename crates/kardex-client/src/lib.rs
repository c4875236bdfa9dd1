//! HTTP client, write-payload building, and session wiring for kardex.
//!
//! The transport is plain JSON over HTTP ([`ApiClient`]); [`payload`] turns
//! form values into minimal write bodies; [`Session`] owns the store and
//! funnels everything the network says through validation and the reducer.

pub mod client;
pub mod error;
pub mod payload;
pub mod session;

pub use client::{ApiClient, ApiConfig};
pub use error::{Error, Result};
pub use session::Session;
