//! REST API client module for the Noroff Social API.
//!
//! The API uses bearer token authentication plus a per-user API key, both
//! obtained through the auth endpoints and persisted by the auth module.
//! Responses arrive in a `{ data, errors? }` envelope which the client
//! unwraps before handing payloads to callers.

pub mod client;
pub mod error;

pub use client::{ApiClient, PostQuery};
pub use error::ApiError;
