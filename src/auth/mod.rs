//! Authentication module: credential persistence and header construction.
//!
//! This module provides:
//! - `CredentialStore`: file-backed key/value storage for the token, API
//!   key, and logged-in user name
//! - `build_auth_headers`: turns stored credentials into the header set for
//!   authenticated requests, or signals that the user must log in

pub mod credentials;
pub mod headers;

pub use credentials::{CredentialStore, API_KEY_KEY, TOKEN_KEY, USER_KEY};
pub use headers::build_auth_headers;
