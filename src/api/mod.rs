//! Secured Health Records API client and error mapping.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{error_from_response, is_auth_failure};
