//! HTTP API server for Satchel.
//!
//! This crate provides the HTTP glue over the folder store:
//! - Folder creation behind the credential gate
//! - Folder listing and single-file download
//! - Read-through ZIP archive download
//! - Credential-gated folder deletion

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::MaskedSecret;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
