//! Core domain types and shared logic for Satchel.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Folder identifiers and filename validation
//! - The word corpus backing identifier allocation
//! - Per-folder metadata records
//! - Secret masking for audit
//! - Configuration types

pub mod config;
pub mod corpus;
pub mod error;
pub mod identifier;
pub mod meta;
pub mod secret;

pub use config::{AppConfig, AuthConfig, FolderConfig, ServerConfig};
pub use corpus::WordCorpus;
pub use error::{Error, Result};
pub use identifier::{validate_filename, FolderId};
pub use meta::FolderMeta;
pub use secret::mask_secret;
