//! Folder lifecycle and incremental archive cache for Satchel.
//!
//! This crate provides:
//! - Identifier allocation with collision avoidance
//! - Per-folder JSON metadata sidecars with an mtime fallback
//! - Age-based retention sweeping
//! - An idempotent, append-only ZIP archive cache per folder
//! - A single deletion routine covering folder and sidecars together

mod archive;
pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{CleanupOutcome, DeleteReport, FileEntry, FolderStore, SweepStats};
