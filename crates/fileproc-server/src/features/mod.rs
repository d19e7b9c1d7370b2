//! Feature modules implementing the File Processor API
//!
//! Each feature is a vertical slice with its own commands, queries, and
//! routes:
//!
//! - **files**: upload ingestion and record retrieval
//! - **shared**: validation helpers used across slices
//!
//! # Architecture
//!
//! - `commands/` - write operations
//! - `queries/` - read operations
//! - `routes.rs` - HTTP route definitions

pub mod files;
pub mod shared;

use axum::Router;

pub use files::FilesState;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    pub files: FilesState,
}

/// Creates the API router with every feature mounted under its prefix
///
/// - `/files` - file upload and retrieval
pub fn router(state: FeatureState) -> Router<()> {
    Router::new().nest("/files", files::files_routes().with_state(state.files))
}
