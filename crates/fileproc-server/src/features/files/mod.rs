//! File ingestion and retrieval
//!
//! - `commands/upload` - validate, count, and store an uploaded file
//! - `queries/get` - fetch one record by id
//! - `queries/list` - fetch every record
//! - `routes` - HTTP bindings under `/api/v1/files`

pub mod commands;
pub mod counter;
pub mod events;
pub mod queries;
pub mod routes;

use std::sync::Arc;

use crate::config::AllowedExtensions;
use crate::storage::FileRepository;

pub use commands::{UploadFileCommand, UPLOAD_FIELD};
pub use counter::{CountMode, Counts};
pub use events::{IngestEvents, TracingEvents};
pub use queries::{GetFileQuery, ListFilesQuery};
pub use routes::files_routes;

/// Collaborators shared by every file command and query
#[derive(Clone)]
pub struct FilesState {
    pub repo: Arc<dyn FileRepository>,
    pub allowed: Arc<AllowedExtensions>,
    pub events: Arc<dyn IngestEvents>,
}

impl FilesState {
    /// State that reports ingestion events through `tracing`
    pub fn new(repo: Arc<dyn FileRepository>, allowed: AllowedExtensions) -> Self {
        Self {
            repo,
            allowed: Arc::new(allowed),
            events: Arc::new(TracingEvents),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn IngestEvents>) -> Self {
        self.events = events;
        self
    }
}
