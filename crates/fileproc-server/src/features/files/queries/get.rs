use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::FileView;
use crate::storage::FileRepository;

/// Look up one record by its identifier
///
/// Identifiers are opaque to callers: a value that does not even parse as an
/// id can never have been issued, so it is reported as not found.
#[derive(Debug, Clone)]
pub struct GetFileQuery {
    pub id: String,
}

impl GetFileQuery {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[tracing::instrument(skip(repo))]
pub fn handle(repo: &dyn FileRepository, query: GetFileQuery) -> AppResult<FileView> {
    Uuid::parse_str(query.id.trim())
        .ok()
        .and_then(|id| repo.find_by_id(id))
        .map(FileView::from)
        .ok_or(AppError::NotFound(query.id))
}
