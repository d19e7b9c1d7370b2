use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::features::files::{counter, FilesState};
use crate::features::shared::validation::validate_extension;
use crate::models::{FileRecord, FileView};
use crate::storage::FileRepository;

/// Multipart field that carries the uploaded file
pub const UPLOAD_FIELD: &str = "file";

/// An uploaded file on its way into the store
///
/// `content` is `None` when the request carried no file at all. `size_hint`
/// is whatever the client claimed and is only ever logged.
#[derive(Debug)]
pub struct UploadFileCommand<R> {
    pub filename: Option<String>,
    pub size_hint: Option<u64>,
    pub content: Option<R>,
}

impl<R> UploadFileCommand<R> {
    pub fn new(filename: impl Into<String>, content: R) -> Self {
        Self {
            filename: Some(filename.into()),
            size_hint: None,
            content: Some(content),
        }
    }

    pub fn with_size_hint(mut self, size_hint: Option<u64>) -> Self {
        self.size_hint = size_hint;
        self
    }

    /// A request that arrived without a file
    pub fn absent() -> Self {
        Self {
            filename: None,
            size_hint: None,
            content: None,
        }
    }
}

/// Ingest one upload: check content, validate the extension, count, store
///
/// The steps run strictly in that order and the record is saved only after
/// the whole stream has been counted, so an aborted read never leaves a
/// record behind.
#[tracing::instrument(skip(state, command), fields(filename = ?command.filename))]
pub async fn handle<R>(state: &FilesState, command: UploadFileCommand<R>) -> AppResult<FileView>
where
    R: AsyncBufRead + Unpin + Send,
{
    let UploadFileCommand {
        filename,
        size_hint,
        content,
    } = command;

    state.events.received(filename.as_deref(), size_hint);

    let result = ingest(state, filename.as_deref(), content).await;
    if let Err(err) = &result {
        state.events.rejected(filename.as_deref(), err);
    }

    result
}

async fn ingest<R>(state: &FilesState, filename: Option<&str>, content: Option<R>) -> AppResult<FileView>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut reader = content.ok_or_else(no_content)?;
    if reader.fill_buf().await.map_err(processing_failure)?.is_empty() {
        return Err(no_content());
    }

    let name = filename.unwrap_or_default();
    let extension = validate_extension(name, &state.allowed)?;
    state.events.validated(name, &extension);

    state.events.counting_started(name);
    let counts = counter::count(&mut reader, &extension)
        .await
        .map_err(processing_failure)?;
    state.events.counted(name, counts);

    let record = FileRecord::new(
        fresh_id(state.repo.as_ref()),
        name.to_string(),
        extension,
        counts.lines,
        counts.words,
        Utc::now(),
    );
    let saved = state.repo.save(record);
    state.events.stored(saved.id(), saved.name());

    Ok(FileView::from(saved))
}

/// A v4 id not yet present in `repo`
fn fresh_id(repo: &dyn FileRepository) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if repo.find_by_id(id).is_none() {
            return id;
        }
    }
}

fn no_content() -> AppError {
    AppError::InvalidInput("no content".to_string())
}

fn processing_failure(source: std::io::Error) -> AppError {
    AppError::ProcessingFailure { source }
}
