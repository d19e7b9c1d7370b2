//! File API routes
//!
//! - `POST /api/v1/files/upload` - multipart upload, file in the `file` field
//! - `GET /api/v1/files` - list every stored record
//! - `GET /api/v1/files/:id` - fetch one record
//!
//! The uploaded field is never buffered whole: its byte stream is adapted into
//! an `AsyncBufRead` and counted as it arrives.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, Path, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures::TryStreamExt;
use serde_json::json;
use tokio_util::io::StreamReader;

use super::{
    commands::{self, UploadFileCommand, UPLOAD_FIELD},
    queries::{self, GetFileQuery, ListFilesQuery},
    FilesState,
};
use crate::api::response::ApiResponse;
use crate::error::{AppError, AppResult};

pub fn files_routes() -> Router<FilesState> {
    Router::new()
        .route("/", get(list_files))
        .route("/upload", post(upload_file))
        .route("/:id", get(get_file))
}

/// Upload a file and return its counted metadata
///
/// # Response
///
/// - `201 Created` - file counted and stored
/// - `400 Bad Request` - no file, empty file, or unsupported extension
/// - `413 Payload Too Large` - body exceeds the configured limit
/// - `500 Internal Server Error` - the upload could not be read
#[tracing::instrument(skip_all)]
async fn upload_file(
    State(state): State<FilesState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Response> {
    let mut multipart = multipart.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let size_hint = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_owned);
        let stream = field.map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
        let reader = std::pin::pin!(StreamReader::new(stream));

        let command = UploadFileCommand {
            filename,
            size_hint,
            content: Some(reader),
        };
        let view = commands::upload::handle(&state, command)
            .await
            .map_err(body_limit_error)?;

        tracing::info!(id = %view.id, name = %view.filename, "File ingested via API");

        return Ok((StatusCode::CREATED, Json(ApiResponse::success(view))).into_response());
    }

    let command = UploadFileCommand::<&[u8]>::absent().with_size_hint(size_hint);
    let view = commands::upload::handle(&state, command).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(view))).into_response())
}

/// List every stored record
#[tracing::instrument(skip_all)]
async fn list_files(State(state): State<FilesState>) -> Response {
    let views = queries::list::handle(state.repo.as_ref(), ListFilesQuery);
    let count = views.len();

    Json(ApiResponse::success_with_meta(views, json!({ "count": count }))).into_response()
}

/// Fetch one record; unknown ids answer `404 Not Found`
#[tracing::instrument(skip(state))]
async fn get_file(State(state): State<FilesState>, Path(id): Path<String>) -> AppResult<Response> {
    let view = queries::get::handle(state.repo.as_ref(), GetFileQuery::new(id))?;
    Ok(Json(ApiResponse::success(view)).into_response())
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::InvalidInput(err.body_text())
    }
}

/// Reading past the body limit surfaces as an I/O error inside the counter
fn body_limit_error(err: AppError) -> AppError {
    match err {
        AppError::ProcessingFailure { ref source }
            if source
                .get_ref()
                .and_then(|inner| inner.downcast_ref::<MultipartError>())
                .is_some_and(|e| e.status() == StatusCode::PAYLOAD_TOO_LARGE) =>
        {
            AppError::PayloadTooLarge
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_limit_error_passes_other_errors_through() {
        let err = body_limit_error(AppError::InvalidInput("no content".into()));
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = body_limit_error(AppError::ProcessingFailure {
            source: std::io::Error::new(std::io::ErrorKind::Other, "reset"),
        });
        assert!(matches!(err, AppError::ProcessingFailure { .. }));
    }
}
