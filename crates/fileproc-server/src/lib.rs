//! File Processor Server Library
//!
//! HTTP service that accepts text and CSV uploads, counts their lines and
//! words while streaming, and keeps the results in memory.
//!
//! # Overview
//!
//! - **Upload**: `POST /api/v1/files/upload` with a multipart `file` field
//! - **Retrieval**: `GET /api/v1/files` and `GET /api/v1/files/:id`
//! - **Configuration**: environment variables, optionally from a `.env` file
//! - **Middleware**: CORS, request logging, compression, panic recovery
//!
//! # Architecture
//!
//! Features are vertical slices split into commands (writes) and queries
//! (reads). Uploads run through a fixed pipeline:
//!
//! 1. reject a missing or empty file
//! 2. derive and check the extension against the allow-set
//! 3. count lines and words in a single streaming pass
//! 4. store an immutable record under a fresh id
//!
//! Records live in a concurrent map for the lifetime of the process.
//!
//! # Example
//!
//! ```no_run
//! use fileproc_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let state = api::AppState::in_memory(&config);
//!     api::serve(config, state, std::future::pending()).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod models;
pub mod storage;

// Re-export commonly used types
pub use error::{AppError, AppResult};
