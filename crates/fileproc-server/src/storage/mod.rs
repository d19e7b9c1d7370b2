//! Record storage
//!
//! The ingestion pipeline depends on the [`FileRepository`] seam; the server
//! wires in [`InMemoryFileRepository`], a volatile store that lives as long as
//! the process.

use uuid::Uuid;

use crate::models::FileRecord;

pub mod memory;

pub use memory::InMemoryFileRepository;

/// Identifier-keyed store of file records
///
/// Implementations must be safe to share across request tasks: concurrent
/// `save` calls with distinct ids never lose a write, and a reader never
/// observes a partially written record.
pub trait FileRepository: Send + Sync + 'static {
    /// Store `record` under its id, replacing any record with the same id
    fn save(&self, record: FileRecord) -> FileRecord;

    fn find_by_id(&self, id: Uuid) -> Option<FileRecord>;

    /// Snapshot of every stored record, in no particular order
    fn find_all(&self) -> Vec<FileRecord>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
