use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use super::FileRepository;
use crate::models::FileRecord;

/// Sharded in-memory record store
///
/// Writes lock only the shard owning the key, so saves for distinct ids
/// proceed in parallel. Records are cloned out on every read.
#[derive(Debug, Default)]
pub struct InMemoryFileRepository {
    records: DashMap<Uuid, FileRecord>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileRepository for InMemoryFileRepository {
    fn save(&self, record: FileRecord) -> FileRecord {
        self.records.insert(record.id(), record.clone());

        info!(
            id = %record.id(),
            name = %record.name(),
            lines = record.lines(),
            words = record.words(),
            at = %record.created_at(),
            "saved"
        );

        record
    }

    fn find_by_id(&self, id: Uuid) -> Option<FileRecord> {
        self.records.get(&id).map(|entry| entry.value().clone())
    }

    fn find_all(&self) -> Vec<FileRecord> {
        self.records.iter().map(|entry| entry.value().clone()).collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
