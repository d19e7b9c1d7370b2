//! Domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata describing one ingested file
///
/// Records are immutable values. Only the upload command constructs them and
/// nothing mutates one afterwards; the store hands out clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    id: Uuid,
    name: String,
    extension: String,
    lines: u64,
    words: u64,
    created_at: DateTime<Utc>,
}

impl FileRecord {
    pub(crate) fn new(
        id: Uuid,
        name: String,
        extension: String,
        lines: u64,
        words: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            extension,
            lines,
            words,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased extension, a member of the allow-set at creation time
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn words(&self) -> u64 {
        self.words
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Outbound projection of a [`FileRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileView {
    pub id: Uuid,
    pub filename: String,
    pub extension: String,
    pub lines: u64,
    pub words: u64,
    pub created_at: DateTime<Utc>,
}

impl From<&FileRecord> for FileView {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.id,
            filename: record.name.clone(),
            extension: record.extension.clone(),
            lines: record.lines,
            words: record.words,
            created_at: record.created_at,
        }
    }
}

impl From<FileRecord> for FileView {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            filename: record.name,
            extension: record.extension,
            lines: record.lines,
            words: record.words,
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_serializes_camel_case() {
        let record = FileRecord::new(
            Uuid::nil(),
            "notes.txt".to_string(),
            "txt".to_string(),
            3,
            7,
            DateTime::<Utc>::UNIX_EPOCH,
        );

        let value = serde_json::to_value(FileView::from(&record)).unwrap();

        assert_eq!(value["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(value["filename"], "notes.txt");
        assert_eq!(value["extension"], "txt");
        assert_eq!(value["lines"], 3);
        assert_eq!(value["words"], 7);
        assert_eq!(value["createdAt"], "1970-01-01T00:00:00Z");
        assert_eq!(value.as_object().unwrap().len(), 6);
    }
}
