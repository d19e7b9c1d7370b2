use crate::models::FileView;
use crate::storage::FileRepository;

/// Every stored record, unfiltered and in no guaranteed order
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilesQuery;

#[tracing::instrument(skip(repo))]
pub fn handle(repo: &dyn FileRepository, _query: ListFilesQuery) -> Vec<FileView> {
    repo.find_all().into_iter().map(FileView::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileRecord;
    use crate::storage::InMemoryFileRepository;
    use chrono::Utc;
    use std::collections::HashSet;
    use uuid::Uuid;

    #[test]
    fn test_list_empty() {
        let repo = InMemoryFileRepository::new();
        assert!(handle(&repo, ListFilesQuery).is_empty());
    }

    #[test]
    fn test_list_returns_each_record_once() {
        let repo = InMemoryFileRepository::new();
        let ids: HashSet<Uuid> = (0..5)
            .map(|i| {
                repo.save(FileRecord::new(
                    Uuid::new_v4(),
                    format!("f{i}.csv"),
                    "csv".to_string(),
                    i,
                    i,
                    Utc::now(),
                ))
                .id()
            })
            .collect();

        let listed = handle(&repo, ListFilesQuery);

        assert_eq!(listed.len(), 5);
        assert_eq!(listed.iter().map(|v| v.id).collect::<HashSet<_>>(), ids);
    }
}
