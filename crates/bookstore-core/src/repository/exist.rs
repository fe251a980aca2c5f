//! Reference-existence repository.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::debug;

use crate::context::Context;
use crate::error::CoreResult;
use crate::repository::ReferenceChecker;
use crate::store::EntityStore;

/// Read-only existence check over any entity store.
#[derive(Debug, Clone)]
pub struct ExistRepo<S> {
    store: S,
}

impl<S: EntityStore> ExistRepo<S> {
    pub fn new(store: S) -> Self {
        ExistRepo { store }
    }
}

#[async_trait]
impl<S: EntityStore> ReferenceChecker for ExistRepo<S> {
    async fn check_exist(&self, ctx: &Context, ids: &[String]) -> CoreResult<Vec<String>> {
        let mut seen: HashSet<&String> = HashSet::with_capacity(ids.len());
        let unique: Vec<String> = ids
            .iter()
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect();

        if unique.is_empty() {
            return Ok(Vec::new());
        }

        let found = self.store.find_by_ids(ctx, &unique).await?;
        let missing: Vec<String> = unique
            .into_iter()
            .filter(|id| !found.contains_key(id))
            .collect();

        debug!(requested = ids.len(), missing = missing.len(), "Checked references");
        Ok(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{author, MemoryStore};

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_all_exist() {
        let store = MemoryStore::with_rows([author("a1"), author("a2")]);
        let repo = ExistRepo::new(store);

        let missing = repo.check_exist(&Context::new(), &ids(&["a1", "a2"])).await.unwrap();
        assert!(missing.is_empty());
    }

    #[tokio::test]
    async fn test_reports_missing_in_request_order_without_duplicates() {
        let store = MemoryStore::with_rows([author("a1")]);
        let repo = ExistRepo::new(store.clone());

        let missing = repo
            .check_exist(&Context::new(), &ids(&["a3", "a1", "a2", "a3"]))
            .await
            .unwrap();
        assert_eq!(missing, ids(&["a3", "a2"]));

        // The store saw each id once.
        assert_eq!(store.last_lookup(), ids(&["a3", "a1", "a2"]));
    }

    #[tokio::test]
    async fn test_soft_deleted_counts_as_missing() {
        let store = MemoryStore::with_rows([author("a1")]);
        store.soft_delete(&Context::new(), "a1").await.unwrap();
        let repo = ExistRepo::new(store);

        let missing = repo.check_exist(&Context::new(), &ids(&["a1"])).await.unwrap();
        assert_eq!(missing, ids(&["a1"]));
    }

    #[tokio::test]
    async fn test_empty_input_skips_store() {
        let store = MemoryStore::<crate::types::Author>::default();
        let repo = ExistRepo::new(store.clone());

        let missing = repo.check_exist(&Context::new(), &[]).await.unwrap();
        assert!(missing.is_empty());
        assert!(store.last_lookup().is_empty());
    }
}
