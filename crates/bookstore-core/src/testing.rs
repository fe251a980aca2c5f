//! In-memory stores for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::context::Context;
use crate::error::{CoreError, CoreResult};
use crate::store::{AssociationStore, EntityStore};
use crate::types::{Author, BookTitle, CatalogEntry, Category};

/// Rows the memory store knows how to soft-delete.
pub(crate) trait MemoryRow: Clone + Send + Sync + 'static {
    const KIND: &'static str;
    fn key(&self) -> &str;
    fn active(&self) -> bool;
    fn deactivate(&mut self);
}

macro_rules! memory_row {
    ($ty:ty, $kind:expr) => {
        impl MemoryRow for $ty {
            const KIND: &'static str = $kind;
            fn key(&self) -> &str {
                &self.id
            }
            fn active(&self) -> bool {
                self.is_active
            }
            fn deactivate(&mut self) {
                self.is_active = false;
                self.deleted_at = Some(Utc::now());
            }
        }
    };
}

memory_row!(Author, <Author as CatalogEntry>::KIND);
memory_row!(Category, <Category as CatalogEntry>::KIND);
memory_row!(BookTitle, BookTitle::KIND);

#[derive(Debug)]
struct Inner<E> {
    rows: HashMap<String, E>,
    last_lookup: Vec<String>,
}

impl<E> Default for Inner<E> {
    fn default() -> Self {
        Inner {
            rows: HashMap::new(),
            last_lookup: Vec::new(),
        }
    }
}

/// HashMap-backed entity store honoring the active-row convention.
#[derive(Debug)]
pub(crate) struct MemoryStore<E> {
    inner: Arc<Mutex<Inner<E>>>,
}

impl<E> Clone for MemoryStore<E> {
    fn clone(&self) -> Self {
        MemoryStore {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        MemoryStore {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }
}

impl<E: MemoryRow> MemoryStore<E> {
    pub(crate) fn with_rows(rows: impl IntoIterator<Item = E>) -> Self {
        let store = MemoryStore::default();
        {
            let mut inner = store.inner.lock().unwrap();
            for row in rows {
                inner.rows.insert(row.key().to_string(), row);
            }
        }
        store
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.inner.lock().unwrap().rows.contains_key(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    pub(crate) fn last_lookup(&self) -> Vec<String> {
        self.inner.lock().unwrap().last_lookup.clone()
    }
}

#[async_trait]
impl<E: MemoryRow> EntityStore for MemoryStore<E> {
    type Entity = E;

    async fn find_by_id(&self, ctx: &Context, id: &str) -> CoreResult<Option<E>> {
        ctx.check()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.get(id).filter(|row| row.active()).cloned())
    }

    async fn find_by_ids(&self, ctx: &Context, ids: &[String]) -> CoreResult<HashMap<String, E>> {
        ctx.check()?;
        let mut inner = self.inner.lock().unwrap();
        inner.last_lookup = ids.to_vec();
        Ok(ids
            .iter()
            .filter_map(|id| inner.rows.get(id).filter(|row| row.active()))
            .map(|row| (row.key().to_string(), row.clone()))
            .collect())
    }

    async fn insert(&self, ctx: &Context, entity: &E) -> CoreResult<()> {
        ctx.check()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.rows.contains_key(entity.key()) {
            return Err(CoreError::duplicate(E::KIND, entity.key()));
        }
        inner.rows.insert(entity.key().to_string(), entity.clone());
        Ok(())
    }

    async fn soft_delete(&self, ctx: &Context, id: &str) -> CoreResult<()> {
        ctx.check()?;
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.get_mut(id) {
            Some(row) if row.active() => {
                row.deactivate();
                Ok(())
            }
            _ => Err(CoreError::not_found(E::KIND, id)),
        }
    }
}

/// Join-row store; `failing()` rejects every insert with a storage error.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryLinks {
    rows: Arc<Mutex<Vec<(String, String)>>>,
    fail: bool,
}

impl MemoryLinks {
    pub(crate) fn failing() -> Self {
        MemoryLinks {
            fail: true,
            ..MemoryLinks::default()
        }
    }

    pub(crate) fn rows(&self) -> Vec<(String, String)> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssociationStore for MemoryLinks {
    async fn insert_associations(
        &self,
        ctx: &Context,
        root_id: &str,
        ref_ids: &[String],
    ) -> CoreResult<()> {
        ctx.check()?;
        if self.fail {
            return Err(CoreError::storage(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "connection reset",
            )));
        }
        let mut rows = self.rows.lock().unwrap();
        rows.extend(ref_ids.iter().map(|r| (root_id.to_string(), r.clone())));
        Ok(())
    }
}

pub(crate) fn author(id: &str) -> Author {
    Author::new_entry(id.to_string(), format!("Author {id}"), Utc::now())
}

pub(crate) fn category(id: &str) -> Category {
    Category::new_entry(id.to_string(), format!("Category {id}"), Utc::now())
}

pub(crate) fn book_title(id: &str, authors: &[&str], categories: &[&str]) -> BookTitle {
    let now = Utc::now();
    BookTitle {
        id: id.to_string(),
        name: format!("Title {id}"),
        description: String::new(),
        author_ids: authors.iter().map(|s| s.to_string()).collect(),
        category_ids: categories.iter().map(|s| s.to_string()).collect(),
        created_at: now,
        updated_at: now,
        deleted_at: None,
        is_active: true,
    }
}
