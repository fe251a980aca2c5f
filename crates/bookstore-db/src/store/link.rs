//! Join-table store for book-title associations.

use async_trait::async_trait;
use bookstore_core::store::AssociationStore;
use bookstore_core::{Context, CoreResult};
use sqlx::QueryBuilder;
use tracing::debug;

use crate::error::DbError;
use crate::session::{guarded, Session};

/// Describes one join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// Name used in duplicate-link errors.
    pub entity: &'static str,
    pub table: &'static str,
    pub root_column: &'static str,
    pub ref_column: &'static str,
}

/// Book title ⇄ author.
pub const BOOK_TITLE_AUTHORS: Link = Link {
    entity: "book title author",
    table: "book_title_authors",
    root_column: "book_title_id",
    ref_column: "author_id",
};

/// Book title ⇄ category.
pub const BOOK_TITLE_CATEGORIES: Link = Link {
    entity: "book title category",
    table: "book_title_categories",
    root_column: "book_title_id",
    ref_column: "category_id",
};

/// Writes and reads the rows of one join table.
#[derive(Debug, Clone)]
pub struct LinkStore {
    session: Session,
    link: Link,
}

impl LinkStore {
    pub fn new(session: Session, link: Link) -> Self {
        LinkStore { session, link }
    }

    /// Referenced ids of `root_id`, in insertion order.
    pub async fn load(&self, ctx: &Context, root_id: &str) -> CoreResult<Vec<String>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ? ORDER BY rowid",
            self.link.ref_column, self.link.table, self.link.root_column
        );

        let mut guard = self.session.lock().await;
        let ids = guarded(
            ctx,
            sqlx::query_scalar::<_, String>(&sql)
                .bind(root_id)
                .fetch_all(guard.conn()?),
        )
        .await?;

        Ok(ids)
    }
}

#[async_trait]
impl AssociationStore for LinkStore {
    /// One multi-row INSERT. An empty list writes nothing. A pair that is
    /// already linked, or repeated in `ref_ids`, fails as a duplicate keyed
    /// by `root_id`.
    async fn insert_associations(
        &self,
        ctx: &Context,
        root_id: &str,
        ref_ids: &[String],
    ) -> CoreResult<()> {
        if ref_ids.is_empty() {
            return Ok(());
        }

        let mut qb = QueryBuilder::<sqlx::Sqlite>::new(format!(
            "INSERT INTO {} ({}, {}) ",
            self.link.table, self.link.root_column, self.link.ref_column
        ));
        qb.push_values(ref_ids, |mut row, ref_id| {
            row.push_bind(root_id).push_bind(ref_id.as_str());
        });

        let mut guard = self.session.lock().await;
        match guarded(ctx, qb.build().execute(guard.conn()?)).await {
            Ok(_) => {}
            Err(DbError::UniqueViolation { .. }) => {
                return Err(DbError::duplicate(self.link.entity, root_id).into());
            }
            Err(e) => return Err(e.into()),
        }

        debug!(table = self.link.table, root = %root_id, count = ref_ids.len(), "Inserted links");
        Ok(())
    }
}
