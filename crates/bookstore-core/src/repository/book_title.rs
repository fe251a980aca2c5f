//! Aggregate repository for book titles.

use async_trait::async_trait;
use tracing::debug;

use crate::context::Context;
use crate::error::CoreResult;
use crate::repository::BookTitleRepository;
use crate::store::{AssociationStore, EntityStore};
use crate::types::BookTitle;

/// Writes a book title and its join rows through three stores that share
/// one transaction.
#[derive(Debug, Clone)]
pub struct BookTitleRepo<S, A, C> {
    titles: S,
    author_links: A,
    category_links: C,
}

impl<S, A, C> BookTitleRepo<S, A, C>
where
    S: EntityStore<Entity = BookTitle>,
    A: AssociationStore,
    C: AssociationStore,
{
    pub fn new(titles: S, author_links: A, category_links: C) -> Self {
        BookTitleRepo {
            titles,
            author_links,
            category_links,
        }
    }
}

#[async_trait]
impl<S, A, C> BookTitleRepository for BookTitleRepo<S, A, C>
where
    S: EntityStore<Entity = BookTitle>,
    A: AssociationStore,
    C: AssociationStore,
{
    async fn create(&self, ctx: &Context, title: &BookTitle) -> CoreResult<()> {
        debug!(id = %title.id, "Persisting book title aggregate");

        self.titles.insert(ctx, title).await?;
        self.author_links
            .insert_associations(ctx, &title.id, &title.author_ids)
            .await?;
        self.category_links
            .insert_associations(ctx, &title.id, &title.category_ids)
            .await?;

        Ok(())
    }

    async fn delete(&self, ctx: &Context, id: &str) -> CoreResult<()> {
        self.titles.soft_delete(ctx, id).await
    }

    async fn find(&self, ctx: &Context, id: &str) -> CoreResult<Option<BookTitle>> {
        self.titles.find_by_id(ctx, id).await
    }
}
