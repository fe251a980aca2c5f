//! Book title store: root rows plus the two link lists on read.

use std::collections::HashMap;

use async_trait::async_trait;
use bookstore_core::store::EntityStore;
use bookstore_core::{BookTitle, Context, CoreResult};

use crate::session::Session;
use crate::store::link::{LinkStore, BOOK_TITLE_AUTHORS, BOOK_TITLE_CATEGORIES};
use crate::store::record::RecordStore;

/// Entity store for `book_titles`.
///
/// Writes touch only the root row; join rows are written through
/// [`LinkStore`] by the aggregate repository. Reads fill `author_ids` and
/// `category_ids` in insertion order.
#[derive(Debug, Clone)]
pub struct BookTitleStore {
    titles: RecordStore<BookTitle>,
    authors: LinkStore,
    categories: LinkStore,
}

impl BookTitleStore {
    pub fn new(session: Session) -> Self {
        BookTitleStore {
            titles: RecordStore::new(session.clone()),
            authors: LinkStore::new(session.clone(), BOOK_TITLE_AUTHORS),
            categories: LinkStore::new(session, BOOK_TITLE_CATEGORIES),
        }
    }

    async fn with_links(&self, ctx: &Context, mut title: BookTitle) -> CoreResult<BookTitle> {
        title.author_ids = self.authors.load(ctx, &title.id).await?;
        title.category_ids = self.categories.load(ctx, &title.id).await?;
        Ok(title)
    }
}

#[async_trait]
impl EntityStore for BookTitleStore {
    type Entity = BookTitle;

    async fn find_by_id(&self, ctx: &Context, id: &str) -> CoreResult<Option<BookTitle>> {
        match self.titles.find_by_id(ctx, id).await? {
            Some(title) => Ok(Some(self.with_links(ctx, title).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_ids(
        &self,
        ctx: &Context,
        ids: &[String],
    ) -> CoreResult<HashMap<String, BookTitle>> {
        let roots = self.titles.find_by_ids(ctx, ids).await?;
        let mut loaded = HashMap::with_capacity(roots.len());
        for (id, title) in roots {
            loaded.insert(id, self.with_links(ctx, title).await?);
        }
        Ok(loaded)
    }

    async fn insert(&self, ctx: &Context, title: &BookTitle) -> CoreResult<()> {
        self.titles.insert(ctx, title).await
    }

    async fn soft_delete(&self, ctx: &Context, id: &str) -> CoreResult<()> {
        self.titles.soft_delete(ctx, id).await
    }
}
