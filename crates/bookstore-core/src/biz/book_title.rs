//! Book title workflows: create, delete, find.

use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, info};

use crate::context::Context;
use crate::error::{CoreError, CoreResult};
use crate::generator::IdGenerator;
use crate::repository::{BookTitleRepository, ReferenceChecker};
use crate::types::{Author, BookTitle, CatalogEntry, Category, CreateBookTitleRequest, CreatedId};
use crate::validation::{validate_create_book_title, validate_id};

// =============================================================================
// Create
// =============================================================================

/// Creates a book title together with its author and category links.
pub struct CreateBookTitleBiz<G, R, A, C> {
    generator: G,
    repo: R,
    authors: A,
    categories: C,
}

impl<G, R, A, C> CreateBookTitleBiz<G, R, A, C>
where
    G: IdGenerator,
    R: BookTitleRepository,
    A: ReferenceChecker,
    C: ReferenceChecker,
{
    pub fn new(generator: G, repo: R, authors: A, categories: C) -> Self {
        CreateBookTitleBiz {
            generator,
            repo,
            authors,
            categories,
        }
    }

    /// Runs the create workflow.
    ///
    /// Authors are checked before categories and the workflow stops at the
    /// first failing check, so a request missing both reports the authors.
    pub async fn create(
        &self,
        ctx: &Context,
        req: &CreateBookTitleRequest,
    ) -> CoreResult<CreatedId> {
        validate_create_book_title(req)?;

        ctx.check()?;
        let missing = self.authors.check_exist(ctx, &req.author_ids).await?;
        if !missing.is_empty() {
            debug!(?missing, "Rejecting book title: unknown authors");
            return Err(CoreError::referenced_not_found(<Author as CatalogEntry>::KIND, missing));
        }

        ctx.check()?;
        let missing = self.categories.check_exist(ctx, &req.category_ids).await?;
        if !missing.is_empty() {
            debug!(?missing, "Rejecting book title: unknown categories");
            return Err(CoreError::referenced_not_found(<Category as CatalogEntry>::KIND, missing));
        }

        ctx.check()?;
        let id = self.generator.new_id();
        let now = Utc::now();
        let title = BookTitle {
            id: id.clone(),
            name: req.name.trim().to_string(),
            description: req.description.clone(),
            author_ids: dedup(&req.author_ids),
            category_ids: dedup(&req.category_ids),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            is_active: true,
        };

        self.repo.create(ctx, &title).await?;

        info!(id = %id, authors = title.author_ids.len(), categories = title.category_ids.len(), "Book title created");
        Ok(CreatedId { id })
    }
}

/// Keeps the first occurrence of each id.
fn dedup(ids: &[String]) -> Vec<String> {
    let mut seen: HashSet<&String> = HashSet::with_capacity(ids.len());
    ids.iter().filter(|id| seen.insert(*id)).cloned().collect()
}

// =============================================================================
// Delete
// =============================================================================

/// Soft-deletes a book title. Links and physical copies are left alone.
pub struct DeleteBookTitleBiz<R> {
    repo: R,
}

impl<R: BookTitleRepository> DeleteBookTitleBiz<R> {
    pub fn new(repo: R) -> Self {
        DeleteBookTitleBiz { repo }
    }

    pub async fn delete(&self, ctx: &Context, id: &str) -> CoreResult<()> {
        validate_id("id", id)?;
        ctx.check()?;

        self.repo.delete(ctx, id).await?;

        info!(id = %id, "Book title deleted");
        Ok(())
    }
}

// =============================================================================
// Find
// =============================================================================

/// Loads an active book title with its links.
pub struct FindBookTitleBiz<R> {
    repo: R,
}

impl<R: BookTitleRepository> FindBookTitleBiz<R> {
    pub fn new(repo: R) -> Self {
        FindBookTitleBiz { repo }
    }

    pub async fn find(&self, ctx: &Context, id: &str) -> CoreResult<BookTitle> {
        validate_id("id", id)?;
        ctx.check()?;

        self.repo
            .find(ctx, id)
            .await?
            .ok_or_else(|| CoreError::not_found(BookTitle::KIND, id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ShortIdGenerator;
    use crate::repository::{BookTitleRepo, ExistRepo};
    use crate::store::EntityStore;
    use crate::testing::{author, category, MemoryLinks, MemoryStore};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Catalog {
        authors: MemoryStore<Author>,
        categories: MemoryStore<Category>,
        titles: MemoryStore<BookTitle>,
        author_links: MemoryLinks,
        category_links: MemoryLinks,
    }

    impl Catalog {
        fn seeded() -> Self {
            Catalog {
                authors: MemoryStore::with_rows([author("a1"), author("a2")]),
                categories: MemoryStore::with_rows([category("c1"), category("c2")]),
                titles: MemoryStore::default(),
                author_links: MemoryLinks::default(),
                category_links: MemoryLinks::default(),
            }
        }

        fn repo(&self) -> BookTitleRepo<MemoryStore<BookTitle>, MemoryLinks, MemoryLinks> {
            BookTitleRepo::new(
                self.titles.clone(),
                self.author_links.clone(),
                self.category_links.clone(),
            )
        }

        fn create_biz<G: IdGenerator>(
            &self,
            generator: G,
        ) -> CreateBookTitleBiz<
            G,
            BookTitleRepo<MemoryStore<BookTitle>, MemoryLinks, MemoryLinks>,
            ExistRepo<MemoryStore<Author>>,
            ExistRepo<MemoryStore<Category>>,
        > {
            CreateBookTitleBiz::new(
                generator,
                self.repo(),
                ExistRepo::new(self.authors.clone()),
                ExistRepo::new(self.categories.clone()),
            )
        }

        fn nothing_written(&self) -> bool {
            self.titles.len() == 0
                && self.author_links.rows().is_empty()
                && self.category_links.rows().is_empty()
        }
    }

    /// Counts how often an id was requested.
    #[derive(Default)]
    struct CountingGenerator(AtomicUsize);

    impl IdGenerator for CountingGenerator {
        fn new_id(&self) -> String {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            format!("bt{n}")
        }
    }

    fn request(authors: &[&str], categories: &[&str]) -> CreateBookTitleRequest {
        CreateBookTitleRequest {
            name: "Clean Code".to_string(),
            description: "A handbook of agile software craftsmanship".to_string(),
            author_ids: authors.iter().map(|s| s.to_string()).collect(),
            category_ids: categories.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_create_success_round_trip() {
        let catalog = Catalog::seeded();
        let biz = catalog.create_biz(ShortIdGenerator);
        let ctx = Context::new();

        let created = biz.create(&ctx, &request(&["a1"], &["c1"])).await.unwrap();

        let found = FindBookTitleBiz::new(catalog.repo())
            .find(&ctx, &created.id)
            .await
            .unwrap();
        assert_eq!(found.name, "Clean Code");
        assert_eq!(
            catalog.author_links.rows(),
            vec![(created.id.clone(), "a1".to_string())]
        );
        assert_eq!(
            catalog.category_links.rows(),
            vec![(created.id.clone(), "c1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_missing_author_reports_exact_ids_and_writes_nothing() {
        let catalog = Catalog::seeded();
        let generator = CountingGenerator::default();
        let biz = catalog.create_biz(&generator);

        let err = biz
            .create(&Context::new(), &request(&["a1", "a9", "a8"], &["c1"]))
            .await
            .unwrap_err();

        match err {
            CoreError::ReferencedNotFound { entity, missing } => {
                assert_eq!(entity, "author");
                assert_eq!(missing, vec!["a9", "a8"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(catalog.nothing_written());
        assert_eq!(generator.0.load(Ordering::SeqCst), 0, "no id minted");
    }

    #[tokio::test]
    async fn test_missing_category_reports_exact_ids() {
        let catalog = Catalog::seeded();
        let biz = catalog.create_biz(ShortIdGenerator);

        let err = biz
            .create(&Context::new(), &request(&["a1"], &["c1", "c7"]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::ReferencedNotFound { ref entity, ref missing }
                if entity == "category" && missing == &vec!["c7".to_string()]
        ));
        assert!(catalog.nothing_written());
    }

    #[tokio::test]
    async fn test_authors_reported_before_categories() {
        let catalog = Catalog::seeded();
        let biz = catalog.create_biz(ShortIdGenerator);

        let err = biz
            .create(&Context::new(), &request(&["a9"], &["c9"]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::ReferencedNotFound { ref entity, .. } if entity == "author"
        ));
    }

    #[tokio::test]
    async fn test_shape_validation_happens_before_io() {
        let catalog = Catalog::seeded();
        let biz = catalog.create_biz(ShortIdGenerator);
        let ctx = Context::new();

        let mut no_name = request(&["a1"], &["c1"]);
        no_name.name = "  ".to_string();
        for bad in [request(&[], &["c1"]), request(&["a1"], &[]), no_name] {
            let err = biz.create(&ctx, &bad).await.unwrap_err();
            assert!(matches!(err, CoreError::Validation(_)), "{err:?}");
        }

        assert!(catalog.authors.last_lookup().is_empty());
        assert!(catalog.nothing_written());
    }

    #[tokio::test]
    async fn test_duplicate_reference_ids_are_collapsed() {
        let catalog = Catalog::seeded();
        let biz = catalog.create_biz(CountingGenerator::default());

        biz.create(&Context::new(), &request(&["a2", "a1", "a2"], &["c1", "c1"]))
            .await
            .unwrap();

        let found = catalog.titles.find_by_id(&Context::new(), "bt0").await.unwrap().unwrap();
        assert_eq!(found.author_ids, vec!["a2", "a1"]);
        assert_eq!(found.category_ids, vec!["c1"]);
    }

    #[tokio::test]
    async fn test_id_collision_surfaces_duplicate() {
        struct Fixed;
        impl IdGenerator for Fixed {
            fn new_id(&self) -> String {
                "same".to_string()
            }
        }

        let catalog = Catalog::seeded();
        let biz = catalog.create_biz(Fixed);
        let ctx = Context::new();

        biz.create(&ctx, &request(&["a1"], &["c1"])).await.unwrap();
        let err = biz.create(&ctx, &request(&["a2"], &["c2"])).await.unwrap_err();

        assert!(matches!(err, CoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_storage_failure_propagates_unchanged() {
        let catalog = Catalog {
            author_links: MemoryLinks::failing(),
            ..Catalog::seeded()
        };
        let biz = catalog.create_biz(ShortIdGenerator);

        let err = biz
            .create(&Context::new(), &request(&["a1"], &["c1"]))
            .await
            .unwrap_err();

        match err {
            CoreError::Storage(source) => assert_eq!(source.to_string(), "connection reset"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancelled_context() {
        let catalog = Catalog::seeded();
        let biz = catalog.create_biz(ShortIdGenerator);
        let ctx = Context::new();
        ctx.cancel();

        let err = biz.create(&ctx, &request(&["a1"], &["c1"])).await.unwrap_err();

        assert!(err.is_cancelled());
        assert!(catalog.nothing_written());
    }

    #[tokio::test]
    async fn test_each_call_mints_a_fresh_id() {
        let catalog = Catalog::seeded();
        let biz = catalog.create_biz(ShortIdGenerator);
        let ctx = Context::new();

        let first = biz.create(&ctx, &request(&["a1"], &["c1"])).await.unwrap();
        let second = biz.create(&ctx, &request(&["a1"], &["c1"])).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(catalog.titles.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_once_then_not_found() {
        let catalog = Catalog::seeded();
        let created = catalog
            .create_biz(ShortIdGenerator)
            .create(&Context::new(), &request(&["a1"], &["c1"]))
            .await
            .unwrap();

        let delete = DeleteBookTitleBiz::new(catalog.repo());
        delete.delete(&Context::new(), &created.id).await.unwrap();

        let err = delete.delete(&Context::new(), &created.id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));

        let err = FindBookTitleBiz::new(catalog.repo())
            .find(&Context::new(), &created.id)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_blank_id_is_invalid() {
        let catalog = Catalog::seeded();
        let err = DeleteBookTitleBiz::new(catalog.repo())
            .delete(&Context::new(), "")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
