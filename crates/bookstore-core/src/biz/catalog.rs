//! Create workflow shared by authors, categories and publishers.

use chrono::Utc;
use tracing::info;

use crate::context::Context;
use crate::error::CoreResult;
use crate::generator::IdGenerator;
use crate::store::EntityStore;
use crate::types::{CatalogEntry, CreateCatalogEntryRequest, CreatedId};
use crate::validation::validate_create_catalog_entry;

/// Registers a new catalog entry (author, category or publisher).
pub struct CreateCatalogEntryBiz<G, S> {
    generator: G,
    store: S,
}

impl<G, S> CreateCatalogEntryBiz<G, S>
where
    G: IdGenerator,
    S: EntityStore,
    S::Entity: CatalogEntry,
{
    pub fn new(generator: G, store: S) -> Self {
        CreateCatalogEntryBiz { generator, store }
    }

    pub async fn create(
        &self,
        ctx: &Context,
        req: &CreateCatalogEntryRequest,
    ) -> CoreResult<CreatedId> {
        validate_create_catalog_entry(req)?;
        ctx.check()?;

        let id = self.generator.new_id();
        let entry = S::Entity::new_entry(id.clone(), req.name.trim().to_string(), Utc::now());
        self.store.insert(ctx, &entry).await?;

        info!(kind = <S::Entity as CatalogEntry>::KIND, id = %id, "Catalog entry created");
        Ok(CreatedId { id })
    }
}
