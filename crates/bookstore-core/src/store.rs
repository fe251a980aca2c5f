//! # Store Contracts
//!
//! The lowest storage layer, one store per table.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Store contracts                                                        │
//! │                                                                         │
//! │  EntityStore<Entity = E>           AssociationStore                     │
//! │  ├── find_by_id(ctx, id)           └── insert_associations(ctx,         │
//! │  ├── find_by_ids(ctx, ids)                 root_id, ref_ids)            │
//! │  ├── insert(ctx, &E)                                                    │
//! │  ├── soft_delete(ctx, id)                                               │
//! │  └── exists(ctx, id)                                                    │
//! │                                                                         │
//! │  Every call runs inside the transaction the store was built with.      │
//! │  A store NEVER begins, commits or rolls back.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads only see active rows. "Not found" is `None` / a missing map key,
//! never an error.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::context::Context;
use crate::error::CoreResult;

/// Typed CRUD primitives over a single entity table.
#[async_trait]
pub trait EntityStore: Send + Sync {
    type Entity: Send + Sync;

    /// Looks up one active entity.
    async fn find_by_id(&self, ctx: &Context, id: &str) -> CoreResult<Option<Self::Entity>>;

    /// Looks up several active entities. Only the found subset is returned;
    /// callers diff against the requested ids.
    async fn find_by_ids(
        &self,
        ctx: &Context,
        ids: &[String],
    ) -> CoreResult<HashMap<String, Self::Entity>>;

    /// Inserts a new entity. Fails with `CoreError::Duplicate` if the id exists.
    async fn insert(&self, ctx: &Context, entity: &Self::Entity) -> CoreResult<()>;

    /// Marks an active entity deleted. Fails with `CoreError::NotFound` when no
    /// active row matches.
    async fn soft_delete(&self, ctx: &Context, id: &str) -> CoreResult<()>;

    async fn exists(&self, ctx: &Context, id: &str) -> CoreResult<bool> {
        Ok(self.find_by_id(ctx, id).await?.is_some())
    }
}

/// Bulk insert of join rows between an aggregate root and referenced entities.
#[async_trait]
pub trait AssociationStore: Send + Sync {
    /// Inserts one row per `ref_id`, all-or-nothing. Empty input is a no-op.
    async fn insert_associations(
        &self,
        ctx: &Context,
        root_id: &str,
        ref_ids: &[String],
    ) -> CoreResult<()>;
}
