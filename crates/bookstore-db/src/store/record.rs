//! Generic entity store over any [`Record`] table.

use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use bookstore_core::store::EntityStore;
use bookstore_core::{Context, CoreResult};
use chrono::Utc;
use sqlx::QueryBuilder;
use tracing::debug;

use crate::error::DbError;
use crate::session::{guarded, Session};
use crate::store::Record;

/// Entity store for one table. Reads only see active rows.
pub struct RecordStore<R> {
    session: Session,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordStore<R> {
    fn clone(&self) -> Self {
        RecordStore {
            session: self.session.clone(),
            _record: PhantomData,
        }
    }
}

impl<R> std::fmt::Debug for RecordStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("record", &std::any::type_name::<R>())
            .finish()
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new(session: Session) -> Self {
        RecordStore {
            session,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Record> EntityStore for RecordStore<R> {
    type Entity = R;

    async fn find_by_id(&self, ctx: &Context, id: &str) -> CoreResult<Option<R>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ? AND is_active = 1",
            R::COLUMNS,
            R::TABLE
        );

        let mut guard = self.session.lock().await;
        let row = guarded(
            ctx,
            sqlx::query_as::<_, R>(&sql).bind(id).fetch_optional(guard.conn()?),
        )
        .await?;

        debug!(table = R::TABLE, id = %id, found = row.is_some(), "Looked up row");
        Ok(row)
    }

    async fn find_by_ids(&self, ctx: &Context, ids: &[String]) -> CoreResult<HashMap<String, R>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut qb = QueryBuilder::<sqlx::Sqlite>::new(format!(
            "SELECT {} FROM {} WHERE is_active = 1 AND id IN (",
            R::COLUMNS,
            R::TABLE
        ));
        {
            let mut list = qb.separated(", ");
            for id in ids {
                list.push_bind(id.as_str());
            }
            list.push_unseparated(")");
        }

        let mut guard = self.session.lock().await;
        let rows = guarded(ctx, qb.build_query_as::<R>().fetch_all(guard.conn()?)).await?;

        debug!(table = R::TABLE, requested = ids.len(), found = rows.len(), "Looked up rows");
        Ok(rows
            .into_iter()
            .map(|row| (row.id().to_string(), row))
            .collect())
    }

    async fn insert(&self, ctx: &Context, entity: &R) -> CoreResult<()> {
        let mut qb = QueryBuilder::<sqlx::Sqlite>::new(format!(
            "INSERT INTO {} ({}) ",
            R::TABLE,
            R::COLUMNS
        ));
        qb.push_values(std::iter::once(entity), |mut row, entity| {
            entity.bind_row(&mut row)
        });

        let mut guard = self.session.lock().await;
        match guarded(ctx, qb.build().execute(guard.conn()?)).await {
            Ok(_) => {
                debug!(table = R::TABLE, id = %entity.id(), "Inserted row");
                Ok(())
            }
            Err(DbError::UniqueViolation { .. }) => {
                Err(DbError::duplicate(R::ENTITY, entity.id()).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn soft_delete(&self, ctx: &Context, id: &str) -> CoreResult<()> {
        let sql = format!(
            "UPDATE {} SET is_active = 0, deleted_at = ?, updated_at = ? \
             WHERE id = ? AND is_active = 1",
            R::TABLE
        );
        let now = Utc::now();

        let mut guard = self.session.lock().await;
        let result = guarded(
            ctx,
            sqlx::query(&sql)
                .bind(now)
                .bind(now)
                .bind(id)
                .execute(guard.conn()?),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(R::ENTITY, id).into());
        }

        debug!(table = R::TABLE, id = %id, "Soft-deleted row");
        Ok(())
    }
}
