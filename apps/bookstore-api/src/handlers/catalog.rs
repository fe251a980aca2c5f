//! `/v1/authors`, `/v1/categories`, `/v1/publishers` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use bookstore_core::biz::CreateCatalogEntryBiz;
use bookstore_core::store::EntityStore;
use bookstore_core::{CatalogEntry, CreateCatalogEntryRequest, CreatedId, ShortIdGenerator};
use bookstore_db::Session;
use tracing::info;

use crate::error::ApiError;
use crate::handlers::{settle, DataResponse};
use crate::state::AppState;

type Created = Result<Json<DataResponse<CreatedId>>, ApiError>;

/// `POST /v1/authors`
pub async fn create_author(
    State(state): State<AppState>,
    payload: Result<Json<CreateCatalogEntryRequest>, JsonRejection>,
) -> Created {
    create_entry(state, payload, Session::authors).await
}

/// `POST /v1/categories`
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CreateCatalogEntryRequest>, JsonRejection>,
) -> Created {
    create_entry(state, payload, Session::categories).await
}

/// `POST /v1/publishers`
pub async fn create_publisher(
    State(state): State<AppState>,
    payload: Result<Json<CreateCatalogEntryRequest>, JsonRejection>,
) -> Created {
    create_entry(state, payload, Session::publishers).await
}

async fn create_entry<S>(
    state: AppState,
    payload: Result<Json<CreateCatalogEntryRequest>, JsonRejection>,
    store: fn(&Session) -> S,
) -> Created
where
    S: EntityStore,
    S::Entity: CatalogEntry,
{
    let Json(req) = payload?;
    let ctx = state.request_context();

    let session = state.db.begin(&ctx).await?;
    let outcome = CreateCatalogEntryBiz::new(ShortIdGenerator, store(&session))
        .create(&ctx, &req)
        .await;
    let created = settle(session, outcome).await?;

    info!(kind = <S::Entity as CatalogEntry>::KIND, id = %created.id, "Catalog entry created via API");
    Ok(Json(DataResponse::new(created)))
}
