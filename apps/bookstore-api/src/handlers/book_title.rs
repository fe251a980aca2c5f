//! `/v1/booktitles` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use bookstore_core::biz::{CreateBookTitleBiz, DeleteBookTitleBiz, FindBookTitleBiz};
use bookstore_core::{BookTitle, CreateBookTitleRequest, CreatedId, ShortIdGenerator};
use tracing::info;

use crate::error::ApiError;
use crate::handlers::{settle, DataResponse, SuccessResponse};
use crate::state::AppState;

/// `POST /v1/booktitles`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookTitleRequest>, JsonRejection>,
) -> Result<Json<DataResponse<CreatedId>>, ApiError> {
    let Json(req) = payload?;
    let ctx = state.request_context();

    let session = state.db.begin(&ctx).await?;
    let biz = CreateBookTitleBiz::new(
        ShortIdGenerator,
        session.book_title_repo(),
        session.author_checker(),
        session.category_checker(),
    );
    let outcome = biz.create(&ctx, &req).await;
    let created = settle(session, outcome).await?;

    info!(id = %created.id, "POST /v1/booktitles");
    Ok(Json(DataResponse::new(created)))
}

/// `GET /v1/booktitles/{id}`
pub async fn find(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<BookTitle>>, ApiError> {
    let ctx = state.request_context();

    let session = state.db.begin_read(&ctx).await?;
    let outcome = FindBookTitleBiz::new(session.book_title_repo())
        .find(&ctx, &id)
        .await;
    let title = settle(session, outcome).await?;

    Ok(Json(DataResponse::new(title)))
}

/// `DELETE /v1/booktitles/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let ctx = state.request_context();

    let session = state.db.begin(&ctx).await?;
    let outcome = DeleteBookTitleBiz::new(session.book_title_repo())
        .delete(&ctx, &id)
        .await;
    settle(session, outcome).await?;

    info!(id = %id, "DELETE /v1/booktitles");
    Ok(Json(SuccessResponse { is_success: true }))
}
