//! # HTTP Handlers
//!
//! Every mutating handler follows the same shape:
//!
//! ```text
//! decode JSON ──► db.begin(ctx) ──► build stores/repos/biz on the Session
//!                                        │
//!                                        ▼
//!                                  biz.run(ctx, req)
//!                                        │
//!                        Ok ──► commit   │   Err ──► rollback
//!                                        ▼
//!                            { "data": ... } or ApiError
//! ```

pub mod book_title;
pub mod catalog;
pub mod health;

use bookstore_core::CoreResult;
use bookstore_db::Session;
use serde::Serialize;
use tracing::warn;

use crate::error::ApiError;

/// Success envelope.
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        DataResponse { data }
    }
}

/// Acknowledgement for operations without a payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse {
    pub is_success: bool,
}

/// Commits the session when the workflow succeeded, rolls it back
/// otherwise. A failed rollback is logged and the workflow error wins.
pub(crate) async fn settle<T>(session: Session, outcome: CoreResult<T>) -> Result<T, ApiError> {
    match outcome {
        Ok(value) => {
            session.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = session.rollback().await {
                warn!(error = %rollback_err, "Rollback failed");
            }
            Err(err.into())
        }
    }
}
