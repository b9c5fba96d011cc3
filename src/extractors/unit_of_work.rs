//! Begin the request's transaction before the handler runs. Only GET and HEAD requests get a read transaction.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::UnitOfWork;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, Method},
};

#[async_trait]
impl FromRequestParts<AppState> for UnitOfWork {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if parts.method == Method::GET || parts.method == Method::HEAD {
            UnitOfWork::begin(&state.pool).await
        } else {
            UnitOfWork::begin_write(&state.pool).await
        }
    }
}
