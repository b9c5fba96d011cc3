//! Status + body helpers shared by the resource handlers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// 200 with an empty body, as returned by the delete endpoints.
pub fn deleted() -> StatusCode {
    StatusCode::OK
}
