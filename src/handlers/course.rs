//! Course CRUD, keyed on course code the way students are keyed on roll number.

use crate::error::{AppError, ErrorBody};
use crate::extractors::ApiJson;
use crate::handlers::{not_found, parse_id};
use crate::model::{Course, CoursePayload};
use crate::response::{created, deleted, ok};
use crate::store::{CourseStore, UnitOfWork};
use axum::{extract::Path, response::IntoResponse};

#[utoipa::path(
    post,
    path = "/api/course",
    tag = "Courses",
    request_body = CoursePayload,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Missing required field", body = ErrorBody),
        (status = 409, description = "Duplicate course code", body = ErrorBody),
    )
)]
pub async fn create_course(
    mut uow: UnitOfWork,
    ApiJson(payload): ApiJson<CoursePayload>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.validate()?;
    if CourseStore::find_by_code(uow.conn(), &fields.course_code).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "a course with code '{}' already exists",
            fields.course_code
        )));
    }
    let course = CourseStore::create(uow.conn(), &fields).await?;
    uow.commit().await?;
    tracing::info!(course_id = course.course_id, course_code = %course.course_code, "course created");
    Ok(created(course))
}

#[utoipa::path(
    get,
    path = "/api/course/{course_id}",
    tag = "Courses",
    params(("course_id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course found", body = Course),
        (status = 404, description = "Course not found", body = ErrorBody),
    )
)]
pub async fn read_course(
    mut uow: UnitOfWork,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let course_id = parse_id(&id_str, "course")?;
    let course = CourseStore::get_by_id(uow.conn(), course_id)
        .await?
        .ok_or_else(|| not_found("course", course_id))?;
    uow.commit().await?;
    Ok(ok(course))
}

#[utoipa::path(
    put,
    path = "/api/course/{course_id}",
    tag = "Courses",
    params(("course_id" = i64, Path, description = "Course id")),
    request_body = CoursePayload,
    responses(
        (status = 200, description = "Course replaced", body = Course),
        (status = 400, description = "Missing required field", body = ErrorBody),
        (status = 404, description = "Course not found", body = ErrorBody),
        (status = 409, description = "Course code held by another course", body = ErrorBody),
    )
)]
pub async fn update_course(
    mut uow: UnitOfWork,
    Path(id_str): Path<String>,
    ApiJson(payload): ApiJson<CoursePayload>,
) -> Result<impl IntoResponse, AppError> {
    let course_id = parse_id(&id_str, "course")?;
    if CourseStore::get_by_id(uow.conn(), course_id).await?.is_none() {
        return Err(not_found("course", course_id));
    }
    let fields = payload.validate()?;
    if let Some(holder) = CourseStore::find_by_code(uow.conn(), &fields.course_code).await? {
        if holder.course_id != course_id {
            return Err(AppError::Conflict(format!(
                "course code '{}' belongs to course {}",
                fields.course_code, holder.course_id
            )));
        }
    }
    let course = CourseStore::update(uow.conn(), course_id, &fields)
        .await?
        .ok_or_else(|| not_found("course", course_id))?;
    uow.commit().await?;
    tracing::info!(course_id, "course updated");
    Ok(ok(course))
}

#[utoipa::path(
    delete,
    path = "/api/course/{course_id}",
    tag = "Courses",
    params(("course_id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course and its enrollments deleted"),
        (status = 404, description = "Course not found", body = ErrorBody),
    )
)]
pub async fn delete_course(
    mut uow: UnitOfWork,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let course_id = parse_id(&id_str, "course")?;
    if !CourseStore::delete(uow.conn(), course_id).await? {
        return Err(not_found("course", course_id));
    }
    uow.commit().await?;
    tracing::info!(course_id, "course deleted");
    Ok(deleted())
}
