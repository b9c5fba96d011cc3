//! Student CRUD: POST /api/student, GET/PUT/DELETE /api/student/:student_id.

use crate::error::{AppError, ErrorBody};
use crate::extractors::ApiJson;
use crate::handlers::{not_found, parse_id};
use crate::model::{Student, StudentPayload};
use crate::response::{created, deleted, ok};
use crate::store::{StudentStore, UnitOfWork};
use axum::{extract::Path, response::IntoResponse};

#[utoipa::path(
    post,
    path = "/api/student",
    tag = "Students",
    request_body = StudentPayload,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Missing required field", body = ErrorBody),
        (status = 409, description = "Duplicate roll number", body = ErrorBody),
    )
)]
pub async fn create_student(
    mut uow: UnitOfWork,
    ApiJson(payload): ApiJson<StudentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let fields = payload.validate()?;
    if StudentStore::find_by_roll_number(uow.conn(), &fields.roll_number).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "a student with roll number '{}' already exists",
            fields.roll_number
        )));
    }
    let student = StudentStore::create(uow.conn(), &fields).await?;
    uow.commit().await?;
    tracing::info!(student_id = student.student_id, roll_number = %student.roll_number, "student created");
    Ok(created(student))
}

#[utoipa::path(
    get,
    path = "/api/student/{student_id}",
    tag = "Students",
    params(("student_id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 404, description = "Student not found", body = ErrorBody),
    )
)]
pub async fn read_student(
    mut uow: UnitOfWork,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = parse_id(&id_str, "student")?;
    let student = StudentStore::get_by_id(uow.conn(), student_id)
        .await?
        .ok_or_else(|| not_found("student", student_id))?;
    uow.commit().await?;
    Ok(ok(student))
}

#[utoipa::path(
    put,
    path = "/api/student/{student_id}",
    tag = "Students",
    params(("student_id" = i64, Path, description = "Student id")),
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Student replaced", body = Student),
        (status = 400, description = "Missing required field", body = ErrorBody),
        (status = 404, description = "Student not found", body = ErrorBody),
        (status = 409, description = "Roll number held by another student", body = ErrorBody),
    )
)]
pub async fn update_student(
    mut uow: UnitOfWork,
    Path(id_str): Path<String>,
    ApiJson(payload): ApiJson<StudentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = parse_id(&id_str, "student")?;
    if StudentStore::get_by_id(uow.conn(), student_id).await?.is_none() {
        return Err(not_found("student", student_id));
    }
    let fields = payload.validate()?;
    if let Some(holder) = StudentStore::find_by_roll_number(uow.conn(), &fields.roll_number).await? {
        if holder.student_id != student_id {
            return Err(AppError::Conflict(format!(
                "roll number '{}' belongs to student {}",
                fields.roll_number, holder.student_id
            )));
        }
    }
    let student = StudentStore::update(uow.conn(), student_id, &fields)
        .await?
        .ok_or_else(|| not_found("student", student_id))?;
    uow.commit().await?;
    tracing::info!(student_id, "student updated");
    Ok(ok(student))
}

#[utoipa::path(
    delete,
    path = "/api/student/{student_id}",
    tag = "Students",
    params(("student_id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student and its enrollments deleted"),
        (status = 404, description = "Student not found", body = ErrorBody),
    )
)]
pub async fn delete_student(
    mut uow: UnitOfWork,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = parse_id(&id_str, "student")?;
    if !StudentStore::delete(uow.conn(), student_id).await? {
        return Err(not_found("student", student_id));
    }
    uow.commit().await?;
    tracing::info!(student_id, "student deleted");
    Ok(deleted())
}
