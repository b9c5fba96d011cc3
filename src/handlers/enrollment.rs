//! Enrollment handlers under /api/student/:student_id/course.

use crate::error::{AppError, ErrorBody};
use crate::extractors::ApiJson;
use crate::handlers::{not_found, parse_id, parse_path_id};
use crate::model::{Enrollment, EnrollmentPayload, EnrollmentSummary};
use crate::response::{created, deleted, ok};
use crate::store::{CourseStore, EnrollmentStore, StudentStore, UnitOfWork};
use axum::{extract::Path, response::IntoResponse};

fn parse_pair(student_id: &str, course_id: &str) -> Result<(i64, i64), AppError> {
    let (Some(s), Some(c)) = (parse_path_id(student_id), parse_path_id(course_id)) else {
        return Err(AppError::NotFound("enrollment not found".into()));
    };
    Ok((s, c))
}

fn enrollment_not_found(student_id: i64, course_id: i64) -> AppError {
    AppError::NotFound(format!(
        "student {} is not enrolled in course {}",
        student_id, course_id
    ))
}

#[utoipa::path(
    get,
    path = "/api/student/{student_id}/course",
    tag = "Enrollments",
    params(("student_id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Courses the student is enrolled in", body = [EnrollmentSummary]),
        (status = 404, description = "Student not found", body = ErrorBody),
    )
)]
pub async fn list_enrollments(
    mut uow: UnitOfWork,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = parse_id(&id_str, "student")?;
    if StudentStore::get_by_id(uow.conn(), student_id).await?.is_none() {
        return Err(not_found("student", student_id));
    }
    let rows: Vec<EnrollmentSummary> = EnrollmentStore::list_by_student(uow.conn(), student_id)
        .await?
        .into_iter()
        .map(EnrollmentSummary::from)
        .collect();
    uow.commit().await?;
    Ok(ok(rows))
}

#[utoipa::path(
    post,
    path = "/api/student/{student_id}/course",
    tag = "Enrollments",
    params(("student_id" = i64, Path, description = "Student id")),
    request_body = EnrollmentPayload,
    responses(
        (status = 201, description = "Student enrolled", body = Enrollment),
        (status = 400, description = "Missing course id", body = ErrorBody),
        (status = 404, description = "Student or course not found", body = ErrorBody),
        (status = 409, description = "Already enrolled", body = ErrorBody),
    )
)]
pub async fn create_enrollment(
    mut uow: UnitOfWork,
    Path(id_str): Path<String>,
    ApiJson(payload): ApiJson<EnrollmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let student_id = parse_id(&id_str, "student")?;
    let course_id = payload.validate()?;
    if StudentStore::get_by_id(uow.conn(), student_id).await?.is_none() {
        return Err(not_found("student", student_id));
    }
    if CourseStore::get_by_id(uow.conn(), course_id).await?.is_none() {
        return Err(not_found("course", course_id));
    }
    if EnrollmentStore::find_by_student_and_course(uow.conn(), student_id, course_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!(
            "student {} is already enrolled in course {}",
            student_id, course_id
        )));
    }
    let enrollment = EnrollmentStore::create(uow.conn(), student_id, course_id).await?;
    uow.commit().await?;
    tracing::info!(student_id, course_id, "student enrolled");
    Ok(created(enrollment))
}

#[utoipa::path(
    get,
    path = "/api/student/{student_id}/course/{course_id}",
    tag = "Enrollments",
    params(
        ("student_id" = i64, Path, description = "Student id"),
        ("course_id" = i64, Path, description = "Course id"),
    ),
    responses(
        (status = 200, description = "Enrollment found", body = Enrollment),
        (status = 404, description = "Enrollment not found", body = ErrorBody),
    )
)]
pub async fn read_enrollment(
    mut uow: UnitOfWork,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let (student_id, course_id) = parse_pair(&student_id, &course_id)?;
    let enrollment = EnrollmentStore::find_by_student_and_course(uow.conn(), student_id, course_id)
        .await?
        .ok_or_else(|| enrollment_not_found(student_id, course_id))?;
    uow.commit().await?;
    Ok(ok(enrollment))
}

#[utoipa::path(
    delete,
    path = "/api/student/{student_id}/course/{course_id}",
    tag = "Enrollments",
    params(
        ("student_id" = i64, Path, description = "Student id"),
        ("course_id" = i64, Path, description = "Course id"),
    ),
    responses(
        (status = 200, description = "Student unenrolled"),
        (status = 404, description = "Enrollment not found", body = ErrorBody),
    )
)]
pub async fn delete_enrollment(
    mut uow: UnitOfWork,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let (student_id, course_id) = parse_pair(&student_id, &course_id)?;
    if !EnrollmentStore::delete(uow.conn(), student_id, course_id).await? {
        return Err(enrollment_not_found(student_id, course_id));
    }
    uow.commit().await?;
    tracing::info!(student_id, course_id, "student unenrolled");
    Ok(deleted())
}
