//! Student, course, and enrollment routes. Mounted under /api.

use crate::handlers::{
    create_course, create_enrollment, create_student, delete_course, delete_enrollment, delete_student,
    list_enrollments, read_course, read_enrollment, read_student, update_course, update_student,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/student", post(create_student))
        .route(
            "/student/:student_id",
            get(read_student).put(update_student).delete(delete_student),
        )
        .route(
            "/student/:student_id/course",
            get(list_enrollments).post(create_enrollment),
        )
        .route(
            "/student/:student_id/course/:course_id",
            get(read_enrollment).delete(delete_enrollment),
        )
        .route("/course", post(create_course))
        .route(
            "/course/:course_id",
            get(read_course).put(update_course).delete(delete_course),
        )
        .with_state(state)
}
