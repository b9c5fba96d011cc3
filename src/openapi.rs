//! OpenAPI document served at /apispec.json.

use crate::error::ErrorBody;
use crate::handlers;
use crate::model::{Course, CoursePayload, Enrollment, EnrollmentPayload, EnrollmentSummary, Student, StudentPayload};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AcadManage API",
        description = "Academic management system for students, courses, and enrollments."
    ),
    paths(
        handlers::student::create_student,
        handlers::student::read_student,
        handlers::student::update_student,
        handlers::student::delete_student,
        handlers::course::create_course,
        handlers::course::read_course,
        handlers::course::update_course,
        handlers::course::delete_course,
        handlers::enrollment::list_enrollments,
        handlers::enrollment::create_enrollment,
        handlers::enrollment::read_enrollment,
        handlers::enrollment::delete_enrollment,
    ),
    components(schemas(
        Student,
        StudentPayload,
        Course,
        CoursePayload,
        Enrollment,
        EnrollmentPayload,
        EnrollmentSummary,
        ErrorBody,
    )),
    tags(
        (name = "Students", description = "Student records"),
        (name = "Courses", description = "Course records"),
        (name = "Enrollments", description = "Student–course enrollments"),
    )
)]
pub struct ApiDoc;
