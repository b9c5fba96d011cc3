//! Records, request payloads, and per-entity payload validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub roll_number: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
    pub course_code: String,
    pub course_description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Enrollment {
    pub student_id: i64,
    pub course_id: i64,
    pub enrollment_date: DateTime<Utc>,
}

/// One row of a student's course list.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct EnrollmentSummary {
    pub course_id: i64,
    pub enrollment_date: DateTime<Utc>,
}

impl From<Enrollment> for EnrollmentSummary {
    fn from(e: Enrollment) -> Self {
        EnrollmentSummary {
            course_id: e.course_id,
            enrollment_date: e.enrollment_date,
        }
    }
}

/// A required field that was absent or empty. `code` is the machine-readable error code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub code: &'static str,
    pub message: &'static str,
}

/// Non-empty list of field errors, in validation order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn first(&self) -> FieldError {
        self.0[0]
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::MissingField(errors.first())
    }
}

/// Collects missing required fields in the order they are checked.
#[derive(Default)]
struct Checker(Vec<FieldError>);

impl Checker {
    fn require(&mut self, value: Option<String>, err: FieldError) -> String {
        match value.filter(|s| !s.trim().is_empty()) {
            Some(v) => v,
            None => {
                self.0.push(err);
                String::new()
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(FieldErrors(self.0))
        }
    }
}

const ROLL_NUMBER_REQUIRED: FieldError = FieldError {
    field: "roll_number",
    code: "STUDENT001",
    message: "Roll Number is required",
};
const FIRST_NAME_REQUIRED: FieldError = FieldError {
    field: "first_name",
    code: "STUDENT002",
    message: "First Name is required",
};
const COURSE_NAME_REQUIRED: FieldError = FieldError {
    field: "course_name",
    code: "COURSE001",
    message: "Course Name is required",
};
const COURSE_CODE_REQUIRED: FieldError = FieldError {
    field: "course_code",
    code: "COURSE002",
    message: "Course Code is required",
};
const COURSE_ID_REQUIRED: FieldError = FieldError {
    field: "course_id",
    code: "ENROLLMENT001",
    message: "Course ID is required",
};
const COURSE_ID_INVALID: FieldError = FieldError {
    field: "course_id",
    code: "ENROLLMENT002",
    message: "Course ID must be an integer",
};

/// Body of POST/PUT /api/student.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct StudentPayload {
    #[schema(example = "John")]
    pub first_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[schema(example = "CE001")]
    pub roll_number: Option<String>,
}

/// Validated student fields. PUT writes all three, so an absent last name clears it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: Option<String>,
    pub roll_number: String,
}

impl StudentPayload {
    /// Roll number is checked before first name.
    pub fn validate(self) -> Result<StudentFields, FieldErrors> {
        let mut check = Checker::default();
        let roll_number = check.require(self.roll_number, ROLL_NUMBER_REQUIRED);
        let first_name = check.require(self.first_name, FIRST_NAME_REQUIRED);
        check.finish(StudentFields {
            first_name,
            last_name: self.last_name,
            roll_number,
        })
    }
}

/// Body of POST/PUT /api/course.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct CoursePayload {
    #[schema(example = "Operating Systems")]
    pub course_name: Option<String>,
    #[schema(example = "CS301")]
    pub course_code: Option<String>,
    pub course_description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseFields {
    pub course_name: String,
    pub course_code: String,
    pub course_description: Option<String>,
}

impl CoursePayload {
    /// Course name is checked before course code.
    pub fn validate(self) -> Result<CourseFields, FieldErrors> {
        let mut check = Checker::default();
        let course_name = check.require(self.course_name, COURSE_NAME_REQUIRED);
        let course_code = check.require(self.course_code, COURSE_CODE_REQUIRED);
        check.finish(CourseFields {
            course_name,
            course_code,
            course_description: self.course_description,
        })
    }
}

/// Body of POST /api/student/{id}/course. `course_id` may be a JSON integer or a
/// string holding one.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct EnrollmentPayload {
    #[schema(value_type = Option<i64>, example = 1)]
    pub course_id: Option<serde_json::Value>,
}

impl EnrollmentPayload {
    pub fn validate(self) -> Result<i64, FieldErrors> {
        use serde_json::Value;

        let id = match self.course_id {
            None | Some(Value::Null) => return Err(FieldErrors(vec![COURSE_ID_REQUIRED])),
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(FieldErrors(vec![COURSE_ID_REQUIRED]))
            }
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            Some(_) => None,
        };
        id.ok_or_else(|| FieldErrors(vec![COURSE_ID_INVALID]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn student_reports_all_missing_fields_in_order() {
        let errors = StudentPayload::default().validate().unwrap_err();
        assert_eq!(errors, FieldErrors(vec![ROLL_NUMBER_REQUIRED, FIRST_NAME_REQUIRED]));
        assert_eq!(errors.first().code, "STUDENT001");
    }

    #[test]
    fn student_empty_first_name_is_missing() {
        let payload = StudentPayload {
            first_name: Some("   ".into()),
            last_name: None,
            roll_number: Some("CE001".into()),
        };
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.first().code, "STUDENT002");
    }

    #[test]
    fn student_valid_keeps_optional_last_name() {
        let fields = StudentPayload {
            first_name: Some("John".into()),
            last_name: None,
            roll_number: Some("CE001".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(fields.first_name, "John");
        assert_eq!(fields.last_name, None);
        assert_eq!(fields.roll_number, "CE001");
    }

    #[test]
    fn course_name_checked_before_code() {
        let errors = CoursePayload::default().validate().unwrap_err();
        assert_eq!(errors.first().code, "COURSE001");

        let errors = CoursePayload {
            course_name: Some("Compilers".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.first().code, "COURSE002");
    }

    #[test]
    fn enrollment_requires_course_id() {
        let errors = EnrollmentPayload::default().validate().unwrap_err();
        assert_eq!(errors.first().code, "ENROLLMENT001");
        let errors = EnrollmentPayload { course_id: Some(json!(null)) }.validate().unwrap_err();
        assert_eq!(errors.first().code, "ENROLLMENT001");
        let errors = EnrollmentPayload { course_id: Some(json!(" ")) }.validate().unwrap_err();
        assert_eq!(errors.first().code, "ENROLLMENT001");
    }

    #[test]
    fn enrollment_course_id_accepts_integer_or_numeric_string() {
        assert_eq!(EnrollmentPayload { course_id: Some(json!(7)) }.validate(), Ok(7));
        assert_eq!(EnrollmentPayload { course_id: Some(json!("7")) }.validate(), Ok(7));
        assert_eq!(EnrollmentPayload { course_id: Some(json!(" 12 ")) }.validate(), Ok(12));
    }

    #[test]
    fn enrollment_course_id_rejects_non_integers() {
        for value in [json!("abc"), json!(1.5), json!(true), json!([1]), json!({"id": 1})] {
            let errors = EnrollmentPayload { course_id: Some(value.clone()) }.validate().unwrap_err();
            assert_eq!(errors.first().code, "ENROLLMENT002", "{value}");
        }
    }
}
