use crate::error::{conflict_on_unique, AppError};
use crate::model::{Course, CourseFields};
use sqlx::SqliteConnection;

const DUPLICATE_COURSE_CODE: &str = "a course with this course code already exists";

pub struct CourseStore;

impl CourseStore {
    pub async fn create(conn: &mut SqliteConnection, fields: &CourseFields) -> Result<Course, AppError> {
        const SQL: &str = "INSERT INTO courses (course_name, course_code, course_description) VALUES (?, ?, ?)";
        tracing::debug!(sql = SQL, course_code = %fields.course_code, "query");
        let result = sqlx::query(SQL)
            .bind(&fields.course_name)
            .bind(&fields.course_code)
            .bind(&fields.course_description)
            .execute(&mut *conn)
            .await
            .map_err(|e| conflict_on_unique(e, DUPLICATE_COURSE_CODE))?;
        Ok(Course {
            course_id: result.last_insert_rowid(),
            course_name: fields.course_name.clone(),
            course_code: fields.course_code.clone(),
            course_description: fields.course_description.clone(),
        })
    }

    pub async fn get_by_id(conn: &mut SqliteConnection, course_id: i64) -> Result<Option<Course>, AppError> {
        const SQL: &str =
            "SELECT course_id, course_name, course_code, course_description FROM courses WHERE course_id = ?";
        tracing::debug!(sql = SQL, course_id, "query");
        let row = sqlx::query_as::<_, Course>(SQL)
            .bind(course_id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    pub async fn find_by_code(conn: &mut SqliteConnection, course_code: &str) -> Result<Option<Course>, AppError> {
        const SQL: &str =
            "SELECT course_id, course_name, course_code, course_description FROM courses WHERE course_code = ?";
        tracing::debug!(sql = SQL, course_code, "query");
        let row = sqlx::query_as::<_, Course>(SQL)
            .bind(course_code)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    pub async fn update(
        conn: &mut SqliteConnection,
        course_id: i64,
        fields: &CourseFields,
    ) -> Result<Option<Course>, AppError> {
        const SQL: &str =
            "UPDATE courses SET course_name = ?, course_code = ?, course_description = ? WHERE course_id = ?";
        tracing::debug!(sql = SQL, course_id, "query");
        let result = sqlx::query(SQL)
            .bind(&fields.course_name)
            .bind(&fields.course_code)
            .bind(&fields.course_description)
            .bind(course_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| conflict_on_unique(e, DUPLICATE_COURSE_CODE))?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Course {
            course_id,
            course_name: fields.course_name.clone(),
            course_code: fields.course_code.clone(),
            course_description: fields.course_description.clone(),
        }))
    }

    /// Delete the course and every enrollment in it. Returns false when the course did not exist.
    pub async fn delete(conn: &mut SqliteConnection, course_id: i64) -> Result<bool, AppError> {
        const CASCADE: &str = "DELETE FROM enrollments WHERE course_id = ?";
        const SQL: &str = "DELETE FROM courses WHERE course_id = ?";
        tracing::debug!(sql = CASCADE, course_id, "query");
        let cascaded = sqlx::query(CASCADE).bind(course_id).execute(&mut *conn).await?;
        tracing::debug!(sql = SQL, course_id, "query");
        let result = sqlx::query(SQL).bind(course_id).execute(&mut *conn).await?;
        if cascaded.rows_affected() > 0 {
            tracing::info!(course_id, enrollments = cascaded.rows_affected(), "removed enrollments of deleted course");
        }
        Ok(result.rows_affected() > 0)
    }
}
