use crate::error::{conflict_on_unique, AppError};
use crate::model::{Student, StudentFields};
use sqlx::SqliteConnection;

const DUPLICATE_ROLL_NUMBER: &str = "a student with this roll number already exists";

pub struct StudentStore;

impl StudentStore {
    pub async fn create(conn: &mut SqliteConnection, fields: &StudentFields) -> Result<Student, AppError> {
        const SQL: &str = "INSERT INTO students (first_name, last_name, roll_number) VALUES (?, ?, ?)";
        tracing::debug!(sql = SQL, roll_number = %fields.roll_number, "query");
        let result = sqlx::query(SQL)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.roll_number)
            .execute(&mut *conn)
            .await
            .map_err(|e| conflict_on_unique(e, DUPLICATE_ROLL_NUMBER))?;
        Ok(Student {
            student_id: result.last_insert_rowid(),
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            roll_number: fields.roll_number.clone(),
        })
    }

    pub async fn get_by_id(conn: &mut SqliteConnection, student_id: i64) -> Result<Option<Student>, AppError> {
        const SQL: &str = "SELECT student_id, first_name, last_name, roll_number FROM students WHERE student_id = ?";
        tracing::debug!(sql = SQL, student_id, "query");
        let row = sqlx::query_as::<_, Student>(SQL)
            .bind(student_id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    pub async fn find_by_roll_number(
        conn: &mut SqliteConnection,
        roll_number: &str,
    ) -> Result<Option<Student>, AppError> {
        const SQL: &str = "SELECT student_id, first_name, last_name, roll_number FROM students WHERE roll_number = ?";
        tracing::debug!(sql = SQL, roll_number, "query");
        let row = sqlx::query_as::<_, Student>(SQL)
            .bind(roll_number)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    /// Overwrite all mutable fields. Returns None when no such student exists.
    pub async fn update(
        conn: &mut SqliteConnection,
        student_id: i64,
        fields: &StudentFields,
    ) -> Result<Option<Student>, AppError> {
        const SQL: &str = "UPDATE students SET first_name = ?, last_name = ?, roll_number = ? WHERE student_id = ?";
        tracing::debug!(sql = SQL, student_id, "query");
        let result = sqlx::query(SQL)
            .bind(&fields.first_name)
            .bind(&fields.last_name)
            .bind(&fields.roll_number)
            .bind(student_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| conflict_on_unique(e, DUPLICATE_ROLL_NUMBER))?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Student {
            student_id,
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            roll_number: fields.roll_number.clone(),
        }))
    }

    /// Delete the student and its enrollments. Returns false when the student did not exist.
    pub async fn delete(conn: &mut SqliteConnection, student_id: i64) -> Result<bool, AppError> {
        const CASCADE: &str = "DELETE FROM enrollments WHERE student_id = ?";
        const SQL: &str = "DELETE FROM students WHERE student_id = ?";
        tracing::debug!(sql = CASCADE, student_id, "query");
        let cascaded = sqlx::query(CASCADE).bind(student_id).execute(&mut *conn).await?;
        tracing::debug!(sql = SQL, student_id, "query");
        let result = sqlx::query(SQL).bind(student_id).execute(&mut *conn).await?;
        if cascaded.rows_affected() > 0 {
            tracing::info!(student_id, enrollments = cascaded.rows_affected(), "removed enrollments of deleted student");
        }
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::*;
    use crate::store::{CourseStore, EnrollmentStore};

    #[tokio::test]
    async fn create_then_get() {
        let (_pool, mut uow) = unit_of_work().await;
        let created = StudentStore::create(uow.conn(), &student("CE001")).await.unwrap();
        assert_eq!(created.student_id, 1);

        let fetched = StudentStore::get_by_id(uow.conn(), created.student_id).await.unwrap();
        assert_eq!(fetched, Some(created.clone()));

        let by_roll = StudentStore::find_by_roll_number(uow.conn(), "CE001").await.unwrap();
        assert_eq!(by_roll, Some(created));
    }

    #[tokio::test]
    async fn duplicate_roll_number_is_conflict() {
        let (_pool, mut uow) = unit_of_work().await;
        StudentStore::create(uow.conn(), &student("CE001")).await.unwrap();
        let err = StudentStore::create(uow.conn(), &student("CE001")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn update_overwrites_every_field() {
        let (_pool, mut uow) = unit_of_work().await;
        let mut fields = student("CE001");
        fields.last_name = Some("Doe".into());
        let created = StudentStore::create(uow.conn(), &fields).await.unwrap();

        let replacement = StudentFields {
            first_name: "Jane".into(),
            last_name: None,
            roll_number: "CE002".into(),
        };
        let updated = StudentStore::update(uow.conn(), created.student_id, &replacement)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.last_name, None);

        let fetched = StudentStore::get_by_id(uow.conn(), created.student_id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn update_missing_returns_none() {
        let (_pool, mut uow) = unit_of_work().await;
        let updated = StudentStore::update(uow.conn(), 42, &student("CE001")).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn delete_reports_absence_and_cascades() {
        let (_pool, mut uow) = unit_of_work().await;
        assert!(!StudentStore::delete(uow.conn(), 1).await.unwrap());

        let s = StudentStore::create(uow.conn(), &student("CE001")).await.unwrap();
        let c = CourseStore::create(uow.conn(), &course("CS101")).await.unwrap();
        EnrollmentStore::create(uow.conn(), s.student_id, c.course_id).await.unwrap();

        assert!(StudentStore::delete(uow.conn(), s.student_id).await.unwrap());
        let left = EnrollmentStore::find_by_student_and_course(uow.conn(), s.student_id, c.course_id)
            .await
            .unwrap();
        assert!(left.is_none());
        assert!(CourseStore::get_by_id(uow.conn(), c.course_id).await.unwrap().is_some());
    }
}
