use crate::error::{conflict_on_unique, AppError};
use crate::model::Enrollment;
use chrono::Utc;
use sqlx::SqliteConnection;

pub struct EnrollmentStore;

impl EnrollmentStore {
    /// Insert the (student, course) pair stamped with the current time. Both must already exist.
    pub async fn create(
        conn: &mut SqliteConnection,
        student_id: i64,
        course_id: i64,
    ) -> Result<Enrollment, AppError> {
        const SQL: &str = "INSERT INTO enrollments (student_id, course_id, enrollment_date) VALUES (?, ?, ?)";
        let enrollment = Enrollment {
            student_id,
            course_id,
            enrollment_date: Utc::now(),
        };
        tracing::debug!(sql = SQL, student_id, course_id, "query");
        sqlx::query(SQL)
            .bind(enrollment.student_id)
            .bind(enrollment.course_id)
            .bind(enrollment.enrollment_date)
            .execute(&mut *conn)
            .await
            .map_err(|e| conflict_on_unique(e, "student already enrolled in this course"))?;
        Ok(enrollment)
    }

    pub async fn find_by_student_and_course(
        conn: &mut SqliteConnection,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>, AppError> {
        const SQL: &str = "SELECT student_id, course_id, enrollment_date FROM enrollments \
                           WHERE student_id = ? AND course_id = ?";
        tracing::debug!(sql = SQL, student_id, course_id, "query");
        let row = sqlx::query_as::<_, Enrollment>(SQL)
            .bind(student_id)
            .bind(course_id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    /// All enrollments of one student, oldest first.
    pub async fn list_by_student(conn: &mut SqliteConnection, student_id: i64) -> Result<Vec<Enrollment>, AppError> {
        const SQL: &str = "SELECT student_id, course_id, enrollment_date FROM enrollments \
                           WHERE student_id = ? ORDER BY rowid";
        tracing::debug!(sql = SQL, student_id, "query");
        let rows = sqlx::query_as::<_, Enrollment>(SQL)
            .bind(student_id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    pub async fn delete(conn: &mut SqliteConnection, student_id: i64, course_id: i64) -> Result<bool, AppError> {
        const SQL: &str = "DELETE FROM enrollments WHERE student_id = ? AND course_id = ?";
        tracing::debug!(sql = SQL, student_id, course_id, "query");
        let result = sqlx::query(SQL)
            .bind(student_id)
            .bind(course_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::*;
    use crate::store::{CourseStore, StudentStore};

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let (_pool, mut uow) = unit_of_work().await;
        let s = StudentStore::create(uow.conn(), &student("CE001")).await.unwrap();
        let first = CourseStore::create(uow.conn(), &course("CS201")).await.unwrap();
        let second = CourseStore::create(uow.conn(), &course("CS101")).await.unwrap();
        EnrollmentStore::create(uow.conn(), s.student_id, second.course_id).await.unwrap();
        EnrollmentStore::create(uow.conn(), s.student_id, first.course_id).await.unwrap();

        let listed: Vec<i64> = EnrollmentStore::list_by_student(uow.conn(), s.student_id)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.course_id)
            .collect();
        assert_eq!(listed, vec![second.course_id, first.course_id]);
    }

    #[tokio::test]
    async fn find_returns_stored_date() {
        let (_pool, mut uow) = unit_of_work().await;
        let s = StudentStore::create(uow.conn(), &student("CE001")).await.unwrap();
        let c = CourseStore::create(uow.conn(), &course("CS101")).await.unwrap();
        let created = EnrollmentStore::create(uow.conn(), s.student_id, c.course_id).await.unwrap();

        let found = EnrollmentStore::find_by_student_and_course(uow.conn(), s.student_id, c.course_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.enrollment_date.timestamp(), created.enrollment_date.timestamp());
    }

    #[tokio::test]
    async fn delete_missing_is_false() {
        let (_pool, mut uow) = unit_of_work().await;
        assert!(!EnrollmentStore::delete(uow.conn(), 1, 1).await.unwrap());
    }
}
