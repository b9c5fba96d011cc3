//! SQLite persistence: pool setup, table DDL, and the per-request unit of work.

mod course;
mod enrollment;
mod student;

pub use course::CourseStore;
pub use enrollment::EnrollmentStore;
pub use student::StudentStore;

use crate::config::Settings;
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::str::FromStr;
use std::time::Duration;

const DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS students (
        student_id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT,
        roll_number TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS courses (
        course_id INTEGER PRIMARY KEY AUTOINCREMENT,
        course_name TEXT NOT NULL,
        course_code TEXT NOT NULL UNIQUE,
        course_description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS enrollments (
        student_id INTEGER NOT NULL REFERENCES students (student_id),
        course_id INTEGER NOT NULL REFERENCES courses (course_id),
        enrollment_date TEXT NOT NULL,
        PRIMARY KEY (student_id, course_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS enrollments_course_id ON enrollments (course_id)",
];

/// Open a pool for `settings.database_url`, creating the database file if it does not exist.
/// Writers queue on the database lock for up to `settings.busy_timeout_ms`.
pub async fn connect(settings: &Settings) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(settings.busy_timeout_ms));
    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Single-connection in-memory database with tables created. Each call gets a fresh database.
pub async fn open_in_memory() -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    // The database lives only as long as its one connection, so that connection is never recycled.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    ensure_tables(&pool).await?;
    Ok(pool)
}

/// Create `students`, `courses`, and `enrollments` if they do not exist.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    for ddl in DDL {
        sqlx::query(*ddl).execute(pool).await?;
    }
    tracing::debug!("tables ensured");
    Ok(())
}

/// One request's transaction. Commit consumes it; dropping it uncommitted rolls back.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    /// Deferred transaction, for requests that only read.
    pub async fn begin(pool: &SqlitePool) -> Result<Self, AppError> {
        Ok(Self { tx: pool.begin().await? })
    }

    /// Takes the write lock up front. A deferred transaction that reads and then writes
    /// fails with SQLITE_BUSY instead of waiting when another writer holds the lock.
    pub async fn begin_write(pool: &SqlitePool) -> Result<Self, AppError> {
        Ok(Self {
            tx: pool.begin_with("BEGIN IMMEDIATE").await?,
        })
    }

    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut *self.tx
    }

    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), AppError> {
        self.tx.rollback().await?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn rollback_discards_writes() {
        let (pool, mut uow) = unit_of_work().await;
        StudentStore::create(uow.conn(), &student("CE001")).await.unwrap();
        uow.rollback().await.unwrap();

        let mut uow = UnitOfWork::begin(&pool).await.unwrap();
        assert!(StudentStore::find_by_roll_number(uow.conn(), "CE001").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn commit_persists_writes() {
        let (pool, mut uow) = unit_of_work().await;
        let created = StudentStore::create(uow.conn(), &student("CE001")).await.unwrap();
        uow.commit().await.unwrap();

        let mut uow = UnitOfWork::begin(&pool).await.unwrap();
        let fetched = StudentStore::get_by_id(uow.conn(), created.student_id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn write_unit_of_work_commits() {
        let pool = open_in_memory().await.unwrap();
        let mut uow = UnitOfWork::begin_write(&pool).await.unwrap();
        let created = StudentStore::create(uow.conn(), &student("CE001")).await.unwrap();
        uow.commit().await.unwrap();

        let mut uow = UnitOfWork::begin(&pool).await.unwrap();
        assert_eq!(StudentStore::find_by_roll_number(uow.conn(), "CE001").await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn ensure_tables_is_idempotent() {
        let pool = open_in_memory().await.unwrap();
        ensure_tables(&pool).await.unwrap();
    }
}
