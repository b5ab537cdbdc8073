use crate::error::DbError;
use reports::{Cell, Tabular};
use sqlx::{FromRow, PgPool};

/// One column of a table, as described by `information_schema`. Feeds the
/// "table structure" dumps printed before the reports.
#[derive(Debug, Clone, FromRow)]
pub struct ColumnInfo {
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: String,
    pub column_default: Option<String>,
}

impl Tabular for ColumnInfo {
    fn headers() -> &'static [&'static str] {
        &["column_name", "data_type", "is_nullable", "column_default"]
    }

    fn to_row(&self) -> Vec<Cell> {
        vec![
            self.column_name.clone().into(),
            self.data_type.clone().into(),
            self.is_nullable.clone().into(),
            self.column_default.clone().into(),
        ]
    }
}

/// Creates the three tables with their integrity constraints if absent.
/// Safe to call on every run.
///
/// The CHECK constraints duplicate the validation the domain types in
/// `core-types` already perform, so a bad value is rejected twice: once in
/// application code and once here.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            student_id   SERIAL PRIMARY KEY,
            last_name    VARCHAR(50) NOT NULL,
            first_name   VARCHAR(50) NOT NULL,
            patronymic   VARCHAR(50),
            address      TEXT,
            phone        VARCHAR(20) NOT NULL,
            course       SMALLINT NOT NULL CHECK (course BETWEEN 1 AND 4),
            faculty      VARCHAR(50) NOT NULL CHECK (
                            faculty IN ('Agrarian Management',
                                        'Economics',
                                        'Information Technology')
                         ),
            group_name   VARCHAR(20) NOT NULL,
            is_headman   BOOLEAN NOT NULL DEFAULT FALSE,
            CONSTRAINT ck_phone_ua CHECK (phone ~ '^\+380\d{9}$')
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subjects (
            subject_id         SERIAL PRIMARY KEY,
            name               VARCHAR(100) NOT NULL,
            hours_per_semester SMALLINT NOT NULL CHECK (hours_per_semester > 0),
            semesters_count    SMALLINT NOT NULL CHECK (semesters_count > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS exams (
            exam_id    SERIAL PRIMARY KEY,
            exam_date  DATE NOT NULL,
            student_id INT NOT NULL REFERENCES students(student_id) ON DELETE CASCADE,
            subject_id INT NOT NULL REFERENCES subjects(subject_id) ON DELETE CASCADE,
            grade      SMALLINT NOT NULL CHECK (grade BETWEEN 2 AND 5),
            CONSTRAINT exams_unique UNIQUE (exam_date, student_id, subject_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetches the column layout of one table, in declaration order. The casts
/// turn information_schema's domain types into plain text for decoding.
pub async fn table_structure(pool: &PgPool, table: &str) -> Result<Vec<ColumnInfo>, DbError> {
    let columns = sqlx::query_as::<_, ColumnInfo>(
        r#"
        SELECT column_name::text,
               data_type::text,
               is_nullable::text,
               column_default::text
        FROM information_schema.columns
        WHERE table_name = $1
        ORDER BY ordinal_position
        "#,
    )
    .bind(table)
    .fetch_all(pool)
    .await?;

    Ok(columns)
}
