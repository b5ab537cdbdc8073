use crate::error::DbError;
use chrono::NaiveDate;
use core_types::GradeTriple;
use reports::{Cell, Tabular};
use rust_decimal::Decimal;
use sqlx::FromRow;
use sqlx::postgres::PgPool;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic:
/// the full-table dumps, the emptiness probe, and the six report queries.
///
/// Every query is read-only and orders its output deterministically, so two
/// runs over the same data print identical reports.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// A full row of the `students` table.
#[derive(Debug, Clone, FromRow)]
pub struct StudentRow {
    pub student_id: i32,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: Option<String>,
    pub address: Option<String>,
    pub phone: String,
    pub course: i16,
    pub faculty: String,
    pub group_name: String,
    pub is_headman: bool,
}

impl Tabular for StudentRow {
    fn headers() -> &'static [&'static str] {
        &[
            "student_id",
            "last_name",
            "first_name",
            "patronymic",
            "address",
            "phone",
            "course",
            "faculty",
            "group_name",
            "is_headman",
        ]
    }

    fn to_row(&self) -> Vec<Cell> {
        vec![
            self.student_id.into(),
            self.last_name.clone().into(),
            self.first_name.clone().into(),
            self.patronymic.clone().into(),
            self.address.clone().into(),
            self.phone.clone().into(),
            self.course.into(),
            self.faculty.clone().into(),
            self.group_name.clone().into(),
            self.is_headman.into(),
        ]
    }
}

/// A full row of the `subjects` table.
#[derive(Debug, Clone, FromRow)]
pub struct SubjectRow {
    pub subject_id: i32,
    pub name: String,
    pub hours_per_semester: i16,
    pub semesters_count: i16,
}

impl Tabular for SubjectRow {
    fn headers() -> &'static [&'static str] {
        &["subject_id", "name", "hours_per_semester", "semesters_count"]
    }

    fn to_row(&self) -> Vec<Cell> {
        vec![
            self.subject_id.into(),
            self.name.clone().into(),
            self.hours_per_semester.into(),
            self.semesters_count.into(),
        ]
    }
}

/// A full row of the `exams` table.
#[derive(Debug, Clone, FromRow)]
pub struct ExamRow {
    pub exam_id: i32,
    pub exam_date: NaiveDate,
    pub student_id: i32,
    pub subject_id: i32,
    pub grade: i16,
}

impl Tabular for ExamRow {
    fn headers() -> &'static [&'static str] {
        &["exam_id", "exam_date", "student_id", "subject_id", "grade"]
    }

    fn to_row(&self) -> Vec<Cell> {
        vec![
            self.exam_id.into(),
            self.exam_date.into(),
            self.student_id.into(),
            self.subject_id.into(),
            self.grade.into(),
        ]
    }
}

/// A group headman, with enough context to find them.
#[derive(Debug, Clone, FromRow)]
pub struct HeadmanRow {
    pub student_id: i32,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: Option<String>,
    pub faculty: String,
    pub group_name: String,
}

impl Tabular for HeadmanRow {
    fn headers() -> &'static [&'static str] {
        &["student_id", "last_name", "first_name", "patronymic", "faculty", "group_name"]
    }

    fn to_row(&self) -> Vec<Cell> {
        vec![
            self.student_id.into(),
            self.last_name.clone().into(),
            self.first_name.clone().into(),
            self.patronymic.clone().into(),
            self.faculty.clone().into(),
            self.group_name.clone().into(),
        ]
    }
}

/// A student's grade average across every exam they sat, rounded to two
/// decimals in SQL.
#[derive(Debug, Clone, FromRow)]
pub struct AvgGradeRow {
    pub student_id: i32,
    pub last_name: String,
    pub first_name: String,
    pub avg_grade: Decimal,
}

impl Tabular for AvgGradeRow {
    fn headers() -> &'static [&'static str] {
        &["student_id", "last_name", "first_name", "avg_grade"]
    }

    fn to_row(&self) -> Vec<Cell> {
        vec![
            self.student_id.into(),
            self.last_name.clone().into(),
            self.first_name.clone().into(),
            self.avg_grade.into(),
        ]
    }
}

/// A subject with its derived total teaching load.
#[derive(Debug, Clone, FromRow)]
pub struct SubjectHoursRow {
    pub subject_id: i32,
    pub name: String,
    pub hours_per_semester: i16,
    pub semesters_count: i16,
    pub total_hours: i32,
}

impl Tabular for SubjectHoursRow {
    fn headers() -> &'static [&'static str] {
        &["subject_id", "name", "hours_per_semester", "semesters_count", "total_hours"]
    }

    fn to_row(&self) -> Vec<Cell> {
        vec![
            self.subject_id.into(),
            self.name.clone().into(),
            self.hours_per_semester.into(),
            self.semesters_count.into(),
            self.total_hours.into(),
        ]
    }
}

/// One student's result in a specific subject.
#[derive(Debug, Clone, FromRow)]
pub struct PerformanceRow {
    pub last_name: String,
    pub first_name: String,
    pub subject: String,
    pub grade: i16,
}

impl Tabular for PerformanceRow {
    fn headers() -> &'static [&'static str] {
        &["last_name", "first_name", "subject", "grade"]
    }

    fn to_row(&self) -> Vec<Cell> {
        vec![
            self.last_name.clone().into(),
            self.first_name.clone().into(),
            self.subject.clone().into(),
            self.grade.into(),
        ]
    }
}

/// Head count of one faculty.
#[derive(Debug, Clone, FromRow)]
pub struct FacultyCountRow {
    pub faculty: String,
    pub students_count: i64,
}

impl Tabular for FacultyCountRow {
    fn headers() -> &'static [&'static str] {
        &["faculty", "students_count"]
    }

    fn to_row(&self) -> Vec<Cell> {
        vec![self.faculty.clone().into(), self.students_count.into()]
    }
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The emptiness probe the seeder's caller and the tests rely on.
    pub async fn count_students(&self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Every student, ordered by primary key. Feeds the contents dump.
    pub async fn students(&self) -> Result<Vec<StudentRow>, DbError> {
        let rows = sqlx::query_as::<_, StudentRow>(
            "SELECT student_id, last_name, first_name, patronymic, address, phone, \
                    course, faculty, group_name, is_headman \
             FROM students ORDER BY student_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every subject, ordered by primary key. Feeds the contents dump.
    pub async fn subjects(&self) -> Result<Vec<SubjectRow>, DbError> {
        let rows = sqlx::query_as::<_, SubjectRow>(
            "SELECT subject_id, name, hours_per_semester, semesters_count \
             FROM subjects ORDER BY subject_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every exam record, ordered by primary key. Feeds the contents dump.
    pub async fn exams(&self) -> Result<Vec<ExamRow>, DbError> {
        let rows = sqlx::query_as::<_, ExamRow>(
            "SELECT exam_id, exam_date, student_id, subject_id, grade \
             FROM exams ORDER BY exam_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Report 1: every group headman, alphabetically.
    pub async fn headmen(&self) -> Result<Vec<HeadmanRow>, DbError> {
        let rows = sqlx::query_as::<_, HeadmanRow>(
            r#"
            SELECT student_id, last_name, first_name, patronymic,
                   faculty, group_name
            FROM students
            WHERE is_headman = TRUE
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Report 2: the average grade of each examined student, best first.
    ///
    /// Rounding happens in SQL: `ROUND(numeric, 2)` rounds half away from
    /// zero, so [5, 4, 5] reports as 4.67. The student id breaks ties for a
    /// deterministic order.
    pub async fn average_grades(&self) -> Result<Vec<AvgGradeRow>, DbError> {
        let rows = sqlx::query_as::<_, AvgGradeRow>(
            r#"
            SELECT s.student_id,
                   s.last_name,
                   s.first_name,
                   ROUND(AVG(e.grade), 2) AS avg_grade
            FROM students s
            JOIN exams e ON e.student_id = s.student_id
            GROUP BY s.student_id, s.last_name, s.first_name
            ORDER BY avg_grade DESC, s.student_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Report 3: the total teaching load per subject. `total_hours` is
    /// derived at query time, never stored.
    pub async fn subject_hours(&self) -> Result<Vec<SubjectHoursRow>, DbError> {
        let rows = sqlx::query_as::<_, SubjectHoursRow>(
            r#"
            SELECT subject_id,
                   name,
                   hours_per_semester,
                   semesters_count,
                   (hours_per_semester * semesters_count)::int AS total_hours
            FROM subjects
            ORDER BY subject_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Report 4: every recorded result in the named subject, alphabetically
    /// by student. An unknown subject name yields an empty row set, not an
    /// error.
    pub async fn subject_performance(&self, subject_name: &str) -> Result<Vec<PerformanceRow>, DbError> {
        let rows = sqlx::query_as::<_, PerformanceRow>(
            r#"
            SELECT s.last_name,
                   s.first_name,
                   sub.name AS subject,
                   e.grade
            FROM exams e
            JOIN students s ON e.student_id = s.student_id
            JOIN subjects sub ON e.subject_id = sub.subject_id
            WHERE sub.name = $1
            ORDER BY s.last_name, s.first_name
            "#,
        )
        .bind(subject_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Report 5: how many students each faculty has.
    pub async fn students_per_faculty(&self) -> Result<Vec<FacultyCountRow>, DbError> {
        let rows = sqlx::query_as::<_, FacultyCountRow>(
            r#"
            SELECT faculty,
                   COUNT(*) AS students_count
            FROM students
            GROUP BY faculty
            ORDER BY faculty
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Report 6 feed: the long-format grade rows the cross-tab builder
    /// reshapes. Inner join — students with zero exams do not occur.
    pub async fn grade_triples(&self) -> Result<Vec<GradeTriple>, DbError> {
        let rows = sqlx::query_as::<_, GradeTriple>(
            r#"
            SELECT s.student_id,
                   s.last_name || ' ' || s.first_name AS student_name,
                   sub.name AS subject,
                   e.grade
            FROM students s
            JOIN exams e ON e.student_id = s.student_id
            JOIN subjects sub ON e.subject_id = sub.subject_id
            ORDER BY s.student_id, sub.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
