use crate::error::DbError;
use chrono::NaiveDate;
use core_types::{CoreError, Faculty, NewExam, NewStudent, NewSubject};
use sqlx::{PgPool, Postgres, Transaction};

/// Application-wide advisory lock key guarding the seed transaction.
const SEED_LOCK_KEY: i64 = 0x7265_6769_7374;

/// Populates an empty store with the fixed sample data set: 3 subjects,
/// 11 students, 23 exam records.
///
/// The emptiness check and the bulk insert run inside one transaction under
/// a Postgres advisory lock, so two concurrent seed attempts cannot
/// interleave. If the store already holds students this is a no-op. Any
/// constraint violation rolls the whole transaction back; partial seeding
/// is impossible.
pub async fn seed_if_empty(pool: &PgPool) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    // Released automatically when the transaction commits or rolls back.
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SEED_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    let students_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(&mut *tx)
        .await?;

    if students_count > 0 {
        tracing::debug!(students_count, "Store already populated, skipping seed.");
        return Ok(());
    }

    tracing::info!("Empty store detected, inserting the sample data set...");

    let subject_ids = insert_subjects(&mut tx, &sample_subjects()?).await?;
    let student_ids = insert_students(&mut tx, &sample_students()?).await?;
    let exams = sample_exams(&student_ids, &subject_ids)?;
    insert_exams(&mut tx, &exams).await?;

    tx.commit().await?;
    tracing::info!("Seed complete: 3 subjects, 11 students, 23 exam records.");
    Ok(())
}

async fn insert_subjects(
    tx: &mut Transaction<'_, Postgres>,
    subjects: &[NewSubject],
) -> Result<Vec<i32>, DbError> {
    let mut ids = Vec::with_capacity(subjects.len());
    for subject in subjects {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO subjects (name, hours_per_semester, semesters_count) \
             VALUES ($1, $2, $3) RETURNING subject_id",
        )
        .bind(&subject.name)
        .bind(subject.hours_per_semester)
        .bind(subject.semesters_count)
        .fetch_one(&mut **tx)
        .await?;
        ids.push(id);
    }
    Ok(ids)
}

async fn insert_students(
    tx: &mut Transaction<'_, Postgres>,
    students: &[NewStudent],
) -> Result<Vec<i32>, DbError> {
    let mut ids = Vec::with_capacity(students.len());
    for student in students {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO students
            (last_name, first_name, patronymic, address, phone,
             course, faculty, group_name, is_headman)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING student_id
            "#,
        )
        .bind(&student.last_name)
        .bind(&student.first_name)
        .bind(&student.patronymic)
        .bind(&student.address)
        .bind(student.phone.as_str())
        .bind(student.course.get())
        .bind(student.faculty.as_str())
        .bind(&student.group_name)
        .bind(student.is_headman)
        .fetch_one(&mut **tx)
        .await?;
        ids.push(id);
    }
    Ok(ids)
}

async fn insert_exams(
    tx: &mut Transaction<'_, Postgres>,
    exams: &[NewExam],
) -> Result<(), DbError> {
    for exam in exams {
        sqlx::query(
            "INSERT INTO exams (exam_date, student_id, subject_id, grade) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(exam.exam_date)
        .bind(exam.student_id)
        .bind(exam.subject_id)
        .bind(exam.grade.as_i16())
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

fn sample_subjects() -> Result<Vec<NewSubject>, CoreError> {
    Ok(vec![
        NewSubject::new("Programming", 64, 2)?,
        NewSubject::new("Databases", 48, 2)?,
        NewSubject::new("Enterprise Economics", 54, 1)?,
    ])
}

fn sample_students() -> Result<Vec<NewStudent>, CoreError> {
    use Faculty::{AgrarianManagement, Economics, InformationTechnology};

    Ok(vec![
        NewStudent::new(
            "Artiukhov", "Myroslav", Some("Yuriiovych"),
            Some("Kyiv, 1 Prykladna St."), "+380501112233",
            4, InformationTechnology, "IT-41", true,
        )?,
        NewStudent::new(
            "Ivanenko", "Olena", Some("Petrivna"),
            Some("Kyiv, 10 Studentska St."), "+380501112234",
            2, Economics, "EC-21", true,
        )?,
        NewStudent::new(
            "Petrenko", "Ihor", Some("Oleksandrovych"),
            Some("Kyiv, 5 Lisova St."), "+380501112235",
            3, AgrarianManagement, "AM-31", true,
        )?,
        NewStudent::new(
            "Sydorenko", "Yuliia", Some("Andriivna"),
            Some("Kyiv, 3 Myru Ave."), "+380501112236",
            1, InformationTechnology, "IT-11", false,
        )?,
        NewStudent::new(
            "Koval", "Dmytro", Some("Serhiiovych"),
            Some("Kyiv, 7 Naukova St."), "+380501112237",
            2, InformationTechnology, "IT-21", false,
        )?,
        NewStudent::new(
            "Shevchenko", "Maryna", Some("Ihorivna"),
            Some("Kyiv, 9 Tsentralna St."), "+380501112238",
            3, Economics, "EC-31", false,
        )?,
        NewStudent::new(
            "Melnyk", "Andrii", Some("Vasyliovych"),
            Some("Kyiv, 2 Politekhnichna St."), "+380501112239",
            4, Economics, "EC-41", false,
        )?,
        NewStudent::new(
            "Honchar", "Iryna", Some("Ivanivna"),
            Some("Kyiv, 1 Khreshchatyk St."), "+380501112240",
            1, AgrarianManagement, "AM-11", false,
        )?,
        NewStudent::new(
            "Tkachenko", "Serhii", Some("Volodymyrovych"),
            Some("Kyiv, 12 Molodizhna St."), "+380501112241",
            2, AgrarianManagement, "AM-21", false,
        )?,
        NewStudent::new(
            "Romaniuk", "Kateryna", Some("Stepanivna"),
            Some("Kyiv, 8 Luhova St."), "+380501112242",
            3, InformationTechnology, "IT-31", false,
        )?,
        NewStudent::new(
            "Bondar", "Oleksii", Some("Mykolaiovych"),
            Some("Kyiv, 4 Soniachna St."), "+380501112243",
            1, Economics, "EC-11", false,
        )?,
    ])
}

/// The exam fixture, expressed as (June 2025 day, student position, subject
/// position, grade). Positions are 1-based indices into the seed lists and
/// are resolved against the ids the store actually generated.
fn sample_exams(student_ids: &[i32], subject_ids: &[i32]) -> Result<Vec<NewExam>, CoreError> {
    const EXAMS: [(u32, usize, usize, i16); 23] = [
        (10, 1, 1, 5),
        (15, 1, 2, 4),
        (20, 1, 3, 5),
        (11, 2, 1, 4),
        (16, 2, 2, 5),
        (12, 3, 1, 3),
        (17, 3, 2, 4),
        (22, 3, 3, 4),
        (13, 4, 1, 5),
        (18, 4, 2, 5),
        (14, 5, 1, 3),
        (19, 5, 2, 3),
        (15, 6, 2, 4),
        (23, 6, 3, 5),
        (16, 7, 1, 2),
        (24, 7, 3, 3),
        (17, 8, 1, 4),
        (25, 8, 3, 4),
        (18, 9, 2, 5),
        (26, 9, 3, 4),
        (19, 10, 1, 5),
        (27, 10, 2, 4),
        (20, 11, 2, 3),
    ];

    EXAMS
        .iter()
        .map(|&(day, student, subject, grade)| {
            NewExam::new(june(day), student_ids[student - 1], subject_ids[subject - 1], grade)
        })
        .collect()
}

fn june(day: u32) -> NaiveDate {
    // All fixture days are valid June 2025 dates.
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_sizes_match_the_sample_catalog() {
        assert_eq!(sample_subjects().unwrap().len(), 3);
        assert_eq!(sample_students().unwrap().len(), 11);

        let student_ids: Vec<i32> = (1..=11).collect();
        let subject_ids: Vec<i32> = (1..=3).collect();
        assert_eq!(sample_exams(&student_ids, &subject_ids).unwrap().len(), 23);
    }

    #[test]
    fn fixture_passes_domain_validation() {
        // The constructors reject bad phones, courses, and grades; a panic
        // here means the fixture itself violates a constraint.
        sample_subjects().unwrap();
        sample_students().unwrap();
    }

    #[test]
    fn fixture_faculty_distribution() {
        let students = sample_students().unwrap();
        let count = |f: Faculty| students.iter().filter(|s| s.faculty == f).count();

        assert_eq!(count(Faculty::InformationTechnology), 4);
        assert_eq!(count(Faculty::Economics), 4);
        assert_eq!(count(Faculty::AgrarianManagement), 3);
        assert_eq!(students.iter().filter(|s| s.is_headman).count(), 3);
    }

    #[test]
    fn fixture_exams_have_no_duplicate_triples() {
        let student_ids: Vec<i32> = (1..=11).collect();
        let subject_ids: Vec<i32> = (1..=3).collect();
        let exams = sample_exams(&student_ids, &subject_ids).unwrap();

        let mut triples: Vec<_> = exams
            .iter()
            .map(|e| (e.exam_date, e.student_id, e.subject_id))
            .collect();
        triples.sort();
        triples.dedup();
        assert_eq!(triples.len(), exams.len());
    }
}
