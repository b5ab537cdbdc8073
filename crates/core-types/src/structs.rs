use crate::enums::{Faculty, Grade};
use crate::error::CoreError;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // Mirrors the ck_phone_ua CHECK constraint on the students table.
    static ref PHONE_RE: Regex = Regex::new(r"^\+380\d{9}$").unwrap();
}

/// A Ukrainian mobile number in the `+380XXXXXXXXX` format.
///
/// Construction is the only way to obtain a `Phone`, so a malformed number
/// is rejected before it ever reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        if PHONE_RE.is_match(&raw) {
            Ok(Phone(raw))
        } else {
            Err(CoreError::InvalidPhone(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A course year, constrained to 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course(i16);

impl Course {
    pub fn new(value: i16) -> Result<Self, CoreError> {
        if (1..=4).contains(&value) {
            Ok(Course(value))
        } else {
            Err(CoreError::CourseOutOfRange(value))
        }
    }

    pub fn get(self) -> i16 {
        self.0
    }
}

/// A student record as submitted for insertion. Identity is assigned by the
/// store; every constrained field is carried by a validated domain type, so
/// an instance of this struct is insertable by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub last_name: String,
    pub first_name: String,
    pub patronymic: Option<String>,
    pub address: Option<String>,
    pub phone: Phone,
    pub course: Course,
    pub faculty: Faculty,
    pub group_name: String,
    pub is_headman: bool,
}

impl NewStudent {
    /// Validating constructor over raw values. Any violation (phone format,
    /// course range) surfaces here instead of as a store error later.
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        patronymic: Option<&str>,
        address: Option<&str>,
        phone: &str,
        course: i16,
        faculty: Faculty,
        group_name: impl Into<String>,
        is_headman: bool,
    ) -> Result<Self, CoreError> {
        Ok(NewStudent {
            last_name: last_name.into(),
            first_name: first_name.into(),
            patronymic: patronymic.map(str::to_owned),
            address: address.map(str::to_owned),
            phone: Phone::new(phone)?,
            course: Course::new(course)?,
            faculty,
            group_name: group_name.into(),
            is_headman,
        })
    }
}

/// A subject record as submitted for insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubject {
    pub name: String,
    pub hours_per_semester: i16,
    pub semesters_count: i16,
}

impl NewSubject {
    pub fn new(
        name: impl Into<String>,
        hours_per_semester: i16,
        semesters_count: i16,
    ) -> Result<Self, CoreError> {
        if hours_per_semester <= 0 {
            return Err(CoreError::NonPositive("hours_per_semester", hours_per_semester));
        }
        if semesters_count <= 0 {
            return Err(CoreError::NonPositive("semesters_count", semesters_count));
        }
        Ok(NewSubject {
            name: name.into(),
            hours_per_semester,
            semesters_count,
        })
    }
}

/// An exam result as submitted for insertion. The referenced student and
/// subject ids must exist; the (date, student, subject) triple must be
/// unique — both enforced by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExam {
    pub exam_date: NaiveDate,
    pub student_id: i32,
    pub subject_id: i32,
    pub grade: Grade,
}

impl NewExam {
    pub fn new(
        exam_date: NaiveDate,
        student_id: i32,
        subject_id: i32,
        grade: i16,
    ) -> Result<Self, CoreError> {
        Ok(NewExam {
            exam_date,
            student_id,
            subject_id,
            grade: Grade::try_from(grade)?,
        })
    }
}

/// One row of the long-format grade feed: a single recorded grade for one
/// (student, subject) pair. This is the input shape of the cross-tab report.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
pub struct GradeTriple {
    pub student_id: i32,
    pub student_name: String,
    pub subject: String,
    pub grade: i16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_phone_is_accepted() {
        let phone = Phone::new("+380501112233").unwrap();
        assert_eq!(phone.as_str(), "+380501112233");
    }

    #[test]
    fn malformed_phones_are_rejected() {
        for raw in [
            "+38050111223",    // 8 digits
            "+3805011122334",  // 10 digits
            "380501112233",    // missing plus
            "+381501112233",   // wrong country code
            "+380 50 111 2233",
            "",
        ] {
            assert!(Phone::new(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn course_range_is_enforced() {
        for value in 1..=4 {
            assert!(Course::new(value).is_ok());
        }
        assert!(Course::new(0).is_err());
        assert!(Course::new(5).is_err());
    }

    #[test]
    fn new_student_rejects_bad_phone() {
        let result = NewStudent::new(
            "Koval",
            "Dmytro",
            Some("Serhiiovych"),
            None,
            "not-a-phone",
            2,
            Faculty::InformationTechnology,
            "IT-21",
            false,
        );
        assert!(matches!(result, Err(CoreError::InvalidPhone(_))));
    }

    #[test]
    fn new_subject_rejects_non_positive_hours() {
        assert!(NewSubject::new("Databases", 0, 2).is_err());
        assert!(NewSubject::new("Databases", 48, 0).is_err());
        assert!(NewSubject::new("Databases", 48, 2).is_ok());
    }

    #[test]
    fn new_exam_rejects_out_of_scale_grade() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert!(NewExam::new(date, 1, 1, 1).is_err());
        assert!(NewExam::new(date, 1, 1, 6).is_err());
        assert!(NewExam::new(date, 1, 1, 5).is_ok());
    }
}
