use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid phone number '{0}': expected +380 followed by 9 digits")]
    InvalidPhone(String),

    #[error("Course {0} is out of range (1-4)")]
    CourseOutOfRange(i16),

    #[error("Unknown faculty '{0}'")]
    UnknownFaculty(String),

    #[error("Grade {0} is out of range (2-5)")]
    GradeOutOfRange(i16),

    #[error("{0} must be positive, got {1}")]
    NonPositive(&'static str, i16),
}
