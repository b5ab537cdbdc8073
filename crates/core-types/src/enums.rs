use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of faculties the university runs. The store enforces the
/// same set with a CHECK constraint, so an unknown name is rejected twice:
/// here, before any write, and again by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Faculty {
    AgrarianManagement,
    Economics,
    InformationTechnology,
}

impl Faculty {
    /// All faculties, in the lexicographic order of their display names.
    pub const ALL: [Faculty; 3] = [
        Faculty::AgrarianManagement,
        Faculty::Economics,
        Faculty::InformationTechnology,
    ];

    /// The display name, which is also the exact string stored in the
    /// `students.faculty` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Faculty::AgrarianManagement => "Agrarian Management",
            Faculty::Economics => "Economics",
            Faculty::InformationTechnology => "Information Technology",
        }
    }
}

impl fmt::Display for Faculty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Faculty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Agrarian Management" => Ok(Faculty::AgrarianManagement),
            "Economics" => Ok(Faculty::Economics),
            "Information Technology" => Ok(Faculty::InformationTechnology),
            other => Err(CoreError::UnknownFaculty(other.to_string())),
        }
    }
}

/// An exam grade on the national 2-5 scale. 2 is a fail; there is no 1,
/// and nothing above 5 is ever recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(i16)]
pub enum Grade {
    Unsatisfactory = 2,
    Satisfactory = 3,
    Good = 4,
    Excellent = 5,
}

impl Grade {
    /// The numeric value stored in the `exams.grade` column.
    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

impl TryFrom<i16> for Grade {
    type Error = CoreError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Grade::Unsatisfactory),
            3 => Ok(Grade::Satisfactory),
            4 => Ok(Grade::Good),
            5 => Ok(Grade::Excellent),
            other => Err(CoreError::GradeOutOfRange(other)),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faculty_round_trips_through_display_name() {
        for faculty in Faculty::ALL {
            assert_eq!(faculty.as_str().parse::<Faculty>().unwrap(), faculty);
        }
    }

    #[test]
    fn unknown_faculty_is_rejected() {
        assert!("Astrology".parse::<Faculty>().is_err());
        assert!("".parse::<Faculty>().is_err());
    }

    #[test]
    fn grades_two_through_five_are_accepted() {
        for value in 2..=5 {
            assert_eq!(Grade::try_from(value).unwrap().as_i16(), value);
        }
    }

    #[test]
    fn grades_outside_the_scale_are_rejected() {
        assert!(Grade::try_from(1).is_err());
        assert!(Grade::try_from(6).is_err());
        assert!(Grade::try_from(0).is_err());
    }
}
