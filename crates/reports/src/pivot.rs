//! The cross-tab builder: reshapes the long-format "one row per recorded
//! grade" feed into a wide matrix with students as rows and subjects as
//! columns.
//!
//! Algorithm:
//! 1. One linear pass over the input builds the set of distinct subject
//!    names and a per-student map of subject -> grade.
//! 2. Columns are the two fixed ones (student id, student name) followed by
//!    the subjects in lexicographic order.
//! 3. Rows are emitted per student in ascending id order; a subject the
//!    student never sat an exam in yields an empty cell, not a zero.
//!
//! Both levels use ordered maps, so the output order never depends on
//! insertion order.

use crate::table::{Cell, Report};
use core_types::GradeTriple;
use std::collections::{BTreeMap, BTreeSet};

/// Grades for one student, keyed by subject name.
struct StudentGrades {
    name: String,
    grades: BTreeMap<String, i16>,
}

/// Builds the wide-format grade matrix from the long-format feed.
///
/// A student with zero recorded exams never occurs in the feed (it comes
/// from an inner join over the exam table) and is therefore absent from the
/// output as well. That exclusion is a documented property of this report,
/// not an oversight.
pub fn build_cross_tab(title: impl Into<String>, triples: &[GradeTriple]) -> Report {
    let mut subjects: BTreeSet<&str> = BTreeSet::new();
    let mut students: BTreeMap<i32, StudentGrades> = BTreeMap::new();

    for triple in triples {
        subjects.insert(&triple.subject);
        let entry = students.entry(triple.student_id).or_insert_with(|| StudentGrades {
            // First-seen display name wins for a given id.
            name: triple.student_name.clone(),
            grades: BTreeMap::new(),
        });
        entry.grades.insert(triple.subject.clone(), triple.grade);
    }

    let mut headers: Vec<&str> = vec!["student_id", "student_name"];
    headers.extend(subjects.iter().copied());
    let mut report = Report::new(title, &headers);

    for (student_id, student) in &students {
        let mut row: Vec<Cell> = Vec::with_capacity(2 + subjects.len());
        row.push((*student_id).into());
        row.push(student.name.as_str().into());
        for subject in &subjects {
            row.push(student.grades.get(*subject).copied().into());
        }
        report.push_row(row);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(student_id: i32, name: &str, subject: &str, grade: i16) -> GradeTriple {
        GradeTriple {
            student_id,
            student_name: name.to_string(),
            subject: subject.to_string(),
            grade,
        }
    }

    #[test]
    fn pivots_the_reference_example() {
        let triples = [
            triple(1, "A", "Math", 5),
            triple(1, "A", "DB", 4),
            triple(2, "B", "Math", 3),
        ];
        let report = build_cross_tab("cross-tab", &triples);

        assert_eq!(report.headers, vec!["student_id", "student_name", "DB", "Math"]);
        assert_eq!(
            report.rows,
            vec![
                vec![Cell::Int(1), Cell::Text("A".into()), Cell::Int(4), Cell::Int(5)],
                vec![Cell::Int(2), Cell::Text("B".into()), Cell::Empty, Cell::Int(3)],
            ]
        );
    }

    #[test]
    fn missing_grade_renders_blank_not_zero() {
        let triples = [triple(2, "B", "Math", 3), triple(1, "A", "DB", 4)];
        let report = build_cross_tab("cross-tab", &triples);

        // Row order is by student id even though the feed was not sorted.
        assert_eq!(report.rows[0][0], Cell::Int(1));
        assert_eq!(report.rows[0][2].to_string(), "");
        assert_eq!(report.rows[1][1], Cell::Text("B".into()));
    }

    #[test]
    fn subject_columns_are_lexicographic() {
        let triples = [
            triple(1, "A", "Programming", 5),
            triple(1, "A", "Databases", 4),
            triple(1, "A", "Enterprise Economics", 3),
        ];
        let report = build_cross_tab("cross-tab", &triples);
        assert_eq!(
            report.headers[2..],
            ["Databases", "Enterprise Economics", "Programming"]
        );
    }

    #[test]
    fn first_seen_display_name_is_kept() {
        let triples = [
            triple(1, "Artiukhov Myroslav", "Databases", 4),
            triple(1, "Someone Else", "Programming", 5),
        ];
        let report = build_cross_tab("cross-tab", &triples);
        assert_eq!(report.rows[0][1], Cell::Text("Artiukhov Myroslav".into()));
    }

    #[test]
    fn empty_feed_yields_fixed_columns_and_no_rows() {
        let report = build_cross_tab("cross-tab", &[]);
        assert_eq!(report.headers, vec!["student_id", "student_name"]);
        assert!(report.rows.is_empty());
    }
}
