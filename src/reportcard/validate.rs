//! Cross-table validation.
//!
//! Single-file checks (columns, nulls, unique ids) already ran in
//! [`Table::load`]. This stage checks numbers, then foreign keys, then
//! per-course weight totals, and stops at the first failure.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{Error, Quantity, Reference, Result};
use crate::key::Key;
use crate::reportcard::Tables;
use crate::reportcard::types::{Course, Gradebook, Mark, Student, Test};
use crate::table::{Numeric, Table};

/// Required total of a course's test weights. Compared exactly.
pub const WEIGHT_TOTAL: f64 = 100.0;

/// Checks the loaded tables against each other and returns typed reference
/// data.
///
/// # Errors
///
/// The first of: a non-numeric or negative weight, a non-numeric or negative
/// mark, a test pointing at an unknown course, a mark pointing at an unknown
/// student or test, a course whose weights do not total 100.
#[tracing::instrument(skip_all)]
pub fn validate(tables: &Tables) -> Result<Gradebook> {
    let weights = numbers(&tables.tests, "weight", Quantity::Weights)?;
    let scores = numbers(&tables.marks, "mark", Quantity::Marks)?;

    let courses = (0..tables.courses.len())
        .map(|row| Course {
            id: tables.courses.key(row, "id"),
            name: tables.courses.cell(row, "name").text().to_string(),
            teacher: tables.courses.cell(row, "teacher").text().to_string(),
        })
        .collect();
    let students = (0..tables.students.len())
        .map(|row| Student {
            id: tables.students.key(row, "id"),
            name: tables.students.cell(row, "name").text().to_string(),
        })
        .collect();
    let tests = weights
        .into_iter()
        .enumerate()
        .map(|(row, weight)| Test {
            id: tables.tests.key(row, "id"),
            course_id: tables.tests.key(row, "course_id"),
            weight,
        })
        .collect();
    let marks = scores
        .into_iter()
        .enumerate()
        .map(|(row, mark)| Mark {
            test_id: tables.marks.key(row, "test_id"),
            student_id: tables.marks.key(row, "student_id"),
            mark,
        })
        .collect();

    let book = Gradebook::new(courses, students, tests, marks);

    check_references(&book, tables)?;
    check_weight_totals(&book)?;

    debug!(
        courses = book.courses().len(),
        students = book.students().len(),
        tests = book.tests().len(),
        marks = book.marks().len(),
        "Gradebook validated"
    );
    Ok(book)
}

/// Reads every `column` cell of `table` as a non-negative number.
fn numbers(table: &Table, column: &str, quantity: Quantity) -> Result<Vec<f64>> {
    (0..table.len())
        .map(|row| match table.cell(row, column).number() {
            Numeric::Value(value) if value < 0.0 => Err(Error::Negative { quantity, value }),
            Numeric::Value(value) => Ok(value),
            Numeric::WrongType => Err(Error::NotANumber {
                quantity,
                value: table.cell(row, column).text().to_string(),
            }),
            Numeric::Null => Err(Error::MissingValue {
                path: table.path().to_string(),
                column: column.to_string(),
                row,
            }),
        })
        .collect()
}

fn check_references(book: &Gradebook, tables: &Tables) -> Result<()> {
    let unknown = |reference, path: &str, id: &Key| Error::UnknownReference {
        reference,
        path: path.to_string(),
        id: id.clone(),
    };

    // Bad course ids are reported against the course table.
    for test in book.tests() {
        if book.course(&test.course_id).is_none() {
            return Err(unknown(
                Reference::Course,
                tables.courses.path(),
                &test.course_id,
            ));
        }
    }

    for mark in book.marks() {
        if book.student_position(&mark.student_id).is_none() {
            return Err(unknown(
                Reference::Student,
                tables.marks.path(),
                &mark.student_id,
            ));
        }
        if book.test(&mark.test_id).is_none() {
            return Err(unknown(Reference::Test, tables.marks.path(), &mark.test_id));
        }
    }

    Ok(())
}

fn check_weight_totals(book: &Gradebook) -> Result<()> {
    let mut totals: HashMap<&Key, f64> = book.courses().iter().map(|c| (&c.id, 0.0)).collect();
    for test in book.tests() {
        *totals.entry(&test.course_id).or_default() += test.weight;
    }

    for course in book.courses() {
        let total = totals.get(&course.id).copied().unwrap_or_default();
        if total != WEIGHT_TOTAL {
            warn!(course_id = %course.id, total, "Course weights do not total 100");
            return Err(Error::WeightSum {
                course_id: course.id.clone(),
                total,
            });
        }
    }

    Ok(())
}
