use crate::error::{Error, Result};
use crate::key::Key;
use crate::reportcard::types::{CourseReport, Gradebook, StudentReport};
use crate::reportcard::utility::{clamp_average, mean, round2, weighted};
use std::collections::HashMap;
use tracing::debug;

/// Folds every mark of a validated [`Gradebook`] into per-student course
/// averages and finalizes them.
///
/// Students come back in student-table order. Each student's courses appear
/// in the order their first mark was seen, and each entry is the student's
/// own copy of the course record.
#[tracing::instrument(skip_all, fields(marks = book.marks().len()))]
pub fn aggregate(book: &Gradebook) -> Result<Vec<StudentReport>> {
    let tests: HashMap<&Key, (&Key, f64)> = book
        .tests()
        .iter()
        .map(|t| (&t.id, (&t.course_id, t.weight)))
        .collect();

    let mut students: Vec<StudentReport> =
        book.students().iter().map(StudentReport::new).collect();

    for mark in book.marks() {
        let &(course_id, weight) = tests
            .get(&mark.test_id)
            .ok_or_else(|| invariant("test", &mark.test_id))?;
        let position = book
            .student_position(&mark.student_id)
            .ok_or_else(|| invariant("student", &mark.student_id))?;
        let grade = weighted(mark.mark, weight);

        let student = &mut students[position];
        match student.courses.iter_mut().find(|c| &c.id == course_id) {
            Some(entry) => entry.course_average += grade,
            None => {
                let course = book
                    .course(course_id)
                    .ok_or_else(|| invariant("course", course_id))?;
                student.courses.push(CourseReport::from_course(course, grade));
            }
        }
    }

    for student in &mut students {
        finalize(student);
    }

    debug!(students = students.len(), "Marks aggregated");
    Ok(students)
}

/// Clamps, averages and rounds a student's accumulated course sums.
///
/// The total is the mean of the clamped, unrounded course averages. A student
/// without courses keeps a total of 0.0.
pub fn finalize(student: &mut StudentReport) {
    if student.courses.is_empty() {
        return;
    }

    let mut clamped = Vec::with_capacity(student.courses.len());
    for course in &mut student.courses {
        let average = clamp_average(course.course_average);
        clamped.push(average);
        course.course_average = round2(average);
    }
    student.total_average = round2(mean(&clamped));
}

fn invariant(table: &str, id: &Key) -> Error {
    Error::Invariant(format!("{table} {id} missing after validation"))
}
