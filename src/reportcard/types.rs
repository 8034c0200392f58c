//! Data types used by the report card pipeline.

use serde::Serialize;
use std::collections::HashMap;

use crate::key::Key;

/// A row of the course table.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: Key,
    pub name: String,
    pub teacher: String,
}

/// A row of the student table.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: Key,
    pub name: String,
}

/// A row of the test table.
#[derive(Debug, Clone, PartialEq)]
pub struct Test {
    pub id: Key,
    pub course_id: Key,
    pub weight: f64,
}

/// A row of the marks table.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub test_id: Key,
    pub student_id: Key,
    pub mark: f64,
}

/// Validated reference data for one run.
///
/// Built once by [`validate`](crate::reportcard::validate::validate) and only
/// read afterwards. Vectors keep input row order; the indexes map ids to
/// positions in them.
#[derive(Debug)]
pub struct Gradebook {
    courses: Vec<Course>,
    students: Vec<Student>,
    tests: Vec<Test>,
    marks: Vec<Mark>,
    course_index: HashMap<Key, usize>,
    student_index: HashMap<Key, usize>,
    test_index: HashMap<Key, usize>,
}

impl Gradebook {
    pub fn new(
        courses: Vec<Course>,
        students: Vec<Student>,
        tests: Vec<Test>,
        marks: Vec<Mark>,
    ) -> Self {
        let course_index = courses
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        let student_index = students
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        let test_index = tests
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.clone(), i))
            .collect();

        Self {
            courses,
            students,
            tests,
            marks,
            course_index,
            student_index,
            test_index,
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn course(&self, id: &Key) -> Option<&Course> {
        self.course_index.get(id).map(|&i| &self.courses[i])
    }

    pub fn test(&self, id: &Key) -> Option<&Test> {
        self.test_index.get(id).map(|&i| &self.tests[i])
    }

    /// Position of a student in [`Gradebook::students`].
    pub fn student_position(&self, id: &Key) -> Option<usize> {
        self.student_index.get(id).copied()
    }
}

/// A student's own copy of a course, carrying that student's average.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseReport {
    pub id: Key,
    pub name: String,
    pub teacher: String,
    pub course_average: f64,
}

impl CourseReport {
    /// Copies `course` with a starting average.
    pub fn from_course(course: &Course, course_average: f64) -> Self {
        Self {
            id: course.id.clone(),
            name: course.name.clone(),
            teacher: course.teacher.clone(),
            course_average,
        }
    }
}

/// A student with their per-course averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReport {
    pub id: Key,
    pub name: String,
    pub total_average: f64,
    pub courses: Vec<CourseReport>,
}

impl StudentReport {
    pub fn new(student: &Student) -> Self {
        Self {
            id: student.id.clone(),
            name: student.name.clone(),
            total_average: 0.0,
            courses: Vec::new(),
        }
    }
}

/// Top-level success document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCard {
    pub students: Vec<StudentReport>,
}

/// Top-level failure document.
#[derive(Debug, Serialize)]
pub struct ErrorDocument<'a> {
    pub error: &'a str,
}
