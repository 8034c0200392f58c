//! Report card validation and aggregation.
//!
//! This module loads the four input tables, validates them against each
//! other, folds marks into weighted per-course averages, and assembles the
//! report document.

pub mod aggregate;
pub mod report;
pub mod types;
pub mod utility;
pub mod validate;

use std::path::PathBuf;

use tracing::info;

use crate::error::Result;
use crate::table::{self, Table};
use types::ReportCard;

/// Locations of the four input tables.
#[derive(Debug, Clone)]
pub struct Sources {
    pub courses: PathBuf,
    pub students: PathBuf,
    pub tests: PathBuf,
    pub marks: PathBuf,
}

/// The four input tables, fully loaded.
#[derive(Debug)]
pub struct Tables {
    pub courses: Table,
    pub students: Table,
    pub tests: Table,
    pub marks: Table,
}

impl Tables {
    /// Loads courses, students, tests and marks, in that order.
    pub fn load(sources: &Sources) -> Result<Self> {
        Ok(Self {
            courses: Table::load(&sources.courses, &table::COURSES)?,
            students: Table::load(&sources.students, &table::STUDENTS)?,
            tests: Table::load(&sources.tests, &table::TESTS)?,
            marks: Table::load(&sources.marks, &table::MARKS)?,
        })
    }
}

/// Runs the whole pipeline: load, validate, aggregate, assemble.
///
/// # Errors
///
/// Returns the first load or validation failure. Nothing is written.
#[tracing::instrument(skip_all)]
pub fn run(sources: &Sources) -> Result<ReportCard> {
    let tables = Tables::load(sources)?;
    let book = validate::validate(&tables)?;
    let students = aggregate::aggregate(&book)?;
    let report = report::assemble(students);

    info!(students = report.students.len(), "Report card assembled");
    Ok(report)
}
