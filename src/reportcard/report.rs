use crate::reportcard::types::{ReportCard, StudentReport};

/// Wraps finalized students into the output document.
///
/// No filtering or reordering: every student appears once, in the order the
/// aggregator returned them.
pub fn assemble(students: Vec<StudentReport>) -> ReportCard {
    ReportCard { students }
}
