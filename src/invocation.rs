//! Positional parameter checks for the command line.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::reportcard::Sources;

const INPUT_SUFFIX: &str = ".csv";
const OUTPUT_SUFFIX: &str = ".json";

/// A checked set of input tables and an output destination.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub sources: Sources,
    pub output: PathBuf,
}

impl Invocation {
    /// Builds an invocation from exactly five parameters: courses, students,
    /// tests and marks (`.csv`), then the output document (`.json`).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInvocation`] on a wrong count or a wrong suffix.
    pub fn from_params<S: AsRef<str>>(params: &[S]) -> Result<Self> {
        let [courses, students, tests, marks, output] = params else {
            return Err(Error::InvalidInvocation);
        };

        let input = |p: &S| -> Result<PathBuf> {
            let p = p.as_ref();
            if p.ends_with(INPUT_SUFFIX) {
                Ok(PathBuf::from(p))
            } else {
                Err(Error::InvalidInvocation)
            }
        };

        let sources = Sources {
            courses: input(courses)?,
            students: input(students)?,
            tests: input(tests)?,
            marks: input(marks)?,
        };

        let output = output.as_ref();
        if !output.ends_with(OUTPUT_SUFFIX) {
            return Err(Error::InvalidInvocation);
        }

        Ok(Self {
            sources,
            output: PathBuf::from(output),
        })
    }
}

/// Parameters that look like an output document, where an invocation error
/// should be written.
pub fn error_destinations<I, S>(params: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    params
        .into_iter()
        .filter(|p| p.as_ref().ends_with(OUTPUT_SUFFIX))
        .map(|p| PathBuf::from(p.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_valid_params() {
        let inv = Invocation::from_params(&[
            "courses.csv",
            "students.csv",
            "tests.csv",
            "marks.csv",
            "out.json",
        ])
        .unwrap();
        assert_eq!(inv.sources.tests, PathBuf::from("tests.csv"));
        assert_eq!(inv.output, PathBuf::from("out.json"));
    }

    #[rstest]
    #[case::too_few(&["a.csv", "b.csv", "c.csv", "out.json"])]
    #[case::too_many(&["a.csv", "b.csv", "c.csv", "d.csv", "out.json", "x.json"])]
    #[case::input_not_csv(&["a.csv", "b.txt", "c.csv", "d.csv", "out.json"])]
    #[case::output_not_json(&["a.csv", "b.csv", "c.csv", "d.csv", "out.csv"])]
    #[case::suffix_is_case_sensitive(&["a.CSV", "b.csv", "c.csv", "d.csv", "out.json"])]
    #[case::swapped(&["out.json", "b.csv", "c.csv", "d.csv", "a.csv"])]
    fn test_invalid_params(#[case] params: &[&str]) {
        let err = Invocation::from_params(params).unwrap_err();
        assert!(matches!(err, Error::InvalidInvocation));
    }

    #[test]
    fn test_error_destinations() {
        let found = error_destinations(["a.csv", "out.json", "b.csv", "other.json"]);
        assert_eq!(
            found,
            vec![PathBuf::from("out.json"), PathBuf::from("other.json")]
        );
        assert!(error_destinations(["a.csv"]).is_empty());
    }
}
