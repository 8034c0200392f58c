use std::fs;
use std::path::{Path, PathBuf};

use reportcards::ErrorKind;
use reportcards::output::render_report;
use reportcards::reportcard::{Sources, run};
use tempfile::TempDir;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/school")
}

fn sources_in(dir: &Path) -> Sources {
    Sources {
        courses: dir.join("courses.csv"),
        students: dir.join("students.csv"),
        tests: dir.join("tests.csv"),
        marks: dir.join("marks.csv"),
    }
}

/// Copies the school fixture into a temp dir, replacing the named files.
fn school_with(overrides: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in ["courses.csv", "students.csv", "tests.csv", "marks.csv"] {
        fs::copy(fixture_dir().join(name), dir.path().join(name)).unwrap();
    }
    for (name, content) in overrides {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

#[test]
fn test_full_pipeline() {
    let report = run(&sources_in(&fixture_dir())).expect("Failed to build report");

    let actual = serde_json::to_value(&report).unwrap();
    let expected: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(fixture_dir().join("expected.json")).unwrap())
            .unwrap();
    assert_eq!(actual, expected);
}

#[test]
fn test_identical_inputs_give_identical_bytes() {
    let sources = sources_in(&fixture_dir());
    let first = render_report(&run(&sources).unwrap(), false).unwrap();
    let second = render_report(&run(&sources).unwrap(), false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_two_test_course_scenario() {
    let dir = school_with(&[
        ("courses.csv", "id,name,teacher\n1,C1,T\n"),
        ("students.csv", "id,name\n1,S1\n"),
        ("tests.csv", "id,course_id,weight\n1,1,60\n2,1,40\n"),
        ("marks.csv", "test_id,student_id,mark\n1,1,80\n2,1,90\n"),
    ]);

    let report = run(&sources_in(dir.path())).unwrap();
    let student = &report.students[0];
    assert_eq!(student.courses[0].course_average, 84.0);
    assert_eq!(student.total_average, 84.0);
}

#[test]
fn test_overshoot_reported_as_100() {
    let dir = school_with(&[
        ("courses.csv", "id,name,teacher\n1,C1,T\n"),
        ("students.csv", "id,name\n1,S1\n"),
        ("tests.csv", "id,course_id,weight\n1,1,50\n2,1,50\n"),
        ("marks.csv", "test_id,student_id,mark\n1,1,120\n2,1,130\n"),
    ]);

    let report = run(&sources_in(dir.path())).unwrap();
    assert_eq!(report.students[0].courses[0].course_average, 100.0);
    assert_eq!(report.students[0].total_average, 100.0);
}

#[test]
fn test_exact_half_average_rounds_to_even() {
    let dir = school_with(&[
        ("courses.csv", "id,name,teacher\n1,C,T\n"),
        ("students.csv", "id,name\n1,S1\n"),
        ("tests.csv", "id,course_id,weight\n1,1,12.5\n2,1,87.5\n"),
        ("marks.csv", "test_id,student_id,mark\n1,1,85\n2,1,84\n"),
    ]);

    // 10.625 + 73.5 = 84.125 exactly
    let report = run(&sources_in(dir.path())).unwrap();
    assert_eq!(report.students[0].courses[0].course_average, 84.12);
    assert_eq!(report.students[0].total_average, 84.12);
}

#[test]
fn test_weights_summing_to_90() {
    let dir = school_with(&[(
        "tests.csv",
        "id,course_id,weight\n1,1,10\n2,1,30\n3,1,50\n4,2,40\n5,2,60\n6,3,90\n7,3,10\n",
    )]);

    let err = run(&sources_in(dir.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::WeightSumViolation);
}

#[test]
fn test_mark_for_unknown_test() {
    let dir = school_with(&[("marks.csv", "test_id,student_id,mark\n1,1,78\n42,1,50\n")]);

    let err = run(&sources_in(dir.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReferentialViolation);
}

#[test]
fn test_course_with_zero_tests() {
    let dir = school_with(&[(
        "courses.csv",
        "id,name,teacher\n1,Biology,Mr. D\n2,History,Mrs. P\n3,Math,Mrs. C\n4,Art,Ms. F\n",
    )]);

    let err = run(&sources_in(dir.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::WeightSumViolation);
}

#[test]
fn test_missing_source() {
    let dir = school_with(&[]);
    fs::remove_file(dir.path().join("students.csv")).unwrap();

    let err = run(&sources_in(dir.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SourceNotFound);
}

#[test]
fn test_missing_column_and_value() {
    let dir = school_with(&[("students.csv", "id,fullname\n1,A\n")]);
    let err = run(&sources_in(dir.path())).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaViolation);
    assert!(err.to_string().starts_with("Missing columns in file"));

    let dir = school_with(&[("courses.csv", "id,name,teacher\n1,Biology,\n")]);
    let err = run(&sources_in(dir.path())).unwrap_err();
    assert!(err.to_string().starts_with("Missing value in"));
}

#[test]
fn test_extra_columns_and_text_ids() {
    let dir = school_with(&[
        ("courses.csv", "id,name,teacher,room\nbio,Biology,Mr. D,12\n"),
        ("students.csv", "name,id,grade\nAda,s1,9\n"),
        ("tests.csv", "id,course_id,weight\nt1,bio,100\n"),
        ("marks.csv", "mark,student_id,test_id\n88.5,s1,t1\n"),
    ]);

    let report = run(&sources_in(dir.path())).unwrap();
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["students"][0]["id"], "s1");
    assert_eq!(value["students"][0]["courses"][0]["id"], "bio");
    assert_eq!(value["students"][0]["courses"][0]["courseAverage"], 88.5);
}
