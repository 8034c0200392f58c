//! CSV table loading with schema and null-cell checks.
//!
//! A [`Table`] is the raw, fully-buffered content of one input file. Loading
//! enforces the parts of validation that only need a single file: the id
//! column exists and has no nulls, every required column exists and has no
//! nulls, and ids are unique. Typed interpretation of cells happens later.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{Error, Result};
use crate::key::Key;

/// Cell texts read as "no value", compared after trimming.
const NULL_MARKERS: &[&str] = &[
    "", "NA", "N/A", "NaN", "nan", "-NaN", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Columns a table must carry.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    /// Identifier column, if rows are keyed.
    pub id: Option<&'static str>,
    /// Columns that must exist and be non-null on every row.
    pub required: &'static [&'static str],
}

pub const COURSES: TableSchema = TableSchema {
    id: Some("id"),
    required: &["name", "teacher"],
};

pub const STUDENTS: TableSchema = TableSchema {
    id: Some("id"),
    required: &["name"],
};

pub const TESTS: TableSchema = TableSchema {
    id: Some("id"),
    required: &["course_id", "weight"],
};

pub const MARKS: TableSchema = TableSchema {
    id: None,
    required: &["test_id", "student_id", "mark"],
};

/// Tri-state view of one cell. A present cell may still fail typed
/// conversion, see [`Cell::number`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Present(&'a str),
    Null,
}

/// Outcome of reading a cell as a real number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Value(f64),
    WrongType,
    Null,
}

impl<'a> Cell<'a> {
    fn from_raw(raw: Option<&'a str>) -> Self {
        match raw.map(str::trim) {
            Some(text) if !NULL_MARKERS.contains(&text) => Cell::Present(text),
            _ => Cell::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Interprets the cell as a finite real number.
    pub fn number(&self) -> Numeric {
        match self {
            Cell::Null => Numeric::Null,
            Cell::Present(text) => match text.parse::<f64>() {
                Ok(v) if v.is_finite() => Numeric::Value(v),
                _ => Numeric::WrongType,
            },
        }
    }

    /// Returns the trimmed text, or an empty string for a null cell.
    pub fn text(&self) -> &'a str {
        match *self {
            Cell::Present(text) => text,
            Cell::Null => "",
        }
    }
}

/// One loaded CSV file.
#[derive(Debug)]
pub struct Table {
    path: String,
    columns: HashMap<String, usize>,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Reads `path` in full and checks it against `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceNotFound`] when the file does not exist,
    /// [`Error::MissingColumn`] / [`Error::MissingValue`] for schema faults,
    /// and [`Error::DuplicateId`] when the id column repeats a value.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>, schema: &TableSchema) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::SourceNotFound { path: display });
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);
        let headers = reader.headers().map_err(|source| Error::Read {
            path: display.clone(),
            source,
        })?;
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim().to_string(), i))
            .collect::<HashMap<_, _>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|source| Error::Read {
                path: display.clone(),
                source,
            })?;
            rows.push(record);
        }

        let table = Table {
            path: display,
            columns,
            rows,
        };
        debug!(rows = table.rows.len(), "Table read");

        if let Some(id) = schema.id {
            table.check_column(id)?;
        }
        for column in schema.required {
            table.check_column(column)?;
        }
        if let Some(id) = schema.id {
            table.check_unique(id)?;
        }

        Ok(table)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Returns the cell at `row` in `column`. Absent columns and short rows
    /// read as null.
    pub fn cell(&self, row: usize, column: &str) -> Cell<'_> {
        let raw = self
            .columns
            .get(column)
            .and_then(|&i| self.rows.get(row).and_then(|r| r.get(i)));
        Cell::from_raw(raw)
    }

    /// Parses the `column` cell of `row` as an id.
    pub fn key(&self, row: usize, column: &str) -> Key {
        Key::parse(self.cell(row, column).text())
    }

    fn check_column(&self, column: &str) -> Result<()> {
        if !self.has_column(column) {
            return Err(Error::MissingColumn {
                path: self.path.clone(),
                column: column.to_string(),
            });
        }
        match (0..self.len()).find(|&row| self.cell(row, column).is_null()) {
            Some(row) => Err(Error::MissingValue {
                path: self.path.clone(),
                column: column.to_string(),
                row,
            }),
            None => Ok(()),
        }
    }

    fn check_unique(&self, column: &str) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.len());
        for row in 0..self.len() {
            let id = self.key(row, column);
            if !seen.insert(id.clone()) {
                return Err(Error::DuplicateId {
                    path: self.path.clone(),
                    id,
                });
            }
        }
        Ok(())
    }
}
