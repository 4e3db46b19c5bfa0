//! Loading observation matrices from files.
//!
//! # Format
//!
//! One observation per line, one comma-separated `0`/`1` value per
//! dimension. Blank lines and lines starting with `#` are skipped; an
//! optional first line is a header.
//!
//! ```csv
//! # four observations over three dimensions
//! 1,0,1
//! 0,1,1
//! 1,1,0
//! 0,0,1
//! ```

mod csv;

pub use csv::{load_observations_csv, parse_observations};

use std::fmt;

/// Errors that can occur during data loading.
#[derive(Debug)]
pub enum DataError {
    /// IO error reading file.
    Io(std::io::Error),

    /// A value is not `0` or `1`.
    Parse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Description of the parse error.
        message: String,
    },

    /// A row has a different number of columns than the first row.
    Ragged {
        /// Line number of the offending row (1-indexed).
        line: usize,
        /// Columns in the first data row.
        expected: usize,
        /// Columns in this row.
        found: usize,
    },

    /// The input holds no data rows.
    Empty,
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "IO error: {}", e),
            DataError::Parse { line, message } => {
                write!(f, "Parse error at line {}: {}", line, message)
            }
            DataError::Ragged { line, expected, found } => write!(
                f,
                "Row at line {} has {} columns, expected {}",
                line, found, expected
            ),
            DataError::Empty => write!(f, "No observations found"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e)
    }
}
