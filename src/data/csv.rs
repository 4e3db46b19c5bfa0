//! CSV parsing for binary observation matrices.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ibp_noisyor_core::BinaryMatrix;

use super::DataError;

/// Load an N×D observation matrix from a CSV file.
///
/// # Arguments
/// * `path` - Path to the CSV file
/// * `has_header` - Whether the first line is a header (skip it)
///
/// # Errors
/// Returns `DataError` if the file cannot be read, a value is not `0`/`1`,
/// rows differ in length, or there are no rows.
pub fn load_observations_csv(path: &Path, has_header: bool) -> Result<BinaryMatrix, DataError> {
    let file = File::open(path)?;
    parse_observations(BufReader::new(file), has_header)
}

/// Parse an observation matrix from any buffered reader.
pub fn parse_observations<R: BufRead>(reader: R, has_header: bool) -> Result<BinaryMatrix, DataError> {
    let mut values: Vec<u8> = Vec::new();
    let mut ncols: Option<usize> = None;
    let mut nrows = 0;

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();

        if has_header && line_num == 0 {
            continue;
        }
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row_start = values.len();
        for field in line.split(',') {
            let value = match field.trim() {
                "0" => 0,
                "1" => 1,
                other => {
                    return Err(DataError::Parse {
                        line: line_num + 1,
                        message: format!("expected 0 or 1, got '{}'", other),
                    })
                }
            };
            values.push(value);
        }

        let found = values.len() - row_start;
        match ncols {
            None => ncols = Some(found),
            Some(expected) if expected != found => {
                return Err(DataError::Ragged {
                    line: line_num + 1,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
        nrows += 1;
    }

    match ncols {
        Some(ncols) => Ok(BinaryMatrix::from_row_slice(nrows, ncols, &values)),
        None => Err(DataError::Empty),
    }
}
