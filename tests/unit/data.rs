//! Observation loading from files.

use std::io::Write;

use ibp_noisyor::data::{load_observations_csv, DataError};
use ibp_noisyor::{BinaryMatrix, Config, Error, NoisyOrSampler};
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn load_with_header() {
    let file = write_csv("a,b,c\n1,0,1\n0,1,1\n");
    let obs = load_observations_csv(file.path(), true).unwrap();
    assert_eq!(obs, BinaryMatrix::from_row_slice(2, 3, &[1, 0, 1, 0, 1, 1]));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_observations_csv(&dir.path().join("missing.csv"), false).unwrap_err();
    assert!(matches!(err, DataError::Io(_)));
}

#[test]
fn header_without_flag_is_parse_error() {
    let file = write_csv("a,b\n1,0\n");
    let err = load_observations_csv(file.path(), false).unwrap_err();
    assert!(matches!(err, DataError::Parse { line: 1, .. }));
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn sampler_from_csv() {
    let file = write_csv("1,0\n0,1\n1,1\n");
    let sampler = NoisyOrSampler::from_csv(Config::quick(), file.path(), false).unwrap();
    assert_eq!(sampler.observations().shape(), (3, 2));
}

#[test]
fn sampler_from_ragged_csv_fails() {
    let file = write_csv("1,0\n0,1,1\n");
    let err = NoisyOrSampler::from_csv(Config::quick(), file.path(), false).unwrap_err();
    assert!(matches!(err, Error::Data(DataError::Ragged { line: 2, .. })));
}
