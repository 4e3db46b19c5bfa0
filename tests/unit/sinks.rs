//! Sample recording during a run.

use std::fs;
use std::io;

use ibp_noisyor::output::{MatrixKind, MemorySink, RowMajorWriter, SampleSink};
use ibp_noisyor::{BinaryMatrix, Config, NoisyOrSampler};

fn obs() -> BinaryMatrix {
    BinaryMatrix::from_row_slice(3, 2, &[1, 0, 0, 1, 1, 1])
}

/// A sink whose every write fails.
struct BrokenSink;

impl SampleSink for BrokenSink {
    fn record(&mut self, _: MatrixKind, _: usize, _: &BinaryMatrix) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }
}

#[test]
fn records_after_burn_in_with_thinning() {
    let config = Config::new().iterations(20).burn_in(5).thinning(5);
    let mut sampler = NoisyOrSampler::new(config, obs()).unwrap();
    let mut sink = MemorySink::new();
    let summary = sampler.run_with_sink(&mut sink).unwrap();

    let iterations: Vec<usize> = sink
        .samples
        .iter()
        .filter(|(kind, _, _)| *kind == MatrixKind::Images)
        .map(|(_, i, _)| *i)
        .collect();
    assert_eq!(iterations, vec![5, 10, 15]);
    assert_eq!(summary.samples_recorded, 3);
    assert_eq!(sink.samples.len(), 6);
}

#[test]
fn images_recorded_before_ownership() {
    let mut sampler = NoisyOrSampler::new(Config::new().iterations(3), obs()).unwrap();
    let mut sink = MemorySink::new();
    sampler.run_with_sink(&mut sink).unwrap();

    for pair in sink.samples.chunks(2) {
        assert_eq!(pair[0].0, MatrixKind::Images);
        assert_eq!(pair[1].0, MatrixKind::Ownership);
        assert_eq!(pair[0].1, pair[1].1);
        // rows(Y) == cols(Z)
        assert_eq!(pair[0].2.nrows(), pair[1].2.ncols());
    }
}

#[test]
fn row_major_file_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("samples.txt");

    let mut sampler = NoisyOrSampler::new(Config::new().iterations(4), obs()).unwrap();
    let mut sink = RowMajorWriter::create(&path).unwrap();
    sampler.run_with_sink(&mut sink).unwrap();
    drop(sink);

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 8);

    for pair in lines.chunks(2) {
        let y: Vec<usize> = pair[0].split(',').map(|v| v.parse().unwrap()).collect();
        let z: Vec<usize> = pair[1].split(',').map(|v| v.parse().unwrap()).collect();
        // Y line: D columns, K*D values; Z line: K columns, N*K values
        assert_eq!(y[0], 2);
        let k = z[0];
        assert_eq!(y.len() - 1, k * 2);
        assert_eq!(z.len() - 1, 3 * k);
        assert!(y[1..].iter().chain(&z[1..]).all(|&v| v <= 1));
    }
}

#[test]
fn sink_failures_do_not_abort() {
    let mut sampler = NoisyOrSampler::new(Config::new().iterations(5), obs()).unwrap();
    let summary = sampler.run_with_sink(&mut BrokenSink).unwrap();
    assert!(summary.status.is_completed());
    assert_eq!(summary.iterations_run, 5);
    assert_eq!(summary.sink_failures, 10);
}
